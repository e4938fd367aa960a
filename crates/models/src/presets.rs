//! Parameter presets based on typical vehicle hardware.
//!
//! Inertia values are approximate figures for complete engines:
//!
//! | preset        | motor (kg·m²) | flywheel (kg·m²) | total |
//! |---------------|---------------|------------------|-------|
//! | `sedan_light` | 0.4           | 1.2              | 1.6   |
//! | `sedan`       | 0.5           | 1.5              | 2.0   |
//! | `muscle_car`  | 0.6           | 1.8              | 2.4   |
//! | `cabrio`      | 0.3           | 1.0              | 1.3   |
//!
//! All flywheel presets share the bench rig's 2:1 gear and friction.

use uom::si::{f64::Torque, torque::newton_meter};

use crate::{
    Clutch, CoulombFriction, DrivetrainParameters, Engine, FlywheelParameters, GearPair,
    Inertia, ViscousFriction, Wheel,
};

/// A small bench rig: 0.05 kg·m² motor, 0.1 kg·m² flywheel, 2:1 gear.
#[must_use]
pub fn bench_rig() -> FlywheelParameters {
    flywheel(0.05, 0.1)
}

/// Light sedan engine.
#[must_use]
pub fn sedan_light() -> FlywheelParameters {
    flywheel(0.4, 1.2)
}

/// Mid-size sedan engine.
#[must_use]
pub fn sedan() -> FlywheelParameters {
    flywheel(0.5, 1.5)
}

/// Muscle car engine with a heavy crankshaft and flywheel.
#[must_use]
pub fn muscle_car() -> FlywheelParameters {
    flywheel(0.6, 1.8)
}

/// Convertible with a light crankshaft and flywheel.
#[must_use]
pub fn cabrio() -> FlywheelParameters {
    flywheel(0.3, 1.0)
}

/// A light engine driving a road wheel through a firm clutch.
#[must_use]
pub fn road_car() -> DrivetrainParameters {
    DrivetrainParameters {
        engine: Engine {
            inertia: inertia(0.2),
            friction: CoulombFriction::from_si(20.0),
            torque_rating: Torque::new::<newton_meter>(300.0),
        },
        wheel: Wheel {
            inertia: inertia(1.5),
            friction: CoulombFriction::from_si(50.0),
        },
        clutch: Clutch::default(),
    }
}

fn flywheel(motor: f64, flywheel: f64) -> FlywheelParameters {
    FlywheelParameters {
        motor_inertia: inertia(motor),
        flywheel_inertia: inertia(flywheel),
        gear: GearPair::new_unchecked(2.0),
        friction: ViscousFriction::from_si(0.05, 0.01),
    }
}

fn inertia(value: f64) -> Inertia {
    Inertia::new_unchecked(value)
}
