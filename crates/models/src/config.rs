//! Loading parameters from TOML.
//!
//! Configuration files hold plain SI numbers. Any field left out takes its
//! value from the default parameters, so a file only needs to list what it
//! changes:
//!
//! ```
//! use driveline_models::{DrivetrainParameters, Inertia};
//!
//! let parameters: DrivetrainParameters = "
//!     [wheel]
//!     inertia = 3.0
//! ".parse().unwrap();
//!
//! assert_eq!(parameters.wheel.inertia, Inertia::from_si(3.0).unwrap());
//! assert_eq!(parameters.engine, DrivetrainParameters::default().engine);
//! ```

use std::str::FromStr;

use driveline_core::constraint::{ConstraintError, NonNegative};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uom::si::{angular_velocity::radian_per_second, f64::Torque, torque::newton_meter};

use crate::{
    Clutch, CoulombFriction, DrivetrainParameters, Engine, FlywheelParameters, GearPair,
    Inertia, ViscousFriction, Wheel,
};

/// Errors that can occur while loading a configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to parse configuration")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for `{field}`")]
    Invalid {
        field: &'static str,
        #[source]
        source: ConstraintError,
    },
}

/// Geared flywheel parameters as written in a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlywheelConfig {
    /// kg·m²
    pub motor_inertia: f64,
    /// kg·m²
    pub flywheel_inertia: f64,
    /// Input speed over output speed.
    pub gear_ratio: f64,
    /// N·m per rad/s
    pub friction_coefficient: f64,
    /// N·m
    pub minimum_friction_torque: f64,
}

/// Clutched drivetrain parameters as written in a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DrivetrainConfig {
    pub engine: EngineConfig,
    pub wheel: WheelConfig,
    pub clutch: ClutchConfig,
}

/// The `[engine]` table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub inertia: f64,
    pub friction_torque: f64,
    pub torque_rating: f64,
}

/// The `[wheel]` table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WheelConfig {
    pub inertia: f64,
    pub friction_torque: f64,
}

/// The `[clutch]` table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClutchConfig {
    pub static_coefficient: f64,
    pub dynamic_coefficient: f64,
    pub slip_threshold: f64,
    pub max_torque: f64,
}

impl From<&FlywheelParameters> for FlywheelConfig {
    fn from(parameters: &FlywheelParameters) -> Self {
        Self {
            motor_inertia: parameters.motor_inertia.si(),
            flywheel_inertia: parameters.flywheel_inertia.si(),
            gear_ratio: parameters.gear.ratio(),
            friction_coefficient: parameters.friction.coefficient,
            minimum_friction_torque: parameters.friction.minimum_torque.get::<newton_meter>(),
        }
    }
}

impl TryFrom<FlywheelConfig> for FlywheelParameters {
    type Error = ConfigError;

    fn try_from(config: FlywheelConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            motor_inertia: inertia("motor_inertia", config.motor_inertia)?,
            flywheel_inertia: inertia("flywheel_inertia", config.flywheel_inertia)?,
            gear: GearPair::new(config.gear_ratio).map_err(invalid("gear_ratio"))?,
            friction: ViscousFriction::from_si(
                non_negative("friction_coefficient", config.friction_coefficient)?,
                non_negative("minimum_friction_torque", config.minimum_friction_torque)?,
            ),
        })
    }
}

impl From<&DrivetrainParameters> for DrivetrainConfig {
    fn from(parameters: &DrivetrainParameters) -> Self {
        let DrivetrainParameters {
            engine,
            wheel,
            clutch,
        } = parameters;

        Self {
            engine: EngineConfig {
                inertia: engine.inertia.si(),
                friction_torque: engine.friction.torque.get::<newton_meter>(),
                torque_rating: engine.torque_rating.get::<newton_meter>(),
            },
            wheel: WheelConfig {
                inertia: wheel.inertia.si(),
                friction_torque: wheel.friction.torque.get::<newton_meter>(),
            },
            clutch: ClutchConfig {
                static_coefficient: clutch.static_coefficient,
                dynamic_coefficient: clutch.dynamic_coefficient,
                slip_threshold: clutch.slip_threshold.get::<radian_per_second>(),
                max_torque: clutch.max_torque.get::<newton_meter>(),
            },
        }
    }
}

impl TryFrom<DrivetrainConfig> for DrivetrainParameters {
    type Error = ConfigError;

    fn try_from(config: DrivetrainConfig) -> Result<Self, Self::Error> {
        let DrivetrainConfig {
            engine,
            wheel,
            clutch,
        } = config;

        let engine = Engine {
            inertia: inertia("engine.inertia", engine.inertia)?,
            friction: CoulombFriction::from_si(non_negative(
                "engine.friction_torque",
                engine.friction_torque,
            )?),
            torque_rating: Torque::new::<newton_meter>(non_negative(
                "engine.torque_rating",
                engine.torque_rating,
            )?),
        };

        let wheel = Wheel {
            inertia: inertia("wheel.inertia", wheel.inertia)?,
            friction: CoulombFriction::from_si(non_negative(
                "wheel.friction_torque",
                wheel.friction_torque,
            )?),
        };

        let clutch = Clutch::from_si(
            non_negative("clutch.static_coefficient", clutch.static_coefficient)?,
            non_negative("clutch.dynamic_coefficient", clutch.dynamic_coefficient)?,
            non_negative("clutch.slip_threshold", clutch.slip_threshold)?,
            non_negative("clutch.max_torque", clutch.max_torque)?,
        );

        Ok(Self {
            engine,
            wheel,
            clutch,
        })
    }
}

impl Default for FlywheelConfig {
    fn default() -> Self {
        Self::from(&FlywheelParameters::default())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        DrivetrainConfig::from(&DrivetrainParameters::default()).engine
    }
}

impl Default for WheelConfig {
    fn default() -> Self {
        DrivetrainConfig::from(&DrivetrainParameters::default()).wheel
    }
}

impl Default for ClutchConfig {
    fn default() -> Self {
        DrivetrainConfig::from(&DrivetrainParameters::default()).clutch
    }
}

impl FromStr for FlywheelParameters {
    type Err = ConfigError;

    /// Parses and validates a flywheel configuration in TOML.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str::<FlywheelConfig>(s)?.try_into()
    }
}

impl FromStr for DrivetrainParameters {
    type Err = ConfigError;

    /// Parses and validates a drivetrain configuration in TOML.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str::<DrivetrainConfig>(s)?.try_into()
    }
}

fn invalid(field: &'static str) -> impl FnOnce(ConstraintError) -> ConfigError {
    move |source| ConfigError::Invalid { field, source }
}

fn inertia(field: &'static str, value: f64) -> Result<Inertia, ConfigError> {
    Inertia::from_si(value).map_err(invalid(field))
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_infinite() {
        return Err(invalid(field)(ConstraintError::Infinite));
    }
    NonNegative::new(value)
        .map(|value| value.into_inner())
        .map_err(invalid(field))
}
