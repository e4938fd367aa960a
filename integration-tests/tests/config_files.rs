use driveline_core::constraint::ConstraintError;
use driveline_models::{
    ConfigError, DrivetrainParameters, FlywheelParameters, Inertia,
    config::{DrivetrainConfig, FlywheelConfig},
    presets,
};

const BENCH_RIG: &str = include_str!("../fixtures/bench_rig.toml");
const ROAD_CAR: &str = include_str!("../fixtures/road_car.toml");
const HEAVY_WHEEL: &str = include_str!("../fixtures/heavy_wheel.toml");
const REVERSING_GEAR: &str = include_str!("../fixtures/reversing_gear.toml");
const BROKEN_CLUTCH: &str = include_str!("../fixtures/broken_clutch.toml");

#[test]
fn fixtures_match_the_presets() {
    assert_eq!(
        BENCH_RIG.parse::<FlywheelParameters>().unwrap(),
        presets::bench_rig()
    );
    assert_eq!(
        ROAD_CAR.parse::<DrivetrainParameters>().unwrap(),
        presets::road_car()
    );
}

#[test]
fn partial_file_overrides_only_what_it_lists() {
    let parameters: DrivetrainParameters = HEAVY_WHEEL.parse().unwrap();
    let defaults = DrivetrainParameters::default();

    assert_eq!(parameters.wheel.inertia, Inertia::from_si(6.0).unwrap());
    assert_eq!(parameters.wheel.friction, defaults.wheel.friction);
    assert_eq!(parameters.engine, defaults.engine);
    assert_eq!(parameters.clutch, defaults.clutch);
}

#[test]
fn reversing_gear_is_accepted() {
    let parameters: FlywheelParameters = REVERSING_GEAR.parse().unwrap();

    assert_eq!(parameters.gear.ratio(), -3.0);
    assert_eq!(parameters.motor_inertia, presets::sedan().motor_inertia);
    assert_eq!(parameters.friction, presets::bench_rig().friction);
}

#[test]
fn invalid_values_name_their_field() {
    let error = BROKEN_CLUTCH.parse::<DrivetrainParameters>().unwrap_err();

    match error {
        ConfigError::Invalid { field, source } => {
            assert_eq!(field, "clutch.max_torque");
            assert_eq!(source, ConstraintError::Negative);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn infinite_values_are_rejected() {
    for file in ["gear_ratio = inf", "motor_inertia = inf", "gear_ratio = -inf"] {
        assert!(matches!(
            file.parse::<FlywheelParameters>(),
            Err(ConfigError::Invalid {
                source: ConstraintError::Infinite,
                ..
            })
        ));
    }

    let error = "[engine]\ntorque_rating = inf"
        .parse::<DrivetrainParameters>()
        .unwrap_err();
    assert!(matches!(
        error,
        ConfigError::Invalid {
            field: "engine.torque_rating",
            source: ConstraintError::Infinite,
        }
    ));
}

#[test]
fn written_configs_load_back() {
    let written = toml::to_string(&DrivetrainConfig::from(&presets::road_car())).unwrap();
    assert_eq!(
        written.parse::<DrivetrainParameters>().unwrap(),
        presets::road_car()
    );

    let written = toml::to_string(&FlywheelConfig::from(&presets::muscle_car())).unwrap();
    assert_eq!(
        written.parse::<FlywheelParameters>().unwrap(),
        presets::muscle_car()
    );
}
