/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::LiftError;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    pub building: BuildingConfig,
    pub elevator: ElevatorConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct BuildingConfig {
    pub n_floors: u8,
}

/// Timings are in milliseconds.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ElevatorConfig {
    pub door_open_time: u64,
    pub floor_travel_time: u64,
    #[serde(default = "default_park_at_lobby")]
    pub park_at_lobby: bool,
}

fn default_park_at_lobby() -> bool {
    true
}

impl ElevatorConfig {
    pub fn dwell(&self) -> Duration {
        Duration::from_millis(self.door_open_time)
    }

    pub fn travel(&self) -> Duration {
        Duration::from_millis(self.floor_travel_time)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            building: BuildingConfig { n_floors: 10 },
            elevator: ElevatorConfig::default(),
        }
    }
}

impl Default for ElevatorConfig {
    fn default() -> Self {
        ElevatorConfig {
            door_open_time: 10_000,
            floor_travel_time: 2_000,
            park_at_lobby: true,
        }
    }
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, LiftError> {
    let path = path.as_ref();
    let config_str = fs::read_to_string(path)
        .map_err(|e| LiftError::Config(format!("failed to read {}: {}", path.display(), e)))?;
    parse_config(&config_str)
}

pub fn parse_config(config_str: &str) -> Result<Config, LiftError> {
    let config: Config = toml::from_str(config_str)
        .map_err(|e| LiftError::Config(format!("failed to parse configuration: {}", e)))?;
    validate(&config)?;
    Ok(config)
}

pub fn validate(config: &Config) -> Result<(), LiftError> {
    if config.building.n_floors < 2 {
        return Err(LiftError::InvalidFloorCount {
            n_floors: config.building.n_floors,
        });
    }
    Ok(())
}
