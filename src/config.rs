use serde::Deserialize;
use std::fs;

#[derive(Deserialize)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub timing: TimingConfig,
}

#[derive(Deserialize)]
pub struct SimulationConfig {
    pub n_floors: u8,
    pub n_cars: usize,
    pub n_passengers: usize,
}

#[derive(Deserialize, Clone)]
pub struct TimingConfig {
    pub time_between_floors_ms: u64,
    pub time_select_dropoff_ms: u64,
    pub spawn_interval_ms: u64,
}

pub fn load_config() -> Config {
    let config_str = fs::read_to_string("config.toml")
        .expect("Failed to read configuration file");
    toml::from_str(&config_str)
        .expect("Failed to parse configuration file")
}
