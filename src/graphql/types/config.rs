use async_graphql::*;
use chrono::{DateTime, Utc};

use crate::database::entities::configs;

/// A test-bench configuration
#[derive(SimpleObject, Clone)]
pub struct Config {
    pub id: ID,
    pub name: String,
    pub is_default: bool,
    /// Number of snubs to run
    pub number: i32,
    /// Seconds between cycles
    pub time_between_cycles: i32,
    /// Upper speed limit in km/h
    pub upper_limit: i32,
    /// Lower speed limit in km/h
    pub inferior_limit: i32,
    /// Wait at the upper limit, in seconds
    pub upper_time: i32,
    /// Wait at the lower limit, in seconds
    pub inferior_time: i32,
    /// Keep the motor running between snubs
    pub disable_shutdown: bool,
    /// Drive the AUX1 output
    pub enable_output: bool,
    /// AUX1 trigger temperature in degrees Celsius
    pub temperature: f64,
    /// AUX1 trigger time in seconds
    pub time: f64,
    pub created_at: DateTime<Utc>,
}

impl From<configs::Model> for Config {
    fn from(model: configs::Model) -> Self {
        Self {
            id: ID::from(model.id),
            name: model.name,
            is_default: model.is_default,
            number: model.number,
            time_between_cycles: model.time_between_cycles,
            upper_limit: model.upper_limit,
            inferior_limit: model.inferior_limit,
            upper_time: model.upper_time,
            inferior_time: model.inferior_time,
            disable_shutdown: model.disable_shutdown,
            enable_output: model.enable_output,
            temperature: model.temperature,
            time: model.time,
            created_at: model.created_at,
        }
    }
}

/// Payload of `createConfig` and `importConfig`
#[derive(SimpleObject)]
pub struct CreateConfig {
    pub config: Config,
}

/// Payload of `updateConfig`
#[derive(SimpleObject)]
pub struct UpdateConfig {
    pub config: Config,
}
