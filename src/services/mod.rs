pub mod config_service;

pub use config_service::{ConfigPatch, ConfigResult, ConfigService, NewConfig};
