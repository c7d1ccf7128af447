use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE: &str = "unbrake.db";

/// Server settings, read from the `[server]` table of a TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub port: u16,
    pub database: String,
    pub cors_origin: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database: DEFAULT_DATABASE.to_string(),
            cors_origin: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    server: ServerSettings,
}

impl ServerSettings {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: SettingsFile = toml::from_str(content)?;
        Ok(file.server)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid settings file {}", path.display()))
    }

    /// Command-line flags win over the file.
    pub fn with_overrides(
        mut self,
        port: Option<u16>,
        database: Option<String>,
        cors_origin: Option<String>,
    ) -> Self {
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(database) = database {
            self.database = database;
        }
        if cors_origin.is_some() {
            self.cors_origin = cors_origin;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_when_table_missing() {
        let settings = ServerSettings::from_toml_str("").unwrap();
        assert_eq!(settings, ServerSettings::default());
    }

    #[test]
    fn test_partial_table_keeps_other_defaults() {
        let settings = ServerSettings::from_toml_str(
            r#"
[server]
port = 8080
cors_origin = "http://localhost:3001"
"#,
        )
        .unwrap();
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.database, DEFAULT_DATABASE);
        assert_eq!(settings.cors_origin.as_deref(), Some("http://localhost:3001"));
    }

    #[test]
    fn test_flags_override_file() {
        let settings = ServerSettings {
            port: 8080,
            database: "bench.db".to_string(),
            cors_origin: Some("http://a".to_string()),
        }
        .with_overrides(Some(9000), None, None);

        assert_eq!(settings.port, 9000);
        assert_eq!(settings.database, "bench.db");
        assert_eq!(settings.cors_origin.as_deref(), Some("http://a"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\ndatabase = \"lab.db\"").unwrap();

        let settings = ServerSettings::load(file.path()).unwrap();
        assert_eq!(settings.database, "lab.db");
        assert_eq!(settings.port, DEFAULT_PORT);
    }

    #[test]
    fn test_load_reports_bad_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = \"not a number\"").unwrap();

        let err = ServerSettings::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid settings file"));
    }
}
