// ⚙️ Settings - execap.toml + EXECAP_* environment overrides
//
// Example execap.toml:
//
//   data_root = "/srv/proxy-data"
//   default_year = "2024"
//   load_all_years = false
//   port = 8080

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "execap.toml";

/// Prefix for environment overrides (EXECAP_DATA_ROOT, EXECAP_PORT, ...)
pub const ENV_PREFIX: &str = "EXECAP";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Local directory mirroring the bucket (contains `companies/`)
    pub data_root: PathBuf,
    /// Year to load when the caller names none
    pub default_year: Option<String>,
    pub load_all_years: bool,
    pub host: String,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            data_root: PathBuf::from("./data"),
            default_year: None,
            load_all_years: false,
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Settings {
    /// Load settings; a missing file is fine, a malformed one is not
    pub fn load(path: Option<&Path>) -> anyhow::Result<Settings> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));

        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        settings
            .try_deserialize()
            .context("failed to deserialise Settings")
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Install the fmt subscriber on stderr; RUST_LOG overrides the INFO default
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.data_root, PathBuf::from("./data"));
        assert_eq!(settings.default_year, None);
        assert!(!settings.load_all_years);
        assert_eq!(settings.address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(settings.port, 3000);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("execap.toml");
        fs::write(
            &path,
            "data_root = \"/srv/proxy\"\ndefault_year = \"2023\"\nport = 8080\n",
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.data_root, PathBuf::from("/srv/proxy"));
        assert_eq!(settings.default_year.as_deref(), Some("2023"));
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.host, "127.0.0.1");
    }
}
