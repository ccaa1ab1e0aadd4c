use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;
use thiserror::Error;
use waystation::DEFAULT_ENDPOINT;

/// Settings file looked up in the working directory when none is given.
pub const SETTINGS_FILE: &str = "waystation.toml";

/// Prefix of the environment overrides, e.g. `WAYSTATION__ENDPOINT`.
pub const ENV_PREFIX: &str = "WAYSTATION";

/// Which presentation layer drives the wizard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Frontend {
    /// Full-screen terminal UI.
    #[default]
    Tui,
    /// Line-by-line prompts.
    Prompt,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("endpoint must be an http(s) URL, got {0:?}")]
    InvalidEndpoint(String),

    #[error("timeout_secs must be greater than zero")]
    ZeroTimeout,
}

/// Client settings. Loaded from defaults, then the settings file, then
/// `WAYSTATION__*` environment variables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub frontend: Frontend,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    /// Record the payload locally instead of posting it.
    #[serde(default)]
    pub dry_run: bool,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            frontend: Frontend::default(),
            log_file: None,
            dry_run: false,
        }
    }
}

impl Settings {
    /// Load from `file` (required) or `./waystation.toml` (optional), then the environment.
    pub fn load(file: Option<&Path>) -> Result<Self, SettingsError> {
        Self::load_with_env(
            file,
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
    }

    fn load_with_env(
        file: Option<&Path>,
        env: config::Environment,
    ) -> Result<Self, SettingsError> {
        let file = match file {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(SETTINGS_FILE).required(false),
        };

        let settings = config::Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Reject settings the client cannot run with.
    pub fn validated(self) -> Result<Self, SettingsError> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(SettingsError::InvalidEndpoint(self.endpoint));
        }
        if self.timeout_secs == 0 {
            return Err(SettingsError::ZeroTimeout);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<config::Map<String, String>>();
        config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .source(Some(map))
    }

    fn settings_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_sources() {
        let settings = Settings::load_with_env(None, env(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.timeout_secs, 15);
        assert_eq!(settings.frontend, Frontend::Tui);
    }

    #[test]
    fn file_values_are_read() {
        let file = settings_file(
            r#"
endpoint = "http://localhost:3000/api/survey/submit"
frontend = "prompt"
timeout_secs = 5
log_file = "waystation.log"
"#,
        );
        let settings = Settings::load_with_env(Some(file.path()), env(&[])).unwrap();

        assert_eq!(settings.endpoint, "http://localhost:3000/api/survey/submit");
        assert_eq!(settings.frontend, Frontend::Prompt);
        assert_eq!(settings.timeout_secs, 5);
        assert_eq!(settings.log_file, Some(PathBuf::from("waystation.log")));
        assert!(!settings.dry_run);
    }

    #[test]
    fn environment_overrides_file() {
        let file = settings_file("timeout_secs = 5\nfrontend = \"prompt\"\n");
        let settings = Settings::load_with_env(
            Some(file.path()),
            env(&[
                ("WAYSTATION__TIMEOUT_SECS", "30"),
                ("WAYSTATION__DRY_RUN", "true"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.timeout_secs, 30);
        assert!(settings.dry_run);
        assert_eq!(settings.frontend, Frontend::Prompt);
    }

    #[test]
    fn explicit_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            Settings::load_with_env(Some(&missing), env(&[])),
            Err(SettingsError::Load(_))
        ));
    }

    #[test]
    fn validation_rejects_bad_values() {
        let settings = Settings {
            endpoint: "ftp://example.org".to_string(),
            ..Settings::default()
        };
        assert!(matches!(
            settings.validated(),
            Err(SettingsError::InvalidEndpoint(_))
        ));

        let settings = Settings {
            timeout_secs: 0,
            ..Settings::default()
        };
        assert!(matches!(settings.validated(), Err(SettingsError::ZeroTimeout)));

        assert!(Settings::default().validated().is_ok());
    }
}
