use std::path::PathBuf;

use clap::Parser;

use crate::settings::{Frontend, Settings, SettingsError};

#[derive(Parser, Debug)]
#[command(name = "waystation")]
#[command(about = "Rest-stop questionnaire for truck drivers on the BR-251")]
#[command(version)]
pub struct Cli {
    /// Collection endpoint (overrides config)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Presentation layer (overrides config)
    #[arg(long, value_enum)]
    pub frontend: Option<Frontend>,

    /// Settings file to load instead of ./waystation.toml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write logs to this file (overrides config)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Keep the payload local and print it instead of posting it
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

impl Cli {
    /// Layer the command-line flags over loaded settings and validate the result.
    pub fn apply(&self, mut settings: Settings) -> Result<Settings, SettingsError> {
        if let Some(endpoint) = &self.endpoint {
            settings.endpoint = endpoint.clone();
        }
        if let Some(frontend) = self.frontend {
            settings.frontend = frontend;
        }
        if let Some(log_file) = &self.log_file {
            settings.log_file = Some(log_file.clone());
        }
        settings.dry_run |= self.dry_run;
        settings.validated()
    }
}
