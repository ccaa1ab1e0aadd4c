//! Waystation - BR-251 rest-stop questionnaire client.
//!
//! Loads settings, installs logging, then runs the questionnaire in the
//! chosen frontend and submits the answers.

mod cli;
mod settings;

use std::{fs::OpenOptions, sync::Mutex, time::Duration};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use waystation::{HttpSubmitter, Submitter, TestSubmitter, Wizard, WizardFrontend, trucker};
use waystation_wizard_dialoguer::{DialoguerError, DialoguerFrontend};
use waystation_wizard_ratatui::{RatatuiError, RatatuiFrontend};

use cli::Cli;
use settings::{Frontend, Settings};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    let settings = cli.apply(settings).context("invalid settings")?;

    init_tracing(&settings)?;
    info!(
        endpoint = %settings.endpoint,
        frontend = ?settings.frontend,
        dry_run = settings.dry_run,
        "starting questionnaire"
    );

    let questionnaire = trucker::questionnaire();
    if settings.dry_run {
        let mut wizard = Wizard::new(questionnaire, TestSubmitter::new());
        run(settings.frontend, &mut wizard)?;
        if let Some(payload) = wizard.submitter().received().last() {
            println!("{}", serde_json::to_string_pretty(payload)?);
        }
    } else {
        let submitter = HttpSubmitter::with_timeout(
            &settings.endpoint,
            Duration::from_secs(settings.timeout_secs),
        )
        .context("building HTTP client")?;
        let mut wizard = Wizard::new(questionnaire, submitter);
        run(settings.frontend, &mut wizard)?;
    }

    Ok(())
}

/// Run the session in the chosen frontend. Quitting early is not an error.
fn run<S: Submitter>(frontend: Frontend, wizard: &mut Wizard<S>) -> anyhow::Result<()> {
    let cancelled = match frontend {
        Frontend::Tui => match RatatuiFrontend::new().run(wizard) {
            Err(RatatuiError::Cancelled) => true,
            outcome => {
                outcome.context("terminal frontend")?;
                false
            }
        },
        Frontend::Prompt => match DialoguerFrontend::new().run(wizard) {
            Err(DialoguerError::Cancelled) => true,
            outcome => {
                outcome.context("prompt frontend")?;
                false
            }
        },
    };

    if cancelled {
        info!(step = wizard.state().step(), "questionnaire abandoned");
        eprintln!("Questionário cancelado.");
    }
    Ok(())
}

/// Default log filter when `RUST_LOG` is unset.
///
/// The full-screen frontend owns the terminal, so it stays silent unless
/// logs go to a file.
fn default_filter(settings: &Settings) -> &'static str {
    match (&settings.log_file, settings.frontend) {
        (Some(_), _) => "info",
        (None, Frontend::Tui) => "off",
        (None, Frontend::Prompt) => "warn",
    }
}

fn init_tracing(settings: &Settings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(settings)));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    match &settings.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            subscriber
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => subscriber.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn tui_is_silent_without_log_file() {
        let settings = Settings::default();
        assert_eq!(default_filter(&settings), "off");

        let settings = Settings {
            frontend: Frontend::Prompt,
            ..Settings::default()
        };
        assert_eq!(default_filter(&settings), "warn");

        let settings = Settings {
            log_file: Some(PathBuf::from("waystation.log")),
            ..Settings::default()
        };
        assert_eq!(default_filter(&settings), "info");
    }
}
