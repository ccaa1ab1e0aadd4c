//! # waystation-wizard-ratatui
//!
//! Full-screen terminal frontend for the waystation questionnaire wizard.
//!
//! One step is shown at a time with a progress bar, the option list, the
//! follow-up checklist when it applies, and a modal when the respondent tries
//! to move on without answering.
//!
//! ## Example
//!
//! ```rust,ignore
//! use waystation::{DEFAULT_ENDPOINT, HttpSubmitter, Wizard, WizardFrontend, trucker};
//! use waystation_wizard_ratatui::RatatuiFrontend;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut wizard = Wizard::new(trucker::questionnaire(), HttpSubmitter::new(DEFAULT_ENDPOINT));
//!     RatatuiFrontend::new().run(&mut wizard)?;
//!     Ok(())
//! }
//! ```

mod frontend;

pub use frontend::{RatatuiError, RatatuiFrontend, Theme};
