//! # waystation-wizard-dialoguer
//!
//! Prompt-style frontend for the waystation questionnaire wizard.
//!
//! Each step becomes a `dialoguer` prompt: a select list for the answer, with a
//! back entry once going back is allowed, and a multi-select for the
//! follow-up checklist. Validation and submission errors are printed and the
//! same step is asked again.
//!
//! ## Example
//!
//! ```rust,ignore
//! use waystation::{DEFAULT_ENDPOINT, HttpSubmitter, Wizard, WizardFrontend, trucker};
//! use waystation_wizard_dialoguer::DialoguerFrontend;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut wizard = Wizard::new(trucker::questionnaire(), HttpSubmitter::new(DEFAULT_ENDPOINT));
//!     DialoguerFrontend::new().run(&mut wizard)?;
//!     Ok(())
//! }
//! ```

mod frontend;

pub use frontend::{DialoguerError, DialoguerFrontend};
