//! # waystation
//!
//! Step-by-step questionnaire wizard for the BR-251 rest-stop survey.
//! Presentation-agnostic.
//!
//! The [`Wizard`] owns the session state and exposes four transitions
//! (`advance`, `retreat`, `record_answer`, `toggle_follow_up`) plus the
//! terminal `submit`. Presentation layers read [`WizardState`] and
//! [`Wizard::screen`] to decide what to draw.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use waystation::{HttpSubmitter, Wizard, trucker};
//!
//! let submitter = HttpSubmitter::new(waystation::DEFAULT_ENDPOINT);
//! let mut wizard = Wizard::new(trucker::questionnaire(), submitter);
//!
//! wizard.advance().await; // leave the welcome screen
//! wizard.record_answer(trucker::AGE, "30 a 44 anos");
//! wizard.advance().await;
//! ```
//!
//! ## Submitters
//!
//! Submission goes through the [`Submitter`] trait:
//! - [`HttpSubmitter`] - POSTs the JSON payload to the collection endpoint
//! - [`TestSubmitter`] - scripted outcomes, records every payload
//!
//! ## Presentation layers
//!
//! - `waystation-wizard-ratatui` - full-screen terminal wizard
//! - `waystation-wizard-dialoguer` - line-by-line CLI prompts

// Re-export all types from waystation-types
pub use waystation_types::*;

mod state;
pub use state::WizardState;

mod wizard;
pub use wizard::{PRE_START, Progress, Screen, Transition, Wizard};

mod submit;
pub use submit::{GENERIC_FAILURE_MESSAGE, REJECTED_FALLBACK_MESSAGE, SubmitError, Submitter};

mod frontend;
pub use frontend::WizardFrontend;

mod http;
pub use http::{DEFAULT_ENDPOINT, HttpSubmitter};

// Test submitter for driving a wizard without a network
mod test_submitter;
pub use test_submitter::{Scripted, TestSubmitter};
