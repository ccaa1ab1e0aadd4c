//! Test submitter for driving a wizard without a network.
//!
//! `TestSubmitter` answers each submission with the next scripted outcome
//! (accepting once the script runs out) and keeps every payload it saw.
//!
//! # Example
//!
//! ```rust,ignore
//! use waystation::{Scripted, TestSubmitter, Wizard, trucker};
//!
//! let submitter = TestSubmitter::new().then(Scripted::Reject {
//!     status: 500,
//!     message: "X".into(),
//! });
//! let mut wizard = Wizard::new(trucker::questionnaire(), submitter);
//! // ... answer everything, advance past the last question ...
//! assert_eq!(wizard.state().submit_error(), Some("X"));
//! ```

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use waystation_types::SurveyPayload;

use crate::{SubmitError, Submitter};

/// One scripted reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Scripted {
    /// 2xx with a JSON body.
    Accept,

    /// Non-2xx with the given error message.
    Reject { status: u16, message: String },

    /// 2xx with a body that is not JSON.
    Malformed,
}

/// A submitter that replays scripted outcomes.
#[derive(Debug, Default)]
pub struct TestSubmitter {
    script: Mutex<VecDeque<Scripted>>,
    received: Mutex<Vec<SurveyPayload>>,
}

impl TestSubmitter {
    /// Create a submitter that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the outcome of the next unscripted submission.
    pub fn then(self, outcome: Scripted) -> Self {
        lock(&self.script).push_back(outcome);
        self
    }

    /// Queue a rejection carrying `message`.
    pub fn then_reject(self, status: u16, message: impl Into<String>) -> Self {
        self.then(Scripted::Reject {
            status,
            message: message.into(),
        })
    }

    /// Every payload submitted so far, oldest first.
    pub fn received(&self) -> Vec<SurveyPayload> {
        lock(&self.received).clone()
    }

    /// Number of submission attempts.
    pub fn attempts(&self) -> usize {
        lock(&self.received).len()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl Submitter for TestSubmitter {
    async fn submit(&self, payload: &SurveyPayload) -> Result<(), SubmitError> {
        lock(&self.received).push(payload.clone());
        let outcome = lock(&self.script).pop_front().unwrap_or(Scripted::Accept);
        match outcome {
            Scripted::Accept => Ok(()),
            Scripted::Reject { status, message } => Err(SubmitError::rejected(status, message)),
            Scripted::Malformed => Err(SubmitError::MalformedResponse(
                "expected value at line 1 column 1".to_string(),
            )),
        }
    }
}
