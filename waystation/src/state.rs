use waystation_types::{Answers, FollowUps};

use crate::PRE_START;

/// Mutable session state, owned by a [`Wizard`](crate::Wizard).
///
/// Presentation layers only ever see it through `&WizardState`.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    pub(crate) step: i32,
    pub(crate) answers: Answers,
    pub(crate) follow_ups: FollowUps,
    pub(crate) follow_up_required: bool,
    pub(crate) unanswered: bool,
    pub(crate) submitting: bool,
    pub(crate) submit_error: Option<String>,
}

impl WizardState {
    pub(crate) fn new() -> Self {
        Self {
            step: PRE_START,
            answers: Answers::new(),
            follow_ups: FollowUps::new(),
            follow_up_required: false,
            unanswered: false,
            submitting: false,
            submit_error: None,
        }
    }

    /// Current step index. `PRE_START` is the welcome screen, the
    /// questionnaire length is the thank-you screen.
    pub fn step(&self) -> i32 {
        self.step
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn follow_ups(&self) -> &FollowUps {
        &self.follow_ups
    }

    /// Set when `advance` was refused because a triggered follow-up is empty.
    pub fn follow_up_required(&self) -> bool {
        self.follow_up_required
    }

    /// Set when `advance` was refused because the step has no answer.
    pub fn unanswered(&self) -> bool {
        self.unanswered
    }

    /// True while a submission is in flight. The forward control must be disabled.
    pub fn submitting(&self) -> bool {
        self.submitting
    }

    /// Message from the last failed submission, cleared when a new one starts.
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub(crate) fn clear_validation_flags(&mut self) {
        self.follow_up_required = false;
        self.unanswered = false;
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}
