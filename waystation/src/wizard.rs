use tracing::{debug, info, warn};
use waystation_types::{Question, QuestionId, Questionnaire, SurveyPayload, ValidationError};

use crate::{SubmitError, Submitter, WizardState};

/// Step index of the welcome screen.
pub const PRE_START: i32 = -1;

/// What a call to [`Wizard::advance`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Moved forward to the given step.
    Moved(i32),

    /// Validation refused to leave the current step.
    Blocked(ValidationError),

    /// The payload was accepted; the wizard is on the thank-you screen.
    Submitted,

    /// The payload was not accepted; the wizard stays on the last question.
    SubmitFailed { message: String },

    /// A submission is still in flight.
    Busy,

    /// Already on the thank-you screen.
    Finished,
}

/// What the current step asks the presentation layer to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen<'a> {
    Welcome,
    Question(&'a Question),
    ThankYou,
}

/// Linear progress through the question steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based position of the current step.
    pub current: usize,
    pub total: usize,
}

impl Progress {
    /// Fraction of the questionnaire reached, in `0.0..=1.0`.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.current as f64 / self.total as f64
    }
}

/// The questionnaire state machine.
///
/// Owns the session state exclusively; every transition mutates it in place.
#[derive(Debug)]
pub struct Wizard<S> {
    questionnaire: Questionnaire,
    state: WizardState,
    submitter: S,
}

impl<S: Submitter> Wizard<S> {
    /// Start a session on the welcome screen with nothing answered.
    pub fn new(questionnaire: Questionnaire, submitter: S) -> Self {
        for id in questionnaire.duplicate_ids() {
            warn!(question = %id, "question id used by more than one step");
        }
        Self {
            questionnaire,
            state: WizardState::new(),
            submitter,
        }
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    /// Read-only snapshot of the session.
    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    /// Step index of the thank-you screen (the total step count).
    pub fn post_end(&self) -> i32 {
        self.questionnaire.len() as i32
    }

    /// The question on the current step, if the step shows one.
    pub fn current_question(&self) -> Option<&Question> {
        usize::try_from(self.state.step)
            .ok()
            .and_then(|index| self.questionnaire.get(index))
    }

    pub fn screen(&self) -> Screen<'_> {
        if self.state.step <= PRE_START {
            return Screen::Welcome;
        }
        match self.current_question() {
            Some(question) => Screen::Question(question),
            None => Screen::ThankYou,
        }
    }

    /// Position among the question steps.
    ///
    /// `None` on the welcome and thank-you screens and on the section intro.
    pub fn progress(&self) -> Option<Progress> {
        self.current_question()
            .filter(|question| question.is_answerable())
            .map(|_| Progress {
                current: self.state.step as usize + 1,
                total: self.questionnaire.len(),
            })
    }

    /// True on the last question, where advancing submits.
    pub fn is_final_step(&self) -> bool {
        self.state.step == self.post_end() - 1
    }

    /// Whether the back control should be offered.
    ///
    /// The first question has no way back to the welcome screen, and a
    /// finished session stays finished.
    pub fn can_retreat(&self) -> bool {
        self.state.step > 0 && self.state.step < self.post_end()
    }

    /// Whether the follow-up of the current question is showing.
    pub fn follow_up_active(&self) -> bool {
        self.current_question()
            .is_some_and(|q| q.follow_up_active(&self.state.answers))
    }

    /// The payload the current answers would produce.
    pub fn payload(&self) -> SurveyPayload {
        SurveyPayload::assemble(
            &self.questionnaire,
            &self.state.answers,
            &self.state.follow_ups,
        )
    }

    /// Validate the current step and move forward, submitting from the last one.
    pub async fn advance(&mut self) -> Transition {
        if self.state.step >= self.post_end() {
            return Transition::Finished;
        }

        if let Some(question) = self.current_question() {
            let id = question.id();
            if let Err(err) = question.validate(&self.state.answers, &self.state.follow_ups) {
                match err {
                    ValidationError::FollowUpRequired => self.state.follow_up_required = true,
                    ValidationError::Unanswered => self.state.unanswered = true,
                }
                warn!(step = self.state.step, question = %id, %err, "advance blocked");
                return Transition::Blocked(err);
            }
        }

        self.state.clear_validation_flags();

        if self.state.step + 1 >= self.post_end() {
            if self.state.submitting {
                return Transition::Busy;
            }
            return match self.submit().await {
                Ok(()) => Transition::Submitted,
                Err(err) => Transition::SubmitFailed {
                    message: err.user_message(),
                },
            };
        }

        self.state.step += 1;
        debug!(step = self.state.step, "advanced");
        Transition::Moved(self.state.step)
    }

    /// Step back once. Answers and follow-up selections are kept.
    ///
    /// Returns `false` on the welcome screen, where there is nowhere to go.
    pub fn retreat(&mut self) -> bool {
        if self.state.step <= PRE_START {
            return false;
        }
        self.state.step -= 1;
        self.state.clear_validation_flags();
        debug!(step = self.state.step, "retreated");
        true
    }

    /// Record (or overwrite) the answer to a question.
    pub fn record_answer(&mut self, id: QuestionId, label: impl Into<String>) {
        let label = label.into();
        debug!(question = %id, %label, "answer recorded");
        self.state.answers.insert(id, label);
        self.state.unanswered = false;
    }

    /// Add or remove a follow-up selection. Returns whether it is selected afterwards.
    ///
    /// Any toggle clears the follow-up flag, even one that empties the set;
    /// the next `advance` checks again.
    pub fn toggle_follow_up(&mut self, id: QuestionId, label: impl Into<String>) -> bool {
        let label = label.into();
        let selected = self.state.follow_ups.toggle(id, label.clone());
        debug!(question = %id, %label, selected, "follow-up toggled");
        self.state.follow_up_required = false;
        selected
    }

    /// Deliver the payload. On success the wizard moves to the thank-you screen;
    /// on failure it stays put and keeps the message for display.
    pub async fn submit(&mut self) -> Result<(), SubmitError> {
        let payload = self.payload();
        self.state.submit_error = None;
        info!(
            answers = self.state.answers.len(),
            missed_services = payload.missed_services.len(),
            "submitting questionnaire"
        );

        let outcome = {
            let _in_flight = InFlight::start(&mut self.state.submitting);
            self.submitter.submit(&payload).await
        };

        match outcome {
            Ok(()) => {
                self.state.step = self.post_end();
                info!("questionnaire submitted");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "submission failed");
                self.state.submit_error = Some(err.user_message());
                Err(err)
            }
        }
    }
}

/// Holds the submitting flag up while a submission is pending.
///
/// Clears it on drop, so an abandoned `advance` future leaves the session usable.
struct InFlight<'a>(&'a mut bool);

impl<'a> InFlight<'a> {
    fn start(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}
