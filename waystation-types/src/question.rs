use crate::{Answers, FollowUps, QuestionId, ValidationError};

/// A single step of the questionnaire.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    /// Unique identifier, also the key into `Answers` and `FollowUps`.
    id: QuestionId,

    /// The prompt text shown to the respondent.
    prompt: String,

    /// The kind of step (determines options and validation).
    kind: QuestionKind,
}

impl Question {
    /// Create a new question.
    pub fn new(id: QuestionId, prompt: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            kind,
        }
    }

    /// Create a fixed single-choice question.
    pub fn core<I, T>(id: QuestionId, prompt: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::new(id, prompt, QuestionKind::Core(CoreQuestion::new(options)))
    }

    /// Create the non-answerable screen separating core and service questions.
    pub fn section_intro(prompt: impl Into<String>) -> Self {
        Self::new(QuestionId::SECTION_INTRO, prompt, QuestionKind::SectionIntro)
    }

    /// Create the generated importance question for the service at `index`.
    pub fn service<I, T>(index: usize, service: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let service = service.into();
        let prompt = format!(
            "{}. Qual a importância do serviço \"{}\" para você?",
            index + 1,
            service
        );
        Self::new(
            QuestionId::for_service(index),
            prompt,
            QuestionKind::Service(ServiceQuestion::new(service, options)),
        )
    }

    /// Attach a conditional follow-up. Only core questions carry one.
    pub fn with_follow_up(mut self, follow_up: FollowUp) -> Self {
        if let QuestionKind::Core(core) = &mut self.kind {
            core.follow_up = Some(follow_up);
        }
        self
    }

    /// Get the question id.
    pub fn id(&self) -> QuestionId {
        self.id
    }

    /// Get the prompt text.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Get the question kind.
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    /// The selectable option labels. Empty for the section intro.
    pub fn options(&self) -> &[String] {
        match &self.kind {
            QuestionKind::Core(core) => &core.options,
            QuestionKind::SectionIntro => &[],
            QuestionKind::Service(service) => &service.options,
        }
    }

    /// The follow-up attached to this question, if any.
    pub fn follow_up(&self) -> Option<&FollowUp> {
        match &self.kind {
            QuestionKind::Core(core) => core.follow_up.as_ref(),
            _ => None,
        }
    }

    /// Check if the respondent can record an answer on this step.
    pub fn is_answerable(&self) -> bool {
        !matches!(self.kind, QuestionKind::SectionIntro)
    }

    /// Check if the follow-up should be shown for the currently recorded answer.
    pub fn follow_up_active(&self, answers: &Answers) -> bool {
        self.follow_up()
            .is_some_and(|follow_up| follow_up.is_triggered_by(answers.get(self.id)))
    }

    /// Decide whether the respondent may leave this step going forward.
    ///
    /// A triggered follow-up with no selection takes precedence over a
    /// missing answer.
    pub fn validate(&self, answers: &Answers, follow_ups: &FollowUps) -> Result<(), ValidationError> {
        match &self.kind {
            QuestionKind::Core(_) => {
                if self.follow_up_active(answers) && !follow_ups.has_selection(self.id) {
                    return Err(ValidationError::FollowUpRequired);
                }
                if !answers.contains(self.id) {
                    return Err(ValidationError::Unanswered);
                }
                Ok(())
            }
            QuestionKind::SectionIntro => Ok(()),
            QuestionKind::Service(_) => {
                if answers.contains(self.id) {
                    Ok(())
                } else {
                    Err(ValidationError::Unanswered)
                }
            }
        }
    }
}

/// The kind of step, each carrying its own validation rule.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionKind {
    /// One of the fixed demographic/experience/rating questions.
    Core(CoreQuestion),

    /// Transitional screen, nothing to answer.
    SectionIntro,

    /// Generated importance question for a single service.
    Service(ServiceQuestion),
}

/// Configuration for a core single-choice question.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoreQuestion {
    /// The option labels, in display order.
    pub options: Vec<String>,

    /// Optional conditional multi-select.
    pub follow_up: Option<FollowUp>,
}

impl CoreQuestion {
    pub fn new<I, T>(options: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            follow_up: None,
        }
    }
}

/// Configuration for a service-importance question.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceQuestion {
    /// The service being rated.
    pub service: String,

    /// The preference scale.
    pub options: Vec<String>,
}

impl ServiceQuestion {
    pub fn new<I, T>(service: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            service: service.into(),
            options: options.into_iter().map(Into::into).collect(),
        }
    }
}

/// A conditional multi-select shown when its question gets a specific answer.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowUp {
    /// The prompt shown above the checklist.
    pub prompt: String,

    /// The answer label that reveals the checklist.
    pub triggered_by: String,

    /// The selectable labels, in display order.
    pub choices: Vec<String>,
}

impl FollowUp {
    pub fn new<I, T>(prompt: impl Into<String>, triggered_by: impl Into<String>, choices: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            prompt: prompt.into(),
            triggered_by: triggered_by.into(),
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if the given answer reveals this follow-up.
    pub fn is_triggered_by(&self, answer: Option<&str>) -> bool {
        answer == Some(self.triggered_by.as_str())
    }
}
