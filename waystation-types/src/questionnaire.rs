use crate::{Question, QuestionId, QuestionKind, ServiceQuestion};

/// The ordered list of steps and the copy shown around them.
///
/// Step `i` of a session shows `questions()[i]`; the welcome screen sits
/// before index 0 and the thank-you screen at index `len()`.
#[derive(Debug, Clone)]
pub struct Questionnaire {
    /// Heading shown on every question screen.
    pub title: String,

    /// All steps in presentation order: core questions, section intro, service questions.
    pub questions: Vec<Question>,

    /// Fixed texts used by presentation layers.
    pub copy: ScreenCopy,
}

impl Questionnaire {
    /// Create a new questionnaire with the given steps.
    pub fn new(title: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            title: title.into(),
            questions,
            copy: ScreenCopy::default(),
        }
    }

    /// Set the screen copy.
    pub fn with_copy(mut self, copy: ScreenCopy) -> Self {
        self.copy = copy;
        self
    }

    /// Get the steps.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Get the step at a position.
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Look a question up by id.
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    /// The service-importance questions, in service order.
    pub fn service_questions(&self) -> impl Iterator<Item = (&Question, &ServiceQuestion)> {
        self.questions.iter().filter_map(|q| match q.kind() {
            QuestionKind::Service(service) => Some((q, service)),
            _ => None,
        })
    }

    /// Ids that appear more than once. Empty for a well-formed questionnaire.
    pub fn duplicate_ids(&self) -> Vec<QuestionId> {
        let mut seen = std::collections::HashSet::new();
        let mut duplicates = Vec::new();
        for question in &self.questions {
            if !seen.insert(question.id()) && !duplicates.contains(&question.id()) {
                duplicates.push(question.id());
            }
        }
        duplicates
    }

    /// Check if the questionnaire has any steps.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Total number of steps (also the index of the thank-you screen).
    pub fn len(&self) -> usize {
        self.questions.len()
    }
}

/// Fixed texts for the screens a presentation layer draws.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenCopy {
    pub welcome_title: String,
    pub welcome_body: String,
    pub start_label: String,
    pub section_intro_title: String,
    pub section_intro_start_label: String,
    pub back_label: String,
    pub next_label: String,
    pub finish_label: String,
    pub sending_label: String,
    pub unanswered_title: String,
    pub unanswered_message: String,
    pub dismiss_label: String,
    pub follow_up_required_message: String,
    pub thank_you_title: String,
    pub thank_you_body: String,
}

impl Default for ScreenCopy {
    fn default() -> Self {
        Self {
            welcome_title: "Survey".to_string(),
            welcome_body: String::new(),
            start_label: "Start".to_string(),
            section_intro_title: String::new(),
            section_intro_start_label: "Begin".to_string(),
            back_label: "Back".to_string(),
            next_label: "Next".to_string(),
            finish_label: "Finish".to_string(),
            sending_label: "Sending...".to_string(),
            unanswered_title: "Attention".to_string(),
            unanswered_message: "Please answer the question before continuing.".to_string(),
            dismiss_label: "Close".to_string(),
            follow_up_required_message: "Please select at least one item.".to_string(),
            thank_you_title: "Thank you!".to_string(),
            thank_you_body: String::new(),
        }
    }
}
