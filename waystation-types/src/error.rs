/// Why a step refused to let the respondent move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The question has no recorded answer.
    #[error("Question has not been answered")]
    Unanswered,

    /// The answer triggered a follow-up but nothing was selected in it.
    #[error("Follow-up requires at least one selection")]
    FollowUpRequired,
}
