use async_trait::async_trait;
use waystation_types::SurveyPayload;

/// Shown when the endpoint refused the payload without saying why.
pub const REJECTED_FALLBACK_MESSAGE: &str = "Erro ao enviar pesquisa";

/// Shown for transport failures and unreadable responses.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Ocorreu um erro ao enviar suas respostas. Por favor, tente novamente.";

/// Error type for submission attempts.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The request never produced a response (DNS, TLS, timeout, connection reset).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("Submission rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// A success status whose body could not be read as JSON.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl SubmitError {
    /// Create a rejection with the server-provided message.
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// The text a respondent should see near the finish control.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            Self::Transport(_) | Self::MalformedResponse(_) => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// The collaborator that delivers a finished questionnaire.
///
/// Implementations run the request to completion; there is no cancellation
/// and no retry at this level.
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, payload: &SurveyPayload) -> Result<(), SubmitError>;
}

#[async_trait]
impl<T: Submitter + ?Sized> Submitter for &T {
    async fn submit(&self, payload: &SurveyPayload) -> Result<(), SubmitError> {
        (**self).submit(payload).await
    }
}

#[async_trait]
impl<T: Submitter + ?Sized> Submitter for Box<T> {
    async fn submit(&self, payload: &SurveyPayload) -> Result<(), SubmitError> {
        (**self).submit(payload).await
    }
}
