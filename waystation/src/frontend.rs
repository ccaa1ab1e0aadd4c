use crate::{Submitter, Wizard};

/// Trait for presentation layers that drive a wizard session.
///
/// A frontend reads the wizard's state to decide what to draw and calls its
/// transitions in response to input. It returns once the session reaches the
/// thank-you screen, or with an error if the respondent quits.
pub trait WizardFrontend {
    /// The error type for this frontend.
    type Error: Into<anyhow::Error>;

    /// Run the session until it is finished or abandoned.
    fn run<S: Submitter>(&self, wizard: &mut Wizard<S>) -> Result<(), Self::Error>;
}
