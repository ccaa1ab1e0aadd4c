//! Dialoguer frontend implementation for the WizardFrontend trait.

use std::io;
use std::time::Duration;

use crossterm::{event, terminal};
use dialoguer::{
    Confirm, MultiSelect, Select,
    theme::{ColorfulTheme, SimpleTheme, Theme},
};
use thiserror::Error;
use tokio::runtime::Runtime;
use tracing::debug;
use waystation::{
    Question, Screen, ScreenCopy, Submitter, Transition, ValidationError, Wizard, WizardFrontend,
};

/// Error type for the Dialoguer frontend.
#[derive(Debug, Error)]
pub enum DialoguerError {
    /// The respondent quit before finishing (Ctrl+C or declining to start).
    #[error("Questionnaire cancelled by user")]
    Cancelled,

    /// A prompt failed.
    #[error("Dialoguer error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// An I/O error occurred (starting the submission runtime).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Helper to check if a dialoguer error is a cancellation (Ctrl+C / Escape)
fn is_cancelled(err: &dialoguer::Error) -> bool {
    matches!(err, dialoguer::Error::IO(io_err) if io_err.kind() == std::io::ErrorKind::Interrupted)
}

fn prompt_result<T>(result: Result<T, dialoguer::Error>) -> Result<T, DialoguerError> {
    match result {
        Ok(value) => Ok(value),
        Err(e) if is_cancelled(&e) => Err(DialoguerError::Cancelled),
        Err(e) => Err(e.into()),
    }
}

/// Dialoguer frontend for interactive CLI prompts.
#[derive(Debug, Default, Clone)]
pub struct DialoguerFrontend {
    /// Use colorful theme for prompts.
    colorful: bool,
}

/// What the respondent picked on an answer prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Choice {
    Answer(String),
    Continue,
    Back,
}

impl DialoguerFrontend {
    /// Create a new Dialoguer frontend with default (colorful) theme.
    pub fn new() -> Self {
        Self { colorful: true }
    }

    /// Create a frontend with plain (no color) theme.
    pub fn plain() -> Self {
        Self { colorful: false }
    }

    fn theme(&self) -> Box<dyn Theme> {
        if self.colorful {
            Box::new(ColorfulTheme::default())
        } else {
            Box::new(SimpleTheme)
        }
    }

    fn ask_welcome(&self, copy: &ScreenCopy) -> Result<(), DialoguerError> {
        println!("{}", copy.welcome_title);
        println!();
        println!("{}", copy.welcome_body);
        println!();

        let theme = self.theme();
        let accepted = prompt_result(
            Confirm::with_theme(theme.as_ref())
                .with_prompt(copy.start_label.as_str())
                .default(true)
                .interact(),
        )?;
        if accepted {
            Ok(())
        } else {
            Err(DialoguerError::Cancelled)
        }
    }

    fn ask_intro<S: Submitter>(
        &self,
        wizard: &Wizard<S>,
        question: &Question,
    ) -> Result<Choice, DialoguerError> {
        let copy = &wizard.questionnaire().copy;
        println!();
        println!("{}", copy.section_intro_title);
        println!("{}", question.prompt());

        let mut items = vec![copy.section_intro_start_label.clone()];
        if wizard.can_retreat() {
            items.push(back_item(copy));
        }
        let theme = self.theme();
        let picked = prompt_result(
            Select::with_theme(theme.as_ref())
                .items(items.as_slice())
                .default(0)
                .interact(),
        )?;
        Ok(if picked == 0 {
            Choice::Continue
        } else {
            Choice::Back
        })
    }

    fn ask_answer<S: Submitter>(
        &self,
        wizard: &Wizard<S>,
        question: &Question,
    ) -> Result<Choice, DialoguerError> {
        let copy = &wizard.questionnaire().copy;
        if let Some(progress) = wizard.progress() {
            println!();
            println!("Pergunta {} de {}", progress.current, progress.total);
        }

        let items = answer_items(question, wizard.can_retreat().then(|| back_item(copy)));
        let recorded = wizard.state().answers().get(question.id());
        let default = recorded
            .and_then(|answer| question.options().iter().position(|option| option == answer))
            .unwrap_or(0);

        let theme = self.theme();
        let picked = prompt_result(
            Select::with_theme(theme.as_ref())
                .with_prompt(question.prompt())
                .items(items.as_slice())
                .default(default)
                .interact(),
        )?;

        Ok(match question.options().get(picked) {
            Some(option) => Choice::Answer(option.clone()),
            None => Choice::Back,
        })
    }

    /// Ask the follow-up checklist and apply the difference as toggles.
    fn ask_follow_up<S: Submitter>(
        &self,
        wizard: &mut Wizard<S>,
        question: &Question,
    ) -> Result<(), DialoguerError> {
        let Some(follow_up) = question.follow_up() else {
            return Ok(());
        };
        let id = question.id();
        let selections = wizard.state().follow_ups();
        let defaults: Vec<bool> = follow_up
            .choices
            .iter()
            .map(|choice| selections.contains(id, choice))
            .collect();

        let theme = self.theme();
        let picked = prompt_result(
            MultiSelect::with_theme(theme.as_ref())
                .with_prompt(follow_up.prompt.as_str())
                .items(follow_up.choices.as_slice())
                .defaults(&defaults)
                .interact(),
        )?;

        for label in pending_toggles(&follow_up.choices, &defaults, &picked) {
            wizard.toggle_follow_up(id, label);
        }
        Ok(())
    }
}

fn back_item(copy: &ScreenCopy) -> String {
    format!("← {}", copy.back_label)
}

/// Option labels, followed by the back entry when going back is allowed.
fn answer_items(question: &Question, back: Option<String>) -> Vec<String> {
    question.options().iter().cloned().chain(back).collect()
}

/// Choices whose membership differs between `before` and the picked indices.
fn pending_toggles<'a>(choices: &'a [String], before: &[bool], picked: &[usize]) -> Vec<&'a str> {
    choices
        .iter()
        .enumerate()
        .filter(|(i, _)| before.get(*i).copied().unwrap_or(false) != picked.contains(i))
        .map(|(_, choice)| choice.as_str())
        .collect()
}

/// Drop keys typed while a submission was blocking, so the next prompt does
/// not pick them up as answers.
fn discard_typeahead() -> io::Result<usize> {
    terminal::enable_raw_mode()?;
    let drained = discard_pending(
        || event::poll(Duration::ZERO),
        || event::read().map(drop),
    );
    terminal::disable_raw_mode()?;
    drained
}

fn discard_pending(
    mut pending: impl FnMut() -> io::Result<bool>,
    mut read: impl FnMut() -> io::Result<()>,
) -> io::Result<usize> {
    let mut dropped = 0;
    while pending()? {
        read()?;
        dropped += 1;
    }
    Ok(dropped)
}

impl WizardFrontend for DialoguerFrontend {
    type Error = DialoguerError;

    fn run<S: Submitter>(&self, wizard: &mut Wizard<S>) -> Result<(), Self::Error> {
        let runtime: Runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        loop {
            match wizard.screen() {
                Screen::Welcome => self.ask_welcome(&wizard.questionnaire().copy)?,
                Screen::ThankYou => {
                    let copy = &wizard.questionnaire().copy;
                    println!();
                    println!("{}", copy.thank_you_title);
                    println!("{}", copy.thank_you_body);
                    return Ok(());
                }
                Screen::Question(question) => {
                    let question = question.clone();
                    let choice = if question.is_answerable() {
                        self.ask_answer(wizard, &question)?
                    } else {
                        self.ask_intro(wizard, &question)?
                    };
                    match choice {
                        Choice::Back => {
                            wizard.retreat();
                            continue;
                        }
                        Choice::Answer(label) => {
                            wizard.record_answer(question.id(), label);
                            if wizard.follow_up_active() {
                                self.ask_follow_up(wizard, &question)?;
                            }
                        }
                        Choice::Continue => {}
                    }
                }
            }

            if wizard.is_final_step() {
                println!("{}", wizard.questionnaire().copy.sending_label);
            }

            let submitting = wizard.is_final_step();
            let transition = runtime.block_on(wizard.advance());
            debug!(?transition, "advance");
            if submitting {
                let dropped = discard_typeahead()?;
                debug!(dropped, "discarded keys pressed while sending");
            }
            let copy = &wizard.questionnaire().copy;
            match transition {
                Transition::Blocked(ValidationError::Unanswered) => {
                    println!("{}: {}", copy.unanswered_title, copy.unanswered_message);
                }
                Transition::Blocked(ValidationError::FollowUpRequired) => {
                    println!("{}", copy.follow_up_required_message);
                }
                Transition::SubmitFailed { message } => println!("{message}"),
                _ => {}
            }
        }
    }
}
