//! Ratatui frontend implementation for the WizardFrontend trait.
//!
//! Draws whatever screen the wizard is on and turns key presses into wizard
//! transitions. Submission runs on a current-thread tokio runtime owned by
//! the frontend.

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::CrosstermBackend,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Runtime;
use tracing::debug;
use waystation::{
    PRE_START, Question, Screen, ScreenCopy, Submitter, Transition, ValidationError, Wizard,
    WizardFrontend,
};

/// Error type for the Ratatui frontend.
#[derive(Debug, Error)]
pub enum RatatuiError {
    /// The respondent quit before finishing (Esc or Ctrl+C).
    #[error("Questionnaire cancelled by user")]
    Cancelled,

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The async runtime for submission could not be started.
    #[error("Async runtime error: {0}")]
    Runtime(std::io::Error),
}

/// Color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub text: Color,
    pub highlight: Color,
    pub error: Color,
    pub success: Color,
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            secondary: Color::Blue,
            text: Color::White,
            highlight: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
            border: Color::Gray,
        }
    }
}

/// Ratatui-based full-screen frontend.
///
/// Presents the questionnaire one step at a time with progress tracking,
/// keyboard navigation and inline validation feedback.
#[derive(Debug, Clone, Default)]
pub struct RatatuiFrontend {
    /// Header text; the questionnaire title when unset.
    title: Option<String>,
    theme: Theme,
}

impl RatatuiFrontend {
    /// Create a new frontend with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title shown at the top of every question.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set a custom color theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>, RatatuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    fn restore_terminal(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<(), RatatuiError> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }

    fn event_loop<S: Submitter>(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        runtime: &Runtime,
        wizard: &mut Wizard<S>,
    ) -> Result<(), RatatuiError> {
        let title = self
            .title
            .clone()
            .unwrap_or_else(|| wizard.questionnaire().title.clone());
        let mut session = Session::new(self.theme.clone(), title);
        session.sync(wizard);

        loop {
            terminal.draw(|frame| draw(frame, &session, wizard))?;

            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Err(RatatuiError::Cancelled);
            }

            match session.handle_key(wizard, key.code) {
                Action::None => {}
                Action::Cancel => return Err(RatatuiError::Cancelled),
                Action::Quit => return Ok(()),
                Action::Advance => {
                    let submitting = wizard.is_final_step();
                    if submitting {
                        session.sending = true;
                        terminal.draw(|frame| draw(frame, &session, wizard))?;
                    }
                    session.advance(runtime, wizard);
                    if submitting {
                        let dropped = discard_pending(
                            || event::poll(Duration::ZERO),
                            || event::read().map(drop),
                        )?;
                        debug!(dropped, "discarded keys pressed while sending");
                    }
                }
            }
        }
    }
}

/// Throw away input queued while the loop was blocked, so it is not replayed
/// against the screen that follows. Returns how many events were dropped.
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

fn runtime() -> Result<Runtime, RatatuiError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(RatatuiError::Runtime)
}

/// Which list on a question screen receives Up/Down/Space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Options,
    FollowUp,
}

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    None,
    Advance,
    Quit,
    Cancel,
}

/// Presentation state layered over the wizard: cursors, focus and the modal.
struct Session {
    theme: Theme,
    title: String,
    /// Highlighted entry in the option list.
    highlighted: usize,
    /// Highlighted entry in the follow-up checklist.
    checklist: usize,
    focus: Focus,
    /// Whether the "answer first" modal is showing.
    dialog_open: bool,
    /// Set while the final advance is awaiting the submitter.
    sending: bool,
    /// The step the cursors were last reset for.
    shown_step: i32,
}

impl Session {
    fn new(theme: Theme, title: String) -> Self {
        Self {
            theme,
            title,
            highlighted: 0,
            checklist: 0,
            focus: Focus::Options,
            dialog_open: false,
            sending: false,
            shown_step: PRE_START,
        }
    }

    /// Reset cursors when the wizard has moved to another step.
    ///
    /// The option cursor starts on the recorded answer, if there is one.
    fn sync<S: Submitter>(&mut self, wizard: &Wizard<S>) {
        let step = wizard.state().step();
        if step == self.shown_step {
            return;
        }
        self.shown_step = step;
        self.focus = Focus::Options;
        self.checklist = 0;
        self.highlighted = wizard
            .current_question()
            .and_then(|question| {
                let answer = wizard.state().answers().get(question.id())?;
                question.options().iter().position(|option| option == answer)
            })
            .unwrap_or(0);
    }

    fn handle_key<S: Submitter>(&mut self, wizard: &mut Wizard<S>, key: KeyCode) -> Action {
        if self.sending {
            return Action::None;
        }
        if self.dialog_open {
            if matches!(key, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.dialog_open = false;
            }
            return Action::None;
        }

        match wizard.screen() {
            Screen::Welcome => {
                return match key {
                    KeyCode::Enter => Action::Advance,
                    KeyCode::Esc => Action::Cancel,
                    _ => Action::None,
                };
            }
            Screen::ThankYou => {
                return match key {
                    KeyCode::Enter | KeyCode::Esc => Action::Quit,
                    _ => Action::None,
                };
            }
            Screen::Question(_) => {}
        }

        match key {
            KeyCode::Esc => return Action::Cancel,
            KeyCode::Enter => return Action::Advance,
            KeyCode::Backspace | KeyCode::Left => {
                if wizard.can_retreat() {
                    wizard.retreat();
                    self.sync(wizard);
                }
                return Action::None;
            }
            _ => {}
        }

        let follow_up_active = wizard.follow_up_active();
        let Some(question) = wizard.current_question() else {
            return Action::None;
        };
        let id = question.id();

        match (key, self.focus) {
            (KeyCode::Tab | KeyCode::BackTab, _) if follow_up_active => {
                self.focus = match self.focus {
                    Focus::Options => Focus::FollowUp,
                    Focus::FollowUp => Focus::Options,
                };
            }
            (KeyCode::Up, Focus::Options) => {
                self.highlighted = self.highlighted.saturating_sub(1);
            }
            (KeyCode::Down, Focus::Options) => {
                if self.highlighted + 1 < question.options().len() {
                    self.highlighted += 1;
                }
            }
            (KeyCode::Up, Focus::FollowUp) => {
                self.checklist = self.checklist.saturating_sub(1);
            }
            (KeyCode::Down, Focus::FollowUp) => {
                let len = question.follow_up().map_or(0, |f| f.choices.len());
                if self.checklist + 1 < len {
                    self.checklist += 1;
                }
            }
            (KeyCode::Char(' '), Focus::Options) => {
                if let Some(label) = question.options().get(self.highlighted).cloned() {
                    wizard.record_answer(id, label);
                }
            }
            (KeyCode::Char(' '), Focus::FollowUp) => {
                let label = question
                    .follow_up()
                    .and_then(|f| f.choices.get(self.checklist))
                    .cloned();
                if let Some(label) = label {
                    wizard.toggle_follow_up(id, label);
                }
            }
            _ => {}
        }

        if !wizard.follow_up_active() {
            self.focus = Focus::Options;
        }
        Action::None
    }

    /// Run one advance to completion and react to its outcome.
    fn advance<S: Submitter>(&mut self, runtime: &Runtime, wizard: &mut Wizard<S>) -> Transition {
        let transition = runtime.block_on(wizard.advance());
        self.sending = false;
        debug!(?transition, "advance");

        match &transition {
            Transition::Blocked(ValidationError::Unanswered) => self.dialog_open = true,
            Transition::Blocked(ValidationError::FollowUpRequired) => self.focus = Focus::FollowUp,
            _ => {}
        }
        self.sync(wizard);
        transition
    }
}

fn draw<S: Submitter>(frame: &mut Frame, session: &Session, wizard: &Wizard<S>) {
    let copy = &wizard.questionnaire().copy;
    match wizard.screen() {
        Screen::Welcome => draw_welcome(frame, session, copy),
        Screen::Question(question) => {
            draw_question(frame, session, wizard, question);
            if session.dialog_open {
                draw_dialog(frame, session, copy);
            }
        }
        Screen::ThankYou => draw_completion(frame, session, copy),
    }
}

fn draw_welcome(frame: &mut Frame, session: &Session, copy: &ScreenCopy) {
    let area = frame.area();
    let theme = &session.theme;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Min(3),    // Body
            Constraint::Length(1), // Start button
            Constraint::Length(2), // Help
        ])
        .split(inner);

    let title = Paragraph::new(copy.welcome_title.clone())
        .style(Style::default().fg(theme.primary).bold())
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let body = Paragraph::new(copy.welcome_body.clone())
        .style(Style::default().fg(theme.text))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(body, chunks[1]);

    let start = Paragraph::new(format!("[ {} ]", copy.start_label))
        .style(Style::default().fg(theme.highlight).bold())
        .alignment(Alignment::Center);
    frame.render_widget(start, chunks[2]);

    draw_help(frame, theme, chunks[3], "Enter: Start  Esc: Quit");
}

fn draw_question<S: Submitter>(
    frame: &mut Frame,
    session: &Session,
    wizard: &Wizard<S>,
    question: &Question,
) {
    let area = frame.area();
    let theme = &session.theme;
    let copy = &wizard.questionnaire().copy;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(2), // Progress bar
            Constraint::Min(8),    // Content
            Constraint::Length(1), // Buttons
            Constraint::Length(2), // Help
        ])
        .split(area);

    let header = Paragraph::new(session.title.clone())
        .style(Style::default().fg(theme.primary).bold())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.border)),
        );
    frame.render_widget(header, chunks[0]);

    draw_progress(frame, session, wizard, chunks[1]);

    if question.is_answerable() {
        draw_answer_area(frame, session, wizard, question, chunks[2]);
    } else {
        let intro = Paragraph::new(question.prompt().to_string())
            .style(Style::default().fg(theme.text))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.primary))
                    .title(format!(" {} ", copy.section_intro_title))
                    .title_style(Style::default().fg(theme.highlight).bold()),
            );
        frame.render_widget(intro, chunks[2]);
    }

    let forward = if session.sending {
        copy.sending_label.as_str()
    } else if !question.is_answerable() {
        copy.section_intro_start_label.as_str()
    } else if wizard.is_final_step() {
        copy.finish_label.as_str()
    } else {
        copy.next_label.as_str()
    };
    let mut buttons = Vec::new();
    if wizard.can_retreat() {
        buttons.push(Span::styled(
            format!("[ {} ]", copy.back_label),
            Style::default().fg(theme.secondary),
        ));
        buttons.push(Span::raw("    "));
    }
    buttons.push(Span::styled(
        format!("[ {forward} ]"),
        Style::default().fg(theme.highlight).bold(),
    ));
    let buttons = Paragraph::new(Line::from(buttons)).alignment(Alignment::Center);
    frame.render_widget(buttons, chunks[3]);

    let help = match (question.is_answerable(), wizard.follow_up_active()) {
        (false, _) => "Enter: Continue  Backspace: Back  Esc: Quit",
        (true, false) => "↑/↓: Navigate  Space: Select  Enter: Continue  Backspace: Back  Esc: Quit",
        (true, true) => {
            "↑/↓: Navigate  Space: Select/Toggle  Tab: Switch list  Enter: Continue  Backspace: Back  Esc: Quit"
        }
    };
    draw_help(frame, theme, chunks[4], help);
}

/// Thin progress bar with "Pergunta X de Y" centered below it.
fn draw_progress<S: Submitter>(frame: &mut Frame, session: &Session, wizard: &Wizard<S>, area: Rect) {
    let Some(progress) = wizard.progress() else {
        return;
    };
    let theme = &session.theme;
    let progress_text = format!(" Pergunta {} de {} ", progress.current, progress.total);

    let bar_width = area.width.saturating_sub(2);
    let text_width = (progress_text.chars().count() as u16).min(bar_width);
    let filled_width = (progress.ratio() * f64::from(bar_width)) as u16;
    let bar_x = area.x + 1;

    let track = "─".repeat(bar_width as usize);
    let track_widget = Paragraph::new(track).style(Style::default().fg(theme.border));
    frame.render_widget(track_widget, Rect::new(bar_x, area.y, bar_width, 1));

    if filled_width > 0 {
        let filled = "━".repeat(filled_width as usize);
        let filled_widget = Paragraph::new(filled).style(Style::default().fg(theme.primary));
        frame.render_widget(filled_widget, Rect::new(bar_x, area.y, filled_width, 1));
    }

    if area.height > 1 {
        let text_x = bar_x + (bar_width - text_width) / 2;
        let text_widget = Paragraph::new(progress_text).style(Style::default().fg(theme.secondary));
        frame.render_widget(text_widget, Rect::new(text_x, area.y + 1, text_width, 1));
    }
}

fn draw_answer_area<S: Submitter>(
    frame: &mut Frame,
    session: &Session,
    wizard: &Wizard<S>,
    question: &Question,
    area: Rect,
) {
    let theme = &session.theme;
    let state = wizard.state();
    let follow_up = question
        .follow_up()
        .filter(|_| question.follow_up_active(state.answers()));

    let content_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),                                  // Prompt
            Constraint::Length(question.options().len() as u16 + 2), // Options
            Constraint::Min(if follow_up.is_some() { 4 } else { 0 }), // Follow-up
            Constraint::Length(2),                                  // Messages
        ])
        .split(area);

    let prompt = Paragraph::new(question.prompt().to_string())
        .style(Style::default().fg(theme.text))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.primary)),
        );
    frame.render_widget(prompt, content_chunks[0]);

    let recorded = state.answers().get(question.id());
    let options_focused = session.focus == Focus::Options;
    let items: Vec<ListItem> = question
        .options()
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let chosen = recorded == Some(option.as_str());
            let radio = if chosen { "(•)" } else { "( )" };
            let style = if options_focused && i == session.highlighted {
                Style::default().fg(theme.highlight).bold()
            } else if chosen {
                Style::default().fg(theme.secondary)
            } else {
                Style::default().fg(theme.text)
            };
            ListItem::new(format!("  {radio} {option}")).style(style)
        })
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if options_focused {
                    theme.primary
                } else {
                    theme.border
                })),
        )
        .highlight_symbol("► ");
    let mut list_state = ListState::default();
    if options_focused {
        list_state.select(Some(session.highlighted));
    }
    frame.render_stateful_widget(list, content_chunks[1], &mut list_state);

    if let Some(follow_up) = follow_up {
        let selections = state.follow_ups();
        let checklist_focused = session.focus == Focus::FollowUp;
        let items: Vec<ListItem> = follow_up
            .choices
            .iter()
            .enumerate()
            .map(|(i, choice)| {
                let is_selected = selections.contains(question.id(), choice);
                let checkbox = if is_selected { "[✓]" } else { "[ ]" };
                let style = if checklist_focused && i == session.checklist {
                    Style::default().fg(theme.highlight).bold()
                } else if is_selected {
                    Style::default().fg(theme.secondary)
                } else {
                    Style::default().fg(theme.text)
                };
                ListItem::new(format!("  {checkbox} {choice}")).style(style)
            })
            .collect();

        let border = if state.follow_up_required() {
            theme.error
        } else if checklist_focused {
            theme.primary
        } else {
            theme.border
        };
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border))
                    .title(format!(" {} ", follow_up.prompt))
                    .title_style(Style::default().fg(theme.secondary)),
            )
            .highlight_symbol("► ");
        let mut list_state = ListState::default();
        if checklist_focused {
            list_state.select(Some(session.checklist));
        }
        frame.render_stateful_widget(list, content_chunks[2], &mut list_state);
    }

    let mut messages = Vec::new();
    if state.follow_up_required() {
        messages.push(Line::from(
            wizard.questionnaire().copy.follow_up_required_message.clone(),
        ));
    }
    if let Some(error) = state.submit_error() {
        messages.push(Line::from(error.to_string()));
    }
    if !messages.is_empty() {
        let error_widget = Paragraph::new(messages)
            .style(Style::default().fg(theme.error).bold())
            .alignment(Alignment::Center);
        frame.render_widget(error_widget, content_chunks[3]);
    }
}

/// Modal shown when advancing from a step that has no answer yet.
fn draw_dialog(frame: &mut Frame, session: &Session, copy: &ScreenCopy) {
    let theme = &session.theme;
    let area = centered(frame.area(), 56, 7);
    frame.render_widget(Clear, area);

    let text = vec![
        Line::from(copy.unanswered_message.clone()),
        Line::from(""),
        Line::from(Span::styled(
            format!("[ {} ]", copy.dismiss_label),
            Style::default().fg(theme.highlight).bold(),
        )),
    ];
    let dialog = Paragraph::new(text)
        .style(Style::default().fg(theme.text))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.error))
                .title(format!(" {} ", copy.unanswered_title))
                .title_style(Style::default().fg(theme.error).bold()),
        );
    frame.render_widget(dialog, area);
}

fn draw_completion(frame: &mut Frame, session: &Session, copy: &ScreenCopy) {
    let area = frame.area();
    let theme = &session.theme;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.success))
        .title(format!(" {} ", copy.thank_you_title))
        .title_style(Style::default().fg(theme.success).bold());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = format!("{}\n\nPress Enter to exit.", copy.thank_you_body);
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(theme.text))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    let centered = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Min(3),
            Constraint::Percentage(40),
        ])
        .split(inner);

    frame.render_widget(paragraph, centered[1]);
}

fn draw_help(frame: &mut Frame, theme: &Theme, area: Rect, text: &str) {
    let help = Paragraph::new(text.to_string())
        .style(Style::default().fg(theme.border))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(theme.border)),
        );
    frame.render_widget(help, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

impl WizardFrontend for RatatuiFrontend {
    type Error = RatatuiError;

    fn run<S: Submitter>(&self, wizard: &mut Wizard<S>) -> Result<(), Self::Error> {
        let runtime = runtime()?;
        let mut terminal = self.setup_terminal()?;

        let outcome = self.event_loop(&mut terminal, &runtime, wizard);

        self.restore_terminal(&mut terminal)?;
        outcome
    }
}
