//! Full-screen terminal interface for hangman, built on Ratatui.
//!
//! # State Machine
//! - `EnteringGuess`: letter keys submit a guess, ESC quits
//! - `RoundOver`: Y starts another round, any other key quits
//!
//! The game loop in [`crate::game_state`] drives the round; this module only
//! renders what it is told and turns key presses into [`UserAction`]s.

use crate::error::InvalidGuess;
use crate::game_state::{GameInterface, MAX_WRONG, Round, RoundStatus, SessionStats, UserAction};
use crate::word_state::MASK_CHAR;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const LOSS_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const HIDDEN_LETTER_STYLE: Style = Style::new().fg(Color::White).bg(Color::DarkGray);
const SHOWN_LETTER_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Green);

/// Gallows drawing, one extra body part per wrong guess.
static GALLOWS: [[&str; 7]; 7] = [
    ["  +---+", "  |   |", "      |", "      |", "      |", "      |", "========="],
    ["  +---+", "  |   |", "  O   |", "      |", "      |", "      |", "========="],
    ["  +---+", "  |   |", "  O   |", "  |   |", "      |", "      |", "========="],
    ["  +---+", "  |   |", "  O   |", " /|   |", "      |", "      |", "========="],
    ["  +---+", "  |   |", "  O   |", " /|\\  |", "      |", "      |", "========="],
    ["  +---+", "  |   |", "  O   |", " /|\\  |", " /    |", "      |", "========="],
    ["  +---+", "  |   |", "  O   |", " /|\\  |", " / \\  |", "      |", "========="],
];

#[must_use]
pub fn gallows_lines(wrong_count: u32) -> &'static [&'static str; 7] {
    let stage = (wrong_count as usize).min(GALLOWS.len() - 1);
    &GALLOWS[stage]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    EnteringGuess,
    RoundOver(RoundStatus),
}

/// What a key press means while a guess is expected.
#[derive(Debug, Clone, PartialEq, Eq)]
enum GuessKey {
    Action(UserAction),
    Ignored,
}

fn guess_key_action(key: &KeyEvent) -> GuessKey {
    if has_modifier_keys(key) {
        return GuessKey::Ignored;
    }
    match key.code {
        KeyCode::Esc => GuessKey::Action(UserAction::Exit),
        // validation (including non-letters) stays with the round
        KeyCode::Char(c) if !c.is_control() => GuessKey::Action(UserAction::Guess(c.to_string())),
        _ => GuessKey::Ignored,
    }
}

/// Only Y replays; every other key press quits. `None` for keys held with
/// Alt or Ctrl.
fn replay_key_answer(key: &KeyEvent) -> Option<bool> {
    if has_modifier_keys(key) {
        return None;
    }
    Some(matches!(key.code, KeyCode::Char('y' | 'Y')))
}

/// Runs `restore` when `result` is an error, before handing the error back.
fn restore_on_error<T, E>(result: Result<T, E>, restore: impl FnOnce()) -> Result<T, E> {
    if result.is_err() {
        restore();
    }
    result
}

fn has_modifier_keys(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Everything one frame needs, borrowed from the interface.
struct RenderContext<'a> {
    round_number: u32,
    masked: &'a str,
    guessed: &'a [char],
    wrong_count: u32,
    state: TuiState,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Ratatui implementation of [`GameInterface`].
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    round_number: u32,
    masked: String,
    guessed: Vec<char>,
    wrong_count: u32,
    state: TuiState,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let terminal = restore_on_error(Self::enter_screen(), || {
            let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
            let _ = disable_raw_mode();
        })?;
        info_log!("Terminal setup complete");

        Ok(Self {
            terminal,
            round_number: 0,
            masked: String::new(),
            guessed: Vec::new(),
            wrong_count: 0,
            state: TuiState::EnteringGuess,
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
        })
    }

    fn enter_screen() -> Result<Terminal<CrosstermBackend<io::Stdout>>, io::Error> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        Terminal::new(CrosstermBackend::new(stdout))
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            round_number: self.round_number,
            masked: &self.masked,
            guessed: &self.guessed,
            wrong_count: self.wrong_count,
            state: self.state,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn sync_round(&mut self, round: &Round) {
        self.masked = round.word().masked_view();
        self.guessed = round.word().guessed_letters();
        self.wrong_count = round.wrong_count();
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(9), // Gallows and word
                Constraint::Min(5),    // Info panel
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        let board = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(15), Constraint::Min(20)])
            .split(chunks[1]);

        Self::render_title(f, chunks[0], ctx.round_number);
        Self::render_gallows(f, board[0], ctx.wrong_count);
        Self::render_word(f, board[1], ctx);
        Self::render_info(f, chunks[2], ctx);
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect, round_number: u32) {
        let text = if round_number == 0 {
            "HANGMAN".to_string()
        } else {
            format!("HANGMAN - Round {round_number}")
        };
        let title = Paragraph::new(text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_gallows(f: &mut Frame, area: Rect, wrong_count: u32) {
        let lines: Vec<Line> = gallows_lines(wrong_count)
            .iter()
            .map(|row| Line::from(*row))
            .collect();
        let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_word(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut spans = vec![Span::raw("  ")];
        for letter in ctx.masked.chars() {
            let style = if letter == MASK_CHAR {
                HIDDEN_LETTER_STYLE
            } else {
                SHOWN_LETTER_STYLE
            };
            let shown = if letter == MASK_CHAR { ' ' } else { letter.to_ascii_uppercase() };
            spans.push(Span::styled(format!(" {shown} "), style));
            spans.push(Span::raw(" "));
        }

        let guessed: String = ctx
            .guessed
            .iter()
            .map(|c| c.to_ascii_uppercase().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let remaining = MAX_WRONG.saturating_sub(ctx.wrong_count);

        let lines = vec![
            Line::from(""),
            Line::from(spans),
            Line::from(""),
            Line::from(format!("  Guessed: {guessed}")),
            Line::from(format!("  Wrong guesses remaining: {remaining}")),
        ];
        let paragraph =
            Paragraph::new(lines).block(Block::default().title("Word").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        if !ctx.message.is_empty() {
            let style = match ctx.state {
                TuiState::RoundOver(RoundStatus::Won) => SUCCESS_STYLE,
                TuiState::RoundOver(RoundStatus::Lost) => LOSS_STYLE,
                _ => MESSAGE_STYLE,
            };
            lines.push(Line::from(vec![Span::styled(ctx.message, style)]));
        }

        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::EnteringGuess => "Type a letter to guess | ESC: Quit",
            TuiState::RoundOver(_) => "Y: Play again | Any other key: Quit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    /// Blocks until a key press arrives. Non-key events are dropped.
    fn next_key(&mut self) -> Result<KeyEvent, io::Error> {
        loop {
            if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(key),
                Event::Resize(_, _) => self.draw_or_log(),
                other => {
                    debug_log!("next_key() - Ignoring event: {:?}", other);
                }
            }
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_round_start(&mut self, round_number: u32, word_length: usize) {
        self.round_number = round_number;
        self.masked = MASK_CHAR.to_string().repeat(word_length);
        self.guessed.clear();
        self.wrong_count = 0;
        self.state = TuiState::EnteringGuess;
        self.message = format!("The word has {word_length} letters.");
        self.error_message.clear();
        self.status = "Guess a letter".to_string();
        self.draw_or_log();
    }

    fn display_progress(&mut self, round: &Round) {
        self.sync_round(round);
        self.draw_or_log();
    }

    fn read_guess(&mut self) -> UserAction {
        loop {
            if self.draw().is_err() {
                info_log!("read_guess() - Draw failed, returning Exit");
                return UserAction::Exit;
            }

            let key = match self.next_key() {
                Ok(key) => key,
                Err(e) => {
                    info_log!("read_guess() - Input error: {}", e);
                    return UserAction::Exit;
                }
            };

            match guess_key_action(&key) {
                GuessKey::Action(action) => {
                    debug_log!("read_guess() - Action: {:?}", action);
                    self.error_message.clear();
                    return action;
                }
                GuessKey::Ignored => {
                    debug_log!("read_guess() - Ignoring key: {:?}", key.code);
                }
            }
        }
    }

    fn display_invalid_guess(&mut self, error: &InvalidGuess) {
        self.error_message = error.to_string();
        self.draw_or_log();
    }

    fn display_guess_result(&mut self, letter: char, hit: bool, round: &Round) {
        self.sync_round(round);
        self.message = if hit {
            format!("Yes! The word does contain {letter}.")
        } else {
            format!("Sorry! No {letter}'s.")
        };
        self.draw_or_log();
    }

    fn display_round_over(&mut self, outcome: RoundStatus, round: &Round) {
        self.sync_round(round);
        self.masked = round.word().word().to_string();
        self.state = TuiState::RoundOver(outcome);
        let word = round.word().word();
        self.message = match outcome {
            RoundStatus::Won => format!("You win!!! The word was {word}"),
            _ => format!("You lose! The word was {word}"),
        };
        self.status = "Round over - play again? (y/n)".to_string();
        self.draw_or_log();
    }

    fn ask_play_again(&mut self) -> bool {
        loop {
            if self.draw().is_err() {
                return false;
            }
            match self.next_key() {
                Ok(key) => {
                    if let Some(answer) = replay_key_answer(&key) {
                        info_log!("ask_play_again() - Answer: {}", answer);
                        return answer;
                    }
                }
                Err(e) => {
                    info_log!("ask_play_again() - Input error: {}", e);
                    return false;
                }
            }
        }
    }

    fn display_exit_message(&mut self, stats: &SessionStats) {
        self.message = format!("Exiting. Won {}, lost {}.", stats.won, stats.lost);
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_letter_key_is_guess() {
        assert_eq!(
            guess_key_action(&press(KeyCode::Char('e'))),
            GuessKey::Action(UserAction::Guess("e".to_string()))
        );
    }

    #[test]
    fn test_non_letter_key_reaches_validation() {
        assert_eq!(
            guess_key_action(&press(KeyCode::Char('5'))),
            GuessKey::Action(UserAction::Guess("5".to_string()))
        );
    }

    #[test]
    fn test_escape_exits() {
        assert_eq!(
            guess_key_action(&press(KeyCode::Esc)),
            GuessKey::Action(UserAction::Exit)
        );
    }

    #[test]
    fn test_modified_and_special_keys_ignored() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(guess_key_action(&ctrl_c), GuessKey::Ignored);
        assert_eq!(guess_key_action(&press(KeyCode::Enter)), GuessKey::Ignored);
        assert_eq!(guess_key_action(&press(KeyCode::Backspace)), GuessKey::Ignored);
    }

    #[test]
    fn test_replay_keys() {
        assert_eq!(replay_key_answer(&press(KeyCode::Char('y'))), Some(true));
        assert_eq!(replay_key_answer(&press(KeyCode::Char('Y'))), Some(true));
        assert_eq!(replay_key_answer(&press(KeyCode::Char('n'))), Some(false));
        assert_eq!(replay_key_answer(&press(KeyCode::Esc)), Some(false));
        assert_eq!(replay_key_answer(&press(KeyCode::Char('q'))), Some(false));
    }

    #[test]
    fn test_enter_at_replay_prompt_quits() {
        assert_eq!(replay_key_answer(&press(KeyCode::Enter)), Some(false));
        assert_eq!(replay_key_answer(&press(KeyCode::Char(' '))), Some(false));
    }

    #[test]
    fn test_modified_keys_at_replay_prompt_ignored() {
        let alt_y = KeyEvent::new(KeyCode::Char('y'), KeyModifiers::ALT);
        assert_eq!(replay_key_answer(&alt_y), None);
    }

    #[test]
    fn test_failed_setup_restores_terminal() {
        let mut restored = false;
        let result: Result<(), io::Error> =
            restore_on_error(Err(io::Error::other("no tty")), || restored = true);
        assert!(result.is_err());
        assert!(restored);
    }

    #[test]
    fn test_successful_setup_keeps_terminal() {
        let mut restored = false;
        let result = restore_on_error(Ok::<u8, io::Error>(1), || restored = true);
        assert_eq!(result.unwrap(), 1);
        assert!(!restored);
    }

    #[test]
    fn test_gallows_grows_with_wrong_guesses() {
        assert!(!gallows_lines(0).concat().contains('O'));
        assert!(gallows_lines(1).concat().contains('O'));
        assert_eq!(gallows_lines(6), gallows_lines(10));
        for wrong in 1..=MAX_WRONG {
            assert_ne!(gallows_lines(wrong - 1), gallows_lines(wrong));
        }
    }
}
