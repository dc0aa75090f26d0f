//! TUI application for the Morse code game.
//!
//! This module renders the round with ratatui and turns key presses into
//! restart and quit requests. The game itself advances one tick per frame.

use anyhow::Result;
use chrono::{DateTime, Utc};
use morse_game::{
    TokenizerEvent,
    entities::{Lives, MAX_LIVES, RoundStatus, RoundView},
};
use ratatui::{
    DefaultTerminal, Frame,
    crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    layout::{Alignment, Constraint, Flex, Layout, Margin, Rect},
    style::{Style, Stylize},
    symbols::scrollbar,
    text::{Line, Span, Text},
    widgets::{
        Block, Clear, List, ListDirection, ListItem, ListState, Padding, Paragraph, Scrollbar,
        ScrollbarOrientation, ScrollbarState, Wrap,
    },
};
use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

use crate::app::{App, TickOutcome};

const MAX_LOG_RECORDS: usize = 1024;

fn make_lives_spans(lives: Lives) -> Vec<Span<'static>> {
    (0..MAX_LIVES)
        .map(|i| {
            if i < lives {
                "♥ ".light_red()
            } else {
                "♡ ".dark_gray()
            }
        })
        .collect()
}

fn make_field_line(label: &'static str, value: String, style: Style) -> Line<'static> {
    Line::from(vec![label.bold(), Span::styled(value, style)])
}

#[derive(Clone, Copy)]
enum RecordKind {
    Decoded,
    Mismatch,
    Round,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum ConnectionStatus {
    Connected,
    Disconnected,
}

#[derive(Debug, PartialEq)]
enum Control {
    Continue,
    Quit,
}

/// A timestamped history entry.
#[derive(Clone)]
struct Record {
    datetime: DateTime<Utc>,
    kind: RecordKind,
    content: String,
}

impl Record {
    fn new(kind: RecordKind, content: String) -> Self {
        Self {
            datetime: Utc::now(),
            kind,
            content,
        }
    }
}

impl From<Record> for ListItem<'_> {
    fn from(val: Record) -> Self {
        let repr = match val.kind {
            RecordKind::Decoded => "OK".light_green(),
            RecordKind::Mismatch => "MISS".light_magenta(),
            RecordKind::Round => "ROUND".light_yellow(),
            RecordKind::Error => "ERROR".light_red(),
        };

        let msg = vec![
            format!("[{} ", val.datetime.format("%H:%M:%S")).into(),
            Span::styled(format!("{repr:5}"), repr.style),
            format!("]: {}", val.content).into(),
        ];

        ListItem::new(Line::from(msg))
    }
}

/// Scrollable round history, newest first.
struct History {
    records: VecDeque<Record>,
    list_state: ListState,
    scroll_state: ScrollbarState,
}

impl History {
    fn new() -> Self {
        Self {
            records: VecDeque::new(),
            list_state: ListState::default(),
            scroll_state: ScrollbarState::default(),
        }
    }

    fn push(&mut self, record: Record) {
        self.records.push_front(record);
        self.records.truncate(MAX_LOG_RECORDS);
        self.scroll_state = self.scroll_state.content_length(self.records.len());
    }

    fn select(&mut self, idx: usize) {
        let idx = idx.min(self.records.len().saturating_sub(1));
        self.list_state.select(Some(idx));
        self.scroll_state = self.scroll_state.position(idx);
    }

    /// Towards older records.
    fn move_up(&mut self) {
        let idx = self.list_state.selected().map_or(0, |idx| idx + 1);
        self.select(idx);
    }

    /// Towards newer records.
    fn move_down(&mut self) {
        let idx = self.list_state.selected().unwrap_or(0).saturating_sub(1);
        self.select(idx);
    }

    fn jump_to_newest(&mut self) {
        self.select(0);
    }

    fn jump_to_oldest(&mut self) {
        self.select(self.records.len());
    }

    fn items(&self) -> Vec<ListItem<'static>> {
        self.records.iter().cloned().map(ListItem::from).collect()
    }
}

/// TUI App state
pub struct TuiApp {
    app: App,
    tick_interval: Duration,
    /// History of round events
    history: History,
    /// Symbol link status indicator
    link_status: ConnectionStatus,
}

impl TuiApp {
    pub fn new(app: App, tick_interval: Duration) -> Self {
        let mut tui_app = Self {
            app,
            tick_interval,
            history: History::new(),
            link_status: ConnectionStatus::Connected,
        };
        tui_app.add_log(RecordKind::Round, tui_app.round_started_message());
        tui_app
    }

    fn round_started_message(&self) -> String {
        format!(
            "round {} started, the word has {} letters",
            self.app.session().round(),
            self.app.state().target_word.len()
        )
    }

    fn add_log(&mut self, kind: RecordKind, content: String) {
        self.history.push(Record::new(kind, content));
    }

    /// Advance the game by one poll of the symbol link
    fn tick(&mut self) {
        if self.link_status == ConnectionStatus::Disconnected {
            return;
        }
        match self.app.tick() {
            Ok(Some(outcome)) => self.record_outcome(outcome),
            Ok(None) => {}
            Err(error) => {
                if error.is_fatal() {
                    self.link_status = ConnectionStatus::Disconnected;
                }
                self.add_log(RecordKind::Error, error.to_string());
            }
        }
    }

    fn record_outcome(&mut self, outcome: TickOutcome) {
        let lives = self.app.state().lives;
        let record = match outcome.event {
            TokenizerEvent::CharacterResolved(ch) if outcome.life_lost => Some((
                RecordKind::Mismatch,
                format!("{ch} doesn't fit, {lives} live(s) left"),
            )),
            TokenizerEvent::CharacterResolved(ch) => {
                Some((RecordKind::Decoded, format!("decoded {ch}")))
            }
            TokenizerEvent::DecodeFailed => Some((
                RecordKind::Mismatch,
                format!("unknown letter, {lives} live(s) left"),
            )),
            _ => None,
        };
        if let Some((kind, content)) = record {
            self.add_log(kind, content);
        }

        match self.app.session().status() {
            RoundStatus::Won => self.add_log(RecordKind::Round, "you won!".to_string()),
            RoundStatus::Lost => self.add_log(RecordKind::Round, "out of lives".to_string()),
            RoundStatus::InProgress => {}
        }
    }

    fn restart(&mut self) {
        if self.link_status == ConnectionStatus::Disconnected {
            match self.app.reopen_link() {
                Ok(()) => {
                    self.link_status = ConnectionStatus::Connected;
                    self.add_log(RecordKind::Round, "symbol link reopened".to_string());
                }
                Err(error) => self.add_log(RecordKind::Error, format!("{error:#}")),
            }
        }
        self.app.restart();
        self.add_log(RecordKind::Round, self.round_started_message());
    }

    fn handle_key(&mut self, key: KeyEvent) -> Control {
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Control::Quit,
            (KeyModifiers::CONTROL, KeyCode::Home) => self.history.jump_to_oldest(),
            (KeyModifiers::CONTROL, KeyCode::End) => self.history.jump_to_newest(),
            (KeyModifiers::NONE, KeyCode::Esc | KeyCode::Char('q')) => return Control::Quit,
            (KeyModifiers::NONE, KeyCode::Enter | KeyCode::Char('r')) => self.restart(),
            (KeyModifiers::NONE, KeyCode::Up) => self.history.move_up(),
            (KeyModifiers::NONE, KeyCode::Down) => self.history.move_down(),
            _ => {}
        }
        Control::Continue
    }

    /// Render the title bar with the remaining lives
    fn draw_title(&self, frame: &mut Frame, area: Rect, view: &RoundView) {
        let title = Paragraph::new(" Morse Code Game".bold().white()).block(
            Block::bordered().title_top(Line::from(make_lives_spans(view.lives)).right_aligned()),
        );
        frame.render_widget(title, area);
    }

    /// Render the target word and everything received so far
    fn draw_round(&self, frame: &mut Frame, area: Rect, view: &RoundView) {
        let lines = vec![
            make_field_line(
                "Target Word:     ",
                view.target_word.clone(),
                Style::default().white(),
            ),
            make_field_line(
                "Received Morse:  ",
                view.received_morse.clone(),
                Style::default().light_blue(),
            ),
            make_field_line(
                "Decoded Message: ",
                view.decoded_message.clone(),
                Style::default().light_green(),
            ),
            make_field_line(
                "Current Letter:  ",
                view.current_token.clone(),
                Style::default().light_yellow(),
            ),
        ];
        let round = Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: false })
            .block(
                Block::bordered()
                    .padding(Padding::horizontal(1))
                    .title(format!(" round {}  ", self.app.session().round())),
            );
        frame.render_widget(round, area);
    }

    /// Render the most recent symbol in the middle of its box
    fn draw_symbol(&self, frame: &mut Frame, area: Rect, view: &RoundView) {
        let block = Block::bordered().title(" last symbol  ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [symbol_area] = Layout::vertical([Constraint::Length(1)])
            .flex(Flex::Center)
            .areas(inner);
        let symbol = view.last_symbol.clone().unwrap_or_default();
        let symbol = Paragraph::new(symbol.bold().light_green()).alignment(Alignment::Center);
        frame.render_widget(symbol, symbol_area);
    }

    /// Render the history window with scrollbar
    fn draw_log(&mut self, frame: &mut Frame, area: Rect) {
        let records = List::new(self.history.items())
            .direction(ListDirection::BottomToTop)
            .highlight_style(Style::default().reversed())
            .block(Block::bordered().title(" history  "));
        frame.render_stateful_widget(records, area, &mut self.history.list_state);

        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .symbols(scrollbar::VERTICAL)
                .begin_symbol(None)
                .end_symbol(None),
            area.inner(Margin {
                vertical: 1,
                horizontal: 1,
            }),
            &mut self.history.scroll_state,
        );
    }

    /// Render the help/status bar at the bottom
    fn draw_help_bar(&self, frame: &mut Frame, area: Rect) {
        let status_indicator = match self.link_status {
            ConnectionStatus::Connected => "● Connected".green(),
            ConnectionStatus::Disconnected => "● Disconnected".red(),
        };

        let help_message = vec![
            status_indicator,
            " | press ".into(),
            "r".bold().white(),
            match self.link_status {
                ConnectionStatus::Connected => " to restart, or press ".into(),
                ConnectionStatus::Disconnected => " to reconnect and restart, or press ".into(),
            },
            "Esc".bold().white(),
            " to exit".into(),
        ];
        frame.render_widget(Paragraph::new(Line::from(help_message)), area);
    }

    /// Render the game over overlay
    fn draw_game_over(&self, frame: &mut Frame, view: &RoundView) {
        let vertical = Layout::vertical([Constraint::Length(9)]).flex(Flex::Center);
        let horizontal = Layout::horizontal([Constraint::Max(60)]).flex(Flex::Center);
        let [area] = vertical.areas(frame.area());
        let [area] = horizontal.areas(area);
        frame.render_widget(Clear, area);

        let message = match view.status {
            RoundStatus::Won => "Congratulations! You've won!".bold().light_green(),
            _ => "Game Over! You've run out of lives.".bold().light_red(),
        };
        let lines = vec![
            Line::from(message),
            Line::default(),
            Line::from(format!("The word was: {}", view.target_word)),
            Line::default(),
            Line::from(vec![
                "press ".into(),
                "r".bold().white(),
                " to play again".into(),
            ]),
        ];
        let game_over = Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .block(
                Block::bordered()
                    .padding(Padding::vertical(1))
                    .title(" game over  "),
            );
        frame.render_widget(game_over, area);
    }

    /// Main draw function - orchestrates rendering of all UI components
    fn draw(&mut self, frame: &mut Frame) {
        let view = self.app.view();

        let window = Layout::vertical([
            Constraint::Length(3), // Title and lives
            Constraint::Length(8), // Round fields
            Constraint::Min(4),    // History
            Constraint::Length(1), // Help bar
        ]);
        let [title_area, round_area, log_area, help_area] = window.areas(frame.area());

        let [fields_area, symbol_area] =
            Layout::horizontal([Constraint::Percentage(70), Constraint::Percentage(30)])
                .areas(round_area);

        self.draw_title(frame, title_area, &view);
        self.draw_round(frame, fields_area, &view);
        self.draw_symbol(frame, symbol_area, &view);
        self.draw_log(frame, log_area);
        self.draw_help_bar(frame, help_area);

        if view.status.is_over() {
            self.draw_game_over(frame, &view);
        }
    }

    /// Run the TUI application
    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        loop {
            let deadline = Instant::now() + self.tick_interval;
            terminal.draw(|frame| self.draw(frame))?;
            self.tick();

            // Drain every pending input event, waiting at most until the
            // next tick is due.
            loop {
                let timeout = deadline.saturating_duration_since(Instant::now());
                if !event::poll(timeout)? {
                    break;
                }
                if let Event::Key(key) = event::read()?
                    && key.kind == KeyEventKind::Press
                    && self.handle_key(key) == Control::Quit
                {
                    return Ok(());
                }
            }
        }
    }
}
