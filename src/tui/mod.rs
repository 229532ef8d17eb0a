// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flashjump-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flashjump and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! A read-only file viewer (ratatui + crossterm) that hosts the jump engine. The rows on screen are
//! the visible text; the viewer draws dimming, highlights, and labels from the presented overlay
//! and moves its cursor (or extends its selection) when a jump lands.

use std::{
    error::Error,
    fs, io,
    path::Path,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use tracing::{debug, info, warn};

use crate::config::{ConfigError, JumpConfig};
use crate::host::{HostError, OverlayFrame, OverlayId, PresentationPort, TextSource};
use crate::jump::{JumpController, JumpKey, KeyOutcome, StartOutcome, Termination};
use crate::model::{
    char_index_for_utf16_column, utf16_column_for_char_index, utf16_len, TextBlock, TextPosition,
};

mod theme;

use theme::TuiTheme;

const JUMP_KEY: char = 's';
const TOAST_TTL: Duration = Duration::from_secs(2);

/// Runs the viewer on `path` until the user quits.
pub fn run(path: &Path, config: &JumpConfig) -> Result<(), Box<dyn Error>> {
    let document = Document::open(path)?;
    let theme = TuiTheme::from_env()?;
    let mut app = App::new(document, config, theme)?;
    let mut terminal = TerminalSession::new()?;
    info!(path = %path.display(), lines = app.document.line_count(), "viewer started");

    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                _ => {}
            }
        }
    }

    info!("viewer closed");
    Ok(())
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let main_area = layout[0];
    let status_area = layout[1];

    app.resize(usize::from(main_area.height));
    frame.render_widget(Paragraph::new(app.body_text()), main_area);
    frame.render_widget(Paragraph::new(app.status_line()), status_area);

    if app.show_help {
        render_help(frame, main_area);
    }
}

// Status line and help popup.
include!("chrome.rs");

#[derive(Debug, Clone, PartialEq, Eq)]
struct Document {
    name: String,
    lines: Vec<String>,
}

impl Document {
    fn open(path: &Path) -> io::Result<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(Self::from_text(path.display().to_string(), &raw))
    }

    fn from_text(name: impl Into<String>, raw: &str) -> Self {
        let mut lines: Vec<String> = raw.lines().map(str::to_owned).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self { name: name.into(), lines }
    }

    fn line(&self, idx: usize) -> &str {
        self.lines.get(idx).map_or("", String::as_str)
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// The rows currently on screen, offered to the jump engine as one block.
struct ViewportSource<'a> {
    document: &'a Document,
    top: usize,
    height: usize,
}

fn viewport_source<'a>(document: &'a Document, view: &ViewState) -> ViewportSource<'a> {
    ViewportSource { document, top: view.top, height: view.height }
}

impl TextSource for ViewportSource<'_> {
    fn visible_text_blocks(&self) -> Result<Vec<TextBlock>, HostError> {
        if self.height == 0 {
            return Err(HostError::Unmounted { collaborator: "viewport" });
        }
        let end = self.top.saturating_add(self.height).min(self.document.line_count());
        let start = self.top.min(end);
        let text = self.document.lines[start..end].join("\n");
        Ok(vec![TextBlock::new(start, text)])
    }
}

/// Cursor, scroll, and overlay state; the viewer's side of the presentation contract.
#[derive(Debug, Clone, Default)]
struct ViewState {
    top: usize,
    height: usize,
    line_count: usize,
    cursor: TextPosition,
    anchor: Option<TextPosition>,
    extend_selection: bool,
    jump_mode: bool,
    overlay: Option<(OverlayId, OverlayFrame)>,
    next_overlay: u64,
    typed: String,
}

impl ViewState {
    fn scroll_to(&mut self, line: usize) {
        let height = self.height.max(1);
        if line < self.top {
            self.top = line;
        } else if line >= self.top + height {
            self.top = line + 1 - height;
        }
    }

    fn clamp_top(&mut self) {
        let max_top = self.line_count.saturating_sub(self.height.max(1));
        self.top = self.top.min(max_top);
    }

    fn frame(&self) -> Option<&OverlayFrame> {
        self.overlay.as_ref().map(|(_, frame)| frame)
    }

    /// Ordered `(first, last)` of the selection, both inclusive.
    fn selection(&self) -> Option<(TextPosition, TextPosition)> {
        let anchor = self.anchor?;
        Some((anchor.min(self.cursor), anchor.max(self.cursor)))
    }
}

impl PresentationPort for ViewState {
    fn set_mode(&mut self, active: bool) -> Result<(), HostError> {
        self.jump_mode = active;
        Ok(())
    }

    fn present(&mut self, frame: &OverlayFrame) -> Result<OverlayId, HostError> {
        self.next_overlay += 1;
        let id = OverlayId::new(self.next_overlay);
        self.overlay = Some((id, frame.clone()));
        Ok(id)
    }

    fn release(&mut self, overlay: OverlayId) -> Result<(), HostError> {
        match &self.overlay {
            Some((live, _)) if *live == overlay => {
                self.overlay = None;
                Ok(())
            }
            _ => Err(HostError::Rejected {
                reason: format!("overlay {} is not live", overlay.get()),
            }),
        }
    }

    fn show_typed_prefix(&mut self, typed: &[char]) -> Result<(), HostError> {
        self.typed = typed.iter().collect();
        Ok(())
    }

    fn move_cursor_or_extend_selection(&mut self, target: TextPosition) -> Result<(), HostError> {
        if !self.extend_selection {
            self.anchor = None;
        }
        self.cursor = target;
        Ok(())
    }

    fn reveal_in_view(&mut self, target: TextPosition) -> Result<(), HostError> {
        self.scroll_to(target.line);
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    is_error: bool,
    expires_at: Instant,
}

struct App {
    document: Document,
    view: ViewState,
    jump: JumpController,
    theme: TuiTheme,
    toast: Option<Toast>,
    show_help: bool,
    should_quit: bool,
}

impl App {
    fn new(document: Document, config: &JumpConfig, theme: TuiTheme) -> Result<Self, ConfigError> {
        let view = ViewState {
            line_count: document.line_count(),
            extend_selection: config.extend_selection,
            ..ViewState::default()
        };
        Ok(Self {
            document,
            view,
            jump: config.controller()?,
            theme,
            toast: None,
            show_help: false,
            should_quit: false,
        })
    }

    fn resize(&mut self, height: usize) {
        self.view.height = height;
        self.view.clamp_top();
    }

    fn handle_key(&mut self, key: KeyEvent) {
        self.handle_key_code(key.code);
    }

    fn handle_key_code(&mut self, code: KeyCode) {
        if self.jump.is_active() {
            self.handle_jump_key(code);
            return;
        }

        if self.show_help {
            match code {
                KeyCode::Esc | KeyCode::Char('?') => self.show_help = false,
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            }
            return;
        }

        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char(JUMP_KEY) => self.start_jump(),
            KeyCode::Char('v') => {
                self.view.anchor = match self.view.anchor {
                    Some(_) => None,
                    None => Some(self.view.cursor),
                };
            }
            KeyCode::Esc => self.view.anchor = None,
            KeyCode::Up | KeyCode::Char('k') => self.move_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.move_down(1),
            KeyCode::Left | KeyCode::Char('h') => self.move_left(),
            KeyCode::Right | KeyCode::Char('l') => self.move_right(),
            KeyCode::PageUp => self.move_up(self.view.height.max(1)),
            KeyCode::PageDown => self.move_down(self.view.height.max(1)),
            KeyCode::Home | KeyCode::Char('0') => self.view.cursor.column = 0,
            KeyCode::End | KeyCode::Char('$') => {
                self.view.cursor.column = utf16_len(self.document.line(self.view.cursor.line));
            }
            KeyCode::Char('g') => self.move_up(self.view.cursor.line),
            KeyCode::Char('G') => self.move_down(self.document.line_count()),
            _ => {}
        }
    }

    fn start_jump(&mut self) {
        let source = viewport_source(&self.document, &self.view);
        match self.jump.start(&source, &mut self.view) {
            Ok(StartOutcome::Started) => debug!("jump mode entered"),
            Ok(StartOutcome::AlreadyActive) => {}
            Err(err) => {
                warn!(%err, "could not start jump");
                self.set_error(err.to_string());
            }
        }
    }

    fn handle_jump_key(&mut self, code: KeyCode) {
        let key = match code {
            KeyCode::Esc => JumpKey::Cancel,
            KeyCode::Enter => JumpKey::Accept,
            KeyCode::Backspace => JumpKey::Backspace,
            KeyCode::Char(ch) => JumpKey::Char(ch),
            _ => return,
        };

        let mut attempted = self.view.typed.clone();
        if let JumpKey::Char(ch) = key {
            attempted.push(ch);
        }

        let source = viewport_source(&self.document, &self.view);
        match self.jump.handle_key(key, &source, &mut self.view) {
            Ok(KeyOutcome::Finished(Termination::Exhausted)) => {
                self.set_toast(format!("No match for \"{attempted}\""));
            }
            Ok(KeyOutcome::Finished(Termination::Jumped(target))) => {
                debug!(%target, "cursor moved by jump");
            }
            Ok(_) => {}
            Err(err) => self.set_error(err.to_string()),
        }
    }

    fn move_up(&mut self, count: usize) {
        let line = self.view.cursor.line.saturating_sub(count);
        self.set_cursor_line(line);
    }

    fn move_down(&mut self, count: usize) {
        let last = self.document.line_count().saturating_sub(1);
        let line = self.view.cursor.line.saturating_add(count).min(last);
        self.set_cursor_line(line);
    }

    fn set_cursor_line(&mut self, line: usize) {
        let text = self.document.line(line);
        let column = self.view.cursor.column.min(utf16_len(text));
        // snap out of a surrogate pair
        let column = utf16_column_for_char_index(text, char_index_for_utf16_column(text, column));
        self.view.cursor = TextPosition::new(line, column);
        self.view.scroll_to(line);
    }

    fn move_left(&mut self) {
        let text = self.document.line(self.view.cursor.line);
        let idx = char_index_for_utf16_column(text, self.view.cursor.column);
        self.view.cursor.column = utf16_column_for_char_index(text, idx.saturating_sub(1));
    }

    fn move_right(&mut self) {
        let text = self.document.line(self.view.cursor.line);
        let idx = char_index_for_utf16_column(text, self.view.cursor.column);
        let next = (idx + 1).min(text.chars().count());
        self.view.cursor.column = utf16_column_for_char_index(text, next);
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.push_toast(message.into(), false);
    }

    fn set_error(&mut self, message: impl Into<String>) {
        self.push_toast(message.into(), true);
    }

    fn push_toast(&mut self, message: String, is_error: bool) {
        self.toast = Some(Toast { message, is_error, expires_at: Instant::now() + TOAST_TTL });
    }

    fn active_toast(&self) -> Option<&Toast> {
        self.toast.as_ref().filter(|toast| toast.expires_at > Instant::now())
    }

    fn body_text(&self) -> Text<'static> {
        let gutter_width = decimal_width(self.document.line_count());
        let mut numbers = itoa::Buffer::new();
        let mut lines = Vec::with_capacity(self.view.height);

        for row in 0..self.view.height {
            let line_idx = self.view.top + row;
            if line_idx >= self.document.line_count() {
                lines.push(Line::from(Span::styled("~", self.theme.gutter_style())));
                continue;
            }

            let number = numbers.format(line_idx + 1);
            let mut spans =
                vec![Span::styled(format!("{number:>gutter_width$} "), self.theme.gutter_style())];
            spans.extend(self.line_spans(line_idx));
            lines.push(Line::from(spans));
        }

        Text::from(lines)
    }

    fn line_spans(&self, line_idx: usize) -> Vec<Span<'static>> {
        let line = self.document.line(line_idx);
        let mut cells: Vec<(char, Style)> = Vec::with_capacity(line.len() + 1);
        let mut column = 0usize;
        for ch in line.chars() {
            let display = if ch.is_control() { ' ' } else { ch };
            cells.push((display, self.cell_style(TextPosition::new(line_idx, column))));
            column += ch.len_utf16();
        }

        let line_end = TextPosition::new(line_idx, column);
        if self.view.cursor == line_end {
            cells.push((' ', self.cell_style(line_end)));
        }

        if let Some(frame) = self.view.frame() {
            for (label, at) in frame.labels.iter().filter(|(_, at)| at.line == line_idx) {
                let idx = char_index_for_utf16_column(line, at.column);
                if idx >= cells.len() {
                    cells.resize(idx + 1, (' ', self.theme.base_style()));
                }
                cells[idx] = (label.as_char(), self.theme.label_style());
            }
        }

        group_cells(cells)
    }

    fn cell_style(&self, position: TextPosition) -> Style {
        let mut style = self.theme.base_style();
        if let Some((first, last)) = self.view.selection() {
            if first <= position && position <= last {
                style = self.theme.selection_style();
            }
        }
        if let Some(frame) = self.view.frame() {
            if frame.is_highlighted(position) {
                style = self.theme.highlight_style();
            } else if frame.is_dimmed(position) {
                style = self.theme.dim_style();
            }
        }
        if position == self.view.cursor && !self.view.jump_mode {
            style = style.patch(self.theme.cursor_style());
        }
        style
    }
}

fn group_cells(cells: Vec<(char, Style)>) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut current_style = None::<Style>;
    for (ch, style) in cells {
        if current_style.is_some_and(|active| active != style) {
            let style = current_style.unwrap_or_default();
            spans.push(Span::styled(std::mem::take(&mut current), style));
        }
        current_style = Some(style);
        current.push(ch);
    }
    if let Some(style) = current_style {
        spans.push(Span::styled(current, style));
    }
    spans
}

fn decimal_width(mut value: usize) -> usize {
    let mut width = 1;
    while value >= 10 {
        value /= 10;
        width += 1;
    }
    width
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}
