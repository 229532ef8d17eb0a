// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flashjump-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flashjump and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

// Status line, help popup, and layout helpers used by TUI rendering.
const HELP_ACCENT: Color = Color::Cyan;

impl App {
    fn status_line(&self) -> Line<'static> {
        let status_style = self.theme.status_style();
        let mut spans = Vec::<Span<'static>>::new();
        let mut numbers = itoa::Buffer::new();

        if self.jump.is_active() {
            spans.push(Span::styled(" JUMP ", status_style.add_modifier(Modifier::BOLD)));
            spans.push(Span::raw(" "));
            if self.view.typed.is_empty() {
                spans.push(Span::styled("type a character", self.theme.dim_style()));
            } else {
                spans.push(Span::styled(self.view.typed.clone(), self.theme.highlight_style()));
                let count = self.jump.targets().len();
                let noun = if count == 1 { "match" } else { "matches" };
                spans.push(Span::raw(format!("  {} {noun}", numbers.format(count))));
            }
            spans.push(Span::styled("  Esc cancel  Enter accept", self.theme.dim_style()));
            return Line::from(spans);
        }

        spans.push(Span::styled(format!(" {} ", self.document.name), status_style));
        let cursor = self.view.cursor;
        let mut column = itoa::Buffer::new();
        spans.push(Span::raw(format!(
            " {}:{}",
            numbers.format(cursor.line + 1),
            column.format(cursor.column + 1)
        )));
        if self.view.anchor.is_some() {
            spans.push(Span::styled("  SELECT", self.theme.selection_style()));
        }

        match self.active_toast() {
            Some(toast) if toast.is_error => {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(toast.message.clone(), self.theme.error_style()));
            }
            Some(toast) => {
                spans.push(Span::raw("  "));
                spans.push(Span::raw(toast.message.clone()));
            }
            None => {
                spans.push(Span::styled(
                    format!("  {JUMP_KEY} jump  v select  ? help  q quit"),
                    self.theme.dim_style(),
                ));
            }
        }

        Line::from(spans)
    }
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = (100u16.saturating_sub(height_percent)) / 2;
    let horizontal_margin = (100u16.saturating_sub(width_percent)) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}

fn help_kv(key: &str, desc: &str, key_width: usize, key_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:>width$}", width = key_width), key_style),
        Span::raw("  "),
        Span::raw(desc.to_owned()),
    ])
}

fn help_lines() -> Vec<Line<'static>> {
    let key_style = Style::default().fg(HELP_ACCENT).add_modifier(Modifier::BOLD);
    let header_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let key_col_width = ["h/j/k/l, ←↓↑→", "PgUp/PgDn", "Home/End, 0/$", "Backspace"]
        .iter()
        .map(|s| s.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::<Line<'static>>::new();

    lines.push(Line::from(Span::styled("--- View ---", header_style)));
    lines.push(help_kv("?", "Help (toggle)", key_col_width, key_style));
    lines.push(help_kv("q", "Quit", key_col_width, key_style));
    lines.push(help_kv("h/j/k/l, ←↓↑→", "Move cursor", key_col_width, key_style));
    lines.push(help_kv("PgUp/PgDn", "Move by one screen", key_col_width, key_style));
    lines.push(help_kv("Home/End, 0/$", "Line start/end", key_col_width, key_style));
    lines.push(help_kv("g/G", "First/last line", key_col_width, key_style));
    lines.push(help_kv("v", "Toggle selection anchor", key_col_width, key_style));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("--- Jump ---", header_style)));
    lines.push(help_kv(&JUMP_KEY.to_string(), "Start jump", key_col_width, key_style));
    lines.push(help_kv("Type", "Narrow matches or pick a label", key_col_width, key_style));
    lines.push(help_kv("Enter", "Jump to the only match", key_col_width, key_style));
    lines.push(help_kv("Backspace", "Remove last typed char", key_col_width, key_style));
    lines.push(help_kv("Esc", "Cancel", key_col_width, key_style));

    lines
}

fn render_help(frame: &mut Frame<'_>, main_area: Rect) {
    let area = centered_rect(70, 70, main_area);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("─ Help ─")
        .border_style(Style::default().fg(HELP_ACCENT))
        .title_style(Style::default().fg(HELP_ACCENT).add_modifier(Modifier::BOLD));

    let paragraph = Paragraph::new(help_lines())
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
