// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flashjump-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flashjump and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::{env, error::Error, fmt};

use ratatui::style::{Color, Modifier, Style};

pub(crate) const PALETTE_ENV: &str = "FLASHJUMP_TUI_PALETTE";

#[derive(Debug, Clone, Default)]
pub(crate) struct TuiTheme {
    palette: Option<JumpPalette>,
}

impl TuiTheme {
    pub(crate) fn from_env() -> Result<Self, ThemeError> {
        let value = match env::var(PALETTE_ENV) {
            Ok(value) => value,
            Err(env::VarError::NotPresent) => return Ok(Self::default()),
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ThemeError::InvalidEnv {
                    name: PALETTE_ENV.to_owned(),
                    value: "<non-unicode>".to_owned(),
                });
            }
        };

        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let palette = JumpPalette::parse_csv(trimmed).map_err(|error| ThemeError::InvalidEnv {
            name: PALETTE_ENV.to_owned(),
            value: format!("{trimmed} ({error})"),
        })?;
        Ok(Self { palette: Some(palette) })
    }

    pub(crate) fn base_style(&self) -> Style {
        match &self.palette {
            Some(palette) => Style::default().fg(palette.fg).bg(palette.bg),
            None => Style::default(),
        }
    }

    pub(crate) fn dim_style(&self) -> Style {
        let dim = self.palette.as_ref().map_or(Color::DarkGray, |palette| palette.dim);
        self.base_style().fg(dim)
    }

    pub(crate) fn highlight_style(&self) -> Style {
        let highlight = self.palette.as_ref().map_or(Color::Cyan, |palette| palette.highlight);
        self.base_style().fg(Color::Black).bg(highlight).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn label_style(&self) -> Style {
        let label = self.palette.as_ref().map_or(Color::Magenta, |palette| palette.label);
        self.base_style().fg(Color::White).bg(label).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn cursor_style(&self) -> Style {
        self.base_style().add_modifier(Modifier::REVERSED)
    }

    pub(crate) fn selection_style(&self) -> Style {
        self.base_style().bg(Color::Blue)
    }

    pub(crate) fn gutter_style(&self) -> Style {
        self.dim_style()
    }

    pub(crate) fn status_style(&self) -> Style {
        self.base_style().add_modifier(Modifier::REVERSED)
    }

    pub(crate) fn error_style(&self) -> Style {
        self.base_style().fg(Color::Red)
    }
}

/// Colors for the jump overlay roles: `fg,bg,dim,highlight,label`.
#[derive(Debug, Clone, PartialEq)]
struct JumpPalette {
    fg: Color,
    bg: Color,
    dim: Color,
    highlight: Color,
    label: Color,
}

impl JumpPalette {
    const CSV_LEN: usize = 5;

    fn parse_csv(value: &str) -> Result<Self, String> {
        let parts: Vec<&str> = value.split(',').map(str::trim).collect();
        if parts.len() != Self::CSV_LEN {
            return Err(format!(
                "expected {} comma-separated colors (fg,bg,dim,highlight,label), got {}",
                Self::CSV_LEN,
                parts.len()
            ));
        }

        Ok(Self {
            fg: parse_palette_color(parts[0])?,
            bg: parse_palette_color(parts[1])?,
            dim: parse_palette_color(parts[2])?,
            highlight: parse_palette_color(parts[3])?,
            label: parse_palette_color(parts[4])?,
        })
    }
}

fn parse_palette_color(value: &str) -> Result<Color, String> {
    let lower = value.trim().to_ascii_lowercase();
    if lower.is_empty() {
        return Err("empty color".to_owned());
    }
    if let Some(named) = named_color(&lower) {
        return Ok(named);
    }

    let hex = lower.strip_prefix('#').or_else(|| lower.strip_prefix("0x")).unwrap_or(&lower);
    if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(format!("invalid color: {value} (expected #RRGGBB or an ANSI name)"));
    }
    let rgb = u32::from_str_radix(hex, 16).map_err(|_| format!("invalid color: {value}"))?;
    Ok(Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8))
}

fn named_color(name: &str) -> Option<Color> {
    let color = match name {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "white" => Color::White,
        "reset" => Color::Reset,
        _ => return None,
    };
    Some(color)
}

#[derive(Debug, Clone)]
pub(crate) enum ThemeError {
    InvalidEnv { name: String, value: String },
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnv { name, value } => write!(f, "invalid env {name}={value}"),
        }
    }
}

impl Error for ThemeError {}
