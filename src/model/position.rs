// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flashjump-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flashjump and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

/// A zero-based `(line, column)` position in visible text.
///
/// Columns count UTF-16 code units, which is how most editor hosts address text. Use
/// [`char_index_for_utf16_column`] / [`utf16_column_for_char_index`] when a host draws per `char`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextPosition {
    pub line: usize,
    pub column: usize,
}

impl TextPosition {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The position one character further along the same line.
    pub(crate) fn advanced_by(self, ch: char) -> Self {
        Self { line: self.line, column: self.column + ch.len_utf16() }
    }
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Half-open span `[start, end)` covering the characters matched so far.
///
/// A range never crosses a line break and only ever grows, one character per keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchRange {
    start: TextPosition,
    end: TextPosition,
}

impl MatchRange {
    pub const fn new(start: TextPosition, end: TextPosition) -> Self {
        Self { start, end }
    }

    pub(crate) fn single(start: TextPosition, ch: char) -> Self {
        Self { start, end: start.advanced_by(ch) }
    }

    pub fn start(&self) -> TextPosition {
        self.start
    }

    pub fn end(&self) -> TextPosition {
        self.end
    }

    pub(crate) fn extended(self, ch: char) -> Self {
        Self { start: self.start, end: self.end.advanced_by(ch) }
    }

    /// Whether `position` falls inside the span.
    pub fn contains(&self, position: TextPosition) -> bool {
        self.start <= position && position < self.end
    }
}

/// Number of UTF-16 code units in `text`.
pub fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Maps a UTF-16 column to the index of the `char` it starts at.
///
/// Columns past the end of `line` (or inside a surrogate pair) map to the next char boundary, so
/// the result may equal `line.chars().count()` or exceed it by the overshoot.
pub fn char_index_for_utf16_column(line: &str, column: usize) -> usize {
    let mut units = 0usize;
    for (idx, ch) in line.chars().enumerate() {
        if units >= column {
            return idx;
        }
        units += ch.len_utf16();
    }
    let count = line.chars().count();
    count + column.saturating_sub(units)
}

pub fn utf16_column_for_char_index(line: &str, index: usize) -> usize {
    let mut chars = line.chars();
    let mut units = 0usize;
    for _ in 0..index {
        match chars.next() {
            Some(ch) => units += ch.len_utf16(),
            None => units += 1,
        }
    }
    units
}
