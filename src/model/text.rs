// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flashjump-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flashjump and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Visible-text snapshots.
//!
//! A host hands over what is on screen as line-addressed blocks. Blocks may be disjoint (split or
//! folded views); the engine only ever reads from them.

use memchr::{memchr_iter, memrchr};

use super::position::{utf16_len, MatchRange, TextPosition};

/// A run of visible text whose first line is document line `base_line`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    base_line: usize,
    text: String,
}

impl TextBlock {
    pub fn new(base_line: usize, text: impl Into<String>) -> Self {
        Self { base_line, text: text.into() }
    }

    pub fn base_line(&self) -> usize {
        self.base_line
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_count(&self) -> usize {
        memchr_iter(b'\n', self.text.as_bytes()).count() + 1
    }

    /// Position just past the last character of the block.
    pub fn end_position(&self) -> TextPosition {
        let bytes = self.text.as_bytes();
        let last_line_start = memrchr(b'\n', bytes).map_or(0, |idx| idx + 1);
        TextPosition::new(
            self.base_line + self.line_count() - 1,
            utf16_len(&self.text[last_line_start..]),
        )
    }

    /// Full span of the block, used as its dim region.
    pub fn extent(&self) -> MatchRange {
        MatchRange::new(TextPosition::new(self.base_line, 0), self.end_position())
    }

    fn line_text(&self, line: usize) -> Option<&str> {
        let offset = line.checked_sub(self.base_line)?;
        let bytes = self.text.as_bytes();
        let start = if offset == 0 {
            0
        } else {
            memchr_iter(b'\n', bytes).nth(offset - 1)? + 1
        };
        let end = memchr::memchr(b'\n', &bytes[start..]).map_or(bytes.len(), |idx| start + idx);
        Some(&self.text[start..end])
    }
}

/// Byte cursor into a [`VisibleText`] snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct TextCursor {
    pub(crate) block: usize,
    pub(crate) byte: usize,
}

/// Snapshot of the visible text for one jump session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleText {
    blocks: Vec<TextBlock>,
}

impl VisibleText {
    pub fn new(blocks: Vec<TextBlock>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[TextBlock] {
        &self.blocks
    }

    pub fn extents(&self) -> Vec<MatchRange> {
        self.blocks.iter().map(TextBlock::extent).collect()
    }

    pub(crate) fn char_at(&self, cursor: TextCursor) -> Option<char> {
        self.blocks.get(cursor.block)?.text.get(cursor.byte..)?.chars().next()
    }

    /// Character starting at `position`, looked up in the first block that covers its line.
    pub fn char_at_position(&self, position: TextPosition) -> Option<char> {
        self.blocks.iter().find_map(|block| {
            let line = block.line_text(position.line)?;
            let mut units = 0usize;
            for ch in line.chars() {
                if units == position.column {
                    return Some(ch);
                }
                units += ch.len_utf16();
                if units > position.column {
                    return None;
                }
            }
            None
        })
    }
}
