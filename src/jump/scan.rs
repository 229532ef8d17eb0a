// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flashjump-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flashjump and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use tracing::trace;

use crate::model::{MatchRange, TextCursor, TextPosition, VisibleText};

/// A match range plus the byte cursor of the character right after its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpTarget {
    range: MatchRange,
    next: TextCursor,
}

impl JumpTarget {
    pub fn range(&self) -> MatchRange {
        self.range
    }

    pub fn start(&self) -> TextPosition {
        self.range.start()
    }

    /// The literal character after the match, if the line continues.
    pub fn next_char(&self, text: &VisibleText) -> Option<char> {
        text.char_at(self.next).filter(|ch| *ch != '\n')
    }

    /// Extends the match over its next character when that character equals `ch`.
    pub(crate) fn extended(&self, text: &VisibleText, ch: char) -> Option<Self> {
        let next = self.next_char(text)?;
        if !char_equal(next, ch) {
            return None;
        }
        Some(Self {
            range: self.range.extended(next),
            next: TextCursor { block: self.next.block, byte: self.next.byte + next.len_utf8() },
        })
    }
}

/// Case-insensitive character comparison used for every match decision.
pub fn char_equal(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Finds every occurrence of `ch` in block order, then left to right. Line breaks never match.
pub fn scan(text: &VisibleText, ch: char) -> Vec<JumpTarget> {
    let mut targets = Vec::new();
    if ch == '\n' {
        return targets;
    }

    for (block_idx, block) in text.blocks().iter().enumerate() {
        let mut line = block.base_line();
        let mut column = 0usize;
        for (byte, candidate) in block.text().char_indices() {
            if candidate == '\n' {
                line += 1;
                column = 0;
                continue;
            }
            if char_equal(candidate, ch) {
                let start = TextPosition::new(line, column);
                targets.push(JumpTarget {
                    range: MatchRange::single(start, candidate),
                    next: TextCursor { block: block_idx, byte: byte + candidate.len_utf8() },
                });
            }
            column += candidate.len_utf16();
        }
    }

    trace!(%ch, matches = targets.len(), "scanned visible text");
    targets
}
