// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flashjump-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flashjump and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

// Deterministic viewport text for benchmarks (no RNG crate).

use flashjump::model::{TextBlock, VisibleText};

const WORDS: &[&str] = &[
    "fn", "let", "match", "self", "return", "impl", "struct", "String", "Option", "Result",
    "iter", "map", "collect", "into", "clone", "Vec", "usize", "okay", "error", "frame",
    "überall", "naïve", "😀", "x", "y", "z",
];

#[derive(Debug, Clone, Copy)]
pub enum Case {
    /// A laptop terminal.
    Small,
    /// A tall monitor with split panes.
    Split,
    /// Far more than any screen; stresses the linear scan.
    Huge,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Split => "split",
            Self::Huge => "huge",
        }
    }

    fn shape(self) -> (usize, usize, usize) {
        // (blocks, lines per block, words per line)
        match self {
            Self::Small => (1, 40, 10),
            Self::Split => (3, 90, 14),
            Self::Huge => (1, 2_000, 16),
        }
    }
}

pub fn visible_text(case: Case) -> VisibleText {
    VisibleText::new(blocks(case))
}

pub fn blocks(case: Case) -> Vec<TextBlock> {
    let (block_count, lines, words) = case.shape();
    let mut state = 0x9e37_79b9_7f4a_7c15u64;
    (0..block_count)
        .map(|block| {
            let mut text = String::new();
            for line in 0..lines {
                if line > 0 {
                    text.push('\n');
                }
                text.push_str(&"    ".repeat(line % 4));
                for word in 0..words {
                    if word > 0 {
                        text.push(' ');
                    }
                    state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
                    text.push_str(WORDS[(state >> 33) as usize % WORDS.len()]);
                }
            }
            TextBlock::new(block * (lines + 25), text)
        })
        .collect()
}

/// `count` targets for `'x'`, each followed by a different CJK ideograph.
pub fn distinct_next_chars(count: u32) -> VisibleText {
    let mut text = String::new();
    for (idx, cjk) in (0..count).filter_map(|offset| char::from_u32(0x4E00 + offset)).enumerate() {
        if idx > 0 && idx % 80 == 0 {
            text.push('\n');
        }
        text.push('x');
        text.push(cjk);
    }
    VisibleText::new(vec![TextBlock::new(0, text)])
}
