// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flashjump-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flashjump and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use smallvec::SmallVec;
use tracing::trace;

use super::scan::{char_equal, JumpTarget};
use crate::model::{Label, VisibleText};

/// Home-row-first label priority.
pub const DEFAULT_LABEL_CHARS: &str = "asdfghjklqwertyuiopzxcvbnm";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlphabetError {
    Empty,
    Duplicate(char),
    Reserved(char),
}

impl fmt::Display for AlphabetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("label alphabet must not be empty"),
            Self::Duplicate(ch) => write!(f, "label alphabet contains {ch:?} more than once"),
            Self::Reserved(ch) => write!(f, "label alphabet contains reserved key {ch:?}"),
        }
    }
}

impl std::error::Error for AlphabetError {}

/// Priority-ordered, duplicate-free set of label characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelAlphabet {
    chars: Vec<char>,
}

impl LabelAlphabet {
    pub fn new(label_chars: &str) -> Result<Self, AlphabetError> {
        let chars: Vec<char> = label_chars.chars().collect();
        if chars.is_empty() {
            return Err(AlphabetError::Empty);
        }

        for (idx, &ch) in chars.iter().enumerate() {
            if ch.is_whitespace() || ch.is_control() {
                return Err(AlphabetError::Reserved(ch));
            }
            if chars[..idx].contains(&ch) {
                return Err(AlphabetError::Duplicate(ch));
            }
        }

        Ok(Self { chars })
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

impl Default for LabelAlphabet {
    fn default() -> Self {
        Self { chars: DEFAULT_LABEL_CHARS.chars().collect() }
    }
}

/// Labels assigned for one narrowing step, each pointing at a target index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    entries: Vec<(Label, usize)>,
}

impl LabelSet {
    /// Exact (case-sensitive) lookup of a typed label.
    pub fn get(&self, label: Label) -> Option<usize> {
        self.entries.iter().find(|(assigned, _)| *assigned == label).map(|(_, idx)| *idx)
    }

    pub fn label_for(&self, target_idx: usize) -> Option<Label> {
        self.entries.iter().find(|(_, idx)| *idx == target_idx).map(|(label, _)| *label)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Label, usize)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Marks, per alphabet slot, whether that label is also the next char of some target and must
/// keep meaning "continue narrowing".
///
/// Work is bounded by `targets × alphabet` and stops once every slot is banned.
pub fn banned_labels(
    text: &VisibleText,
    targets: &[JumpTarget],
    alphabet: &LabelAlphabet,
) -> SmallVec<[bool; 32]> {
    let mut banned: SmallVec<[bool; 32]> = SmallVec::from_elem(false, alphabet.len());
    let mut remaining = alphabet.len();

    for next in targets.iter().filter_map(|target| target.next_char(text)) {
        for (slot, &label) in banned.iter_mut().zip(alphabet.chars()) {
            if !*slot && char_equal(next, label) {
                *slot = true;
                remaining -= 1;
            }
        }
        if remaining == 0 {
            break;
        }
    }
    banned
}

/// Labels targets in scan order with the first alphabet chars that collide with no banned char.
///
/// When the alphabet runs out the remaining targets stay unlabeled for this step.
pub fn assign(text: &VisibleText, targets: &[JumpTarget], alphabet: &LabelAlphabet) -> LabelSet {
    let banned = banned_labels(text, targets, alphabet);
    let free = alphabet
        .chars()
        .iter()
        .zip(&banned)
        .filter(|(_, banned)| !**banned)
        .map(|(ch, _)| *ch);

    let entries: Vec<(Label, usize)> =
        (0..targets.len()).zip(free).map(|(idx, ch)| (Label::new(ch), idx)).collect();

    trace!(
        targets = targets.len(),
        labeled = entries.len(),
        banned = banned.iter().filter(|banned| **banned).count(),
        "assigned labels"
    );
    LabelSet { entries }
}
