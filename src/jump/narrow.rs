// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flashjump-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flashjump and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use tracing::trace;

use super::scan::{scan, JumpTarget};
use crate::model::VisibleText;

/// One incremental-search step.
///
/// Keeps the targets whose next character equals `ch` (case-insensitively), each extended by
/// exactly one character. With no current targets the step is a fresh scan for `ch`.
pub fn narrow(text: &VisibleText, current: Option<&[JumpTarget]>, ch: char) -> Vec<JumpTarget> {
    let Some(current) = current else {
        return scan(text, ch);
    };

    let survivors: Vec<JumpTarget> =
        current.iter().filter_map(|target| target.extended(text, ch)).collect();
    trace!(%ch, before = current.len(), after = survivors.len(), "narrowed targets");
    survivors
}

/// Re-derives the targets for a typed sequence from scratch.
///
/// Narrowing is not invertible, so deleting a character replays the whole shortened sequence.
pub fn replay(text: &VisibleText, typed: &[char]) -> Vec<JumpTarget> {
    let Some((&first, rest)) = typed.split_first() else {
        return Vec::new();
    };

    let mut targets = scan(text, first);
    for &ch in rest {
        if targets.is_empty() {
            break;
        }
        targets = narrow(text, Some(&targets), ch);
    }
    targets
}
