// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flashjump-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flashjump and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Collaborator contracts implemented by the host editor.
//!
//! The jump engine reads visible text through [`TextSource`] and pushes every visible effect
//! (mode flag, overlays, cursor moves) through [`PresentationPort`]. An `Option` of either trait
//! is itself an implementation: `None` reports [`HostError::Unmounted`].

use std::fmt;

use crate::model::{Label, MatchRange, TextBlock, TextPosition};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    Unmounted { collaborator: &'static str },
    Rejected { reason: String },
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unmounted { collaborator } => write!(f, "{collaborator} is not mounted"),
            Self::Rejected { reason } => write!(f, "host rejected operation: {reason}"),
        }
    }
}

impl std::error::Error for HostError {}

/// Handle for one presented overlay; the core releases it on the next replace or on teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(u64);

impl OverlayId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

/// One full overlay update. Presenting a frame replaces everything presented before it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayFrame {
    pub dim_regions: Vec<MatchRange>,
    pub highlights: Vec<MatchRange>,
    pub labels: Vec<(Label, TextPosition)>,
}

impl OverlayFrame {
    pub fn is_highlighted(&self, position: TextPosition) -> bool {
        self.highlights.iter().any(|range| range.contains(position))
    }

    pub fn is_dimmed(&self, position: TextPosition) -> bool {
        self.dim_regions.iter().any(|range| {
            range.contains(position)
                || (range.start().line <= position.line && position.line < range.end().line)
        })
    }
}

pub trait TextSource {
    /// Snapshot of on-screen text; may differ between calls if the view scrolled.
    fn visible_text_blocks(&self) -> Result<Vec<TextBlock>, HostError>;
}

pub trait PresentationPort {
    /// Tells the host that jump mode was entered or left (e.g. for keybinding scoping).
    fn set_mode(&mut self, active: bool) -> Result<(), HostError>;

    fn present(&mut self, frame: &OverlayFrame) -> Result<OverlayId, HostError>;

    fn release(&mut self, overlay: OverlayId) -> Result<(), HostError>;

    fn show_typed_prefix(&mut self, _typed: &[char]) -> Result<(), HostError> {
        Ok(())
    }

    /// Performs the jump; an existing selection anchor is extended to `target` instead of being
    /// collapsed.
    fn move_cursor_or_extend_selection(&mut self, target: TextPosition) -> Result<(), HostError>;

    fn reveal_in_view(&mut self, target: TextPosition) -> Result<(), HostError>;
}

impl TextSource for Vec<TextBlock> {
    fn visible_text_blocks(&self) -> Result<Vec<TextBlock>, HostError> {
        Ok(self.clone())
    }
}

impl<T: TextSource> TextSource for Option<T> {
    fn visible_text_blocks(&self) -> Result<Vec<TextBlock>, HostError> {
        match self {
            Some(source) => source.visible_text_blocks(),
            None => Err(HostError::Unmounted { collaborator: "text source" }),
        }
    }
}

impl<P: PresentationPort> PresentationPort for Option<P> {
    fn set_mode(&mut self, active: bool) -> Result<(), HostError> {
        mounted(self)?.set_mode(active)
    }

    fn present(&mut self, frame: &OverlayFrame) -> Result<OverlayId, HostError> {
        mounted(self)?.present(frame)
    }

    fn release(&mut self, overlay: OverlayId) -> Result<(), HostError> {
        mounted(self)?.release(overlay)
    }

    fn show_typed_prefix(&mut self, typed: &[char]) -> Result<(), HostError> {
        mounted(self)?.show_typed_prefix(typed)
    }

    fn move_cursor_or_extend_selection(&mut self, target: TextPosition) -> Result<(), HostError> {
        mounted(self)?.move_cursor_or_extend_selection(target)
    }

    fn reveal_in_view(&mut self, target: TextPosition) -> Result<(), HostError> {
        mounted(self)?.reveal_in_view(target)
    }
}

fn mounted<P>(port: &mut Option<P>) -> Result<&mut P, HostError> {
    port.as_mut().ok_or(HostError::Unmounted { collaborator: "presentation port" })
}
