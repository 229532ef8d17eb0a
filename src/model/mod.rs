// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flashjump-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flashjump and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Positions, match ranges, labels, and the visible-text snapshot the jump engine searches.

pub mod label;
pub mod position;
pub mod text;

pub use label::Label;
pub use position::{
    char_index_for_utf16_column, utf16_column_for_char_index, utf16_len, MatchRange, TextPosition,
};
pub(crate) use text::TextCursor;
pub use text::{TextBlock, VisibleText};
