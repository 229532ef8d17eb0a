// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flashjump-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flashjump and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Incremental jump engine: scanning, narrowing, labeling, and the session state machine.

pub mod labels;
pub mod narrow;
pub mod scan;
pub mod session;

pub use labels::{
    assign, banned_labels, AlphabetError, LabelAlphabet, LabelSet, DEFAULT_LABEL_CHARS,
};
pub use narrow::{narrow, replay};
pub use scan::{char_equal, scan, JumpTarget};
pub use session::{
    JumpController, JumpError, JumpKey, KeyOutcome, SessionState, StartOutcome, Termination,
    TypedChars,
};
