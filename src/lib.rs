// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flashjump-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flashjump and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Flashjump: type a few characters, see every match on screen, press a label to land on one.
//!
//! The engine in [`jump`] is host-agnostic. It reads visible text through [`host::TextSource`] and
//! draws through [`host::PresentationPort`]; [`tui`] is the bundled terminal host.

pub mod config;
pub mod host;
pub mod jump;
pub mod model;
pub mod tui;
