// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flashjump-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flashjump and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Jump configuration.
//!
//! Read from an optional JSON file, then overridden from the environment:
//!
//! ```json
//! { "labels": "asdfghjkl", "auto_jump": false, "backspace": true, "extend_selection": true }
//! ```

use std::{env, fmt, fs, path::Path};

use serde::Deserialize;

use crate::jump::{AlphabetError, JumpController, LabelAlphabet, DEFAULT_LABEL_CHARS};

pub const LABELS_ENV: &str = "FLASHJUMP_LABELS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JumpConfig {
    pub labels: String,
    pub auto_jump: bool,
    pub backspace: bool,
    pub extend_selection: bool,
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            labels: DEFAULT_LABEL_CHARS.to_owned(),
            auto_jump: false,
            backspace: true,
            extend_selection: true,
        }
    }
}

impl JumpConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|err| ConfigError::Parse { message: err.to_string() })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        Self::from_json_str(&raw)
    }

    /// Applies `FLASHJUMP_LABELS` when it is set and non-empty.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        let labels = match env::var(LABELS_ENV) {
            Ok(value) => Some(value),
            Err(env::VarError::NotPresent) => None,
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::InvalidEnv {
                    name: LABELS_ENV.to_owned(),
                    value: "<non-unicode>".to_owned(),
                });
            }
        };
        self.with_label_override(labels)
    }

    fn with_label_override(mut self, labels: Option<String>) -> Result<Self, ConfigError> {
        let Some(labels) = labels else {
            return Ok(self);
        };
        let trimmed = labels.trim();
        if trimmed.is_empty() {
            return Ok(self);
        }
        LabelAlphabet::new(trimmed).map_err(|err| ConfigError::InvalidEnv {
            name: LABELS_ENV.to_owned(),
            value: format!("{trimmed} ({err})"),
        })?;
        self.labels = trimmed.to_owned();
        Ok(self)
    }

    pub fn alphabet(&self) -> Result<LabelAlphabet, ConfigError> {
        LabelAlphabet::new(&self.labels).map_err(ConfigError::Alphabet)
    }

    pub fn controller(&self) -> Result<JumpController, ConfigError> {
        Ok(JumpController::new(self.alphabet()?)
            .with_auto_jump(self.auto_jump)
            .with_backspace(self.backspace))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Io { path: String, message: String },
    Parse { message: String },
    InvalidEnv { name: String, value: String },
    Alphabet(AlphabetError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "failed to read config {path}: {message}"),
            Self::Parse { message } => write!(f, "invalid config: {message}"),
            Self::InvalidEnv { name, value } => write!(f, "invalid env {name}={value}"),
            Self::Alphabet(err) => write!(f, "invalid labels: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {}
