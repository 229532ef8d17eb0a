// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flashjump-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flashjump and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Flashjump CLI entrypoint.
//!
//! Opens a file in the terminal viewer. Tracing is written only when `--log` names a file; the
//! filter comes from `FLASHJUMP_LOG` (default `info`).

use std::error::Error;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use flashjump::config::JumpConfig;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "FLASHJUMP_LOG";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <file> [--config <path>] [--log <path>]\n\n--config reads jump settings from a JSON file (labels, auto_jump, backspace, extend_selection).\n--log appends tracing output to <path>; {LOG_ENV} sets the filter (default info).\n\nFLASHJUMP_LABELS overrides the label alphabet; FLASHJUMP_TUI_PALETTE sets fg,bg,dim,highlight,label colors."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    file: PathBuf,
    config: Option<PathBuf>,
    log: Option<PathBuf>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut file = None::<PathBuf>;
    let mut config = None::<PathBuf>;
    let mut log = None::<PathBuf>;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                if config.is_some() {
                    return Err(());
                }
                config = Some(args.next().ok_or(())?.into());
            }
            "--log" => {
                if log.is_some() {
                    return Err(());
                }
                log = Some(args.next().ok_or(())?.into());
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if file.is_some() {
                    return Err(());
                }
                file = Some(arg.into());
            }
        }
    }

    Ok(CliOptions { file: file.ok_or(())?, config, log })
}

fn setup_tracing(path: &Path) -> Result<(), Box<dyn Error>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry().with(filter).with(file_layer).try_init()?;
    tracing::info!(path = %path.display(), "tracing initialized");
    Ok(())
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "flashjump".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        if let Some(log) = &options.log {
            setup_tracing(log)?;
        }

        let config = match &options.config {
            Some(path) => JumpConfig::load(path)?,
            None => JumpConfig::default(),
        }
        .with_env_overrides()?;
        // Reject a bad alphabet before the terminal switches to raw mode.
        config.alphabet()?;

        flashjump::tui::run(&options.file, &config)
    })();

    if let Err(err) = result {
        eprintln!("flashjump: {err}");
        std::process::exit(1);
    }
}
