// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flashjump-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flashjump and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::str::FromStr;
use std::time::Duration;

use criterion::Criterion;
use pprof::criterion::{Output, PProfProfiler};

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name).ok().and_then(|raw| raw.trim().parse::<T>().ok()).unwrap_or(default)
}

/// Criterion with a flamegraph profiler; tune with `PROFILE_FREQ` and `BENCH_*` env vars.
pub fn criterion() -> Criterion {
    let frequency = env_or("PROFILE_FREQ", 997i32).clamp(1, 10_000);
    let sample_size = env_or("BENCH_SAMPLE_SIZE", 100usize).clamp(10, 500);
    let warmup = env_or("BENCH_WARMUP_MS", 1_000u64).clamp(100, 60_000);
    let measurement = env_or("BENCH_MEASUREMENT_MS", 3_000u64).clamp(100, 120_000);

    Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(Duration::from_millis(warmup))
        .measurement_time(Duration::from_millis(measurement))
        .with_profiler(PProfProfiler::new(frequency, Output::Flamegraph(None)))
}
