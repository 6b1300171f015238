//! Exports the build time for reseeding an RTC that lost power.
//!
//! The RTC keeps local wall clock time, so the UTC timestamp is shifted by
//! `VOLTMETERCLOCK_UTC_OFFSET_MINUTES` (default 0).  `SOURCE_DATE_EPOCH`
//! overrides the host clock for reproducible builds.

use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

fn env_i64(name: &str) -> Option<i64> {
    println!("cargo:rerun-if-env-changed={}", name);
    env::var(name).ok()?.trim().parse().ok()
}

fn main() {
    let utc = env_i64("SOURCE_DATE_EPOCH").unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    });
    let offset = env_i64("VOLTMETERCLOCK_UTC_OFFSET_MINUTES").unwrap_or(0) * 60;
    let local = (utc + offset).clamp(0, i64::from(u32::MAX));

    println!("cargo:rerun-if-changed=src");
    println!("cargo:rustc-env=VOLTMETERCLOCK_BUILD_TIME={}", local);
}
