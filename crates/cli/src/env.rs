// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::path::PathBuf;
use std::time::Duration;

/// Version shown by `--version` (crate version plus git hash).
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "+", env!("BUILD_GIT_HASH"));

/// Filter used when `NBT_LOG` is unset or empty.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Checkout override: `NBT_REPO_ROOT`, else the enclosing git toplevel.
pub fn repo_root() -> Option<PathBuf> {
    non_empty("NBT_REPO_ROOT").map(PathBuf::from)
}

/// yq binary override: `NBT_YQ`, else `<repo>/bin/yq`.
pub fn yq_bin() -> Option<PathBuf> {
    non_empty("NBT_YQ").map(PathBuf::from)
}

/// `kubectl wait` timeout in seconds (`NBT_WAIT_TIMEOUT_SECS`, default 600).
pub fn wait_timeout() -> Duration {
    std::env::var("NBT_WAIT_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(nbt_engine::DEFAULT_WAIT_TIMEOUT)
}

/// `tracing` filter directives from `NBT_LOG`.
pub fn log_filter() -> String {
    non_empty("NBT_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

fn non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
