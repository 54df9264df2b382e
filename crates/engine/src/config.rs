// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use std::time::Duration;

/// How long `kubectl wait` may block for the workload to become ready.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(600);

/// Settings for a [`crate::NotebookRunner`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Checkout holding `jupyter/` fixtures and `manifests/base/`.
    pub repo_root: PathBuf,
    pub wait_timeout: Duration,
}

impl RunnerConfig {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self { repo_root: repo_root.into(), wait_timeout: DEFAULT_WAIT_TIMEOUT }
    }

    pub fn wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }
}
