// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! nbt-engine: drives notebook image tests against a live cluster

mod config;
mod make_test;
mod phase;
mod runner;

pub use config::{RunnerConfig, DEFAULT_WAIT_TIMEOUT};
pub use make_test::MakeTest;
pub use phase::Phase;
pub use runner::{
    papermill_script, NotebookRunner, RunError, RunEvent, RunReport, SuiteResult, SuiteStatus,
    EXPECTED_VERSIONS_FILE, INSTALL_PAPERMILL, VERSIONS_QUERY,
};
