// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! nbt-adapters: external command collaborators (`kubectl`, `yq`, `make`, `git`)

pub mod cluster;
pub mod process;
pub mod repo;
#[cfg(any(test, feature = "test-support"))]
pub mod responses;

pub use cluster::{ClusterShell, KubeShell};
pub use process::{
    CommandOutput, CommandRunner, CommandSpec, ExitPolicy, OutputMode, ProcessRunner, ShellError,
};
pub use repo::git_toplevel;

#[cfg(any(test, feature = "test-support"))]
pub use cluster::{FakeClusterShell, ShellCall, ShellOp};
#[cfg(any(test, feature = "test-support"))]
pub use process::FakeRunner;
#[cfg(any(test, feature = "test-support"))]
pub use responses::Responses;
