// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt;

/// Progress of a single notebook test run.
///
/// ```text
/// Decoding → WaitingForPod → PodResolved → ManifestValidated → VersionsWritten
///   → DependencyInstalled → RunningSuite(0..n) → AllPassed
/// ```
///
/// Any step may move to `Failed`; there are no retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Decoding,
    WaitingForPod,
    PodResolved,
    ManifestValidated,
    VersionsWritten,
    DependencyInstalled,
    RunningSuite(usize),
    AllPassed,
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Decoding => f.write_str("decoding"),
            Phase::WaitingForPod => f.write_str("waiting_for_pod"),
            Phase::PodResolved => f.write_str("pod_resolved"),
            Phase::ManifestValidated => f.write_str("manifest_validated"),
            Phase::VersionsWritten => f.write_str("versions_written"),
            Phase::DependencyInstalled => f.write_str("dependency_installed"),
            Phase::RunningSuite(i) => write!(f, "running_suite[{}]", i),
            Phase::AllPassed => f.write_str("all_passed"),
            Phase::Failed => f.write_str("failed"),
        }
    }
}
