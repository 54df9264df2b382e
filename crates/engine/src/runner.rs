// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Drives one notebook image test: resolve the pod, publish expected
//! versions, then run each planned suite through papermill.

use std::path::PathBuf;
use std::time::Instant;

use nbt_adapters::{ClusterShell, ExitPolicy, OutputMode, ShellError};
use nbt_core::{
    manifest_path, merge_version_data, notebook_dir, plan_suites, DecodeError, NotebookRef, Suite,
    Target, FIXTURE_NOTEBOOK,
};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::{Phase, RunnerConfig};

/// yq expression concatenating the declared software and python dependencies.
pub const VERSIONS_QUERY: &str = r#".spec.tags[0].annotations | .["opendatahub.io/notebook-software"] + .["opendatahub.io/notebook-python-dependencies"]"#;

/// Pod-relative path the image's own tests read expected versions from.
pub const EXPECTED_VERSIONS_FILE: &str = "expected_versions.json";

pub const INSTALL_PAPERMILL: &str = "python3 -m pip install papermill";

/// Shell script executing `notebook` with papermill, writing
/// `<prefix>_output.ipynb` and `<prefix>_error.txt`.
pub fn papermill_script(notebook: &str, prefix: &str) -> String {
    format!(
        "export IPY_KERNEL_LOG_LEVEL=DEBUG; python3 -m papermill {notebook} {prefix}_output.ipynb \
         --kernel python3 --log-level DEBUG --stderr-file {}",
        error_file(prefix)
    )
}

fn error_file(prefix: &str) -> String {
    format!("{}_error.txt", prefix)
}

/// Errors that end a notebook test run
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Remote(#[from] ShellError),

    #[error("no pod found with label app={label}")]
    PodNotFound { label: String },

    #[error("computed manifest path does not exist: {}", path.display())]
    ManifestMissing { path: PathBuf },

    #[error("the notebook {suite} encountered a failure. Check logs: {error_file}")]
    NotebookFailed { suite: String, error_file: String },

    #[error("the notebook {suite} encountered a test failure (see {error_file})")]
    SuiteFailed { suite: String, error_file: String, log: String },

    #[error("unexpected failure verifying results of {suite} (grep exit code {exit_code})")]
    VerificationFailed { suite: String, exit_code: i32 },
}

impl RunError {
    /// Remote error-file contents, when a suite reported test failures.
    pub fn suite_log(&self) -> Option<&str> {
        match self {
            RunError::SuiteFailed { log, .. } => Some(log),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SuiteStatus {
    Passed,
    /// No fixture notebook in the checkout.
    Skipped { missing: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuiteResult {
    pub suite: Suite,
    #[serde(flatten)]
    pub status: SuiteStatus,
}

/// Outcome of a run in which no suite failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub target: Target,
    pub pod: String,
    pub notebook: NotebookRef,
    pub suites: Vec<SuiteResult>,
}

/// Progress published while a run is in flight.
///
/// Sent as each step completes, so a caller sees the suites that passed
/// before a later one fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    PodFound { pod: String, notebook: NotebookRef },
    SuitePassed { suite: Suite },
    SuiteSkipped { suite: Suite, missing: PathBuf },
}

/// Runs the notebook test suites of a deployed image.
///
/// Every step is awaited before the next one starts and nothing is retried;
/// the first failure ends the run.
pub struct NotebookRunner<S: ClusterShell> {
    shell: S,
    config: RunnerConfig,
    events: Option<mpsc::UnboundedSender<RunEvent>>,
}

impl<S: ClusterShell> NotebookRunner<S> {
    pub fn new(shell: S, config: RunnerConfig) -> Self {
        Self { shell, config, events: None }
    }

    /// Publish [`RunEvent`]s on `tx`. The channel closes when the runner is dropped.
    pub fn with_events(mut self, tx: mpsc::UnboundedSender<RunEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    fn emit(&self, event: RunEvent) {
        if let Some(tx) = &self.events {
            // Receiver gone means nobody is listening; the run continues.
            let _ = tx.send(event);
        }
    }

    pub async fn run(&self, target: &str) -> Result<RunReport, RunError> {
        let start = Instant::now();
        let result = self.run_inner(target).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(report) => tracing::info!(
                image = %target,
                suites = report.suites.len(),
                elapsed_ms,
                phase = %Phase::AllPassed,
                "run completed"
            ),
            Err(e) => tracing::error!(
                image = %target,
                error = %e,
                elapsed_ms,
                phase = %Phase::Failed,
                "run failed"
            ),
        }
        result
    }

    async fn run_inner(&self, name: &str) -> Result<RunReport, RunError> {
        enter(Phase::Decoding);
        let target = Target::decode(name)?;
        tracing::info!(
            label = %target.app_label,
            os = %target.os,
            accelerator = %target.accelerator,
            python = %target.python,
            "decoded target"
        );

        enter(Phase::WaitingForPod);
        self.shell.wait_for_ready(&target.app_label, self.config.wait_timeout).await?;
        let pod = self.shell.get_pod_name(&target.app_label).await?;
        if pod.is_empty() {
            return Err(RunError::PodNotFound { label: target.app_label });
        }

        enter(Phase::PodResolved);
        let notebook = NotebookRef::from_pod(&pod, target.accelerator)?;
        tracing::info!(pod = %pod, notebook = %notebook, "identified notebook");
        self.emit(RunEvent::PodFound { pod: pod.clone(), notebook });

        let manifest = manifest_path(&self.config.repo_root, notebook.id, target.accelerator);
        if !manifest.is_file() {
            return Err(RunError::ManifestMissing { path: manifest });
        }

        enter(Phase::ManifestValidated);
        let declared = self.shell.query_yaml(&manifest, VERSIONS_QUERY).await?;
        let versions = merge_version_data(&declared);
        self.shell.write_to_pod(&pod, EXPECTED_VERSIONS_FILE, &versions).await?;

        enter(Phase::VersionsWritten);
        self.shell
            .exec_in_pod(&pod, INSTALL_PAPERMILL, ExitPolicy::Check, OutputMode::Stream)
            .await?;

        enter(Phase::DependencyInstalled);
        let mut suites = Vec::new();
        for (i, suite) in plan_suites(&notebook).into_iter().enumerate() {
            enter(Phase::RunningSuite(i));
            let status = self.run_suite(&target, &pod, suite).await?;
            self.emit(match &status {
                SuiteStatus::Passed => RunEvent::SuitePassed { suite },
                SuiteStatus::Skipped { missing } => {
                    RunEvent::SuiteSkipped { suite, missing: missing.clone() }
                }
            });
            suites.push(SuiteResult { suite, status });
        }

        Ok(RunReport { target, pod, notebook, suites })
    }

    async fn run_suite(
        &self,
        target: &Target,
        pod: &str,
        suite: Suite,
    ) -> Result<SuiteStatus, RunError> {
        let fixture = notebook_dir(
            &self.config.repo_root,
            suite.base_id(),
            target.os,
            &target.python,
            "test",
        )
        .join(FIXTURE_NOTEBOOK);
        if !fixture.is_file() {
            tracing::warn!(suite = %suite, path = %fixture.display(), "test file not found, skipping");
            return Ok(SuiteStatus::Skipped { missing: fixture });
        }

        let prefix = suite.output_prefix(target.os);
        let error_file = error_file(&prefix);
        let dest = format!("./{}", FIXTURE_NOTEBOOK);
        self.shell.copy_to_pod(pod, &fixture, &dest).await?;

        tracing::info!(suite = %suite, prefix = %prefix, "executing papermill");
        let papermill = papermill_script(FIXTURE_NOTEBOOK, &prefix);
        match self.shell.exec_in_pod(pod, &papermill, ExitPolicy::Check, OutputMode::Stream).await {
            Ok(_) => {}
            Err(ShellError::Failed { .. }) => {
                return Err(RunError::NotebookFailed { suite: suite.to_string(), error_file });
            }
            Err(e) => return Err(e.into()),
        }

        // grep exits 0 when a FAILED marker is present, 1 when it is not.
        let grep = format!("grep FAILED {}", error_file);
        let found =
            self.shell.exec_in_pod(pod, &grep, ExitPolicy::Tolerate, OutputMode::Capture).await?;
        match found.exit_code {
            0 => {
                let cat = format!("cat {}", error_file);
                let log = self
                    .shell
                    .exec_in_pod(pod, &cat, ExitPolicy::Tolerate, OutputMode::Capture)
                    .await?
                    .stdout;
                Err(RunError::SuiteFailed { suite: suite.to_string(), error_file, log })
            }
            1 => {
                tracing::info!(suite = %suite, "suite passed");
                Ok(SuiteStatus::Passed)
            }
            exit_code => Err(RunError::VerificationFailed { suite: suite.to_string(), exit_code }),
        }
    }
}

fn enter(phase: Phase) {
    tracing::info!(phase = %phase, "entering phase");
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
