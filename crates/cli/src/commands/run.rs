// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `nbt run`: test a deployed notebook image in its pod.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use nbt_adapters::{git_toplevel, KubeShell, ProcessRunner};
use nbt_engine::{NotebookRunner, RunnerConfig};
use tokio::sync::mpsc;

use crate::color;
use crate::exit_error::ExitError;
use crate::output::{event_line, print_suite_log};

#[derive(Args)]
pub struct RunArgs {
    /// Makefile test target, e.g. `jupyter-minimal-ubi9-python-3.11`
    pub target: String,

    /// Seconds to wait for the workload to become ready [env: NBT_WAIT_TIMEOUT_SECS]
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Repository checkout [env: NBT_REPO_ROOT, default: git toplevel]
    #[arg(long)]
    pub repo_root: Option<PathBuf>,

    /// yq binary [env: NBT_YQ, default: <repo>/bin/yq]
    #[arg(long)]
    pub yq: Option<PathBuf>,
}

/// Settings after applying flags over environment over defaults.
#[derive(Debug, PartialEq)]
pub struct Resolved {
    pub config: RunnerConfig,
    pub yq: PathBuf,
}

/// Flags win over environment; the yq binary must exist.
pub fn resolve(args: &RunArgs, repo_root: PathBuf) -> Result<Resolved, ExitError> {
    let yq = args
        .yq
        .clone()
        .or_else(crate::env::yq_bin)
        .unwrap_or_else(|| repo_root.join("bin").join("yq"));
    if !yq.exists() {
        return Err(ExitError::failure(format!("missing bin/yq at {}", yq.display())));
    }
    let timeout = args.timeout_secs.map(Duration::from_secs).unwrap_or_else(crate::env::wait_timeout);
    Ok(Resolved { config: RunnerConfig::new(repo_root).wait_timeout(timeout), yq })
}

async fn repo_root(args: &RunArgs, runner: &ProcessRunner) -> Result<PathBuf, ExitError> {
    if let Some(root) = args.repo_root.clone().or_else(crate::env::repo_root) {
        return Ok(root);
    }
    git_toplevel(runner).await.map_err(|e| {
        tracing::debug!(error = %e, "git rev-parse failed");
        ExitError::failure("could not determine git repo root")
    })
}

pub async fn handle(args: RunArgs) -> Result<()> {
    let runner = ProcessRunner::new();
    let root = repo_root(&args, &runner).await?;
    if !root.is_dir() {
        return Err(ExitError::failure(format!("repo root {} is not a directory", root.display())).into());
    }
    let resolved = resolve(&args, root)?;

    println!("Processing target: {}", args.target);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let shell = KubeShell::new(runner, resolved.yq);
    let runner = NotebookRunner::new(shell, resolved.config).with_events(tx);
    let target = args.target;
    // Moving the runner in drops its sender when the run ends, closing `rx`.
    let run = async move { runner.run(&target).await };
    let progress = async {
        while let Some(event) = rx.recv().await {
            println!("{}", event_line(&event));
        }
    };
    let (result, ()) = tokio::join!(run, progress);

    match result {
        Ok(_) => {
            println!("All tests passed successfully.");
            Ok(())
        }
        Err(e) => {
            if let Some(log) = e.suite_log() {
                print_suite_log(log);
            }
            Err(ExitError::failure(color::fail(&e.to_string())).into())
        }
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
