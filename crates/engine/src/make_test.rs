// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deploy, test and undeploy an image through the repository Makefile.

use nbt_adapters::{ClusterShell, CommandOutput, ExitPolicy, OutputMode, ShellError};

/// Read-only kubectl commands run after every attempt.
const DIAGNOSTICS: [&[&str]; 5] = [
    &["get", "statefulsets"],
    &["describe", "statefulsets"],
    &["get", "pods"],
    &["describe", "pods"],
    &["get", "events"],
];

/// Runs the Makefile deploy/test/undeploy cycle for one target in a
/// dedicated namespace, collecting cluster diagnostics whatever the outcome.
pub struct MakeTest<S: ClusterShell> {
    shell: S,
}

impl<S: ClusterShell> MakeTest<S> {
    pub fn new(shell: S) -> Self {
        Self { shell }
    }

    /// `ns-` followed by the target with dots removed.
    pub fn namespace(target: &str) -> String {
        format!("ns-{}", target.replace('.', ""))
    }

    /// RStudio images still use the RHEL8 deploy targets.
    pub fn deploy_verb(target: &str) -> &'static str {
        if target.starts_with("rstudio") {
            "deploy"
        } else {
            "deploy9"
        }
    }

    pub async fn run(&self, target: &str) -> Result<(), ShellError> {
        let namespace = Self::namespace(target);
        self.shell.create_namespace(&namespace).await?;
        self.shell.use_namespace(&namespace).await?;

        let result = self.make_cycle(target).await;
        self.collect_diagnostics().await;

        match &result {
            Ok(()) => tracing::info!(target_name = %target, "finished testing"),
            Err(e) => tracing::error!(target_name = %target, error = %e, "make cycle failed"),
        }
        result
    }

    async fn make_cycle(&self, target: &str) -> Result<(), ShellError> {
        let deploy = Self::deploy_verb(target);
        for make_target in
            [format!("{deploy}-{target}"), format!("test-{target}"), format!("un{deploy}-{target}")]
        {
            tracing::info!(make_target = %make_target, "running make");
            self.shell.make(&make_target).await?;
        }
        Ok(())
    }

    async fn collect_diagnostics(&self) {
        for args in DIAGNOSTICS {
            self.diagnose(args, OutputMode::Stream).await;
        }

        let statefulset = self
            .diagnose(&["get", "statefulset", "-o", "name"], OutputMode::Capture)
            .await
            .and_then(|out| out.stdout.lines().next().map(str::trim).map(String::from))
            .filter(|name| !name.is_empty());
        match statefulset {
            Some(name) => {
                self.diagnose(&["logs", &name, "--previous"], OutputMode::Stream).await;
                self.diagnose(&["logs", &name], OutputMode::Stream).await;
            }
            None => tracing::warn!("no statefulset found, skipping logs"),
        }
    }

    async fn diagnose(
        &self,
        args: &[&str],
        output: OutputMode,
    ) -> Option<CommandOutput> {
        match self.shell.kubectl(args, ExitPolicy::Tolerate, output).await {
            Ok(out) => {
                if !out.success() {
                    tracing::warn!(args = ?args, exit_code = out.exit_code, "diagnostic command failed");
                }
                Some(out)
            }
            Err(e) => {
                tracing::warn!(args = ?args, error = %e, "diagnostic command could not run");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "make_test_tests.rs"]
mod tests;
