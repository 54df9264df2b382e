// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cluster operations needed to test a notebook image inside a pod.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;

use crate::{CommandOutput, CommandRunner, CommandSpec, ExitPolicy, OutputMode, ShellError};

/// Capabilities the test harness needs from the cluster and local tooling.
#[async_trait]
pub trait ClusterShell: Clone + Send + Sync + 'static {
    /// Create a namespace.
    async fn create_namespace(&self, namespace: &str) -> Result<(), ShellError>;

    /// Make `namespace` the namespace of the current kube context.
    async fn use_namespace(&self, namespace: &str) -> Result<(), ShellError>;

    /// Block until pods labelled `app=<label>` are ready, or `timeout` elapses.
    async fn wait_for_ready(&self, label: &str, timeout: Duration) -> Result<(), ShellError>;

    /// Name of the first pod labelled `app=<label>`; empty when none match.
    async fn get_pod_name(&self, label: &str) -> Result<String, ShellError>;

    async fn copy_to_pod(&self, pod: &str, src: &Path, dest: &str) -> Result<(), ShellError>;

    /// Write `content` to `path` inside the pod.
    async fn write_to_pod(&self, pod: &str, path: &str, content: &str) -> Result<(), ShellError>;

    /// Run a `/bin/sh -c` script inside the pod.
    async fn exec_in_pod(
        &self,
        pod: &str,
        script: &str,
        policy: ExitPolicy,
        output: OutputMode,
    ) -> Result<CommandOutput, ShellError>;

    /// Evaluate a yq query against a local YAML file, returning JSON text.
    async fn query_yaml(&self, file: &Path, query: &str) -> Result<String, ShellError>;

    /// Run a Makefile target of the repository.
    async fn make(&self, target: &str) -> Result<(), ShellError>;

    /// Run an arbitrary kubectl command.
    async fn kubectl(
        &self,
        args: &[&str],
        policy: ExitPolicy,
        output: OutputMode,
    ) -> Result<CommandOutput, ShellError>;
}

/// [`ClusterShell`] backed by the `kubectl`, `yq` and `make` binaries.
#[derive(Clone)]
pub struct KubeShell<R: CommandRunner> {
    runner: R,
    yq_bin: PathBuf,
}

impl<R: CommandRunner> KubeShell<R> {
    pub fn new(runner: R, yq_bin: impl Into<PathBuf>) -> Self {
        Self { runner, yq_bin: yq_bin.into() }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    async fn run(&self, cmd: CommandSpec, policy: ExitPolicy) -> Result<CommandOutput, ShellError> {
        let output = self.runner.run(&cmd).await?;
        output.checked(policy, &cmd.to_string())
    }

    fn kubectl_exec(pod: &str, script: &str) -> CommandSpec {
        CommandSpec::new("kubectl", ["exec", pod, "--", "/bin/sh", "-c", script])
    }
}

#[async_trait]
impl<R: CommandRunner> ClusterShell for KubeShell<R> {
    async fn create_namespace(&self, namespace: &str) -> Result<(), ShellError> {
        let cmd = CommandSpec::new("kubectl", ["create", "namespace", namespace]);
        self.run(cmd.stream(), ExitPolicy::Check).await.map(drop)
    }

    async fn use_namespace(&self, namespace: &str) -> Result<(), ShellError> {
        let ns = format!("--namespace={}", namespace);
        let cmd = CommandSpec::new("kubectl", ["config", "set-context", "--current", &ns]);
        self.run(cmd.stream(), ExitPolicy::Check).await.map(drop)
    }

    async fn wait_for_ready(&self, label: &str, timeout: Duration) -> Result<(), ShellError> {
        let selector = format!("app={}", label);
        let timeout = format!("--timeout={}s", timeout.as_secs());
        let cmd = CommandSpec::new(
            "kubectl",
            ["wait", "--for=condition=ready", "pod", "-l", &selector, &timeout],
        );
        self.run(cmd, ExitPolicy::Check).await.map(drop)
    }

    async fn get_pod_name(&self, label: &str) -> Result<String, ShellError> {
        let selector = format!("app={}", label);
        let cmd = CommandSpec::new(
            "kubectl",
            ["get", "pods", "-l", &selector, "-o", "jsonpath={.items[0].metadata.name}"],
        );
        let output = self.run(cmd, ExitPolicy::Check).await?;
        Ok(output.stdout.trim().to_string())
    }

    async fn copy_to_pod(&self, pod: &str, src: &Path, dest: &str) -> Result<(), ShellError> {
        let target = format!("{}:{}", pod, dest);
        let src = src.to_string_lossy();
        let cmd = CommandSpec::new("kubectl", ["cp", &*src, &target]);
        self.run(cmd, ExitPolicy::Check).await.map(drop)
    }

    async fn write_to_pod(&self, pod: &str, path: &str, content: &str) -> Result<(), ShellError> {
        // Content goes through stdin, so it needs no shell quoting.
        let script = format!("cat > {}", path);
        let cmd =
            CommandSpec::new("kubectl", ["exec", "-i", pod, "--", "/bin/sh", "-c", &script]).stdin(content);
        self.run(cmd, ExitPolicy::Check).await.map(drop)
    }

    async fn exec_in_pod(
        &self,
        pod: &str,
        script: &str,
        policy: ExitPolicy,
        output: OutputMode,
    ) -> Result<CommandOutput, ShellError> {
        let mut cmd = Self::kubectl_exec(pod, script);
        cmd.output = output;
        self.run(cmd, policy).await
    }

    async fn query_yaml(&self, file: &Path, query: &str) -> Result<String, ShellError> {
        let file = file.to_string_lossy();
        let cmd = CommandSpec::new(
            self.yq_bin.to_string_lossy(),
            ["-N", "-p", "yaml", "-o", "json", query, &*file],
        );
        let output = self.run(cmd, ExitPolicy::Check).await?;
        Ok(output.stdout.trim().to_string())
    }

    async fn make(&self, target: &str) -> Result<(), ShellError> {
        let cmd = CommandSpec::new("make", [target]).stream();
        self.run(cmd, ExitPolicy::Check).await.map(drop)
    }

    async fn kubectl(
        &self,
        args: &[&str],
        policy: ExitPolicy,
        output: OutputMode,
    ) -> Result<CommandOutput, ShellError> {
        let mut cmd = CommandSpec::new("kubectl", args.iter().copied());
        cmd.output = output;
        self.run(cmd, policy).await
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::ClusterShell;
    use crate::{CommandOutput, ExitPolicy, OutputMode, Responses, ShellError};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::HashSet;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use std::time::Duration;

    /// Recorded cluster operation
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ShellCall {
        CreateNamespace { namespace: String },
        UseNamespace { namespace: String },
        WaitForReady { label: String, timeout: Duration },
        GetPodName { label: String },
        CopyToPod { pod: String, src: PathBuf, dest: String },
        WriteToPod { pod: String, path: String, content: String },
        ExecInPod { pod: String, script: String },
        QueryYaml { file: PathBuf, query: String },
        Make { target: String },
        Kubectl { args: Vec<String> },
    }

    /// Operation kinds that can be made to fail
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum ShellOp {
        CreateNamespace,
        UseNamespace,
        WaitForReady,
        GetPodName,
        CopyToPod,
        WriteToPod,
        QueryYaml,
        Make,
    }

    struct FakeClusterState {
        calls: Vec<ShellCall>,
        pod_names: Responses<String>,
        query_results: Responses<String>,
        exec_results: Responses<CommandOutput>,
        failing: HashSet<ShellOp>,
    }

    /// Fake cluster shell for testing.
    ///
    /// Pod lookups, yq queries and pod execs replay scripted responses; every
    /// other operation succeeds unless marked failing with [`Self::fail`].
    #[derive(Clone)]
    pub struct FakeClusterShell {
        inner: Arc<Mutex<FakeClusterState>>,
    }

    impl Default for FakeClusterShell {
        fn default() -> Self {
            Self {
                inner: Arc::new(Mutex::new(FakeClusterState {
                    calls: Vec::new(),
                    pod_names: Responses::repeat("pod names", String::new()),
                    query_results: Responses::repeat("yq queries", String::new()),
                    exec_results: Responses::repeat("pod execs", CommandOutput::default()),
                    failing: HashSet::new(),
                })),
            }
        }
    }

    impl FakeClusterShell {
        pub fn new() -> Self {
            Self::default()
        }

        /// Every pod lookup returns `name`.
        pub fn with_pod_name(self, name: &str) -> Self {
            self.inner.lock().pod_names = Responses::repeat("pod names", name.to_string());
            self
        }

        /// Every yq query returns `output`.
        pub fn with_query_output(self, output: &str) -> Self {
            self.inner.lock().query_results = Responses::repeat("yq queries", output.to_string());
            self
        }

        /// Pod execs return these outputs in order; running out is an error.
        pub fn with_exec_results(self, results: impl IntoIterator<Item = CommandOutput>) -> Self {
            self.inner.lock().exec_results = Responses::sequence("pod execs", results);
            self
        }

        /// Make an operation fail with exit code 1.
        pub fn fail(self, op: ShellOp) -> Self {
            self.inner.lock().failing.insert(op);
            self
        }

        /// Get all recorded calls
        pub fn calls(&self) -> Vec<ShellCall> {
            self.inner.lock().calls.clone()
        }

        /// Scripts run through `exec_in_pod`, in order
        pub fn exec_scripts(&self) -> Vec<String> {
            self.inner
                .lock()
                .calls
                .iter()
                .filter_map(|c| match c {
                    ShellCall::ExecInPod { script, .. } => Some(script.clone()),
                    _ => None,
                })
                .collect()
        }

        fn record(&self, op: Option<ShellOp>, call: ShellCall) -> Result<(), ShellError> {
            let mut inner = self.inner.lock();
            inner.calls.push(call);
            match op {
                Some(op) if inner.failing.contains(&op) => Err(ShellError::Failed {
                    command: format!("{:?}", op),
                    exit_code: 1,
                    stderr: String::new(),
                }),
                _ => Ok(()),
            }
        }
    }

    #[async_trait]
    impl ClusterShell for FakeClusterShell {
        async fn create_namespace(&self, namespace: &str) -> Result<(), ShellError> {
            let call = ShellCall::CreateNamespace { namespace: namespace.to_string() };
            self.record(Some(ShellOp::CreateNamespace), call)
        }

        async fn use_namespace(&self, namespace: &str) -> Result<(), ShellError> {
            let call = ShellCall::UseNamespace { namespace: namespace.to_string() };
            self.record(Some(ShellOp::UseNamespace), call)
        }

        async fn wait_for_ready(&self, label: &str, timeout: Duration) -> Result<(), ShellError> {
            let call = ShellCall::WaitForReady { label: label.to_string(), timeout };
            self.record(Some(ShellOp::WaitForReady), call)
        }

        async fn get_pod_name(&self, label: &str) -> Result<String, ShellError> {
            let call = ShellCall::GetPodName { label: label.to_string() };
            self.record(Some(ShellOp::GetPodName), call)?;
            self.inner.lock().pod_names.next()
        }

        async fn copy_to_pod(&self, pod: &str, src: &Path, dest: &str) -> Result<(), ShellError> {
            let call = ShellCall::CopyToPod {
                pod: pod.to_string(),
                src: src.to_path_buf(),
                dest: dest.to_string(),
            };
            self.record(Some(ShellOp::CopyToPod), call)
        }

        async fn write_to_pod(
            &self,
            pod: &str,
            path: &str,
            content: &str,
        ) -> Result<(), ShellError> {
            let call = ShellCall::WriteToPod {
                pod: pod.to_string(),
                path: path.to_string(),
                content: content.to_string(),
            };
            self.record(Some(ShellOp::WriteToPod), call)
        }

        async fn exec_in_pod(
            &self,
            pod: &str,
            script: &str,
            policy: ExitPolicy,
            _output: OutputMode,
        ) -> Result<CommandOutput, ShellError> {
            let call = ShellCall::ExecInPod { pod: pod.to_string(), script: script.to_string() };
            self.record(None, call)?;
            let output = self.inner.lock().exec_results.next()?;
            output.checked(policy, script)
        }

        async fn query_yaml(&self, file: &Path, query: &str) -> Result<String, ShellError> {
            let call = ShellCall::QueryYaml { file: file.to_path_buf(), query: query.to_string() };
            self.record(Some(ShellOp::QueryYaml), call)?;
            self.inner.lock().query_results.next()
        }

        async fn make(&self, target: &str) -> Result<(), ShellError> {
            let call = ShellCall::Make { target: target.to_string() };
            self.record(Some(ShellOp::Make), call)
        }

        async fn kubectl(
            &self,
            args: &[&str],
            _policy: ExitPolicy,
            _output: OutputMode,
        ) -> Result<CommandOutput, ShellError> {
            let call = ShellCall::Kubectl { args: args.iter().map(|a| a.to_string()).collect() };
            self.record(None, call)?;
            Ok(CommandOutput::default())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeClusterShell, ShellCall, ShellOp};

#[cfg(test)]
#[path = "cluster_tests.rs"]
mod tests;
