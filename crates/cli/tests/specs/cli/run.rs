// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `nbt run` specs against stand-in `kubectl` and `yq` scripts.

use crate::prelude::*;

/// Records every invocation to `$FAKE_LOG`. A pod exec of `grep FAILED`
/// finds a marker only when its error file name contains `$FAKE_FAILED`.
const FAKE_KUBECTL: &str = r#"#!/bin/sh
echo "$*" >> "$FAKE_LOG"
case "$1" in
  get) printf '%s' "$FAKE_POD" ;;
  exec)
    if [ "$2" = "-i" ]; then cat > /dev/null; exit 0; fi
    case "$6" in
      "grep FAILED"*)
        case "$6" in
          *"${FAKE_FAILED:-no-failures}"*) echo FAILED; exit 0 ;;
        esac
        exit 1 ;;
      "cat "*) echo "cell 2 FAILED: assert numpy.__version__" ;;
    esac ;;
esac
exit 0
"#;

const FAKE_YQ: &str = r#"#!/bin/sh
echo '{"Python": "v3.12", "JupyterLab": "4.2"}'
"#;

fn checkout(python: &str, notebooks: &[&str]) -> Project {
    let project = Project::empty();
    project.script("bin/yq", FAKE_YQ);
    project.script("fakebin/kubectl", FAKE_KUBECTL);
    for id in ["minimal", "datascience"] {
        project.file(&format!("manifests/base/jupyter-{id}-notebook-imagestream.yaml"), "kind: ImageStream\n");
    }
    for id in notebooks {
        project.file(&format!("jupyter/{id}/ubi9-{python}/test/test_notebook.ipynb"), "{}");
    }
    project
}

fn nbt_run(project: &Project, target: &str, pod: &str) -> Cli {
    let path = std::env::var("PATH").unwrap_or_default();
    project
        .nbt()
        .args(&["run", target, "--repo-root", project.path().to_str().unwrap()])
        .env("PATH", format!("{}:{}", project.path().join("fakebin").display(), path))
        .env("FAKE_LOG", project.path().join("kubectl.log"))
        .env("FAKE_POD", pod)
}

fn kubectl_log(project: &Project) -> Vec<String> {
    std::fs::read_to_string(project.path().join("kubectl.log"))
        .unwrap()
        .lines()
        .map(String::from)
        .collect()
}

#[test]
fn datascience_image_runs_minimal_and_datascience_suites() {
    let project = checkout("python-3.12", &["minimal", "datascience"]);
    let pod = "jupyter-datascience-ubi9-python-3-12-0";

    nbt_run(&project, "jupyter-datascience-ubi9-python-3.12", pod)
        .passes()
        .stdout_has("Processing target: jupyter-datascience-ubi9-python-3.12")
        .stdout_has("SUCCESS: minimal")
        .stdout_has("SUCCESS: datascience")
        .stdout_has("All tests passed successfully.");

    let log = kubectl_log(&project);
    assert_eq!(log[0], "wait --for=condition=ready pod -l app=jupyter-datascience-ubi9-python-3-12 --timeout=600s");
    assert_eq!(log[1], "get pods -l app=jupyter-datascience-ubi9-python-3-12 -o jsonpath={.items[0].metadata.name}");
    assert_eq!(log[2], format!("exec -i {pod} -- /bin/sh -c cat > expected_versions.json"));
    assert_eq!(log[3], format!("exec {pod} -- /bin/sh -c python3 -m pip install papermill"));
    let greps: Vec<&String> = log.iter().filter(|l| l.contains("grep FAILED")).collect();
    assert_eq!(greps.len(), 2);
    assert!(greps[0].ends_with("grep FAILED minimal_ubi9_error.txt"));
    assert!(greps[1].ends_with("grep FAILED datascience_ubi9_error.txt"));
}

#[test]
fn failed_marker_prints_error_file_and_exits_one() {
    let project = checkout("python-3.9", &["minimal"]);

    nbt_run(&project, "jupyter-minimal-ubi9-python-3.9", "jupyter-minimal-ubi9-python-3-9-0")
        .env("FAKE_FAILED", "minimal_ubi9")
        .fails()
        .stdout_has("cell 2 FAILED: assert numpy.__version__")
        .stdout_lacks("All tests passed")
        .stderr_has("encountered a test failure");
}

#[test]
fn suites_that_passed_are_reported_when_a_later_suite_fails() {
    let project = checkout("python-3.12", &["minimal", "datascience"]);

    nbt_run(&project, "jupyter-datascience-ubi9-python-3.12", "jupyter-datascience-ubi9-python-3-12-0")
        .env("FAKE_FAILED", "datascience_ubi9")
        .fails()
        .stdout_has("Found pod: jupyter-datascience-ubi9-python-3-12-0 (datascience)")
        .stdout_has("SUCCESS: minimal")
        .stdout_lacks("SUCCESS: datascience")
        .stdout_lacks("All tests passed")
        .stderr_has("the notebook datascience encountered a test failure");
}

#[test]
fn missing_fixture_is_skipped() {
    let project = checkout("python-3.9", &[]);

    nbt_run(&project, "jupyter-minimal-ubi9-python-3.9", "jupyter-minimal-ubi9-python-3-9-0")
        .passes()
        .stdout_has("SKIPPED: minimal")
        .stdout_has("All tests passed successfully.");
}

#[test]
fn no_matching_pod_exits_one() {
    let project = checkout("python-3.9", &["minimal"]);

    nbt_run(&project, "jupyter-minimal-ubi9-python-3.9", "")
        .fails()
        .stderr_has("no pod found with label app=jupyter-minimal-ubi9-python-3-9");
}

#[test]
fn missing_yq_exits_one_before_contacting_cluster() {
    let project = Project::empty();

    project
        .nbt()
        .args(&["run", "jupyter-minimal-ubi9-python-3.9", "--repo-root", project.path().to_str().unwrap()])
        .fails()
        .stderr_has("missing bin/yq at");
}

#[test]
fn nonexistent_repo_root_exits_one() {
    cli()
        .args(&["run", "jupyter-minimal-ubi9-python-3.9"])
        .env("NBT_REPO_ROOT", "/nonexistent/checkout")
        .fails()
        .stderr_has("is not a directory");
}
