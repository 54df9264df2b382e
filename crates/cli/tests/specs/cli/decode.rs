// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `nbt decode` specs

use crate::prelude::*;

#[test]
fn decode_prints_facets_as_text() {
    cli()
        .args(&["decode", "jupyter-rocm-tensorflow-ubi9-python-3.11"])
        .passes()
        .stdout_has("target:      jupyter-rocm-tensorflow-ubi9-python-3.11")
        .stdout_has("app label:   jupyter-rocm-tensorflow-ubi9-python-3-11")
        .stdout_has("os flavor:   ubi9")
        .stdout_has("accelerator: rocm")
        .stdout_has("python:      python-3.11");
}

#[test]
fn decode_prints_json() {
    let run = cli().args(&["decode", "cuda-jupyter-minimal-ubi9-python-3.11", "--output", "json"]).passes();
    let value: serde_json::Value = serde_json::from_str(&run.stdout()).unwrap();
    similar_asserts::assert_eq!(
        value,
        serde_json::json!({
            "name": "cuda-jupyter-minimal-ubi9-python-3.11",
            "app_label": "jupyter-minimal-ubi9-python-3-11",
            "os": "ubi9",
            "accelerator": "cuda",
            "python": "python-3.11",
        })
    );
}

#[test]
fn decode_without_python_suffix_fails() {
    cli()
        .args(&["decode", "jupyter-minimal-ubi9"])
        .fails()
        .stderr_has("invalid python version format in notebook name: jupyter-minimal-ubi9");
}

#[test]
fn decode_rejects_unknown_output_format() {
    cli().args(&["decode", "jupyter-minimal-ubi9-python-3.11", "-o", "yaml"]).exits(2);
}
