// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    ubi9_infix   = { "jupyter-ubi9-python-3.9",                 OsFlavor::Ubi9 },
    ubi9_cuda    = { "cuda-jupyter-tensorflow-ubi9-python-3.9", OsFlavor::Ubi9 },
    no_os        = { "jupyter-alpine-python",                   OsFlavor::None },
    trailing_os  = { "jupyter-minimal-ubi9",                    OsFlavor::None },
)]
fn os_flavor(target: &str, expected: OsFlavor) {
    assert_eq!(OsFlavor::from_target(target), expected);
}

#[yare::parameterized(
    pytorch_implicit_cuda = { "jupyter-pytorch-ubi9",              Accelerator::Cuda },
    cuda_prefix           = { "cuda-jupyter-tensorflow-ubi9",      Accelerator::Cuda },
    rocm_infix            = { "jupyter-rocm-tensorflow-ubi9",      Accelerator::Rocm },
    rocm_pytorch          = { "jupyter-rocm-pytorch-ubi9",         Accelerator::Rocm },
    minimal               = { "jupyter-minimal-ubi9",              Accelerator::None },
    tensorflow_no_cuda    = { "jupyter-tensorflow-ubi9-python-3.11", Accelerator::None },
)]
fn accelerator_flavor(target: &str, expected: Accelerator) {
    assert_eq!(Accelerator::from_target(target), expected);
}

#[test]
fn rocm_prefix_without_leading_dash_is_not_rocm() {
    // The ROCm marker needs a dash on both sides; CI targets starting with
    // `rocm-` only pick it up through the label table.
    assert_eq!(Accelerator::from_target("rocm-jupyter-minimal-ubi9-python-3.11"), Accelerator::None);
}

#[yare::parameterized(
    dotted        = { "jupyter-ubi9-python-3.9",                   "python-3.9" },
    two_digit     = { "cuda-jupyter-tensorflow-ubi9-python-3.11",  "python-3.11" },
    dashed        = { "jupyter-ubi9-python-3-9",                   "python-3-9" },
)]
fn python_flavor(target: &str, expected: &str) {
    assert_eq!(PythonFlavor::from_target(target).unwrap().as_str(), expected);
}

#[yare::parameterized(
    no_version      = { "jupyter-minimal-ubi9" },
    major_only      = { "jupyter-minimal-ubi9-python-3" },
    not_at_end      = { "jupyter-python-3.9-ubi9" },
    no_leading_dash = { "python-3.9" },
)]
fn python_flavor_missing(target: &str) {
    assert_eq!(
        PythonFlavor::from_target(target),
        Err(DecodeError::PythonFlavor { target: target.to_string() })
    );
}

#[test]
fn flavors_render_empty_when_absent() {
    assert_eq!(OsFlavor::None.to_string(), "");
    assert_eq!(Accelerator::None.to_string(), "");
    assert_eq!(Accelerator::Rocm.to_string(), "rocm");
}

#[test]
fn flavors_serialize_as_plain_strings() {
    let json = serde_json::to_string(&(OsFlavor::Ubi9, Accelerator::None)).unwrap();
    assert_eq!(json, r#"["ubi9",""]"#);
}
