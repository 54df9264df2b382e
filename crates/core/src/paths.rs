// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Repository layout: notebook directories and image-stream manifests.

use std::path::{Path, PathBuf};

use crate::{Accelerator, NotebookId, OsFlavor, PythonFlavor};

/// File name of the test notebook inside a notebook's `test/` directory.
pub const FIXTURE_NOTEBOOK: &str = "test_notebook.ipynb";

/// `<root>/jupyter/<id>/<os>-<python>[/<subpath>]`
pub fn notebook_dir(
    repo_root: &Path,
    id: NotebookId,
    os: OsFlavor,
    python: &PythonFlavor,
    subpath: &str,
) -> PathBuf {
    let dir = repo_root.join("jupyter").join(id.as_str()).join(format!("{}-{}", os, python));
    if subpath.is_empty() {
        dir
    } else {
        dir.join(subpath)
    }
}

/// Image-stream manifest declaring the expected software of a notebook.
///
/// File names are a fixed table rather than a formula: CUDA variants share
/// the plain manifest except `minimal`, which has a `gpu-` one, and ROCm
/// variants carry `-rocm` after `jupyter`.
pub fn manifest_path(repo_root: &Path, id: NotebookId, accelerator: Accelerator) -> PathBuf {
    let file = match (id, accelerator) {
        (NotebookId::Minimal, Accelerator::Cuda) => {
            "jupyter-minimal-gpu-notebook-imagestream.yaml".to_string()
        }
        (id, Accelerator::None | Accelerator::Cuda) => {
            format!("jupyter-{}-notebook-imagestream.yaml", id)
        }
        (id, Accelerator::Rocm) => format!("jupyter-rocm-{}-notebook-imagestream.yaml", id),
    };
    repo_root.join("manifests").join("base").join(file)
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
