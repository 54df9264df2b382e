// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Errors from decoding targets, pod names and notebook references
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid python version format in notebook name: {target}")]
    PythonFlavor { target: String },

    #[error("no notebook id matches pod {pod}")]
    UnknownNotebook { pod: String },

    #[error("invalid notebook reference: {value}")]
    InvalidNotebookRef { value: String },
}
