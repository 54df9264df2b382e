// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Which test notebooks run against a given image.

use std::fmt;

use serde::Serialize;

use crate::{NotebookId, NotebookRef, OsFlavor};

/// One test notebook run against the pod.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Suite {
    pub notebook: NotebookRef,
}

impl Suite {
    pub fn new(notebook: NotebookRef) -> Self {
        Self { notebook }
    }

    /// Notebook id used for fixture directories (accelerator stripped).
    pub fn base_id(&self) -> NotebookId {
        self.notebook.id
    }

    /// Prefix for the papermill output and error files inside the pod.
    pub fn output_prefix(&self, os: OsFlavor) -> String {
        format!("{}_{}", self.base_id(), os).replace('/', "-")
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notebook)
    }
}

/// Datascience-derived images first re-run the `minimal` and `datascience`
/// suites, then their own (unless that is `datascience` itself).
pub fn plan_suites(notebook: &NotebookRef) -> Vec<Suite> {
    let mut suites = Vec::with_capacity(3);
    if notebook.is_datascience_derived() {
        suites.push(Suite::new(NotebookRef::plain(NotebookId::Minimal)));
        suites.push(Suite::new(NotebookRef::plain(NotebookId::Datascience)));
    }
    if notebook.id != NotebookId::Datascience {
        suites.push(Suite::new(*notebook));
    }
    suites
}

#[cfg(test)]
#[path = "suite_tests.rs"]
mod tests;
