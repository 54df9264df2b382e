// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notebook identities and accelerator-qualified references.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::{Accelerator, DecodeError};

/// Logical identity of a notebook image variant.
///
/// The declaration order is the resolution order used when matching pod names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotebookId {
    Minimal,
    Datascience,
    Trustyai,
    Tensorflow,
    Pytorch,
}

crate::str_enum! {
    NotebookId {
        Minimal => "minimal",
        Datascience => "datascience",
        Trustyai => "trustyai",
        Tensorflow => "tensorflow",
        Pytorch => "pytorch",
    }
}

impl NotebookId {
    pub const ALL: [NotebookId; 5] = [
        NotebookId::Minimal,
        NotebookId::Datascience,
        NotebookId::Trustyai,
        NotebookId::Tensorflow,
        NotebookId::Pytorch,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == s)
    }

    /// Images built on top of the datascience image.
    pub fn is_datascience_based(&self) -> bool {
        !matches!(self, NotebookId::Minimal)
    }
}

/// A notebook id, optionally qualified by its accelerator: `tensorflow`,
/// `cuda/tensorflow`, `rocm/pytorch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotebookRef {
    pub accelerator: Accelerator,
    pub id: NotebookId,
}

impl NotebookRef {
    pub fn new(accelerator: Accelerator, id: NotebookId) -> Self {
        Self { accelerator, id }
    }

    pub fn plain(id: NotebookId) -> Self {
        Self::new(Accelerator::None, id)
    }

    /// Resolve the notebook a pod belongs to.
    ///
    /// Matches `<id>-` anywhere in the pod name, in [`NotebookId::ALL`] order.
    /// Splitting on dashes would resolve `jupyter-rocm-tensorflow-...` as `rocm`.
    pub fn from_pod(pod_name: &str, accelerator: Accelerator) -> Result<Self, DecodeError> {
        NotebookId::ALL
            .into_iter()
            .find(|id| pod_name.contains(&format!("{}-", id)))
            .map(|id| Self::new(accelerator, id))
            .ok_or_else(|| DecodeError::UnknownNotebook { pod: pod_name.to_string() })
    }

    pub fn is_datascience_derived(&self) -> bool {
        self.id.is_datascience_based()
    }
}

impl fmt::Display for NotebookRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.accelerator.is_none() {
            write!(f, "{}", self.id)
        } else {
            write!(f, "{}/{}", self.accelerator, self.id)
        }
    }
}

impl FromStr for NotebookRef {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DecodeError::InvalidNotebookRef { value: s.to_string() };
        let (accelerator, id) = match s.split_once('/') {
            Some((acc, id)) => (Accelerator::from_segment(acc).ok_or_else(invalid)?, id),
            None => (Accelerator::None, s),
        };
        let id = NotebookId::parse(id).ok_or_else(invalid)?;
        Ok(Self::new(accelerator, id))
    }
}

impl Serialize for NotebookRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Whether a notebook id (optionally `accelerator/`-prefixed) is one of the
/// datascience-derived images. Ids that do not parse as a [`NotebookRef`] are not.
pub fn is_datascience_derived(notebook_id: &str) -> bool {
    notebook_id.parse::<NotebookRef>().is_ok_and(|nb| nb.is_datascience_derived())
}

#[cfg(test)]
#[path = "notebook_tests.rs"]
mod tests;
