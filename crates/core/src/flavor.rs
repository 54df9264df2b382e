// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structural facets encoded in a target name: OS, accelerator, python.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

use crate::DecodeError;

/// Base operating system of the image. Renders as `""` when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OsFlavor {
    #[default]
    None,
    Ubi9,
}

crate::str_enum! {
    OsFlavor {
        None => "",
        Ubi9 => "ubi9",
    }
}

impl OsFlavor {
    pub fn from_target(target: &str) -> Self {
        if target.contains("-ubi9-") {
            OsFlavor::Ubi9
        } else {
            OsFlavor::None
        }
    }
}

/// GPU backend of the image. Renders as `""` when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accelerator {
    #[default]
    None,
    Cuda,
    Rocm,
}

crate::str_enum! {
    Accelerator {
        None => "",
        Cuda => "cuda",
        Rocm => "rocm",
    }
}

impl Accelerator {
    /// Explicit `cuda-`/`-rocm-` markers win; pytorch images are implicitly
    /// CUDA (tensorflow ones are not).
    pub fn from_target(target: &str) -> Self {
        if target.contains("cuda-") {
            Accelerator::Cuda
        } else if target.contains("-rocm-") {
            Accelerator::Rocm
        } else if target.contains("-pytorch-") {
            Accelerator::Cuda
        } else {
            Accelerator::None
        }
    }

    /// Parse the prefix segment of a notebook reference (`cuda`, `rocm`).
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "cuda" => Some(Accelerator::Cuda),
            "rocm" => Some(Accelerator::Rocm),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Accelerator::None)
    }
}

#[allow(clippy::expect_used)]
static PYTHON_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-(python-\d+[-.]\d+)$").expect("constant regex pattern is valid")
});

/// Python flavor such as `python-3.11`, keeping the separator of the target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PythonFlavor(String);

impl PythonFlavor {
    /// Extract the trailing `-python-X.Y` (or `-python-X-Y`) segment.
    pub fn from_target(target: &str) -> Result<Self, DecodeError> {
        PYTHON_SUFFIX
            .captures(target)
            .and_then(|caps| caps.get(1))
            .map(|m| PythonFlavor(m.as_str().to_string()))
            .ok_or_else(|| DecodeError::PythonFlavor { target: target.to_string() })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PythonFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

macro_rules! serialize_as_str {
    ($($ty:ty),+) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.serialize_str(self.as_str())
                }
            }
        )+
    };
}

serialize_as_str!(OsFlavor, Accelerator, PythonFlavor);

#[cfg(test)]
#[path = "flavor_tests.rs"]
mod tests;
