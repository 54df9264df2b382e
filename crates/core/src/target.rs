// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt;

use serde::Serialize;

use crate::{Accelerator, DecodeError, OsFlavor, PythonFlavor};

/// A decoded CI test target such as `cuda-jupyter-tensorflow-ubi9-python-3.11`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    pub name: String,
    /// Value of the `app` label on the deployed workload.
    pub app_label: String,
    pub os: OsFlavor,
    pub accelerator: Accelerator,
    pub python: PythonFlavor,
}

impl Target {
    /// Decode every facet of a target. Only a missing python suffix fails.
    pub fn decode(name: &str) -> Result<Self, DecodeError> {
        Ok(Self {
            name: name.to_string(),
            app_label: app_label(name),
            os: OsFlavor::from_target(name),
            accelerator: Accelerator::from_target(name),
            python: PythonFlavor::from_target(name)?,
        })
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Accelerator prefix of a dot-normalized target, as it affects the label.
enum LabelPrefix<'a> {
    /// `rocm-<flavor>-<rest>`
    Rocm { flavor: &'a str, rest: &'a str },
    /// `cuda-<rest>`
    Cuda { rest: &'a str },
    Plain,
}

impl<'a> LabelPrefix<'a> {
    fn of(target: &'a str) -> Self {
        if let Some((flavor, rest)) =
            target.strip_prefix("rocm-").and_then(|s| s.split_once('-'))
        {
            if !flavor.is_empty() {
                return LabelPrefix::Rocm { flavor, rest };
            }
        }
        match target.strip_prefix("cuda-") {
            Some(rest) => LabelPrefix::Cuda { rest },
            None => LabelPrefix::Plain,
        }
    }
}

/// Map a Makefile target to the `app` label of its Kubernetes workload.
///
/// Dots become dashes. ROCm targets move the accelerator after the flavor,
/// except ROCm minimal which shares the plain minimal label; CUDA targets
/// drop the prefix.
pub fn app_label(target: &str) -> String {
    let target = target.replace('.', "-");
    match LabelPrefix::of(&target) {
        LabelPrefix::Rocm { flavor, rest } if rest.starts_with("minimal-") => {
            format!("{}-{}", flavor, rest)
        }
        LabelPrefix::Rocm { flavor, rest } => format!("{}-rocm-{}", flavor, rest),
        LabelPrefix::Cuda { rest } => rest.to_string(),
        LabelPrefix::Plain => target,
    }
}

#[cfg(test)]
#[path = "target_tests.rs"]
mod tests;
