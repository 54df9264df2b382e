// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Expected-versions document written into the pod under test.

use serde_json::{Map, Value};

/// Tools installed by the test harness itself rather than declared by the
/// image manifest.
pub const PINNED_TOOLS: [(&str, &str); 2] = [("nbdime", "4.0"), ("nbgitpuller", "1.2")];

/// Overlay [`PINNED_TOOLS`] onto the manifest's version data.
///
/// Input that is not a JSON object (empty, malformed, an array) contributes
/// nothing; the result always contains the pinned tools.
pub fn merge_version_data(input_json: &str) -> String {
    let mut data = match serde_json::from_str::<Value>(input_json) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    for (name, version) in PINNED_TOOLS {
        data.insert(name.to_string(), Value::String(version.to_string()));
    }
    Value::Object(data).to_string()
}

#[cfg(test)]
#[path = "versions_tests.rs"]
mod tests;
