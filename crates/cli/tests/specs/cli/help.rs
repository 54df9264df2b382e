// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs

use crate::prelude::*;

#[test]
fn nbt_help_lists_subcommands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("run")
        .stdout_has("make-test")
        .stdout_has("decode");
}

#[test]
fn nbt_run_help_shows_options() {
    cli()
        .args(&["run", "--help"])
        .passes()
        .stdout_has("<TARGET>")
        .stdout_has("--timeout-secs")
        .stdout_has("--repo-root")
        .stdout_has("--yq");
}

#[test]
fn nbt_make_test_requires_target() {
    cli().args(&["make-test"]).exits(2).stderr_has("--target");
}

#[test]
fn nbt_without_subcommand_is_a_usage_error() {
    cli().exits(2).stderr_has("Usage:");
}

#[test]
fn nbt_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("nbt 0.2.0+");
}
