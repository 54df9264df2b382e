// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use crate::{CommandRunner, CommandSpec, ExitPolicy, ShellError};

/// Root of the git checkout containing the current directory.
pub async fn git_toplevel<R: CommandRunner>(runner: &R) -> Result<PathBuf, ShellError> {
    let cmd = CommandSpec::new("git", ["rev-parse", "--show-toplevel"]);
    let output = runner.run(&cmd).await?.checked(ExitPolicy::Check, &cmd.to_string())?;
    Ok(PathBuf::from(output.stdout.trim()))
}
