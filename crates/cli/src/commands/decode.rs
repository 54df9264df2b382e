// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `nbt decode`: show what a target name encodes, without a cluster.

use anyhow::Result;
use clap::Args;
use nbt_core::Target;

use crate::exit_error::ExitError;
use crate::output::{print_target, OutputFormat};

#[derive(Args)]
pub struct DecodeArgs {
    /// Makefile test target, e.g. `jupyter-minimal-ubi9-python-3.11`
    pub target: String,

    #[arg(long = "output", short = 'o', value_enum, default_value_t)]
    pub output: OutputFormat,
}

pub fn handle(args: DecodeArgs) -> Result<()> {
    let target = Target::decode(&args.target).map_err(|e| ExitError::failure(e.to_string()))?;
    print_target(&target, args.output)
}
