// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! nbt: notebook image test harness

mod color;
mod commands;
mod env;
mod exit_error;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{decode::DecodeArgs, make_test::MakeTestArgs, run::RunArgs};
use exit_error::ExitError;

#[derive(Parser)]
#[command(name = "nbt", version = env::VERSION, styles = color::styles())]
#[command(about = "Test notebook workbench images deployed to a Kubernetes cluster")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the test notebooks of a deployed image inside its pod
    Run(RunArgs),
    /// Deploy, test and undeploy an image through the Makefile
    MakeTest(MakeTestArgs),
    /// Show what a target name encodes
    Decode(DecodeArgs),
}

fn init_logging() {
    let filter = EnvFilter::try_new(env::log_filter())
        .unwrap_or_else(|_| EnvFilter::new(env::DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run(args) => commands::run::handle(args).await,
        Commands::MakeTest(args) => commands::make_test::handle(args).await,
        Commands::Decode(args) => commands::decode::handle(args),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    let result = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(anyhow::Error::from)
        .and_then(|rt| rt.block_on(dispatch(cli.command)));

    if let Err(e) = result {
        let code = match e.downcast_ref::<ExitError>() {
            Some(exit) => exit.code,
            None => exit_error::FAILURE,
        };
        eprintln!("ERROR: {:#}", e);
        std::process::exit(code);
    }
}
