//! register-task: build Docker images and register them as AWS ECS tasks.
//!
//! # Usage
//!
//! ```text
//! register-task [--tag <TAG>] [--namespace <NS>] [--json] [-v] <DIRNAME>...
//! ```
//!
//! Each directory is a Docker build context; its basename becomes the ECS task
//! family. `AWS_REGION`, `AWS_ACCESS_KEY_ID` and `AWS_SECRET_ACCESS_KEY` must be
//! set, either in the environment or in `./.env`.
//!
//! # Exit codes
//!
//! - `0`: the batch ran to completion (individual tasks may have failed)
//! - `1`: missing AWS settings, or registry login failed
//! - `2`: at least one directory was rejected; nothing was built

mod register;
mod report;

use std::process::ExitCode;

use clap::{ArgAction, Parser};
use colored::Colorize;

use register::RegisterArgs;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "register-task",
    version,
    about = "Build Docker images and register them as AWS ECS task definitions",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    register: RegisterArgs,

    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(long, short = 'v', action = ArgAction::Count)]
    verbose: u8,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.register.run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
