//
//  bucket-link
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use console::style;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bucket_link::cli::{Cli, Commands};
use bucket_link::{exit_codes, LinkError};

fn main() {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    let result = run(cli);

    // Handle result and exit
    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => std::process::exit(report(&e)),
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("BKT_DEBUG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Prints the error and picks the exit code.
///
/// Lookups that simply found nothing exit with `NOT_FOUND`. Anything that
/// is not a [`LinkError`] only shows its outermost message; the full chain
/// goes to the log.
fn report(e: &anyhow::Error) -> i32 {
    match e.downcast_ref::<LinkError>() {
        Some(link_error) => {
            eprintln!("{} {e:#}", style("Error:").red().bold());
            if link_error.is_not_found() {
                exit_codes::NOT_FOUND
            } else {
                exit_codes::ERROR
            }
        }
        None => {
            tracing::error!("{e:?}");
            eprintln!("{} {e}", style("Error:").red().bold());
            exit_codes::ERROR
        }
    }
}

/// Main command dispatcher
fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Open(cmd) => cmd.run(&cli.global),
        Commands::Commit(cmd) => cmd.run(&cli.global),
        Commands::Pr(cmd) => cmd.run(&cli.global),
        Commands::Issue(cmd) => cmd.run(&cli.global),
        Commands::Config(cmd) => cmd.run(&cli.global),
        Commands::Completion(cmd) => cmd.run(&cli.global),
        Commands::Version => {
            println!("{} version {}", bucket_link::APP_NAME, bucket_link::VERSION);
            Ok(())
        }
    }
}
