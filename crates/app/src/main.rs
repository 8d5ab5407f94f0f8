//! Storefront Application CLI

use std::process;

use crate::cli::Cli;

mod cli;
mod config;
mod observability;

#[tokio::main]
async fn main() {
    let cli = Cli::load().unwrap_or_else(|error| error.exit());

    if let Err(error) = observability::init_subscriber(&cli.logging) {
        eprintln!("{error}");
        process::exit(1);
    }

    if let Err(error) = cli.run().await {
        eprintln!("{error}");
        process::exit(1);
    }
}
