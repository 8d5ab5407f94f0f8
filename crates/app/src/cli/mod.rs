use clap::{Parser, Subcommand};
use serde::Serialize;
use storefront_app::context::AppContext;

use crate::config::{DatabaseConfig, LoggingConfig};

mod address;
mod cart;
mod category;
mod db;
mod order;
mod product;
mod user;

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    User(user::UserCommand),
    Category(category::CategoryCommand),
    Product(product::ProductCommand),
    Address(address::AddressCommand),
    Cart(cart::CartCommand),
    Order(order::OrderCommand),
}

impl Cli {
    /// Parse arguments after loading `.env`, if present.
    pub(crate) fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::User(command) => user::run(command).await,
            Commands::Category(command) => category::run(command).await,
            Commands::Product(command) => product::run(command).await,
            Commands::Address(command) => address::run(command).await,
            Commands::Cart(command) => cart::run(command).await,
            Commands::Order(command) => order::run(command).await,
        }
    }
}

async fn connect(database: &DatabaseConfig) -> Result<AppContext, String> {
    AppContext::from_database_url(&database.database_url)
        .await
        .map_err(|error| format!("{error}: {}", error_source(&error)))
}

fn error_source(error: &dyn std::error::Error) -> String {
    error
        .source()
        .map_or_else(String::new, ToString::to_string)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|error| format!("failed to serialize output: {error}"))?;

    println!("{json}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use crate::config::LogFormat;

    use super::*;

    #[test]
    fn log_flags_are_accepted_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "storefront-app",
            "db",
            "migrate",
            "--database-url",
            "postgres://localhost/storefront",
            "--log-format",
            "json",
            "--log-level",
            "debug",
        ])
        .expect("arguments should parse");

        assert_eq!(cli.logging.log_format, LogFormat::Json);
        assert_eq!(cli.logging.log_level, "debug");
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let result = Cli::try_parse_from([
            "storefront-app",
            "--log-format",
            "xml",
            "db",
            "migrate",
            "--database-url",
            "postgres://localhost/storefront",
        ]);

        assert!(result.is_err());
    }
}
