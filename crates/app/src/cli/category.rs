use clap::{Args, Subcommand};
use storefront_app::domain::categories::data::NewCategory;

use crate::config::DatabaseConfig;

#[derive(Debug, Args)]
pub(crate) struct CategoryCommand {
    #[command(subcommand)]
    command: CategorySubcommand,
}

#[derive(Debug, Subcommand)]
enum CategorySubcommand {
    /// Create a product category
    Create(CreateCategoryArgs),
}

#[derive(Debug, Args)]
struct CreateCategoryArgs {
    #[arg(long)]
    name: String,

    #[command(flatten)]
    database: DatabaseConfig,
}

pub(crate) async fn run(command: CategoryCommand) -> Result<(), String> {
    match command.command {
        CategorySubcommand::Create(args) => {
            let ctx = super::connect(&args.database).await?;

            let category = ctx
                .categories
                .create_category(NewCategory { name: args.name })
                .await
                .map_err(|error| format!("failed to create category: {error}"))?;

            super::print_json(&category)
        }
    }
}
