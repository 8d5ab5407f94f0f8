use clap::{Args, Subcommand};
use storefront_app::domain::users::data::NewUser;

use crate::config::DatabaseConfig;

#[derive(Debug, Args)]
pub(crate) struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    /// Register a user
    Create(CreateUserArgs),
}

#[derive(Debug, Args)]
struct CreateUserArgs {
    #[arg(long)]
    username: String,

    #[arg(long)]
    email: String,

    #[command(flatten)]
    database: DatabaseConfig,
}

pub(crate) async fn run(command: UserCommand) -> Result<(), String> {
    match command.command {
        UserSubcommand::Create(args) => {
            let ctx = super::connect(&args.database).await?;

            let user = ctx
                .users
                .create_user(NewUser {
                    username: args.username,
                    email: args.email,
                })
                .await
                .map_err(|error| format!("failed to create user: {error}"))?;

            super::print_json(&user)
        }
    }
}
