use clap::{Args, Subcommand};
use storefront_app::domain::addresses::data::NewAddress;

use crate::config::DatabaseConfig;

#[derive(Debug, Args)]
pub(crate) struct AddressCommand {
    #[command(subcommand)]
    command: AddressSubcommand,
}

#[derive(Debug, Subcommand)]
enum AddressSubcommand {
    /// Add a delivery address for a user
    Create(CreateAddressArgs),
}

#[derive(Debug, Args)]
struct CreateAddressArgs {
    /// Email of the owning user
    #[arg(long)]
    email: String,

    #[arg(long)]
    street: String,

    #[arg(long)]
    building_name: String,

    #[arg(long)]
    city: String,

    #[arg(long)]
    state: String,

    #[arg(long)]
    country: String,

    #[arg(long)]
    pincode: String,

    #[command(flatten)]
    database: DatabaseConfig,
}

pub(crate) async fn run(command: AddressCommand) -> Result<(), String> {
    match command.command {
        AddressSubcommand::Create(args) => {
            let ctx = super::connect(&args.database).await?;

            let address = ctx
                .addresses
                .create_address(
                    &args.email,
                    NewAddress {
                        street: args.street,
                        building_name: args.building_name,
                        city: args.city,
                        state: args.state,
                        country: args.country,
                        pincode: args.pincode,
                    },
                )
                .await
                .map_err(|error| format!("failed to create address: {error}"))?;

            super::print_json(&address)
        }
    }
}
