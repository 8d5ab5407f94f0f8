use clap::Args;

use crate::{
    cli::{connect, print_json},
    config::DatabaseConfig,
};

#[derive(Debug, Args)]
pub(crate) struct ShowCartArgs {
    #[arg(long)]
    email: String,

    #[command(flatten)]
    database: DatabaseConfig,
}

pub(crate) async fn run(args: ShowCartArgs) -> Result<(), String> {
    let ctx = connect(&args.database).await?;

    let cart = ctx
        .carts
        .get_cart(&args.email)
        .await
        .map_err(|error| format!("failed to load cart: {error}"))?;

    print_json(&cart)
}
