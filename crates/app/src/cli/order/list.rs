use clap::Args;

use crate::{
    cli::{connect, print_json},
    config::DatabaseConfig,
};

#[derive(Debug, Args)]
pub(crate) struct ListOrdersArgs {
    #[arg(long)]
    email: String,

    #[command(flatten)]
    database: DatabaseConfig,
}

pub(crate) async fn run(args: ListOrdersArgs) -> Result<(), String> {
    let ctx = connect(&args.database).await?;

    let orders = ctx
        .orders
        .list_orders(&args.email)
        .await
        .map_err(|error| format!("failed to list orders: {error}"))?;

    print_json(&orders)
}
