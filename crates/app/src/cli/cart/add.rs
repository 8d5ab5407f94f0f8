use clap::Args;
use storefront_app::domain::products::records::ProductId;

use crate::{
    cli::{connect, print_json},
    config::DatabaseConfig,
};

#[derive(Debug, Args)]
pub(crate) struct AddToCartArgs {
    #[arg(long)]
    email: String,

    #[arg(long)]
    product_id: ProductId,

    #[arg(long)]
    quantity: u32,

    #[command(flatten)]
    database: DatabaseConfig,
}

pub(crate) async fn run(args: AddToCartArgs) -> Result<(), String> {
    let ctx = connect(&args.database).await?;

    let cart = ctx
        .carts
        .add_product(&args.email, args.product_id, args.quantity)
        .await
        .map_err(|error| format!("failed to add product to cart: {error}"))?;

    print_json(&cart)
}
