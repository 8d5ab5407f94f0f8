use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use storefront_app::domain::{
    categories::records::CategoryId,
    products::data::NewProduct,
};

use crate::config::DatabaseConfig;

#[derive(Debug, Args)]
pub(crate) struct ProductCommand {
    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductSubcommand {
    /// Add a product to a category
    Create(CreateProductArgs),
}

#[derive(Debug, Args)]
struct CreateProductArgs {
    #[arg(long)]
    category_id: CategoryId,

    #[arg(long)]
    name: String,

    /// Unit price, e.g. 19.99
    #[arg(long)]
    price: Decimal,

    /// Discount percentage between 0 and 100
    #[arg(long, default_value = "0")]
    discount: Decimal,

    /// Units in stock
    #[arg(long, default_value_t = 0)]
    quantity: u32,

    #[arg(long, default_value = "")]
    description: String,

    #[command(flatten)]
    database: DatabaseConfig,
}

impl CreateProductArgs {
    fn new_product(&self) -> NewProduct {
        NewProduct {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            discount: self.discount,
            quantity: self.quantity,
        }
    }
}

pub(crate) async fn run(command: ProductCommand) -> Result<(), String> {
    match command.command {
        ProductSubcommand::Create(args) => {
            let ctx = super::connect(&args.database).await?;

            let product = ctx
                .products
                .create_product(args.category_id, args.new_product())
                .await
                .map_err(|error| format!("failed to create product: {error}"))?;

            super::print_json(&product)
        }
    }
}
