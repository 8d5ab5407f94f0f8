use clap::{Args, Subcommand};

mod list;
mod place;

#[derive(Debug, Args)]
pub(crate) struct OrderCommand {
    #[command(subcommand)]
    command: OrderSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrderSubcommand {
    /// Check out the user's cart
    Place(place::PlaceOrderArgs),

    /// Print the user's orders
    List(list::ListOrdersArgs),
}

pub(crate) async fn run(command: OrderCommand) -> Result<(), String> {
    match command.command {
        OrderSubcommand::Place(args) => place::run(args).await,
        OrderSubcommand::List(args) => list::run(args).await,
    }
}
