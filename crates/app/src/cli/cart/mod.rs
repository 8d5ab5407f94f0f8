use clap::{Args, Subcommand};

mod add;
mod show;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Add a product to the user's cart
    Add(add::AddToCartArgs),

    /// Print the user's cart
    Show(show::ShowCartArgs),
}

pub(crate) async fn run(command: CartCommand) -> Result<(), String> {
    match command.command {
        CartSubcommand::Add(args) => add::run(args).await,
        CartSubcommand::Show(args) => show::run(args).await,
    }
}
