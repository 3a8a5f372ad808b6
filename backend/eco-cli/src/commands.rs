use crate::user_commands::UserCommands;

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the first identity. Only allowed while the store is empty.
    Bootstrap {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "admin")]
        role: String,
    },

    /// Identity operations (requires login)
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
}
