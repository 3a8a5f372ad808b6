use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List all identities
    List,
    /// Get an identity by username
    Get {
        username: String,
    },
    /// Get an identity by numeric ID
    GetId {
        id: i64,
    },
    /// Create an identity (password is prompted)
    Create {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        /// Defaults to security.default_role
        #[arg(long)]
        role: Option<String>,
    },
    /// Update selected fields of an identity
    Update {
        id: i64,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        role: Option<String>,
        /// Prompt for a new password
        #[arg(long)]
        password: bool,
    },
    /// Delete an identity
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}
