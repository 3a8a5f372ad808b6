//! eco - EcoTech identity administration
//!
//! # Examples
//!
//! ```bash
//! # Create the first identity on an empty store
//! eco bootstrap --username admin --email admin@ecotech.local
//!
//! # Every other command logs in first
//! eco user list --pretty
//! eco user update 3 --role admin
//! eco user delete 3 --yes
//! ```

use eco_cli::{Cli, app};

use std::process::ExitCode;

use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    // Credentials may live in .env rather than config.toml
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let pretty = cli.pretty;

    match app::run(cli).await {
        Ok(value) => {
            let output = if pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            };

            match output {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error serializing response: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
