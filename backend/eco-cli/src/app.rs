use crate::actions::Actions;
use crate::cli::Cli;
use crate::commands::Commands;
use crate::error::{CliError, Result as CliErrorResult};
use crate::logger;
use crate::prompt::TerminalPrompter;
use crate::session;

use eco_config::{Config, DatabaseBackend};
use eco_core::PasswordHasher;
use eco_db::{ConnectionSettings, StoreConnector, StoreTarget};
use eco_identity::IdentityManager;

use log::info;
use serde_json::Value;

/// Load configuration, open the store and run one command.
pub async fn run(cli: Cli) -> CliErrorResult<Value> {
    let config = Config::load()?;
    config.validate()?;

    let log_file = config.log_file_path()?;
    if let Some(dir) = log_file.as_ref().and_then(|path| path.parent()) {
        std::fs::create_dir_all(dir).map_err(|e| CliError::Logger {
            message: format!("Failed to create log directory {}: {}", dir.display(), e),
        })?;
    }

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file, config.logging.colored)?;

    info!("Starting eco v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let store = StoreConnector::new(connection_settings(&config)?);
    let hasher = PasswordHasher::new(config.security.hash_cost())?;
    let manager = IdentityManager::new(store.clone(), hasher);

    let result = dispatch(&config, &manager, cli.command).await;

    store.disconnect().await;

    result
}

async fn dispatch(
    config: &Config,
    manager: &IdentityManager,
    command: Commands,
) -> CliErrorResult<Value> {
    let prompter = TerminalPrompter;
    let actions = Actions::new(manager, &prompter, &config.security);

    match command {
        Commands::Bootstrap {
            username,
            email,
            role,
        } => actions.bootstrap(&username, &email, &role).await,
        Commands::User { action } => {
            let actor =
                session::login(manager, &prompter, config.security.max_login_attempts).await?;
            actions.run(&actor, action).await
        }
    }
}

/// Map the database section onto a store target.
pub fn connection_settings(config: &Config) -> CliErrorResult<ConnectionSettings> {
    let database = &config.database;

    let target = match database.backend {
        DatabaseBackend::Sqlite => StoreTarget::Sqlite {
            path: config.database_path()?,
        },
        DatabaseBackend::Mysql => StoreTarget::MySql {
            host: database.host.clone(),
            port: database.port,
            database: database.name.clone(),
            user: database.user.clone(),
            password: database.password.clone(),
        },
    };

    Ok(ConnectionSettings::new(target).with_max_connections(database.max_connections))
}
