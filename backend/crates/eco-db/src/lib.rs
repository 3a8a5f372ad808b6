pub mod connection;
pub mod error;
pub mod sql;

pub use connection::connection_settings::ConnectionSettings;
pub use connection::store_connector::StoreConnector;
pub use connection::store_target::{Dialect, StoreTarget};
pub use error::{DbError, Result};
pub use sql::execution::Execution;
pub use sql::record::Record;
pub use sql::statement::{Statement, StatementKind};
pub use sql::store_value::StoreValue;
pub use sql::update_builder::UpdateBuilder;

#[cfg(test)]
mod tests;
