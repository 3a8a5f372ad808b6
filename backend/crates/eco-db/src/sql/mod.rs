pub mod execution;
pub mod record;
pub mod statement;
pub mod store_value;
pub mod update_builder;
