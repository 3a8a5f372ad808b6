pub mod connection_settings;
pub mod store_connector;
pub mod store_target;
