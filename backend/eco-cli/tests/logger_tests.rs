use eco_cli::CliError;
use eco_cli::logger;
use eco_config::LogLevel;

use googletest::prelude::*;
use log::LevelFilter;
use tempfile::TempDir;

// The global logger can be installed once per process, so every check lives in one test
#[test]
fn given_file_logger_when_initialized_then_it_owns_the_log_facade() {
    // Given
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("eco.log");

    // When
    let first = logger::initialize(LogLevel(LevelFilter::Debug), Some(log_path.clone()), false);
    log::debug!(target: "eco_identity", "identity event reached the file");
    log::info!(target: "sqlx::query", "SELECT statement noise");
    log::warn!(target: "sqlx::pool", "pool warning reached the file");
    log::logger().flush();
    let second = logger::initialize(LogLevel(LevelFilter::Info), None, false);

    // Then
    assert!(first.is_ok());
    assert!(matches!(second, Err(CliError::Logger { .. })));

    let contents = std::fs::read_to_string(&log_path).unwrap();
    assert_that!(contents, contains_substring("Logger initialized: level=Debug"));
    assert_that!(contents, contains_substring("identity event reached the file"));
    assert_that!(contents, contains_substring("pool warning reached the file"));
    assert_that!(contents, not(contains_substring("SELECT statement noise")));
}
