use eco_db::{ConnectionSettings, Statement, StoreConnector};

/// Creates an unconnected connector over a private in-memory store
pub fn create_test_connector() -> StoreConnector {
    StoreConnector::new(ConnectionSettings::in_memory())
}

/// Creates an in-memory connector that is already live with migrations run
pub async fn create_connected_connector() -> StoreConnector {
    let connector = create_test_connector();
    connector
        .connect()
        .await
        .expect("Failed to connect test store");
    connector
}

/// Builds the insert used to seed users in tests
pub fn insert_user_statement(username: &str, email: &str) -> Statement {
    Statement::write(
        "INSERT INTO users (username, password_hash, email, role) VALUES (?, ?, ?, ?)",
    )
    .bind(username)
    .bind("$argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaA")
    .bind(email)
    .bind("user")
}

/// Inserts a user row and returns its generated id
pub async fn insert_user(connector: &StoreConnector, username: &str, email: &str) -> i64 {
    connector
        .execute(&insert_user_statement(username, email))
        .await
        .expect("Failed to insert test user")
        .into_inserted_id()
        .expect("Insert did not report an id")
}

/// Counts rows in the users table
pub async fn count_users(connector: &StoreConnector) -> i64 {
    let rows = connector
        .fetch_all(&Statement::read("SELECT COUNT(*) AS total FROM users"))
        .await
        .expect("Failed to count users");
    rows[0].int("total").expect("Count column missing")
}
