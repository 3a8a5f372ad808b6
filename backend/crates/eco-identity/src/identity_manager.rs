//! CRUD and authentication for identities.
//!
//! The manager is the only component that reads or writes the `users` table.
//! Store failures are translated into [`IdentityError`] kinds before they reach
//! the caller, so no raw driver error leaks out. Hashing and verification are
//! CPU-bound and run on the blocking thread pool.

use crate::{
    Authenticator, IdentityChanges, IdentityError, IdentityErrorKind,
    Result as IdentityErrorResult,
};

use eco_core::{Identity, PasswordHasher};
use eco_db::{DbError, Record, Statement, StoreConnector, UpdateBuilder};

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use log::{debug, info, warn};
use tokio::task;

const USERS_TABLE: &str = "users";
const IDENTITY_COLUMNS: &str = "id, username, password_hash, email, role";

// Verified against when the username is unknown, so both failure paths hash
const DUMMY_PASSWORD: &str = "eco-dummy-password";

#[derive(Clone)]
pub struct IdentityManager {
    store: StoreConnector,
    hasher: PasswordHasher,
    dummy_hash: Arc<OnceLock<String>>,
}

impl IdentityManager {
    pub fn new(store: StoreConnector, hasher: PasswordHasher) -> Self {
        Self {
            store,
            hasher,
            dummy_hash: Arc::new(OnceLock::new()),
        }
    }

    pub fn store(&self) -> &StoreConnector {
        &self.store
    }

    pub fn hasher(&self) -> &PasswordHasher {
        &self.hasher
    }

    /// Build a transient identity, hashing `password` off the async runtime.
    pub async fn build_identity(
        &self,
        username: &str,
        email: &str,
        role: Option<&str>,
        password: &str,
    ) -> IdentityErrorResult<Identity> {
        let hasher = self.hasher.clone();
        let username = username.trim().to_owned();
        let email = email.trim().to_owned();
        let role = role.map(str::to_owned);
        let password = password.to_owned();

        let identity = task::spawn_blocking(move || {
            Identity::with_password(username, email, role.as_deref(), &password, &hasher)
        })
        .await
        .map_err(|e| IdentityError::hashing(format!("hashing task failed: {}", e)))??;

        Ok(identity)
    }

    /// Persist a new identity and bind the generated id onto it.
    pub async fn create(&self, identity: &mut Identity) -> IdentityErrorResult<i64> {
        identity.validate()?;

        if self.exists(&identity.username, &identity.email).await? {
            warn!(
                "Create rejected: username '{}' or email '{}' already registered",
                identity.username, identity.email
            );
            return Err(Self::duplicate_error(&identity.username, &identity.email));
        }

        let statement = Statement::write(format!(
            "INSERT INTO {} (username, password_hash, email, role) VALUES (?, ?, ?, ?)",
            USERS_TABLE
        ))
        .bind(identity.username.as_str())
        .bind(identity.password_hash())
        .bind(identity.email.as_str())
        .bind(identity.role.as_str());

        let id = match self.store.execute(&statement).await {
            Ok(execution) => execution.into_inserted_id()?,
            // Lost a race with a concurrent create that passed the same pre-check
            Err(e) if e.is_unique_violation() => {
                warn!(
                    "Create rejected by unique constraint for username '{}'",
                    identity.username
                );
                return Err(Self::duplicate_error(&identity.username, &identity.email));
            }
            Err(e) => return Err(e.into()),
        };

        identity.id = Some(id);
        info!("Created identity {} ({})", id, identity.username);

        Ok(id)
    }

    pub async fn read_by_username(&self, username: &str) -> IdentityErrorResult<Identity> {
        let statement = Statement::read(format!(
            "SELECT {} FROM {} WHERE username = ?",
            IDENTITY_COLUMNS, USERS_TABLE
        ))
        .bind(username);

        self.fetch_one(&statement)
            .await?
            .ok_or_else(|| IdentityError::not_found(format!("user '{}' not found", username)))
    }

    pub async fn read_by_id(&self, id: i64) -> IdentityErrorResult<Identity> {
        let statement = Statement::read(format!(
            "SELECT {} FROM {} WHERE id = ?",
            IDENTITY_COLUMNS, USERS_TABLE
        ))
        .bind(id);

        self.fetch_one(&statement)
            .await?
            .ok_or_else(|| IdentityError::not_found(format!("user with id {} not found", id)))
    }

    /// Every identity, ordered by id.
    pub async fn list(&self) -> IdentityErrorResult<Vec<Identity>> {
        let statement = Statement::read(format!(
            "SELECT {} FROM {} ORDER BY id ASC",
            IDENTITY_COLUMNS, USERS_TABLE
        ));

        let rows = self.store.fetch_all(&statement).await?;
        let identities = rows
            .iter()
            .map(Self::identity_from_record)
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(identities)
    }

    pub async fn count(&self) -> IdentityErrorResult<i64> {
        let statement =
            Statement::read(format!("SELECT COUNT(*) AS total FROM {}", USERS_TABLE));

        let rows = self.store.fetch_all(&statement).await?;
        let total = match rows.first() {
            Some(record) => record.int("total")?,
            None => 0,
        };

        Ok(total)
    }

    /// Apply the supplied fields. Returns `false` without touching the store
    /// when nothing was supplied.
    pub async fn update(&self, id: i64, changes: &IdentityChanges) -> IdentityErrorResult<bool> {
        self.read_by_id(id).await?;

        let password_hash = match changes.supplied_password() {
            Some(password) => Some(self.hash_password(password).await?),
            None => None,
        };

        let email = changes.email.as_deref().map(str::trim);
        let role = changes.role.as_deref().map(str::trim);

        let statement = UpdateBuilder::new(USERS_TABLE)
            .set_if_present("email", email)
            .set_if_present("role", role)
            .set_if_present("password_hash", password_hash)
            .build("id", id);

        let Some(statement) = statement else {
            debug!("Update of identity {} skipped: nothing changed", id);
            return Ok(false);
        };

        let affected = match self.store.execute(&statement).await {
            Ok(execution) => execution.into_affected()?,
            Err(e) if e.is_unique_violation() => {
                warn!("Update of identity {} rejected by unique constraint", id);
                return Err(IdentityError::duplicate(format!(
                    "email '{}' is already registered",
                    email.unwrap_or_default()
                )));
            }
            Err(e) => return Err(e.into()),
        };

        info!("Updated identity {} ({} row(s))", id, affected);

        Ok(affected > 0)
    }

    pub async fn delete(&self, id: i64) -> IdentityErrorResult<bool> {
        self.read_by_id(id).await?;

        let statement =
            Statement::write(format!("DELETE FROM {} WHERE id = ?", USERS_TABLE)).bind(id);
        let affected = self.store.execute(&statement).await?.into_affected()?;

        info!("Deleted identity {} ({} row(s))", id, affected);

        Ok(affected > 0)
    }

    /// Unknown usernames and wrong passwords both fail as
    /// [`IdentityErrorKind::InvalidCredentials`].
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> IdentityErrorResult<Identity> {
        let identity = match self.read_by_username(username).await {
            Ok(identity) => identity,
            Err(e) if e.kind() == IdentityErrorKind::NotFound => {
                self.verify_password(password, None).await?;
                warn!("Authentication failed: unknown username '{}'", username);
                return Err(IdentityError::invalid_credentials(format!(
                    "user '{}' not found",
                    username
                )));
            }
            Err(e) => return Err(e),
        };

        let stored = identity.password_hash().map(str::to_owned);
        if self.verify_password(password, stored).await? {
            info!("Identity '{}' authenticated", username);
            Ok(identity)
        } else {
            warn!("Authentication failed: wrong password for '{}'", username);
            Err(IdentityError::invalid_credentials("incorrect password"))
        }
    }

    async fn exists(&self, username: &str, email: &str) -> IdentityErrorResult<bool> {
        let statement = Statement::read(format!(
            "SELECT id FROM {} WHERE username = ? OR email = ?",
            USERS_TABLE
        ))
        .bind(username)
        .bind(email);

        Ok(!self.store.fetch_all(&statement).await?.is_empty())
    }

    async fn fetch_one(&self, statement: &Statement) -> IdentityErrorResult<Option<Identity>> {
        let rows = self.store.fetch_all(statement).await?;

        match rows.first() {
            Some(record) => Ok(Some(Self::identity_from_record(record)?)),
            None => Ok(None),
        }
    }

    async fn hash_password(&self, password: &str) -> IdentityErrorResult<String> {
        if password.is_empty() {
            return Err(IdentityError::validation("password must not be empty"));
        }

        let hasher = self.hasher.clone();
        let password = password.to_owned();

        let hash = task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| IdentityError::hashing(format!("hashing task failed: {}", e)))??;

        Ok(hash)
    }

    /// Verify on the blocking pool. With no stored hash a dummy hash is checked
    /// instead and the result is always `false`.
    async fn verify_password(
        &self,
        password: &str,
        stored: Option<String>,
    ) -> IdentityErrorResult<bool> {
        let password = password.to_owned();
        let hasher = self.hasher.clone();
        let dummy = Arc::clone(&self.dummy_hash);

        task::spawn_blocking(move || match stored {
            Some(hash) => PasswordHasher::verify(&password, &hash),
            None => {
                let hash = dummy.get_or_init(|| hasher.hash(DUMMY_PASSWORD).unwrap_or_default());
                let _ = PasswordHasher::verify(&password, hash);
                false
            }
        })
        .await
        .map_err(|e| IdentityError::hashing(format!("verification task failed: {}", e)))
    }

    fn identity_from_record(record: &Record) -> Result<Identity, DbError> {
        Ok(Identity::from_stored(
            record.int("id")?,
            record.text("username")?,
            record.text("email")?,
            record.text("role")?,
            record.text("password_hash")?,
        ))
    }

    #[track_caller]
    fn duplicate_error(username: &str, email: &str) -> IdentityError {
        IdentityError::duplicate(format!(
            "username '{}' or email '{}' already exists",
            username, email
        ))
    }
}

#[async_trait]
impl Authenticator for IdentityManager {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> IdentityErrorResult<Identity> {
        IdentityManager::authenticate(self, username, password).await
    }
}

impl std::fmt::Debug for IdentityManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityManager")
            .field("store", &self.store)
            .field("hasher", &self.hasher)
            .finish()
    }
}
