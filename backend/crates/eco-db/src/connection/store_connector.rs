//! Process-wide store handle.
//!
//! A [`StoreConnector`] is cheap to clone and every clone shares the same
//! lazily established pool, so separate managers built from clones talk to the
//! same live handle. The pool is created on first use under a write lock with a
//! double check, which guarantees a single establishment even when many tasks
//! race on first use. With the default of one pooled connection, statements
//! are serialized and a write transaction can never interleave with another.
//!
//! The pool has no idle timeout or max lifetime: it lives until
//! [`StoreConnector::disconnect`] or process exit. A closed pool is treated as
//! not live and is re-established by the next [`StoreConnector::connect`].

use crate::{
    ConnectionSettings, DbError, Execution, Record, Result as DbErrorResult, Statement,
    StoreTarget, StoreValue,
};

use std::panic::Location;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use error_location::ErrorLocation;
use log::{debug, info, warn};
use sqlx::Transaction;
use sqlx::any::{Any, AnyArguments, AnyPoolOptions};
use sqlx::AnyPool;
use sqlx::query::Query;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct StoreConnector {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    settings: ConnectionSettings,
    pool: RwLock<Option<AnyPool>>,
    established: AtomicU32,
}

impl StoreConnector {
    pub fn new(settings: ConnectionSettings) -> Self {
        sqlx::any::install_default_drivers();

        Self {
            inner: Arc::new(StoreInner {
                settings,
                pool: RwLock::new(None),
                established: AtomicU32::new(0),
            }),
        }
    }

    pub fn settings(&self) -> &ConnectionSettings {
        &self.inner.settings
    }

    /// Number of times a pool has been physically established.
    pub fn connections_established(&self) -> u32 {
        self.inner.established.load(Ordering::SeqCst)
    }

    pub async fn is_connected(&self) -> bool {
        self.inner
            .pool
            .read()
            .await
            .as_ref()
            .is_some_and(|pool| !pool.is_closed())
    }

    /// Return the live handle, establishing it when absent or closed.
    pub async fn connect(&self) -> DbErrorResult<AnyPool> {
        // Fast path: live pool already there (read lock)
        {
            let pool = self.inner.pool.read().await;
            if let Some(pool) = pool.as_ref().filter(|p| !p.is_closed()) {
                return Ok(pool.clone());
            }
        }

        // Slow path: hold the write lock for the whole establishment
        let mut slot = self.inner.pool.write().await;

        // Double-check: another task may have connected while we waited
        if let Some(pool) = slot.as_ref().filter(|p| !p.is_closed()) {
            return Ok(pool.clone());
        }

        let pool = self.establish().await?;
        *slot = Some(pool.clone());

        Ok(pool)
    }

    /// Close the handle if live. Safe to call any number of times.
    pub async fn disconnect(&self) {
        let pool = self.inner.pool.write().await.take();

        if let Some(pool) = pool
            && !pool.is_closed()
        {
            pool.close().await;
            info!("Store connection closed");
        }
    }

    /// Run one parameterized statement.
    ///
    /// Reads return every row. Writes run in their own transaction and report
    /// the generated id (inserts) or the affected-row count; a failed write is
    /// rolled back before the error is returned.
    pub async fn execute(&self, statement: &Statement) -> DbErrorResult<Execution> {
        let pool = self.connect().await?;

        debug!(
            "Executing {:?} statement: {}",
            statement.kind(),
            statement.sql()
        );

        if statement.is_write() {
            self.write(&pool, statement).await
        } else {
            Self::read(&pool, statement).await.map(Execution::Rows)
        }
    }

    /// Shorthand for a read that returns its rows.
    pub async fn fetch_all(&self, statement: &Statement) -> DbErrorResult<Vec<Record>> {
        self.execute(statement).await?.into_rows()
    }

    async fn establish(&self) -> DbErrorResult<AnyPool> {
        let settings = &self.inner.settings;

        if let StoreTarget::Sqlite { path } = &settings.target
            && let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty())
        {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DbError::connection(format!(
                    "Failed to create database directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        // Every in-memory connection is its own database, so never pool more than one
        let max_connections = match settings.target {
            StoreTarget::SqliteMemory => 1,
            _ => settings.max_connections.max(1),
        };

        let options = settings.target.connect_options()?;

        let pool = AnyPoolOptions::new()
            .max_connections(max_connections)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| {
                DbError::connection(format!(
                    "Unable to reach {}: {}",
                    settings.target.describe(),
                    e
                ))
            })?;

        Self::run_migrations(&settings.target, &pool).await?;

        let count = self.inner.established.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            "Store connection established: {} (max {} connection(s), establishment #{})",
            settings.target.describe(),
            max_connections,
            count
        );

        Ok(pool)
    }

    async fn run_migrations(target: &StoreTarget, pool: &AnyPool) -> DbErrorResult<()> {
        target
            .dialect()
            .migrator()
            .run(pool)
            .await
            .map_err(|e| DbError::Migration {
                message: format!("Migration failed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    async fn read(pool: &AnyPool, statement: &Statement) -> DbErrorResult<Vec<Record>> {
        let rows = Self::bind(statement).fetch_all(pool).await?;
        rows.iter().map(Record::from_row).collect()
    }

    async fn write(&self, pool: &AnyPool, statement: &Statement) -> DbErrorResult<Execution> {
        let mut tx = pool.begin().await.map_err(|e| {
            DbError::connection(format!("Unable to start transaction: {}", e))
        })?;

        let result = match Self::bind(statement).execute(&mut *tx).await {
            Ok(result) => result,
            Err(source) => return Err(Self::rollback(tx, source).await),
        };

        let execution = if statement.is_insert() {
            let id = match result.last_insert_id() {
                Some(id) => id,
                None => {
                    // Driver did not report it; ask on the same connection
                    let sql = self.inner.settings.target.dialect().last_insert_id_sql();
                    match sqlx::query_scalar::<_, i64>(sql).fetch_one(&mut *tx).await {
                        Ok(id) => id,
                        Err(source) => return Err(Self::rollback(tx, source).await),
                    }
                }
            };
            Execution::Inserted(id)
        } else {
            Execution::Affected(result.rows_affected())
        };

        tx.commit().await?;

        Ok(execution)
    }

    async fn rollback(tx: Transaction<'static, Any>, source: sqlx::Error) -> DbError {
        if let Err(e) = tx.rollback().await {
            warn!("Rollback after failed write also failed: {}", e);
        } else {
            debug!("Write rolled back after failure");
        }
        DbError::from(source)
    }

    fn bind(statement: &Statement) -> Query<'_, Any, AnyArguments<'_>> {
        statement
            .params()
            .iter()
            .fold(sqlx::query(statement.sql()), |query, value| match value {
                StoreValue::Int(v) => query.bind(*v),
                StoreValue::Text(v) => query.bind(v.as_str()),
                StoreValue::Null => query.bind(None::<String>),
            })
    }
}

impl std::fmt::Debug for StoreConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConnector")
            .field("target", &self.inner.settings.target)
            .field("established", &self.connections_established())
            .finish()
    }
}
