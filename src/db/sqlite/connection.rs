//! SQLite database connection and migration management.

use std::path::Path;
use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use super::address::SqliteAddressRepository;
use super::user::SqliteUserRepository;
use super::work_status::SqliteWorkStatusRepository;
use crate::db::{Database, DatabaseStats, DbError, DbResult};

// Embed migrations from data/sql/sqlite/ at compile time
static MIGRATOR: Migrator = sqlx::migrate!("data/sql/sqlite");

const MAX_CONNECTIONS: u32 = 20;

/// SQLite database implementation.
///
/// Provides access to repositories via associated types, avoiding dynamic dispatch.
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open (or create) a database file at the given path.
    pub async fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        Self::with_options(options, MAX_CONNECTIONS).await
    }

    /// Connect using a `sqlite:` URL, e.g. `sqlite://data/mitarbeiter.db` or `sqlite::memory:`.
    pub async fn connect(url: &str) -> DbResult<Self> {
        if url.contains(":memory:") {
            return Self::in_memory().await;
        }

        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| DbError::Connection {
                message: format!("invalid database url '{}': {}", url, e),
            })?
            .create_if_missing(true)
            .foreign_keys(true);

        Self::with_options(options, MAX_CONNECTIONS).await
    }

    /// Create an in-memory database (useful for testing).
    ///
    /// Every SQLite connection to `:memory:` gets its own database, so the
    /// pool is pinned to a single connection that never expires.
    pub async fn in_memory() -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    async fn with_options(options: SqliteConnectOptions, max_connections: u32) -> DbResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    /// Access the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close all pooled connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl Database for SqliteDatabase {
    type Users<'a> = SqliteUserRepository<'a>;
    type Addresses<'a> = SqliteAddressRepository<'a>;
    type WorkStatuses<'a> = SqliteWorkStatusRepository<'a>;

    async fn migrate(&self) -> DbResult<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: e.to_string(),
            })
    }

    async fn purge(&self) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        // Children first so the statements do not rely on cascades
        for table in ["work_status", "addresses", "users"] {
            sqlx::query(&format!("DELETE FROM {}", table))
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query(
            "DELETE FROM sqlite_sequence WHERE name IN ('work_status', 'addresses', 'users')",
        )
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn stats(&self) -> DbResult<DatabaseStats> {
        use crate::db::{AddressRepository, UserRepository, WorkStatusRepository};

        Ok(DatabaseStats {
            users: self.users().count().await?,
            addresses: self.addresses().count().await?,
            home_office: self.work_statuses().count_home_office().await?,
            backend: "SQLite".to_string(),
        })
    }

    fn users(&self) -> Self::Users<'_> {
        SqliteUserRepository { pool: &self.pool }
    }

    fn addresses(&self) -> Self::Addresses<'_> {
        SqliteAddressRepository { pool: &self.pool }
    }

    fn work_statuses(&self) -> Self::WorkStatuses<'_> {
        SqliteWorkStatusRepository { pool: &self.pool }
    }
}
