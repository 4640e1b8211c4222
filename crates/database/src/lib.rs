//! SQLite persistence for teacher outreach parameters.
//!
//! Each teacher owns three flat parameter tables (gateway, roster, send),
//! stored in a single `teacher_params` table keyed by
//! `(teacher_id, scope, key)`.
//!
//! # Example
//!
//! ```no_run
//! use database::{params, Database, ParamScope};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("sqlite:outreach.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     params::upsert_param(db.pool(), "teacher-1", ParamScope::Gateway, "teacherCode", "T001")
//!         .await?;
//!     let gateway = params::get_params(db.pool(), "teacher-1", ParamScope::Gateway).await?;
//!     println!("{gateway:?}");
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod models;
pub mod params;

pub use error::{DatabaseError, Result};
pub use models::{ParamScope, TeacherParam};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 5;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    ///
    /// In-memory databases (`sqlite::memory:`) are per-connection, so use a
    /// pool size of 1 for them.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
