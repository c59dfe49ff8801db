use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

pub mod error;
pub mod model;
pub mod roles;
pub mod users;

pub use error::{Result, StoreError};
pub use model::{NewUser, PublicUser, Role, User, UserWithRoles};
pub use roles::RoleRepo;
pub use users::UserRepo;

/// Embedded schema migrations, applied at startup.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Open a connection pool for the given SQLite URL.
///
/// Foreign keys are enforced so user deletes cascade through the join
/// table. An in-memory database is capped at a single connection: each
/// pooled connection would otherwise open its own empty database.
pub async fn connect(url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)
        .map_err(StoreError::Database)?
        .create_if_missing(true)
        .foreign_keys(true);

    let mut pool_options = SqlitePoolOptions::new();
    if url.contains(":memory:") {
        pool_options = pool_options.max_connections(1);
    }

    let pool = pool_options.connect_with(options).await?;
    Ok(pool)
}
