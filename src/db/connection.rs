use super::DbPool;
use anyhow::Result;
use diesel::PgConnection;
use diesel::r2d2::ConnectionManager;
use std::time::Duration;

/// Builds the connection pool handed to `PgStore`.
///
/// Connections are opened lazily, so the service starts even when the
/// database is briefly unreachable; failures surface per request.
pub fn create_pool(database_url: &str, max_size: u32) -> Result<DbPool> {
    anyhow::ensure!(max_size > 0, "DB_POOL_SIZE must be at least 1");

    let manager = ConnectionManager::<PgConnection>::new(database_url);

    Ok(diesel::r2d2::Pool::builder()
        .max_size(max_size)
        .connection_timeout(Duration::from_secs(10))
        .test_on_check_out(true)
        .build_unchecked(manager))
}
