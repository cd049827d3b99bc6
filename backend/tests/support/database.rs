//! PostgreSQL access for the Diesel adapter suites.
//!
//! The suites run against the database named by `TRAVEL_TEST_DATABASE_URL`.
//! When it is unset they print a skip marker and return early, so the rest
//! of the test run stays hermetic.

use std::sync::LazyLock;

use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tokio::sync::{Mutex, MutexGuard};
use travel_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

/// Environment variable naming the test database.
pub const TEST_DATABASE_URL: &str = "TRAVEL_TEST_DATABASE_URL";

static DATABASE_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Exclusive handle on the migrated, emptied test database.
pub struct TestDatabase {
    pub pool: DbPool,
    _guard: MutexGuard<'static, ()>,
}

/// Database URL, or `None` after printing a skip marker.
pub fn database_url_or_skip(test: &str) -> Option<String> {
    match std::env::var(TEST_DATABASE_URL) {
        Ok(url) if !url.trim().is_empty() => Some(url),
        _ => {
            eprintln!("SKIP-TEST-DATABASE: {test}: {TEST_DATABASE_URL} is not set");
            None
        }
    }
}

/// Migrate and truncate the test database, then hand out a pool.
///
/// Tests sharing the database are serialised by an in-process lock.
pub async fn prepare(test: &str) -> Option<TestDatabase> {
    let url = database_url_or_skip(test)?;
    let guard = DATABASE_LOCK.lock().await;

    let migrate_url = url.clone();
    tokio::task::spawn_blocking(move || run_pending_migrations(&migrate_url))
        .await
        .expect("migration task joins")
        .expect("migrations apply");

    let mut conn = AsyncPgConnection::establish(&url)
        .await
        .expect("connect to test database");
    diesel::sql_query(
        "TRUNCATE bookings, travel_agents, customers, flights RESTART IDENTITY CASCADE",
    )
    .execute(&mut conn)
    .await
    .expect("truncate tables");

    let pool = DbPool::new(PoolConfig::new(url).with_max_size(4).with_min_idle(Some(1)))
        .await
        .expect("build pool");
    Some(TestDatabase {
        pool,
        _guard: guard,
    })
}
