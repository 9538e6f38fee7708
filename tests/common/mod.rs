//! Helpers shared by the integration tests.

use std::path::PathBuf;

use crm_customers::db::{DbPool, establish_connection_pool, run_migrations};
use tempfile::TempDir;

/// A migrated SQLite database living in its own temporary directory.
///
/// The directory, database file and WAL side files are removed on drop.
pub struct TestDb {
    _dir: TempDir,
    path: PathBuf,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("build connection pool");
        run_migrations(&pool).expect("run migrations");

        Self {
            _dir: dir,
            path,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
