use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;
use wagerbook::adapter::outbound::sqlite::{create_pool, run_migrations, SqliteLedgerStore};

/// Temporary SQLite ledger for integration tests. The file goes away with
/// the value.
pub struct TempDb {
    _dir: TempDir,
    path: PathBuf,
    store: Arc<SqliteLedgerStore>,
}

impl TempDb {
    pub fn create(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(format!("wagerbook-{name}.db"));

        let pool = create_pool(&path.display().to_string()).expect("create sqlite pool");
        run_migrations(&pool).expect("run migrations");

        Self {
            _dir: dir,
            path,
            store: Arc::new(SqliteLedgerStore::new(pool)),
        }
    }

    pub fn store(&self) -> Arc<SqliteLedgerStore> {
        Arc::clone(&self.store)
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
