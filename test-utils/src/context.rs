use sea_orm::{
    sea_query::TableCreateStatement, ConnectOptions, ConnectionTrait, Database, DatabaseConnection,
};

use crate::error::TestError;

/// Test environment holding an in-memory SQLite database connection.
///
/// The connection is created lazily on first access and persists for the
/// lifetime of the context, so every operation in one test sees the same
/// database.
pub struct TestContext {
    /// Optional database connection to the in-memory SQLite instance.
    ///
    /// Initialized lazily when `database()` is first called.
    pub db: Option<DatabaseConnection>,
}

impl TestContext {
    /// Creates a new empty test context with no database connection.
    pub fn new() -> Self {
        Self { db: None }
    }

    /// Gets or creates the in-memory SQLite database connection.
    ///
    /// # Returns
    /// - `Ok(&DatabaseConnection)` - Reference to the database connection
    /// - `Err(TestError::Database)` - Failed to connect to in-memory SQLite
    pub async fn database(&mut self) -> Result<&DatabaseConnection, TestError> {
        match self.db {
            Some(ref db) => Ok(db),
            None => {
                // A single connection so every operation, including ones
                // issued from spawned tasks, sees the same in-memory
                // database.
                let mut opt = ConnectOptions::new("sqlite::memory:");
                opt.max_connections(1).sqlx_logging(false);
                // Pinging the connection on every acquire is a round-trip to
                // SQLite's worker thread; under a paused test clock the
                // virtual timer would auto-advance into the acquire timeout
                // before that ping completes. The single in-memory connection
                // never goes stale, so skip the pre-acquire test.
                opt.test_before_acquire(false);

                // Open the pooled connection on a dedicated real-time
                // runtime. Tests that run under `tokio::test(start_paused)`
                // would otherwise let the virtual clock auto-advance into
                // the pool's acquire timeout before SQLite's background
                // worker finishes connecting, yielding `PoolTimedOut`.
                // Establishing it here off the paused runtime sidesteps that
                // race; the single idle connection is then reused for every
                // later acquire without opening a new one.
                let db = std::thread::scope(|scope| {
                    scope
                        .spawn(|| {
                            let rt = tokio::runtime::Builder::new_multi_thread()
                                .worker_threads(1)
                                .enable_all()
                                .build()
                                .expect("build connect runtime");
                            let result = rt.block_on(async {
                                let db = Database::connect(opt).await?;
                                // Force one full acquire/use/return cycle and
                                // wait for the connection to land back in the
                                // idle queue. sqlx returns connections via a
                                // spawned task; if we hand the pool to a paused
                                // test runtime before that settles, the first
                                // acquire there waits on the permit and the
                                // virtual clock auto-advances into the timeout.
                                db.ping().await?;
                                let pool = db.get_sqlite_connection_pool();
                                for _ in 0..1000 {
                                    if pool.num_idle() >= 1 {
                                        break;
                                    }
                                    tokio::task::yield_now().await;
                                }
                                Ok::<_, sea_orm::DbErr>(db)
                            });
                            // Keep the runtime (and SQLite's worker thread)
                            // alive for the connection's lifetime; dropping
                            // it would close the single pooled connection and
                            // force a reopen under the test's paused clock.
                            std::mem::forget(rt);
                            result
                        })
                        .join()
                        .expect("connect thread panicked")
                })?;

                let pool = db.get_sqlite_connection_pool();
                eprintln!(
                    "DEBUG after connect: size={} idle={}",
                    pool.size(),
                    pool.num_idle()
                );

                let db_ref = self.db.insert(db);

                Ok(&*db_ref) // Re-borrow as immutable
            }
        }
    }

    /// Creates database tables from the provided CREATE TABLE statements.
    ///
    /// Executes each statement in sequence to set up the schema for the
    /// test. Typically called by `TestBuilder::build()` rather than
    /// directly.
    pub async fn create_tables(
        &mut self,
        tables: &[TableCreateStatement],
    ) -> Result<(), TestError> {
        let db = self.database().await?;
        {
            let pool = db.get_sqlite_connection_pool();
            eprintln!(
                "DEBUG create_tables start: size={} idle={}",
                pool.size(),
                pool.num_idle()
            );
            match pool.try_acquire() {
                Some(_c) => eprintln!("DEBUG try_acquire: Some"),
                None => eprintln!("DEBUG try_acquire: None"),
            }
            eprintln!(
                "DEBUG after try_acquire: size={} idle={}",
                pool.size(),
                pool.num_idle()
            );
        }
        for table in tables {
            db.execute(table).await?;
        }
        Ok(())
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
