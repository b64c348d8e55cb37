pub mod memory;
pub mod seed;

mod error;

pub use error::{Error, Result};

use std::{env, future::Future, str::FromStr, thread};

use sqlx::{
	ConnectOptions, Connection, Executor,
	postgres::{PgConnectOptions, PgConnection},
};
use tokio::runtime::Builder;
use uuid::Uuid;

use lcr_config::Postgres;
use lcr_storage::db::Db;

const MAINTENANCE_DATABASES: [&str; 2] = ["postgres", "template1"];
const TEST_POOL_MAX_CONNS: u32 = 2;

/// A throwaway database on the server named by `LCR_PG_DSN`.
///
/// Dropped by [`TestDatabase::cleanup`], or from a helper thread if the handle goes out of scope
/// first.
pub struct TestDatabase {
	name: String,
	dsn: String,
	maintenance: PgConnectOptions,
	dropped: bool,
}
impl TestDatabase {
	pub async fn new(base_dsn: &str) -> Result<Self> {
		let base = PgConnectOptions::from_str(base_dsn)
			.map_err(|err| Error::Setup(format!("LCR_PG_DSN is not a valid DSN: {err}.")))?;
		let (maintenance, mut conn) = maintenance_connection(&base).await?;
		let name = format!("lcr_test_{}", Uuid::new_v4().simple());

		conn.execute(format!(r#"CREATE DATABASE "{name}""#).as_str())
			.await
			.map_err(|err| Error::Setup(format!("CREATE DATABASE {name} failed: {err}.")))?;
		conn.close().await?;

		let dsn = base.database(&name).to_url_lossy().to_string();

		Ok(Self { name, dsn, maintenance, dropped: false })
	}

	pub fn dsn(&self) -> &str {
		&self.dsn
	}

	/// Opens a small pool on the test database with the record schema in place.
	pub async fn connect(&self) -> Result<Db> {
		let cfg = Postgres { dsn: self.dsn.clone(), pool_max_conns: TEST_POOL_MAX_CONNS };
		let db = Db::connect(&cfg).await?;

		db.ensure_schema().await?;

		Ok(db)
	}

	pub async fn cleanup(mut self) -> Result<()> {
		let result = drop_database(&self.name, &self.maintenance).await;

		self.dropped = result.is_ok();

		result
	}
}
impl Drop for TestDatabase {
	fn drop(&mut self) {
		if self.dropped {
			return;
		}

		let name = self.name.clone();
		let maintenance = self.maintenance.clone();
		let handle = thread::spawn(move || {
			let result = Builder::new_current_thread()
				.enable_all()
				.build()
				.map_err(|err| Error::Setup(err.to_string()))
				.and_then(|runtime| runtime.block_on(drop_database(&name, &maintenance)));

			if let Err(err) = result {
				eprintln!("Failed to drop test database {name}: {err}");
			}
		});

		let _ = handle.join();
	}
}

pub fn env_dsn() -> Option<String> {
	env::var("LCR_PG_DSN").ok()
}

/// Runs `f` against a fresh schema-ready database and drops it afterwards.
///
/// The first error wins; a cleanup failure after a failed body is only reported on stderr.
pub async fn with_test_db<F, Fut, T>(base_dsn: &str, f: F) -> Result<T>
where
	F: FnOnce(Db) -> Fut,
	Fut: Future<Output = Result<T>>,
{
	let test_db = TestDatabase::new(base_dsn).await?;
	let result = match test_db.connect().await {
		Ok(db) => f(db).await,
		Err(err) => Err(err),
	};
	let cleanup = test_db.cleanup().await;

	match (result, cleanup) {
		(Ok(value), Ok(())) => Ok(value),
		(Ok(_), Err(err)) => Err(err),
		(Err(err), cleanup) => {
			if let Err(cleanup_err) = cleanup {
				eprintln!("Test database cleanup also failed: {cleanup_err}");
			}

			Err(err)
		},
	}
}

async fn maintenance_connection(
	base: &PgConnectOptions,
) -> Result<(PgConnectOptions, PgConnection)> {
	let mut failures = Vec::new();

	for database in MAINTENANCE_DATABASES {
		let options = base.clone().database(database);

		match PgConnection::connect_with(&options).await {
			Ok(conn) => return Ok((options, conn)),
			Err(err) => failures.push(format!("{database}: {err}")),
		}
	}

	Err(Error::Setup(format!("No maintenance database is reachable ({}).", failures.join("; "))))
}

async fn drop_database(name: &str, maintenance: &PgConnectOptions) -> Result<()> {
	let mut conn = PgConnection::connect_with(maintenance).await?;

	// FORCE terminates pools that tests left open. Requires Postgres 13+.
	conn.execute(format!(r#"DROP DATABASE IF EXISTS "{name}" WITH (FORCE)"#).as_str()).await?;
	conn.close().await?;

	Ok(())
}
