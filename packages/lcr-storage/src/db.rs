use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{Result, schema};

/// Serializes concurrent schema bootstraps across API instances.
const SCHEMA_LOCK_ID: i64 = 0x6c63_72;

pub struct Db {
	pub pool: PgPool,
}
impl Db {
	pub async fn connect(cfg: &lcr_config::Postgres) -> Result<Self> {
		let pool =
			PgPoolOptions::new().max_connections(cfg.pool_max_conns).connect(&cfg.dsn).await?;

		Ok(Self { pool })
	}

	/// Creates missing tables and indexes. Safe to run on every startup.
	pub async fn ensure_schema(&self) -> Result<()> {
		let sql = schema::render_schema();
		// The transaction-scoped lock is released on commit or rollback.
		let mut tx = self.pool.begin().await?;

		sqlx::query("SELECT pg_advisory_xact_lock($1)")
			.bind(SCHEMA_LOCK_ID)
			.execute(&mut *tx)
			.await?;

		for statement in schema::statements(&sql) {
			sqlx::query(statement).execute(&mut *tx).await?;
		}

		tx.commit().await?;

		Ok(())
	}
}
