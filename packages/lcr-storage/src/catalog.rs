use sqlx::PgPool;

use crate::{BoxFuture, Result, db::Db};

/// Existence check against the list of known contests.
pub trait ContestCatalog
where
	Self: Send + Sync,
{
	fn contest_exists<'a>(&'a self, contest_name: &'a str) -> BoxFuture<'a, Result<bool>>;
}

pub struct PgContestCatalog {
	pool: PgPool,
}
impl PgContestCatalog {
	pub fn new(db: &Db) -> Self {
		Self { pool: db.pool.clone() }
	}
}
impl ContestCatalog for PgContestCatalog {
	fn contest_exists<'a>(&'a self, contest_name: &'a str) -> BoxFuture<'a, Result<bool>> {
		Box::pin(async move {
			let exists: bool =
				sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM contests WHERE title_slug = $1)")
					.bind(contest_name)
					.fetch_one(&self.pool)
					.await?;

			Ok(exists)
		})
	}
}
