use sqlx::{PgPool, QueryBuilder};

use crate::{
	BoxFuture, Result,
	db::Db,
	filter::RecordFilter,
	models::{ContestRecord, Page, UserKey},
};

/// Read access to one record table.
pub trait RecordStore
where
	Self: Send + Sync,
{
	fn count<'a>(&'a self, filter: &'a RecordFilter) -> BoxFuture<'a, Result<i64>>;

	/// Rows ordered by rank, windowed by `page`.
	fn list<'a>(
		&'a self,
		filter: &'a RecordFilter,
		page: Page,
	) -> BoxFuture<'a, Result<Vec<ContestRecord>>>;

	/// Scored rows of `username` in every data region, ordered by rank.
	fn list_by_user<'a>(
		&'a self,
		contest_name: &'a str,
		username: &'a str,
	) -> BoxFuture<'a, Result<Vec<ContestRecord>>>;

	fn point_lookup<'a>(
		&'a self,
		contest_name: &'a str,
		user: &'a UserKey,
	) -> BoxFuture<'a, Result<Option<ContestRecord>>>;
}

struct RecordTable {
	name: &'static str,
	columns: &'static str,
}
impl RecordTable {
	async fn count(&self, pool: &PgPool, filter: &RecordFilter) -> Result<i64> {
		let mut builder = QueryBuilder::new(format!("SELECT count(*) FROM {}", self.name));

		filter.push_where(&mut builder);

		let count: i64 = builder.build_query_scalar().fetch_one(pool).await?;

		Ok(count)
	}

	async fn list(
		&self,
		pool: &PgPool,
		filter: &RecordFilter,
		page: Option<Page>,
	) -> Result<Vec<ContestRecord>> {
		let mut builder =
			QueryBuilder::new(format!("SELECT {} FROM {}", self.columns, self.name));

		filter.push_where(&mut builder);
		builder.push(" ORDER BY rank ASC, data_region ASC, username ASC");

		if let Some(page) = page {
			builder.push(" OFFSET ");
			builder.push_bind(page.skip);
			builder.push(" LIMIT ");
			builder.push_bind(page.limit);
		}

		let records: Vec<ContestRecord> = builder.build_query_as().fetch_all(pool).await?;

		Ok(records)
	}

	async fn point_lookup(
		&self,
		pool: &PgPool,
		contest_name: &str,
		user: &UserKey,
	) -> Result<Option<ContestRecord>> {
		let filter = RecordFilter::key(contest_name, user);
		let mut builder =
			QueryBuilder::new(format!("SELECT {} FROM {}", self.columns, self.name));

		filter.push_where(&mut builder);
		builder.push(" LIMIT 1");

		let record: Option<ContestRecord> = builder.build_query_as().fetch_optional(pool).await?;

		Ok(record)
	}
}

static PREDICTED: RecordTable = RecordTable {
	name: "contest_records_predict",
	columns: "\
contest_name, contest_id, username, user_slug, data_region, country_code, country_name, rank, \
score, finish_time, attended_contests_count, old_rating, new_rating, delta_rating, \
NULL::jsonb AS real_time_rank, updated_at",
};
static ARCHIVED: RecordTable = RecordTable {
	name: "contest_records_archive",
	columns: "\
contest_name, contest_id, username, user_slug, data_region, country_code, country_name, rank, \
score, finish_time, attended_contests_count, old_rating, new_rating, delta_rating, \
real_time_rank, updated_at",
};

/// Records of contests that have not been officially scored yet.
pub struct PredictedRecords {
	pool: PgPool,
}
impl PredictedRecords {
	pub fn new(db: &Db) -> Self {
		Self { pool: db.pool.clone() }
	}
}
impl RecordStore for PredictedRecords {
	fn count<'a>(&'a self, filter: &'a RecordFilter) -> BoxFuture<'a, Result<i64>> {
		Box::pin(PREDICTED.count(&self.pool, filter))
	}

	fn list<'a>(
		&'a self,
		filter: &'a RecordFilter,
		page: Page,
	) -> BoxFuture<'a, Result<Vec<ContestRecord>>> {
		Box::pin(PREDICTED.list(&self.pool, filter, Some(page)))
	}

	fn list_by_user<'a>(
		&'a self,
		contest_name: &'a str,
		username: &'a str,
	) -> BoxFuture<'a, Result<Vec<ContestRecord>>> {
		Box::pin(async move {
			let filter = RecordFilter::contest(contest_name).with_username(username);

			PREDICTED.list(&self.pool, &filter, None).await
		})
	}

	fn point_lookup<'a>(
		&'a self,
		contest_name: &'a str,
		user: &'a UserKey,
	) -> BoxFuture<'a, Result<Option<ContestRecord>>> {
		Box::pin(PREDICTED.point_lookup(&self.pool, contest_name, user))
	}
}

/// Records of officially finalized contests, including real-time rank series.
pub struct ArchivedRecords {
	pool: PgPool,
}
impl ArchivedRecords {
	pub fn new(db: &Db) -> Self {
		Self { pool: db.pool.clone() }
	}
}
impl RecordStore for ArchivedRecords {
	fn count<'a>(&'a self, filter: &'a RecordFilter) -> BoxFuture<'a, Result<i64>> {
		Box::pin(ARCHIVED.count(&self.pool, filter))
	}

	fn list<'a>(
		&'a self,
		filter: &'a RecordFilter,
		page: Page,
	) -> BoxFuture<'a, Result<Vec<ContestRecord>>> {
		Box::pin(ARCHIVED.list(&self.pool, filter, Some(page)))
	}

	fn list_by_user<'a>(
		&'a self,
		contest_name: &'a str,
		username: &'a str,
	) -> BoxFuture<'a, Result<Vec<ContestRecord>>> {
		Box::pin(async move {
			let filter = RecordFilter::contest(contest_name).with_username(username);

			ARCHIVED.list(&self.pool, &filter, None).await
		})
	}

	fn point_lookup<'a>(
		&'a self,
		contest_name: &'a str,
		user: &'a UserKey,
	) -> BoxFuture<'a, Result<Option<ContestRecord>>> {
		Box::pin(ARCHIVED.point_lookup(&self.pool, contest_name, user))
	}
}
