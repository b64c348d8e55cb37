//! Fixture rows for record tables, shared by the in-memory stores and Postgres tests.

use serde_json::Value;
use sqlx::{PgPool, types::Json};

use lcr_storage::models::ContestRecord;

use crate::Result;

pub const PREDICTED_TABLE: &str = "contest_records_predict";
pub const ARCHIVED_TABLE: &str = "contest_records_archive";

pub fn record(
	contest_name: &str,
	username: &str,
	data_region: &str,
	rank: i32,
	score: i32,
) -> ContestRecord {
	ContestRecord {
		contest_name: contest_name.to_string(),
		contest_id: None,
		username: username.to_string(),
		user_slug: Some(username.to_lowercase()),
		data_region: data_region.to_string(),
		country_code: None,
		country_name: None,
		rank,
		score,
		finish_time: None,
		attended_contests_count: Some(1),
		old_rating: None,
		new_rating: None,
		delta_rating: None,
		real_time_rank: None,
		updated_at: None,
	}
}

pub fn rated(mut record: ContestRecord, old_rating: f64, new_rating: f64) -> ContestRecord {
	record.old_rating = Some(old_rating);
	record.new_rating = Some(new_rating);
	record.delta_rating = Some(new_rating - old_rating);

	record
}

/// Attaches a real-time rank series. Elements may be any JSON value, matching what the ingester
/// writes, so fixtures can carry `null` gaps.
pub fn with_real_time_rank<I, V>(mut record: ContestRecord, ranks: I) -> ContestRecord
where
	I: IntoIterator<Item = V>,
	V: Into<Value>,
{
	record.real_time_rank = Some(Json(ranks.into_iter().map(Into::into).collect()));

	record
}

pub async fn insert_contest(pool: &PgPool, title_slug: &str) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO contests (title_slug, title)
VALUES ($1, $2)
ON CONFLICT (title_slug) DO NOTHING",
	)
	.bind(title_slug)
	.bind(title_slug.replace('-', " "))
	.execute(pool)
	.await?;

	Ok(())
}

pub async fn insert_predicted(pool: &PgPool, record: &ContestRecord) -> Result<()> {
	insert_into(pool, PREDICTED_TABLE, record, false).await
}

pub async fn insert_archived(pool: &PgPool, record: &ContestRecord) -> Result<()> {
	insert_into(pool, ARCHIVED_TABLE, record, true).await
}

async fn insert_into(
	pool: &PgPool,
	table: &str,
	record: &ContestRecord,
	with_real_time_rank: bool,
) -> Result<()> {
	let (rank_column, rank_value) =
		if with_real_time_rank { (", real_time_rank", ", $16") } else { ("", "") };
	let sql = format!(
		"\
INSERT INTO {table} (
	contest_name,
	contest_id,
	username,
	user_slug,
	data_region,
	country_code,
	country_name,
	rank,
	score,
	finish_time,
	attended_contests_count,
	old_rating,
	new_rating,
	delta_rating,
	updated_at{rank_column}
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15{rank_value})"
	);
	let mut query = sqlx::query(sql.as_str())
		.bind(record.contest_name.as_str())
		.bind(record.contest_id)
		.bind(record.username.as_str())
		.bind(record.user_slug.as_deref())
		.bind(record.data_region.as_str())
		.bind(record.country_code.as_deref())
		.bind(record.country_name.as_deref())
		.bind(record.rank)
		.bind(record.score)
		.bind(record.finish_time)
		.bind(record.attended_contests_count)
		.bind(record.old_rating)
		.bind(record.new_rating)
		.bind(record.delta_rating)
		.bind(record.updated_at);

	if with_real_time_rank {
		query = query.bind(record.real_time_rank.clone());
	}

	query.execute(pool).await?;

	Ok(())
}
