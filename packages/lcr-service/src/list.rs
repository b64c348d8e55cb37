use serde_json::Value;
use time::OffsetDateTime;

use lcr_storage::{
	filter::RecordFilter,
	models::{ContestRecord, Page},
};

use crate::{DEFAULT_PAGE_LIMIT, RecordService, Result};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ListRequest {
	pub contest_name: String,
	#[serde(default, deserialize_with = "crate::flag::deserialize")]
	pub archived: bool,
	#[serde(default)]
	pub skip: i64,
	#[serde(default = "default_limit")]
	pub limit: i64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RecordItem {
	pub contest_name: String,
	pub contest_id: Option<i32>,
	pub username: String,
	pub user_slug: Option<String>,
	pub data_region: String,
	pub country_code: Option<String>,
	pub country_name: Option<String>,
	pub rank: i32,
	pub score: i32,
	#[serde(with = "time::serde::rfc3339::option")]
	pub finish_time: Option<OffsetDateTime>,
	pub attended_contests_count: Option<i32>,
	pub old_rating: Option<f64>,
	pub new_rating: Option<f64>,
	pub delta_rating: Option<f64>,
	/// Omitted for predicted records. Archived records always carry the key, `null` when the
	/// series is missing.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub real_time_rank: Option<Option<Vec<Value>>>,
	#[serde(with = "time::serde::rfc3339::option")]
	pub updated_at: Option<OffsetDateTime>,
}
impl RecordItem {
	pub fn from_record(record: ContestRecord, archived: bool) -> Self {
		let real_time_rank = archived.then(|| record.real_time_rank.map(|ranks| ranks.0));

		Self {
			contest_name: record.contest_name,
			contest_id: record.contest_id,
			username: record.username,
			user_slug: record.user_slug,
			data_region: record.data_region,
			country_code: record.country_code,
			country_name: record.country_name,
			rank: record.rank,
			score: record.score,
			finish_time: record.finish_time,
			attended_contests_count: record.attended_contests_count,
			old_rating: record.old_rating,
			new_rating: record.new_rating,
			delta_rating: record.delta_rating,
			real_time_rank,
			updated_at: record.updated_at,
		}
	}
}

impl RecordService {
	pub async fn list(&self, req: ListRequest) -> Result<Vec<RecordItem>> {
		let page = Page::new(req.skip, req.limit)?;
		let contest_name = self.ensure_contest(&req.contest_name).await?;
		let filter = RecordFilter::contest(contest_name);
		let records = self.records(req.archived).list(&filter, page).await?;

		Ok(records
			.into_iter()
			.map(|record| RecordItem::from_record(record, req.archived))
			.collect())
	}
}

fn default_limit() -> i64 {
	DEFAULT_PAGE_LIMIT
}
