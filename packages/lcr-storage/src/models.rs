use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use time::OffsetDateTime;

use crate::{Error, Result};

/// One user's row in a contest, shared by the predicted and archived tables.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ContestRecord {
	pub contest_name: String,
	pub contest_id: Option<i32>,
	pub username: String,
	pub user_slug: Option<String>,
	pub data_region: String,
	pub country_code: Option<String>,
	pub country_name: Option<String>,
	pub rank: i32,
	/// Zero while the ingester has not scored the row yet.
	pub score: i32,
	pub finish_time: Option<OffsetDateTime>,
	pub attended_contests_count: Option<i32>,
	pub old_rating: Option<f64>,
	pub new_rating: Option<f64>,
	pub delta_rating: Option<f64>,
	/// Rank after each submission, as written by the ingester. Elements are untyped so gaps
	/// (`null`) and non-integer entries still decode. Always `None` for predicted records.
	pub real_time_rank: Option<Json<Vec<Value>>>,
	pub updated_at: Option<OffsetDateTime>,
}

/// Usernames are unique only within a data region.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserKey {
	pub username: String,
	pub data_region: String,
}

/// Offset window over a rank-ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
	pub skip: i64,
	pub limit: i64,
}
impl Page {
	pub const MAX_LIMIT: i64 = 100;

	pub fn new(skip: i64, limit: i64) -> Result<Self> {
		if skip < 0 {
			return Err(Error::InvalidPage {
				field: "skip",
				message: "skip must be zero or greater.".to_string(),
			});
		}
		if !(1..=Self::MAX_LIMIT).contains(&limit) {
			return Err(Error::InvalidPage {
				field: "limit",
				message: format!("limit must be between 1 and {}.", Self::MAX_LIMIT),
			});
		}

		Ok(Self { skip, limit })
	}
}
