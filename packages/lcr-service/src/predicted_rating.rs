use futures::future;

use lcr_storage::models::{ContestRecord, UserKey};

use crate::{Error, MAX_BATCH_USERS, RecordService, Result};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PredictedRatingRequest {
	pub contest_name: String,
	pub users: Vec<UserKey>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PredictedRating {
	pub old_rating: Option<f64>,
	pub new_rating: Option<f64>,
	pub delta_rating: Option<f64>,
}
impl From<ContestRecord> for PredictedRating {
	fn from(record: ContestRecord) -> Self {
		Self {
			old_rating: record.old_rating,
			new_rating: record.new_rating,
			delta_rating: record.delta_rating,
		}
	}
}

impl RecordService {
	/// One entry per requested user, in request order. Users without a predicted record map to
	/// `None`; the first failed lookup fails the whole batch.
	pub async fn predicted_rating(
		&self,
		req: PredictedRatingRequest,
	) -> Result<Vec<Option<PredictedRating>>> {
		if req.users.is_empty() || req.users.len() > MAX_BATCH_USERS {
			return Err(Error::invalid(
				"users",
				format!("users must contain between 1 and {MAX_BATCH_USERS} entries."),
			));
		}

		let contest_name = self.ensure_contest(&req.contest_name).await?;

		tracing::debug!(contest_name, users = req.users.len(), "Looking up predicted ratings.");

		let lookups = req.users.iter().map(|user| self.predicted.point_lookup(contest_name, user));
		let records = future::try_join_all(lookups).await?;

		Ok(records.into_iter().map(|record| record.map(PredictedRating::from)).collect())
	}
}
