use serde_json::Value;

use lcr_storage::models::UserKey;

use crate::{RecordService, Result};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RealTimeRankRequest {
	pub contest_name: String,
	pub user: UserKey,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RealTimeRank {
	pub real_time_rank: Option<Vec<Value>>,
}

impl RecordService {
	/// `None` when the user has no archived record in the contest.
	pub async fn real_time_rank(&self, req: RealTimeRankRequest) -> Result<Option<RealTimeRank>> {
		let contest_name = self.ensure_contest(&req.contest_name).await?;
		let record = self.archived.point_lookup(contest_name, &req.user).await?;

		Ok(record.map(|record| RealTimeRank {
			real_time_rank: record.real_time_rank.map(|ranks| ranks.0),
		}))
	}
}
