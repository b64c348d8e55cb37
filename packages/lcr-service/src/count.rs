use lcr_storage::filter::RecordFilter;

use crate::{RecordService, Result};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CountRequest {
	pub contest_name: String,
	#[serde(default, deserialize_with = "crate::flag::deserialize")]
	pub archived: bool,
}

impl RecordService {
	pub async fn count(&self, req: CountRequest) -> Result<i64> {
		let contest_name = self.ensure_contest(&req.contest_name).await?;
		let filter = RecordFilter::contest(contest_name);
		let total = self.records(req.archived).count(&filter).await?;

		Ok(total)
	}
}
