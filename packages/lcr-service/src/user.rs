use crate::{Error, RecordItem, RecordService, Result};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UserRecordsRequest {
	pub contest_name: String,
	pub username: String,
	#[serde(default, deserialize_with = "crate::flag::deserialize")]
	pub archived: bool,
}

impl RecordService {
	/// Every scored record of `username` in the contest, across data regions, ordered by rank.
	pub async fn list_by_user(&self, req: UserRecordsRequest) -> Result<Vec<RecordItem>> {
		if req.username.is_empty() {
			return Err(Error::invalid("username", "username must be non-empty."));
		}

		let contest_name = self.ensure_contest(&req.contest_name).await?;
		let records = self.records(req.archived).list_by_user(contest_name, &req.username).await?;

		Ok(records
			.into_iter()
			.map(|record| RecordItem::from_record(record, req.archived))
			.collect())
	}
}
