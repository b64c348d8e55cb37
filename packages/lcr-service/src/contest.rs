use crate::{Error, RecordService, Result};

impl RecordService {
	/// Rejects blank and unknown contest names. Runs before any record table is read.
	pub(crate) async fn ensure_contest<'a>(&self, contest_name: &'a str) -> Result<&'a str> {
		let contest_name = contest_name.trim();

		if contest_name.is_empty() {
			return Err(Error::invalid("contest_name", "contest_name must be non-empty."));
		}
		if !self.catalog.contest_exists(contest_name).await? {
			return Err(Error::UnknownContest { contest_name: contest_name.to_string() });
		}

		Ok(contest_name)
	}
}
