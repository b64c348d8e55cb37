use sqlx::{Postgres, QueryBuilder};

use crate::models::{ContestRecord, UserKey};

/// Field-equality conjunction over a record table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFilter {
	pub contest_name: String,
	pub username: Option<String>,
	pub data_region: Option<String>,
	/// Drop rows with `score = 0`.
	pub exclude_unscored: bool,
}
impl RecordFilter {
	pub fn contest(contest_name: impl Into<String>) -> Self {
		Self {
			contest_name: contest_name.into(),
			username: None,
			data_region: None,
			exclude_unscored: true,
		}
	}

	/// Exact `(contest_name, data_region, username)` match. Unscored rows are kept.
	pub fn key(contest_name: impl Into<String>, user: &UserKey) -> Self {
		Self {
			contest_name: contest_name.into(),
			username: Some(user.username.clone()),
			data_region: Some(user.data_region.clone()),
			exclude_unscored: false,
		}
	}

	pub fn with_username(mut self, username: impl Into<String>) -> Self {
		self.username = Some(username.into());

		self
	}

	pub fn matches(&self, record: &ContestRecord) -> bool {
		if record.contest_name != self.contest_name {
			return false;
		}
		if let Some(username) = self.username.as_deref()
			&& record.username != username
		{
			return false;
		}
		if let Some(data_region) = self.data_region.as_deref()
			&& record.data_region != data_region
		{
			return false;
		}

		!(self.exclude_unscored && record.score == 0)
	}

	pub fn push_where<'args>(&'args self, builder: &mut QueryBuilder<'args, Postgres>) {
		builder.push(" WHERE contest_name = ");
		builder.push_bind(self.contest_name.as_str());

		if let Some(username) = self.username.as_deref() {
			builder.push(" AND username = ");
			builder.push_bind(username);
		}
		if let Some(data_region) = self.data_region.as_deref() {
			builder.push(" AND data_region = ");
			builder.push_bind(data_region);
		}
		if self.exclude_unscored {
			builder.push(" AND score <> 0");
		}
	}
}
