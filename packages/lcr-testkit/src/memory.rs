//! In-memory record stores for exercising the service and router without Postgres.

use std::{
	collections::HashSet,
	sync::atomic::{AtomicUsize, Ordering},
};

use lcr_storage::{
	BoxFuture, Error, Result,
	catalog::ContestCatalog,
	filter::RecordFilter,
	models::{ContestRecord, Page, UserKey},
	records::RecordStore,
};

pub struct MemoryCatalog {
	contests: HashSet<String>,
}
impl MemoryCatalog {
	pub fn new<I, S>(contests: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self { contests: contests.into_iter().map(Into::into).collect() }
	}
}
impl ContestCatalog for MemoryCatalog {
	fn contest_exists<'a>(&'a self, contest_name: &'a str) -> BoxFuture<'a, Result<bool>> {
		let exists = self.contests.contains(contest_name);

		Box::pin(async move { Ok(exists) })
	}
}

/// Counts every call so tests can assert that rejected requests never reach the store.
pub struct MemoryRecords {
	records: Vec<ContestRecord>,
	calls: AtomicUsize,
	failing_user: Option<String>,
}
impl MemoryRecords {
	pub fn new(records: Vec<ContestRecord>) -> Self {
		Self { records, calls: AtomicUsize::new(0), failing_user: None }
	}

	/// Point lookups for `username` fail with a pool timeout.
	pub fn failing_for(mut self, username: impl Into<String>) -> Self {
		self.failing_user = Some(username.into());

		self
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	fn select(&self, filter: &RecordFilter) -> Vec<ContestRecord> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		let mut records = self
			.records
			.iter()
			.filter(|record| filter.matches(record))
			.cloned()
			.collect::<Vec<_>>();

		records.sort_by(|a, b| {
			a.rank
				.cmp(&b.rank)
				.then_with(|| a.data_region.cmp(&b.data_region))
				.then_with(|| a.username.cmp(&b.username))
		});

		records
	}
}
impl RecordStore for MemoryRecords {
	fn count<'a>(&'a self, filter: &'a RecordFilter) -> BoxFuture<'a, Result<i64>> {
		let count = self.select(filter).len() as i64;

		Box::pin(async move { Ok(count) })
	}

	fn list<'a>(
		&'a self,
		filter: &'a RecordFilter,
		page: Page,
	) -> BoxFuture<'a, Result<Vec<ContestRecord>>> {
		let records: Vec<ContestRecord> = self
			.select(filter)
			.into_iter()
			.skip(page.skip as usize)
			.take(page.limit as usize)
			.collect();

		Box::pin(async move { Ok(records) })
	}

	fn list_by_user<'a>(
		&'a self,
		contest_name: &'a str,
		username: &'a str,
	) -> BoxFuture<'a, Result<Vec<ContestRecord>>> {
		let records = self.select(&RecordFilter::contest(contest_name).with_username(username));

		Box::pin(async move { Ok(records) })
	}

	fn point_lookup<'a>(
		&'a self,
		contest_name: &'a str,
		user: &'a UserKey,
	) -> BoxFuture<'a, Result<Option<ContestRecord>>> {
		let record = self.select(&RecordFilter::key(contest_name, user)).into_iter().next();
		let failing = self.failing_user.as_deref() == Some(user.username.as_str());

		Box::pin(async move {
			if failing {
				return Err(Error::Sqlx(sqlx::Error::PoolTimedOut));
			}

			Ok(record)
		})
	}
}
