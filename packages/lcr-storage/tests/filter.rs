use sqlx::{Postgres, QueryBuilder};

use lcr_storage::{
	Error,
	filter::RecordFilter,
	models::{Page, UserKey},
};
use lcr_testkit::seed;

fn rendered(filter: &RecordFilter) -> String {
	let mut builder = QueryBuilder::<Postgres>::new("SELECT count(*) FROM contest_records_predict");

	filter.push_where(&mut builder);

	builder.sql().to_string()
}

#[test]
fn contest_filter_excludes_unscored_rows() {
	let filter = RecordFilter::contest("weekly-contest-400");

	assert_eq!(
		rendered(&filter),
		"SELECT count(*) FROM contest_records_predict WHERE contest_name = $1 AND score <> 0"
	);
}

#[test]
fn username_is_appended_before_the_score_guard() {
	let filter = RecordFilter::contest("weekly-contest-400").with_username("alice");

	assert_eq!(
		rendered(&filter),
		"SELECT count(*) FROM contest_records_predict WHERE contest_name = $1 AND username = $2 \
		 AND score <> 0"
	);
}

#[test]
fn key_filter_keeps_unscored_rows() {
	let user = UserKey { username: "alice".to_string(), data_region: "CN".to_string() };
	let filter = RecordFilter::key("weekly-contest-400", &user);

	assert!(!filter.exclude_unscored);
	assert_eq!(
		rendered(&filter),
		"SELECT count(*) FROM contest_records_predict WHERE contest_name = $1 AND username = $2 \
		 AND data_region = $3"
	);
	assert!(filter.matches(&seed::record("weekly-contest-400", "alice", "CN", 10, 0)));
}

#[test]
fn matches_applies_every_field() {
	let filter = RecordFilter::contest("weekly-contest-400").with_username("alice");

	assert!(filter.matches(&seed::record("weekly-contest-400", "alice", "US", 1, 12)));
	assert!(filter.matches(&seed::record("weekly-contest-400", "alice", "CN", 2, 3)));
	assert!(!filter.matches(&seed::record("weekly-contest-400", "alice", "US", 1, 0)));
	assert!(!filter.matches(&seed::record("weekly-contest-400", "bob", "US", 1, 12)));
	assert!(!filter.matches(&seed::record("biweekly-contest-130", "alice", "US", 1, 12)));
}

#[test]
fn page_rejects_out_of_range_values() {
	for (skip, limit, field) in [(-1, 25, "skip"), (0, 0, "limit"), (0, 101, "limit")] {
		let err = Page::new(skip, limit).expect_err("Expected page validation error.");

		assert!(
			matches!(&err, Error::InvalidPage { field: got, .. } if *got == field),
			"Unexpected error: {err}"
		);
	}

	assert_eq!(Page::new(50, 25).expect("Expected valid page."), Page { skip: 50, limit: 25 });
	assert_eq!(
		Page::new(0, Page::MAX_LIMIT).expect("Expected valid page.").limit,
		Page::MAX_LIMIT
	);
}
