pub mod count;
pub mod list;
pub mod predicted_rating;
pub mod real_time_rank;
pub mod user;

mod contest;
mod error;
mod flag;

pub use count::CountRequest;
pub use error::{Error, Result};
pub use list::{ListRequest, RecordItem};
pub use predicted_rating::{PredictedRating, PredictedRatingRequest};
pub use real_time_rank::{RealTimeRank, RealTimeRankRequest};
pub use user::UserRecordsRequest;

use std::sync::Arc;

use lcr_storage::{
	catalog::{ContestCatalog, PgContestCatalog},
	db::Db,
	records::{ArchivedRecords, PredictedRecords, RecordStore},
};

pub const DEFAULT_PAGE_LIMIT: i64 = 25;
pub const MAX_BATCH_USERS: usize = 26;

/// Read-only queries over predicted and archived contest records.
pub struct RecordService {
	pub catalog: Arc<dyn ContestCatalog>,
	pub predicted: Arc<dyn RecordStore>,
	pub archived: Arc<dyn RecordStore>,
}
impl RecordService {
	pub fn new(db: &Db) -> Self {
		Self::with_stores(
			Arc::new(PgContestCatalog::new(db)),
			Arc::new(PredictedRecords::new(db)),
			Arc::new(ArchivedRecords::new(db)),
		)
	}

	pub fn with_stores(
		catalog: Arc<dyn ContestCatalog>,
		predicted: Arc<dyn RecordStore>,
		archived: Arc<dyn RecordStore>,
	) -> Self {
		Self { catalog, predicted, archived }
	}

	pub fn records(&self, archived: bool) -> &dyn RecordStore {
		if archived { self.archived.as_ref() } else { self.predicted.as_ref() }
	}
}
