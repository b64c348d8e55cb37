use std::sync::Arc;

use lcr_service::RecordService;
use lcr_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<RecordService>,
}
impl AppState {
	pub async fn new(config: &lcr_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		Ok(Self::from_service(RecordService::new(&db)))
	}

	pub fn from_service(service: RecordService) -> Self {
		Self { service: Arc::new(service) }
	}
}
