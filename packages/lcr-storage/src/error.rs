#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid page window at {field}: {message}")]
	InvalidPage { field: &'static str, message: String },
	#[error(transparent)]
	Sqlx(#[from] sqlx::Error),
}
