pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request at {field}: {message}")]
	InvalidRequest { field: String, message: String },
	#[error("Unknown contest: {contest_name}.")]
	UnknownContest { contest_name: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl Error {
	pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
		Self::InvalidRequest { field: field.to_string(), message: message.into() }
	}
}

impl From<lcr_storage::Error> for Error {
	fn from(err: lcr_storage::Error) -> Self {
		match err {
			lcr_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			lcr_storage::Error::InvalidPage { field, message } => Self::invalid(field, message),
		}
	}
}
