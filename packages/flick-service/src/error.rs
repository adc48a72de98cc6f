pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
	#[error("Embedding for record {id} normalized to an empty vector.")]
	EmptyVector { id: i64 },
	#[error("Embedding for record {id} has {actual} dimensions, expected {expected}.")]
	DimensionMismatch { id: i64, expected: usize, actual: usize },
	#[error("Failed to fetch the next batch: {message}")]
	BatchFetch { message: String },
}
impl From<flick_providers::Error> for Error {
	fn from(err: flick_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}

impl From<flick_storage::Error> for Error {
	fn from(err: flick_storage::Error) -> Self {
		match err {
			flick_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			err => Self::Storage { message: err.to_string() },
		}
	}
}
