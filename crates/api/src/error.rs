#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Unknown retention policy: {0}")]
    UnknownRetention(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
