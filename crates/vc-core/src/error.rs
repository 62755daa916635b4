pub type VcResult<T> = Result<T, VcError>;

/// Errors from the few fallible entry points: loading configuration and
/// decoding metadata patches handed over as text.
#[derive(thiserror::Error, Debug)]
pub enum VcError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("metadata error: {0}")]
    Metadata(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl VcError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::Metadata(msg.into())
    }
}
