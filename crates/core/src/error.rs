use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pdf parse error: {0}")]
    PdfParse(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid response from {backend}: {details}")]
    BackendResponse { backend: String, details: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("regex error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("malformed feed: {0}")]
    Feed(String),

    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

impl From<roxmltree::Error> for SearchError {
    fn from(error: roxmltree::Error) -> Self {
        SearchError::Feed(error.to_string())
    }
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid response from {backend}: {details}")]
    BackendResponse { backend: String, details: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialize error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("prompt was blocked by the model: {0}")]
    Blocked(String),

    #[error("model returned no text")]
    EmptyResponse,
}

pub type Result<T, E = IngestError> = std::result::Result<T, E>;
