#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid url {0}")]
    InvalidUrl(String),
    #[error("not signed in to the server")]
    LoginRequired,
    #[error("{0}")]
    Rejected(String),
    #[error("unexpected response: {0}")]
    Unexpected(String),
}
