use thiserror::Error;

use listq_model::FetchError;

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("invalid header {name:?}: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("invalid remote config: {0}")]
    InvalidConfig(String),
}

impl From<RemoteError> for FetchError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::Http(e) if e.is_decode() => FetchError::Decode(e.to_string()),
            RemoteError::Http(e) => match e.status() {
                Some(status) => FetchError::Status {
                    code: status.as_u16(),
                },
                None => FetchError::Transport(e.to_string()),
            },
            other => FetchError::Transport(other.to_string()),
        }
    }
}
