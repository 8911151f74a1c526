use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid controller config: {0}")]
    InvalidConfig(String),
}
