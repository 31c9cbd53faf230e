use std::error::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("channel \"{0}\" does not implement this notification")]
    NotImplemented(&'static str),
    #[error("missing extra_context key: {0}")]
    MissingContextKey(&'static str),
    #[error("invalid channel config: {0}")]
    InvalidConfig(String),
    #[error("delivery failed: {0}")]
    Delivery(Box<dyn Error + Send + Sync>),
}
