use std::result;
use thiserror::Error;

/// Result type for building and sending an event
pub type Result<T, E = EmitError> = result::Result<T, E>;

/// Why an event could not be sent
#[derive(Error, Debug)]
pub enum EmitError {
    /// Invalid target or event, detected before any network attempt
    #[error("configuration error: {0}")]
    Config(String),
    /// The request was attempted but no response came back
    #[error("transport error")]
    Transport(#[source] ureq::Error),
}

impl EmitError {
    pub fn config(msg: impl Into<String>) -> Self {
        EmitError::Config(msg.into())
    }

    pub fn is_config(&self) -> bool {
        matches!(self, EmitError::Config(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, EmitError::Transport(_))
    }
}

impl From<ureq::Error> for EmitError {
    fn from(err: ureq::Error) -> Self {
        match err {
            // Malformed request parts are caught before the socket is opened
            ureq::Error::BadUri(msg) => EmitError::Config(format!("bad uri: {}", msg)),
            ureq::Error::Http(e) => EmitError::Config(format!("invalid request: {}", e)),
            other => EmitError::Transport(other),
        }
    }
}
