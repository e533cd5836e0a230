//! Error type for device control. Every failure carries its cause, and each
//! layer wraps it with the operation and address it was attempting.

use std::error::Error as StdError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("failed to reach {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read response body from {url}")]
    Read {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed {document} document from {address}")]
    Parse {
        document: &'static str,
        address: String,
        #[source]
        source: quick_xml::DeError,
    },

    #[error("expected <{expected}> document from {address}, found {found}")]
    UnexpectedDocument {
        expected: &'static str,
        found: String,
        address: String,
    },

    #[error("unsupported input port '{0}'")]
    UnsupportedInput(String),

    #[error("unknown remote key '{0}'")]
    UnknownKey(String),

    #[error("unknown key action '{0}'")]
    UnknownKeyAction(String),

    #[error("failed to {action} on {address}")]
    Operation {
        action: String,
        address: String,
        #[source]
        source: Box<ControlError>,
    },
}

impl ControlError {
    /// Short name of the innermost failure, stable for API consumers.
    pub fn kind(&self) -> &'static str {
        match self {
            ControlError::Client(_) => "client",
            ControlError::Transport { .. } => "transport",
            ControlError::Status { .. } => "status",
            ControlError::Read { .. } => "read",
            ControlError::Parse { .. } | ControlError::UnexpectedDocument { .. } => "parse",
            ControlError::UnsupportedInput(_) => "unsupported_input",
            ControlError::UnknownKey(_) | ControlError::UnknownKeyAction(_) => "unknown_key",
            ControlError::Operation { source, .. } => source.kind(),
        }
    }

    /// Messages of every error below this one, outermost first.
    pub fn causes(&self) -> Vec<String> {
        let mut causes = Vec::new();
        let mut current = self.source();
        while let Some(err) = current {
            causes.push(err.to_string());
            current = err.source();
        }
        causes
    }
}

pub trait ResultExt<T> {
    /// Wrap the error with the operation and address being attempted.
    fn context(self, action: impl Into<String>, address: &str) -> Result<T, ControlError>;
}

impl<T> ResultExt<T> for Result<T, ControlError> {
    fn context(self, action: impl Into<String>, address: &str) -> Result<T, ControlError> {
        self.map_err(|source| ControlError::Operation {
            action: action.into(),
            address: address.to_string(),
            source: Box::new(source),
        })
    }
}
