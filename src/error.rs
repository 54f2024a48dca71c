//! Errors raised while acting on matched segments.

use std::{io, process::ExitStatus};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no handler can open `{0}`")]
    CannotOpen(String),

    #[error("invalid URI `{uri}`: {source}")]
    InvalidUri {
        uri: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to launch `{program}` for `{uri}`: {source}")]
    Launch {
        program: String,
        uri: String,
        #[source]
        source: io::Error,
    },

    #[error("`{program}` exited with {status} for `{uri}`")]
    Exit {
        program: String,
        uri: String,
        status: ExitStatus,
    },

    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
}
