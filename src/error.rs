use std::io;

use thiserror::Error;

/// Errors produced while loading or constructing a [`Graph`](crate::graph::Graph).
#[derive(Error, Debug)]
pub enum Error {
    #[error("error while reading graph file")]
    Io {
        #[from]
        source: io::Error,
    },
    #[error("malformed graph input at line {line}: {message}")]
    ParseGraph { line: usize, message: String },
}

impl Error {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Error::ParseGraph {
            line,
            message: message.into(),
        }
    }
}
