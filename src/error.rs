use std::io;

/// A head-index relation that does not form a forest.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("token {index} has head {head}, but the document only has {len} tokens")]
    HeadOutOfBounds { index: usize, head: usize, len: usize },
    #[error("head chain starting at token {index} never reaches a root")]
    Cycle { index: usize },
}

/// Input that could not be turned into tokens.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("{path}: invalid JSON: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{path}:{line}: {message}")]
    Conll {
        path: String,
        line: usize,
        message: String,
    },
    #[error("word id pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("{path}: negative head index {head} on token {index}")]
    NegativeHead { path: String, index: usize, head: i64 },
}

/// Top-level error for a single document run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("write failed: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Process exit status for a run that stopped on this error.
    ///
    /// A closed output pipe ends the run quietly with status 0.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Io(e) if e.kind() == io::ErrorKind::BrokenPipe => 0,
            _ => 1,
        }
    }

    /// Whether the error should be reported on stderr.
    pub fn is_reported(&self) -> bool {
        self.exit_code() != 0
    }
}
