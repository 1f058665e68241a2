use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CurError>;

// Every variant is fatal unless the caller opts into skipping malformed documents.
#[derive(Debug, Error)]
pub enum CurError {
    #[error("could not load lexicon {}: {reason}", path.display())]
    LexiconLoad { path: PathBuf, reason: String },

    #[error("could not parse transcript {}: {reason}", path.display())]
    DocumentParse { path: PathBuf, reason: String },

    #[error("could not list corpus directory {}: {reason}", path.display())]
    Discovery { path: PathBuf, reason: String },

    #[error("session {session} has no CU or OR tokens to compute a rate from")]
    ArithmeticFault { session: String },
}

impl CurError {
    pub(crate) fn lexicon(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        CurError::LexiconLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn discovery(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        CurError::Discovery {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn document(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        CurError::DocumentParse {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
