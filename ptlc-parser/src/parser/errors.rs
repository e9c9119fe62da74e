use ptlc_core::{ConstructionError, InvalidTermError, UnknownOperatorError};
use thiserror::Error;

use super::common::MAX_DEPTH;

/// Input text that does not conform to the predicate grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("Invalid predicate at offset {offset}: \"{fragment}\"")]
    Mismatch { offset: usize, fragment: String },

    #[error("Could not parse remaining input \"{fragment}\" at offset {offset}")]
    Incomplete { offset: usize, fragment: String },

    #[error("Predicate nesting exceeds {} levels at offset {offset}", MAX_DEPTH)]
    TooDeep { offset: usize, fragment: String },
}

impl GrammarError {
    pub(crate) fn mismatch(text: &str, rest: &str) -> Self {
        Self::Mismatch {
            offset: text.len() - rest.len(),
            fragment: rest.to_string(),
        }
    }

    pub(crate) fn incomplete(text: &str, rest: &str) -> Self {
        Self::Incomplete {
            offset: text.len() - rest.len(),
            fragment: rest.to_string(),
        }
    }

    pub(crate) fn too_deep(text: &str, rest: &str) -> Self {
        Self::TooDeep {
            offset: text.len() - rest.len(),
            fragment: rest.to_string(),
        }
    }

    /// Byte offset into the source text where parsing failed.
    pub fn offset(&self) -> usize {
        match self {
            Self::Mismatch { offset, .. } | Self::Incomplete { offset, .. } | Self::TooDeep { offset, .. } => {
                *offset
            }
        }
    }

    /// Unparsed source text starting at [`GrammarError::offset`].
    pub fn fragment(&self) -> &str {
        match self {
            Self::Mismatch { fragment, .. }
            | Self::Incomplete { fragment, .. }
            | Self::TooDeep { fragment, .. } => fragment,
        }
    }
}

/// Failure to turn predicate text into a [`Predicate`](ptlc_core::Predicate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

impl From<InvalidTermError> for CompileError {
    fn from(err: InvalidTermError) -> Self {
        Self::Construction(err.into())
    }
}

impl From<UnknownOperatorError> for CompileError {
    fn from(err: UnknownOperatorError) -> Self {
        Self::Construction(err.into())
    }
}
