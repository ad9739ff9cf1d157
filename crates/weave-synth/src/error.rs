//! Synthesis errors.
//!
//! Disabled and overridden operations are outcomes, not errors. What is
//! left is either fatal for the whole pass (a collaborator was never wired
//! in) or local to one operation (its name cannot be used).

use std::ops::Range;

use weave_common::{MetadataId, TypeRef};

use crate::body::JsonOperation;
use crate::ident::{Identifier, IdentifierError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SynthError {
    /// A required collaborator was not supplied to the builder. Fatal.
    #[error("synthesizer is missing its {0}")]
    MissingCollaborator(&'static str),

    /// The `declared_by` override names another provider or another type. Fatal.
    #[error("`{declared_by}` cannot identify the JSON methods of `{governor}`")]
    ForeignIdentifier {
        declared_by: MetadataId,
        governor: TypeRef,
    },

    /// The template resolved to something that is not a legal identifier.
    #[error("{operation} method name `{resolved}` is not a legal identifier: {reason}")]
    InvalidIdentifier {
        operation: JsonOperation,
        template: String,
        resolved: String,
        reason: IdentifierError,
        /// Byte range in `template` responsible for the failure.
        span: Range<usize>,
    },

    /// Two operations in one pass resolved to the same name and signature.
    #[error("{operation} method `{name}` has the same signature as the {first} method")]
    SignatureClash {
        operation: JsonOperation,
        template: String,
        name: Identifier,
        first: JsonOperation,
    },
}

impl SynthError {
    /// The operation this error is local to, `None` for fatal errors.
    pub fn operation(&self) -> Option<JsonOperation> {
        match self {
            SynthError::MissingCollaborator(_) | SynthError::ForeignIdentifier { .. } => None,
            SynthError::InvalidIdentifier { operation, .. }
            | SynthError::SignatureClash { operation, .. } => Some(*operation),
        }
    }

    /// The template text the error refers to, if any.
    pub fn template(&self) -> Option<&str> {
        match self {
            SynthError::MissingCollaborator(_) | SynthError::ForeignIdentifier { .. } => None,
            SynthError::InvalidIdentifier { template, .. }
            | SynthError::SignatureClash { template, .. } => Some(template),
        }
    }
}
