//! Shared value types for the weave synthesizer.
//!
//! - [`type_ref`]: qualified type references with type arguments
//! - [`metadata_id`]: identifiers naming the metadata item that produced a member

pub mod metadata_id;
pub mod type_ref;

pub use metadata_id::{MetadataId, MetadataIdError, SourcePath};
pub use type_ref::{TypeRef, TypeRefError};
