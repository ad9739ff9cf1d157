//! JSON method synthesizer.
//!
//! Given a domain type (the governor), a set of method-name templates and
//! two read-only services (type introspection and plural naming), a
//! synthesis pass computes the JSON methods to weave into the type:
//! `toJson`, `fromJson`, `toJsonArray` and `fromJsonArray`, each under its
//! configured name.
//!
//! # Architecture
//!
//! - [`template`] / [`ident`]: name templates and identifier validation
//! - [`probe`]: detection of methods the governor already declares
//! - [`body`]: operation shapes and method bodies as expression trees
//! - [`imports`]: the import table type names are written through
//! - [`render`]: document IR and printer for Java text
//! - [`synth`]: the pass itself
//! - [`itd`]: the pass output handed to the weaver
//! - [`diagnostics`]: ariadne reports for failed operations

pub mod body;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod ident;
pub mod imports;
pub mod itd;
pub mod method;
pub mod probe;
pub mod render;
pub mod synth;
pub mod template;

pub use body::{BodyComposer, JsonOperation};
pub use config::{ExclusionPolicy, JsonConfig, SerializerProfile};
pub use error::SynthError;
pub use ident::{Identifier, IdentifierError};
pub use itd::ItdTypeDetails;
pub use method::{MethodSpec, Modifiers, Param};
pub use synth::{
    OperationOutcome, Outcome, SynthesisPass, Synthesizer, SynthesizerBuilder, JSON_PROVIDER,
};
