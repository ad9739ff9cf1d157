//! Override detection.
//!
//! A governor may already declare any of the generated methods by hand. If
//! it does, the hand-written method is used unmodified and nothing is
//! generated for that operation.

use weave_common::TypeRef;
use weave_meta::{MethodHandle, TypeIntrospection};

use crate::ident::Identifier;
use crate::method::MethodSpec;

/// Ask `introspection` for a method on `governor` with exactly this name and
/// parameter-type signature.
pub fn find_existing(
    introspection: &dyn TypeIntrospection,
    governor: &TypeRef,
    name: &Identifier,
    param_types: &[TypeRef],
) -> Option<MethodHandle> {
    let found = introspection.declared_method(governor, name.as_str(), param_types);
    if found.is_some() {
        tracing::debug!(
            governor = %governor,
            method = %name,
            "governor declares the method itself"
        );
    }
    found
}

/// The implementation chosen for one operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Implementation {
    /// The governor's own declaration.
    Existing(MethodHandle),
    Synthesized(MethodSpec),
}

/// An existing declaration always wins; `synthesize` only runs when there
/// is none.
pub fn choose_implementation(
    existing: Option<MethodHandle>,
    synthesize: impl FnOnce() -> MethodSpec,
) -> Implementation {
    match existing {
        Some(handle) => Implementation::Existing(handle),
        None => Implementation::Synthesized(synthesize()),
    }
}
