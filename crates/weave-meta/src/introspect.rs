//! Type introspection contract.
//!
//! The synthesizer never reads source files or class files itself. It asks
//! an introspection service two questions: what is the canonical simple name
//! of a type, and does the type already declare a method with a given name
//! and exact parameter-type signature.

use serde::Serialize;
use weave_common::TypeRef;

/// A method that already exists on a type.
///
/// Handles are reported as-is by the introspection service and are never
/// modified by the synthesizer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MethodHandle {
    /// The type that declares the method.
    pub declared_by: TypeRef,
    pub name: String,
    /// Parameter types in declaration order.
    pub param_types: Vec<TypeRef>,
    pub return_type: TypeRef,
    pub is_static: bool,
}

impl MethodHandle {
    pub fn new(
        declared_by: TypeRef,
        name: impl Into<String>,
        param_types: Vec<TypeRef>,
        return_type: TypeRef,
    ) -> Self {
        MethodHandle {
            declared_by,
            name: name.into(),
            param_types,
            return_type,
            is_static: false,
        }
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    /// Exact signature match: same name, same arity, same parameter types.
    ///
    /// Types are compared structurally including type arguments; there is no
    /// widening to supertypes and no erasure.
    pub fn matches(&self, name: &str, param_types: &[TypeRef]) -> bool {
        self.name == name && self.param_types == param_types
    }
}

/// Read-only view of the declared members of types.
pub trait TypeIntrospection: Send + Sync {
    /// The canonical simple (unqualified) name used in generated identifiers.
    fn simple_name(&self, ty: &TypeRef) -> String {
        ty.simple_name().to_string()
    }

    /// Look up a method declared directly on `ty` by name and exact
    /// parameter-type signature.
    fn declared_method(
        &self,
        ty: &TypeRef,
        name: &str,
        param_types: &[TypeRef],
    ) -> Option<MethodHandle>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_requires_exact_signature() {
        let pet = TypeRef::new("com.example.Pet");
        let handle = MethodHandle::new(
            pet.clone(),
            "toJsonArray",
            vec![TypeRef::collection(pet.clone())],
            TypeRef::string(),
        );

        assert!(handle.matches("toJsonArray", &[TypeRef::collection(pet.clone())]));
        assert!(!handle.matches("toJsonArray", &[]));
        assert!(!handle.matches(
            "toJsonArray",
            &[TypeRef::collection(TypeRef::new("com.example.Owner"))]
        ));
        assert!(!handle.matches("toJsonArray", &[TypeRef::list(pet)]));
    }
}
