//! In-memory member registry.
//!
//! `MemberRegistry` stores the declared members of every type it knows about
//! and answers `TypeIntrospection` queries from that table. It is what the
//! CLI builds from a manifest and what tests use as a deterministic stand-in
//! for a real classpath scanner.

use rustc_hash::FxHashMap;
use weave_common::TypeRef;

use crate::introspect::{MethodHandle, TypeIntrospection};

/// The declared members of one type.
#[derive(Clone, Debug)]
pub struct TypeDetails {
    pub ty: TypeRef,
    /// Methods in declaration order.
    pub methods: Vec<MethodHandle>,
}

impl TypeDetails {
    pub fn new(ty: TypeRef) -> Self {
        TypeDetails {
            ty,
            methods: Vec::new(),
        }
    }

    pub fn find_method(&self, name: &str, param_types: &[TypeRef]) -> Option<&MethodHandle> {
        self.methods.iter().find(|m| m.matches(name, param_types))
    }
}

/// Declared members keyed by qualified type name.
#[derive(Default, Debug)]
pub struct MemberRegistry {
    types: FxHashMap<String, TypeDetails>,
}

impl MemberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type with no declared members. Registering an already
    /// known type keeps its existing members.
    pub fn register_type(&mut self, ty: TypeRef) -> &mut TypeDetails {
        self.types
            .entry(ty.qualified_name().to_string())
            .or_insert_with(|| TypeDetails::new(ty.erasure()))
    }

    /// Declare a method on `method.declared_by`, registering the type if
    /// needed.
    ///
    /// Returns `false` (and leaves the registry unchanged) if a method with
    /// the same name and signature is already declared.
    pub fn declare_method(&mut self, method: MethodHandle) -> bool {
        let details = self.register_type(method.declared_by.clone());
        if details
            .find_method(&method.name, &method.param_types)
            .is_some()
        {
            tracing::debug!(
                ty = %method.declared_by,
                method = %method.name,
                "ignoring duplicate method declaration"
            );
            return false;
        }
        details.methods.push(method);
        true
    }

    pub fn get(&self, qualified_name: &str) -> Option<&TypeDetails> {
        self.types.get(qualified_name)
    }

    pub fn contains(&self, ty: &TypeRef) -> bool {
        self.types.contains_key(ty.qualified_name())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeIntrospection for MemberRegistry {
    fn declared_method(
        &self,
        ty: &TypeRef,
        name: &str,
        param_types: &[TypeRef],
    ) -> Option<MethodHandle> {
        self.types
            .get(ty.qualified_name())?
            .find_method(name, param_types)
            .cloned()
    }
}
