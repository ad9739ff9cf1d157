//! Synthesized method records.

use std::fmt;

use bitflags::bitflags;
use serde::Serialize;
use weave_common::{MetadataId, TypeRef};

use crate::body::Body;
use crate::ident::Identifier;

bitflags! {
    /// Declaration modifiers of a generated method.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
    pub struct Modifiers: u8 {
        const PUBLIC = 1;
        const STATIC = 1 << 1;
    }
}

impl Modifiers {
    pub fn is_static(self) -> bool {
        self.contains(Modifiers::STATIC)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut words = Vec::new();
        if self.contains(Modifiers::PUBLIC) {
            words.push("public");
        }
        if self.contains(Modifiers::STATIC) {
            words.push("static");
        }
        f.write_str(&words.join(" "))
    }
}

/// A formal parameter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Param {
    pub ty: TypeRef,
    pub name: Identifier,
}

impl Param {
    pub fn new(ty: TypeRef, name: Identifier) -> Self {
        Param { ty, name }
    }
}

/// One fully described generated method.
///
/// Built once by the synthesizer and never modified afterwards. `body` is
/// the single-line rendering of the body, with type names written as the
/// pass's import table dictates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MethodSpec {
    declared_by: MetadataId,
    name: Identifier,
    modifiers: Modifiers,
    params: Vec<Param>,
    return_type: TypeRef,
    body: String,
    #[serde(skip)]
    body_tree: Body,
}

impl MethodSpec {
    pub(crate) fn new(
        declared_by: MetadataId,
        name: Identifier,
        modifiers: Modifiers,
        params: Vec<Param>,
        return_type: TypeRef,
        body_tree: Body,
        body: String,
    ) -> Self {
        MethodSpec {
            declared_by,
            name,
            modifiers,
            params,
            return_type,
            body,
            body_tree,
        }
    }

    pub fn declared_by(&self) -> &MetadataId {
        &self.declared_by
    }

    pub fn name(&self) -> &Identifier {
        &self.name
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Parameter types in order.
    pub fn signature(&self) -> Vec<TypeRef> {
        self.params.iter().map(|p| p.ty.clone()).collect()
    }

    pub fn return_type(&self) -> &TypeRef {
        &self.return_type
    }

    /// Body text, one statement per line.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn body_tree(&self) -> &Body {
        &self.body_tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_display_in_declaration_order() {
        assert_eq!(Modifiers::PUBLIC.to_string(), "public");
        assert_eq!((Modifiers::STATIC | Modifiers::PUBLIC).to_string(), "public static");
        assert_eq!(Modifiers::empty().to_string(), "");
    }

    #[test]
    fn is_static() {
        assert!(!Modifiers::PUBLIC.is_static());
        assert!((Modifiers::PUBLIC | Modifiers::STATIC).is_static());
    }
}
