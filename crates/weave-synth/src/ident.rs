//! Java identifiers.
//!
//! Method names produced from templates must be legal Java identifiers
//! before they are handed to the weaver. [`Identifier`] can only be built
//! through validation, so holding one is proof the name is legal.

use std::fmt;

use serde::Serialize;

/// Reserved words that can never be used as identifiers.
const RESERVED: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface",
    "long", "native", "new", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "try", "void", "volatile", "while", "true", "false", "null", "_",
];

/// A validated Java identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(name: impl Into<String>) -> Result<Identifier, IdentifierError> {
        let name = name.into();
        validate(&name)?;
        Ok(Identifier(name))
    }

    /// Wrap a name known to be legal at compile time (fixed parameter names).
    pub(crate) fn trusted(name: &str) -> Identifier {
        debug_assert!(validate(name).is_ok(), "`{name}` is not a legal identifier");
        Identifier(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Identifier {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Why a name is not a legal identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("identifier is empty")]
    Empty,
    #[error("identifier cannot start with {0:?}")]
    InvalidStart(char),
    #[error("identifier cannot contain {found:?} (at offset {offset})")]
    InvalidChar { found: char, offset: usize },
    #[error("`{0}` is a reserved word")]
    Reserved(String),
}

impl IdentifierError {
    /// Byte offset of the offending character in the checked name, if the
    /// error is about a single character.
    pub fn offset(&self) -> Option<usize> {
        match self {
            IdentifierError::InvalidStart(_) => Some(0),
            IdentifierError::InvalidChar { offset, .. } => Some(*offset),
            IdentifierError::Empty | IdentifierError::Reserved(_) => None,
        }
    }
}

// Java letters and digits, as Unicode XID_Start / XID_Continue.
fn is_start(c: char) -> bool {
    c == '_' || c == '$' || unicode_ident::is_xid_start(c)
}

fn is_part(c: char) -> bool {
    c == '$' || unicode_ident::is_xid_continue(c)
}

fn validate(name: &str) -> Result<(), IdentifierError> {
    let mut chars = name.char_indices();
    match chars.next() {
        None => return Err(IdentifierError::Empty),
        Some((_, c)) if !is_start(c) => return Err(IdentifierError::InvalidStart(c)),
        Some(_) => {}
    }
    if let Some((offset, found)) = chars.find(|&(_, c)| !is_part(c)) {
        return Err(IdentifierError::InvalidChar { found, offset });
    }
    if RESERVED.contains(&name) {
        return Err(IdentifierError::Reserved(name.to_string()));
    }
    Ok(())
}
