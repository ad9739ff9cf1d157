//! Type references.
//!
//! A `TypeRef` names a type by its fully-qualified name plus an ordered list
//! of type arguments (`java.util.Collection<com.example.Pet>`). It is the
//! currency every other crate uses when talking about governors, parameter
//! types and return types. Identity is structural: two references are equal
//! when their qualified names and all type arguments are equal.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

/// A reference to a (possibly parameterized) type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeRef {
    name: String,
    args: Vec<TypeRef>,
}

impl TypeRef {
    /// Create a non-generic type reference from a qualified name.
    pub fn new(qualified_name: impl Into<String>) -> Self {
        TypeRef {
            name: qualified_name.into(),
            args: Vec::new(),
        }
    }

    /// Create a parameterized type reference, e.g. `List<Pet>`.
    pub fn generic(qualified_name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        TypeRef {
            name: qualified_name.into(),
            args,
        }
    }

    /// `java.lang.String`.
    pub fn string() -> Self {
        TypeRef::new("java.lang.String")
    }

    /// `java.util.Collection<elem>`.
    pub fn collection(elem: TypeRef) -> Self {
        TypeRef::generic("java.util.Collection", vec![elem])
    }

    /// `java.util.List<elem>`.
    pub fn list(elem: TypeRef) -> Self {
        TypeRef::generic("java.util.List", vec![elem])
    }

    /// The raw `java.util.ArrayList` type.
    pub fn array_list() -> Self {
        TypeRef::new("java.util.ArrayList")
    }

    /// The fully-qualified name, without type arguments.
    pub fn qualified_name(&self) -> &str {
        &self.name
    }

    /// The unqualified name: everything after the last `.`.
    pub fn simple_name(&self) -> &str {
        match self.name.rfind('.') {
            Some(idx) => &self.name[idx + 1..],
            None => &self.name,
        }
    }

    /// The package prefix, or `None` for types in the default package.
    pub fn package(&self) -> Option<&str> {
        self.name.rfind('.').map(|idx| &self.name[..idx])
    }

    /// Type arguments, in declaration order.
    pub fn args(&self) -> &[TypeRef] {
        &self.args
    }

    pub fn is_generic(&self) -> bool {
        !self.args.is_empty()
    }

    /// The same type with its type arguments dropped.
    pub fn erasure(&self) -> TypeRef {
        TypeRef::new(self.name.clone())
    }

    /// Whether this type lives in `java.lang` and needs no import.
    pub fn is_java_lang(&self) -> bool {
        self.package() == Some("java.lang")
    }

    /// Parse a type reference from its textual form.
    pub fn parse(input: &str) -> Result<TypeRef, TypeRefError> {
        if input.trim().is_empty() {
            return Err(TypeRefError::Empty);
        }
        let mut parser = Parser { input, pos: 0 };
        let ty = parser.parse_type()?;
        parser.skip_ws();
        match parser.peek() {
            None => Ok(ty),
            Some(found) => Err(TypeRefError::UnexpectedChar {
                input: input.to_string(),
                offset: parser.pos,
                found,
            }),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.args.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", arg)?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

impl FromStr for TypeRef {
    type Err = TypeRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeRef::parse(s)
    }
}

impl Serialize for TypeRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TypeRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        TypeRef::parse(&raw).map_err(de::Error::custom)
    }
}

/// Errors produced while parsing a textual type reference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeRefError {
    #[error("empty type name")]
    Empty,
    #[error("unexpected character {found:?} at offset {offset} in `{input}`")]
    UnexpectedChar {
        input: String,
        offset: usize,
        found: char,
    },
    #[error("empty name segment in `{input}`")]
    EmptySegment { input: String },
    #[error("unexpected end of input in `{input}`")]
    UnexpectedEnd { input: String },
}

/// Recursive-descent parser over `name ('<' type (',' type)* '>')?`.
struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn parse_type(&mut self) -> Result<TypeRef, TypeRefError> {
        self.skip_ws();
        let start = self.pos;
        while self.peek().is_some_and(|c| is_name_char(c) || c == '.') {
            self.bump();
        }
        let name = &self.input[start..self.pos];
        if name.is_empty() {
            return Err(match self.peek() {
                Some(found) => TypeRefError::UnexpectedChar {
                    input: self.input.to_string(),
                    offset: self.pos,
                    found,
                },
                None => TypeRefError::UnexpectedEnd {
                    input: self.input.to_string(),
                },
            });
        }
        if name.split('.').any(str::is_empty) {
            return Err(TypeRefError::EmptySegment {
                input: self.input.to_string(),
            });
        }

        self.skip_ws();
        let mut args = Vec::new();
        if self.peek() == Some('<') {
            self.bump();
            loop {
                args.push(self.parse_type()?);
                self.skip_ws();
                match self.peek() {
                    Some(',') => self.bump(),
                    Some('>') => {
                        self.bump();
                        break;
                    }
                    Some(found) => {
                        return Err(TypeRefError::UnexpectedChar {
                            input: self.input.to_string(),
                            offset: self.pos,
                            found,
                        })
                    }
                    None => {
                        return Err(TypeRefError::UnexpectedEnd {
                            input: self.input.to_string(),
                        })
                    }
                }
            }
        }

        Ok(TypeRef::generic(name, args))
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
