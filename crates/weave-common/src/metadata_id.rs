//! Metadata identifiers.
//!
//! Every synthesized member records which metadata item produced it. The
//! identifier names the producing provider, the source path the governor
//! lives under, and the governor type itself:
//!
//! ```text
//! MID:weave.json#SRC_MAIN_JAVA?com.example.Pet
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::type_ref::{TypeRef, TypeRefError};

const PREFIX: &str = "MID:";

/// The logical source root a governor type belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourcePath {
    #[default]
    SrcMainJava,
    SrcTestJava,
    SrcMainResources,
    SrcTestResources,
    SrcMainWebapp,
    Root,
}

impl SourcePath {
    pub const ALL: [SourcePath; 6] = [
        SourcePath::SrcMainJava,
        SourcePath::SrcTestJava,
        SourcePath::SrcMainResources,
        SourcePath::SrcTestResources,
        SourcePath::SrcMainWebapp,
        SourcePath::Root,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SourcePath::SrcMainJava => "SRC_MAIN_JAVA",
            SourcePath::SrcTestJava => "SRC_TEST_JAVA",
            SourcePath::SrcMainResources => "SRC_MAIN_RESOURCES",
            SourcePath::SrcTestResources => "SRC_TEST_RESOURCES",
            SourcePath::SrcMainWebapp => "SRC_MAIN_WEBAPP",
            SourcePath::Root => "ROOT",
        }
    }
}

impl fmt::Display for SourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourcePath {
    type Err = MetadataIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SourcePath::ALL
            .into_iter()
            .find(|path| path.as_str() == s)
            .ok_or_else(|| MetadataIdError::UnknownPath(s.to_string()))
    }
}

/// Identifies one metadata item: `(provider, path, governor)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MetadataId {
    provider: String,
    path: SourcePath,
    governor: TypeRef,
}

impl MetadataId {
    /// Build the identifier for `governor` as seen by `provider`.
    ///
    /// Type arguments on the governor are dropped; a metadata item always
    /// describes the raw type.
    pub fn create(provider: impl Into<String>, governor: &TypeRef, path: SourcePath) -> Self {
        MetadataId {
            provider: provider.into(),
            path,
            governor: governor.erasure(),
        }
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn path(&self) -> SourcePath {
        self.path
    }

    pub fn governor(&self) -> &TypeRef {
        &self.governor
    }

    /// Whether this identifier was issued by `provider`.
    pub fn is_valid_for(&self, provider: &str) -> bool {
        self.provider == provider
    }

    /// Whether `raw` parses and belongs to `provider`.
    pub fn is_valid(provider: &str, raw: &str) -> bool {
        raw.parse::<MetadataId>()
            .map(|id| id.is_valid_for(provider))
            .unwrap_or(false)
    }
}

impl fmt::Display for MetadataId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}#{}?{}", PREFIX, self.provider, self.path, self.governor)
    }
}

impl FromStr for MetadataId {
    type Err = MetadataIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix(PREFIX)
            .ok_or_else(|| MetadataIdError::MissingPrefix(s.to_string()))?;
        let (provider, rest) = rest
            .split_once('#')
            .ok_or_else(|| MetadataIdError::Malformed(s.to_string()))?;
        let (path, governor) = rest
            .split_once('?')
            .ok_or_else(|| MetadataIdError::Malformed(s.to_string()))?;
        if provider.is_empty() {
            return Err(MetadataIdError::Malformed(s.to_string()));
        }
        Ok(MetadataId {
            provider: provider.to_string(),
            path: path.parse()?,
            governor: TypeRef::parse(governor)?,
        })
    }
}

impl Serialize for MetadataId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetadataIdError {
    #[error("metadata id `{0}` does not start with `MID:`")]
    MissingPrefix(String),
    #[error("metadata id `{0}` is not of the form MID:<provider>#<path>?<type>")]
    Malformed(String),
    #[error("unknown source path `{0}`")]
    UnknownPath(String),
    #[error("invalid governor type: {0}")]
    InvalidType(#[from] TypeRefError),
}
