use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context};
use serde::Deserialize;
use weave_common::{SourcePath, TypeRef};
use weave_meta::{MemberRegistry, MethodHandle, PluralRegistry};
use weave_synth::{JsonConfig, SerializerProfile};

/// Represents a parsed weave.toml manifest file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub serializer: SerializerProfile,
    #[serde(default, rename = "type")]
    pub types: Vec<TypeEntry>,
}

/// One governor type from a `[[type]]` table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeEntry {
    pub name: TypeRef,
    /// Registered plural; the default pluralization applies without one.
    #[serde(default)]
    pub plural: Option<String>,
    #[serde(default)]
    pub path: SourcePath,
    #[serde(default)]
    pub json: JsonConfig,
    /// Methods the type already declares.
    #[serde(default, rename = "method")]
    pub methods: Vec<DeclaredMethod>,
}

/// A `[[type.method]]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeclaredMethod {
    pub name: String,
    #[serde(default)]
    pub params: Vec<TypeRef>,
    pub returns: TypeRef,
    #[serde(default, rename = "static")]
    pub is_static: bool,
}

impl Manifest {
    /// Read and parse a weave.toml manifest from a file path.
    pub fn from_file(path: &Path) -> anyhow::Result<Manifest> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_str(&content).with_context(|| format!("invalid manifest {}", path.display()))
    }

    /// Parse a weave.toml manifest from a string.
    pub fn from_str(content: &str) -> anyhow::Result<Manifest> {
        let manifest: Manifest = toml::from_str(content)?;
        manifest.check_unique_types()?;
        Ok(manifest)
    }

    fn check_unique_types(&self) -> anyhow::Result<()> {
        let mut seen = HashSet::new();
        for entry in &self.types {
            if !seen.insert(entry.name.qualified_name()) {
                bail!("type `{}` is listed more than once", entry.name);
            }
        }
        Ok(())
    }

    /// Find a type by qualified or simple name.
    pub fn find_type(&self, name: &str) -> Option<&TypeEntry> {
        self.types
            .iter()
            .find(|entry| entry.name.qualified_name() == name)
            .or_else(|| self.types.iter().find(|entry| entry.name.simple_name() == name))
    }

    /// Declared members of every listed type.
    pub fn registry(&self) -> MemberRegistry {
        let mut registry = MemberRegistry::new();
        for entry in &self.types {
            registry.register_type(entry.name.clone());
            for method in &entry.methods {
                let handle = MethodHandle::new(
                    entry.name.clone(),
                    method.name.clone(),
                    method.params.clone(),
                    method.returns.clone(),
                )
                .with_static(method.is_static);
                registry.declare_method(handle);
            }
        }
        registry
    }

    /// Plurals registered in the manifest.
    pub fn plurals(&self) -> PluralRegistry {
        let mut plurals = PluralRegistry::new();
        for entry in &self.types {
            if let Some(plural) = &entry.plural {
                plurals.insert(&entry.name, plural.clone());
            }
        }
        plurals
    }
}
