//! Plural naming.
//!
//! Array-returning operations are usually named after the plural of the
//! governor (`fromJsonArrayToPets`). The plural comes from a naming service
//! when one is registered for the type, otherwise from default English
//! pluralization: the simple name with an `s` appended.

use std::cell::OnceCell;

use rustc_hash::FxHashMap;
use weave_common::TypeRef;

/// Maps a type to its plural term, if one is known.
pub trait NamingService: Send + Sync {
    fn plural_of(&self, ty: &TypeRef) -> Option<String>;
}

impl<F> NamingService for F
where
    F: Fn(&TypeRef) -> Option<String> + Send + Sync,
{
    fn plural_of(&self, ty: &TypeRef) -> Option<String> {
        self(ty)
    }
}

/// A naming service that never knows a plural.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPlurals;

impl NamingService for NoPlurals {
    fn plural_of(&self, _ty: &TypeRef) -> Option<String> {
        None
    }
}

/// Explicit plurals keyed by qualified type name.
#[derive(Clone, Debug, Default)]
pub struct PluralRegistry {
    plurals: FxHashMap<String, String>,
}

impl PluralRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ty: &TypeRef, plural: impl Into<String>) {
        self.plurals
            .insert(ty.qualified_name().to_string(), plural.into());
    }
}

impl NamingService for PluralRegistry {
    fn plural_of(&self, ty: &TypeRef) -> Option<String> {
        self.plurals.get(ty.qualified_name()).cloned()
    }
}

/// Default English pluralization.
pub fn default_plural(simple_name: &str) -> String {
    format!("{}s", simple_name)
}

/// A plural term resolved on first use and cached for the rest of a pass.
pub struct PluralName<'a> {
    source: PluralSource<'a>,
    resolved: OnceCell<String>,
}

enum PluralSource<'a> {
    Fixed(String),
    Lookup {
        ty: &'a TypeRef,
        simple_name: &'a str,
        naming: &'a dyn NamingService,
    },
}

impl<'a> PluralName<'a> {
    /// Resolve through `naming`, falling back to [`default_plural`].
    ///
    /// An empty plural from the service counts as no plural.
    pub fn lookup(ty: &'a TypeRef, simple_name: &'a str, naming: &'a dyn NamingService) -> Self {
        PluralName {
            source: PluralSource::Lookup {
                ty,
                simple_name,
                naming,
            },
            resolved: OnceCell::new(),
        }
    }

    /// A plural that is already known.
    pub fn fixed(plural: impl Into<String>) -> Self {
        PluralName {
            source: PluralSource::Fixed(plural.into()),
            resolved: OnceCell::new(),
        }
    }

    pub fn get(&self) -> &str {
        self.resolved.get_or_init(|| match &self.source {
            PluralSource::Fixed(plural) => plural.clone(),
            PluralSource::Lookup {
                ty,
                simple_name,
                naming,
            } => {
                let plural = naming
                    .plural_of(ty)
                    .filter(|p| !p.is_empty())
                    .unwrap_or_else(|| default_plural(simple_name));
                tracing::trace!(ty = %ty, plural = %plural, "resolved plural");
                plural
            }
        })
    }

    /// Whether [`PluralName::get`] has been called yet.
    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }
}
