//! Import table for generated code.
//!
//! Every type name written into a generated signature or body goes through
//! [`ImportResolver::name_of`], which decides whether the type can be written
//! by its simple name and records the import that makes that legal.
//!
//! Rules, in order:
//! - `java.lang` types and types in the governor's package need no import;
//! - a simple name belongs to the first qualified type that asks for it;
//! - a later type with the same simple name is written fully qualified.

use std::collections::{BTreeMap, BTreeSet};

use weave_common::TypeRef;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportResolver {
    package: Option<String>,
    /// simple name -> qualified name that owns it
    claimed: BTreeMap<String, String>,
    imports: BTreeSet<String>,
}

impl ImportResolver {
    /// A table for code woven into `governor`. The governor's own simple name
    /// is claimed up front.
    pub fn new(governor: &TypeRef) -> Self {
        let mut resolver = ImportResolver {
            package: governor.package().map(str::to_string),
            ..ImportResolver::default()
        };
        resolver.claimed.insert(
            governor.simple_name().to_string(),
            governor.qualified_name().to_string(),
        );
        resolver
    }

    /// The name to write for `ty`, type arguments included.
    pub fn name_of(&mut self, ty: &TypeRef) -> String {
        let mut out = self.base_name(ty);
        if ty.is_generic() {
            let args: Vec<String> = ty.args().iter().map(|arg| self.name_of(arg)).collect();
            out.push('<');
            out.push_str(&args.join(", "));
            out.push('>');
        }
        out
    }

    fn base_name(&mut self, ty: &TypeRef) -> String {
        let simple = ty.simple_name();
        let qualified = ty.qualified_name();

        match self.claimed.get(simple) {
            Some(owner) if owner == qualified => return simple.to_string(),
            Some(_) => return qualified.to_string(),
            None => {}
        }

        self.claimed.insert(simple.to_string(), qualified.to_string());
        if self.needs_import(ty) {
            self.imports.insert(qualified.to_string());
        }
        simple.to_string()
    }

    fn needs_import(&self, ty: &TypeRef) -> bool {
        match ty.package() {
            None => false,
            Some(_) if ty.is_java_lang() => false,
            Some(pkg) => self.package.as_deref() != Some(pkg),
        }
    }

    /// The governor's package, if it has one.
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    /// Qualified names to import, sorted.
    pub fn imports(&self) -> impl Iterator<Item = &str> {
        self.imports.iter().map(String::as_str)
    }
}
