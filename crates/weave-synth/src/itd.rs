//! Inter-type declaration output.
//!
//! [`ItdTypeDetails`] is what a pass hands to the weaver: the generated
//! methods in generation order, plus the import table their type names were
//! written against. [`ItdTypeDetails::render`] prints it as an aspect source
//! file for previews and for the CLI.

use weave_common::{MetadataId, TypeRef};

use crate::imports::ImportResolver;
use crate::method::MethodSpec;
use crate::render::doc::{concat, hardline, indent, line, text, Doc};
use crate::render::java::method_doc;
use crate::render::{print, FormatConfig};
use crate::synth::ASPECT_SUFFIX;

#[derive(Clone, Debug)]
pub struct ItdTypeDetails {
    declared_by: MetadataId,
    aspect_name: TypeRef,
    governor: TypeRef,
    methods: Vec<MethodSpec>,
    imports: ImportResolver,
}

impl ItdTypeDetails {
    pub fn new(
        declared_by: MetadataId,
        governor: TypeRef,
        methods: Vec<MethodSpec>,
        imports: ImportResolver,
    ) -> Self {
        let aspect_name = TypeRef::new(format!("{}{}", governor.qualified_name(), ASPECT_SUFFIX));
        ItdTypeDetails {
            declared_by,
            aspect_name,
            governor,
            methods,
            imports,
        }
    }

    pub fn declared_by(&self) -> &MetadataId {
        &self.declared_by
    }

    /// `<governor>_Weave_Json`, in the governor's package.
    pub fn aspect_name(&self) -> &TypeRef {
        &self.aspect_name
    }

    pub fn governor(&self) -> &TypeRef {
        &self.governor
    }

    pub fn methods(&self) -> &[MethodSpec] {
        &self.methods
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Imports the generated code needs, sorted.
    pub fn imports(&self) -> impl Iterator<Item = &str> {
        self.imports.imports()
    }

    /// Aspect source text with the default layout.
    pub fn render_aspect(&self) -> String {
        self.render(&FormatConfig::default())
    }

    pub fn render(&self, config: &FormatConfig) -> String {
        print(&self.to_doc(), config)
    }

    fn to_doc(&self) -> Doc {
        // The pass already registered every type these methods mention, so
        // names resolve the same way they did for the bodies.
        let mut names = self.imports.clone();
        let methods: Vec<Doc> = self
            .methods
            .iter()
            .map(|spec| method_doc(&self.governor, spec, &mut names))
            .collect();

        let mut parts = vec![
            line("// Generated by weave. Do not edit."),
            line(format!("// Source: {}", self.declared_by)),
        ];
        if let Some(package) = names.package() {
            parts.push(hardline());
            parts.push(line(format!("package {};", package)));
        }
        let imports: Vec<Doc> = names
            .imports()
            .map(|import| line(format!("import {};", import)))
            .collect();
        if !imports.is_empty() {
            parts.push(hardline());
            parts.extend(imports);
        }

        parts.push(hardline());
        parts.push(text(format!(
            "privileged aspect {} {{",
            self.aspect_name.simple_name()
        )));
        let has_methods = !methods.is_empty();
        for method in methods {
            parts.push(indent(concat(vec![hardline(), hardline(), method])));
        }
        if has_methods {
            parts.push(hardline());
        }
        parts.push(hardline());
        parts.push(text("}"));
        concat(parts)
    }
}
