//! The synthesis pass.
//!
//! One [`Synthesizer`] runs one pass over one governor type. The four
//! operations are independent: each one is disabled, overridden by a
//! declaration the governor already has, generated, or failed, and a failure
//! in one never stops the others.

use weave_common::{MetadataId, SourcePath, TypeRef};
use weave_meta::{MethodHandle, NamingService, PluralName, TypeIntrospection};

use crate::body::{BodyComposer, JsonOperation};
use crate::config::{JsonConfig, SerializerProfile};
use crate::error::SynthError;
use crate::ident::Identifier;
use crate::imports::ImportResolver;
use crate::itd::ItdTypeDetails;
use crate::method::MethodSpec;
use crate::probe::{choose_implementation, find_existing, Implementation};
use crate::render::java::body_text;
use crate::template::{NameContext, NameTemplate};

/// Provider name stamped into the [`MetadataId`] of generated methods.
pub const JSON_PROVIDER: &str = "weave.json";

/// Appended to the governor's name to name the generated aspect.
pub const ASPECT_SUFFIX: &str = "_Weave_Json";

pub struct Synthesizer<'a> {
    governor: TypeRef,
    declared_by: MetadataId,
    introspection: &'a dyn TypeIntrospection,
    naming: &'a dyn NamingService,
    config: &'a JsonConfig,
    profile: SerializerProfile,
}

/// Collects the collaborators of a [`Synthesizer`].
#[derive(Default)]
pub struct SynthesizerBuilder<'a> {
    governor: Option<TypeRef>,
    path: SourcePath,
    declared_by: Option<MetadataId>,
    introspection: Option<&'a dyn TypeIntrospection>,
    naming: Option<&'a dyn NamingService>,
    config: Option<&'a JsonConfig>,
    profile: Option<SerializerProfile>,
}

impl<'a> SynthesizerBuilder<'a> {
    pub fn governor(mut self, governor: TypeRef) -> Self {
        self.governor = Some(governor);
        self
    }

    pub fn introspection(mut self, introspection: &'a dyn TypeIntrospection) -> Self {
        self.introspection = Some(introspection);
        self
    }

    pub fn naming(mut self, naming: &'a dyn NamingService) -> Self {
        self.naming = Some(naming);
        self
    }

    pub fn config(mut self, config: &'a JsonConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Defaults to [`SerializerProfile::default`].
    pub fn profile(mut self, profile: SerializerProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Source path of the governor, used when `declared_by` is derived.
    pub fn path(mut self, path: SourcePath) -> Self {
        self.path = path;
        self
    }

    /// Overrides the identifier stamped on generated methods. It must be
    /// issued by [`JSON_PROVIDER`] for the governor's erasure.
    pub fn declared_by(mut self, declared_by: MetadataId) -> Self {
        self.declared_by = Some(declared_by);
        self
    }

    pub fn build(self) -> Result<Synthesizer<'a>, SynthError> {
        let governor = self
            .governor
            .ok_or(SynthError::MissingCollaborator("governor type"))?;
        let introspection = self
            .introspection
            .ok_or(SynthError::MissingCollaborator("type introspection"))?;
        let naming = self
            .naming
            .ok_or(SynthError::MissingCollaborator("naming service"))?;
        let config = self
            .config
            .ok_or(SynthError::MissingCollaborator("configuration"))?;
        let declared_by = match self.declared_by {
            None => MetadataId::create(JSON_PROVIDER, &governor, self.path),
            Some(id) if id.is_valid_for(JSON_PROVIDER) && *id.governor() == governor.erasure() => {
                id
            }
            Some(id) => {
                return Err(SynthError::ForeignIdentifier {
                    declared_by: id,
                    governor,
                })
            }
        };

        Ok(Synthesizer {
            governor,
            declared_by,
            introspection,
            naming,
            config,
            profile: self.profile.unwrap_or_default(),
        })
    }
}

impl<'a> Synthesizer<'a> {
    pub fn builder() -> SynthesizerBuilder<'a> {
        SynthesizerBuilder::default()
    }

    pub fn governor(&self) -> &TypeRef {
        &self.governor
    }

    /// Run the pass.
    pub fn synthesize(self) -> SynthesisPass {
        let span = tracing::debug_span!("synthesize", governor = %self.governor);
        let _enter = span.enter();

        let mut imports = ImportResolver::new(&self.governor);
        let mut outcomes: Vec<OperationOutcome> = Vec::with_capacity(JsonOperation::ALL.len());
        {
            let simple_name = self.introspection.simple_name(&self.governor);
            let plural = PluralName::lookup(&self.governor, &simple_name, self.naming);
            let ctx = NameContext::new(&simple_name, &plural);
            let composer = BodyComposer::new(&self.governor, &self.profile);

            for operation in JsonOperation::ALL {
                let outcome =
                    self.run_operation(operation, &ctx, &composer, &mut imports, &outcomes);
                match &outcome {
                    Outcome::Disabled => tracing::debug!(%operation, "disabled"),
                    Outcome::Overridden(handle) => {
                        tracing::debug!(%operation, method = %handle.name, "overridden")
                    }
                    Outcome::Generated(spec) => {
                        tracing::debug!(%operation, method = %spec.name(), "generated")
                    }
                    Outcome::Failed(err) => tracing::warn!(%operation, error = %err, "failed"),
                }
                outcomes.push(OperationOutcome { operation, outcome });
            }
        }

        SynthesisPass {
            governor: self.governor,
            declared_by: self.declared_by,
            outcomes,
            imports,
        }
    }

    fn run_operation(
        &self,
        operation: JsonOperation,
        ctx: &NameContext<'_>,
        composer: &BodyComposer<'_>,
        imports: &mut ImportResolver,
        earlier: &[OperationOutcome],
    ) -> Outcome {
        let Some(template) = self.config.template(operation).and_then(NameTemplate::parse) else {
            return Outcome::Disabled;
        };
        let name = match template.resolve(ctx) {
            Ok(name) => name,
            Err(err) => {
                return Outcome::Failed(SynthError::InvalidIdentifier {
                    operation,
                    template: template.source().to_string(),
                    resolved: err.resolved,
                    reason: err.reason,
                    span: err.span,
                })
            }
        };

        let shape = operation.shape(&self.governor);
        let param_types = shape.param_types();
        let existing = find_existing(self.introspection, &self.governor, &name, &param_types);

        if existing.is_none() {
            if let Some(first) = clashing(earlier, &name, &param_types) {
                return Outcome::Failed(SynthError::SignatureClash {
                    operation,
                    template: template.source().to_string(),
                    name,
                    first,
                });
            }
        }

        let chosen = choose_implementation(existing, || {
            let body_tree = composer.compose(operation);
            imports.name_of(&shape.return_type);
            for param in &shape.params {
                imports.name_of(&param.ty);
            }
            let body = body_text(&body_tree, imports);
            MethodSpec::new(
                self.declared_by.clone(),
                name,
                shape.modifiers,
                shape.params,
                shape.return_type,
                body_tree,
                body,
            )
        });
        match chosen {
            Implementation::Existing(handle) => Outcome::Overridden(handle),
            Implementation::Synthesized(spec) => Outcome::Generated(spec),
        }
    }
}

/// The earlier generated operation that already owns `name` with this
/// signature.
fn clashing(
    earlier: &[OperationOutcome],
    name: &Identifier,
    param_types: &[TypeRef],
) -> Option<JsonOperation> {
    earlier.iter().find_map(|prior| match &prior.outcome {
        Outcome::Generated(spec)
            if spec.name() == name
                && spec.params().iter().map(|p| &p.ty).eq(param_types.iter()) =>
        {
            Some(prior.operation)
        }
        _ => None,
    })
}

/// What happened to one operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The template is absent or empty.
    Disabled,
    /// The governor already declares the method.
    Overridden(MethodHandle),
    Generated(MethodSpec),
    Failed(SynthError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperationOutcome {
    pub operation: JsonOperation,
    pub outcome: Outcome,
}

/// The result of one pass, one outcome per operation in generation order.
#[derive(Clone, Debug)]
pub struct SynthesisPass {
    governor: TypeRef,
    declared_by: MetadataId,
    outcomes: Vec<OperationOutcome>,
    imports: ImportResolver,
}

impl SynthesisPass {
    pub fn governor(&self) -> &TypeRef {
        &self.governor
    }

    pub fn declared_by(&self) -> &MetadataId {
        &self.declared_by
    }

    pub fn outcomes(&self) -> &[OperationOutcome] {
        &self.outcomes
    }

    pub fn outcome(&self, operation: JsonOperation) -> &Outcome {
        // Every pass records all four operations.
        &self.outcomes[operation as usize].outcome
    }

    /// Generated methods in generation order.
    pub fn methods(&self) -> impl Iterator<Item = &MethodSpec> {
        self.outcomes.iter().filter_map(|o| match &o.outcome {
            Outcome::Generated(spec) => Some(spec),
            _ => None,
        })
    }

    pub fn errors(&self) -> impl Iterator<Item = &SynthError> {
        self.outcomes.iter().filter_map(|o| match &o.outcome {
            Outcome::Failed(err) => Some(err),
            _ => None,
        })
    }

    pub fn is_clean(&self) -> bool {
        self.errors().next().is_none()
    }

    /// Hand the generated methods over to the weaver.
    pub fn into_itd(self) -> ItdTypeDetails {
        let methods = self
            .outcomes
            .into_iter()
            .filter_map(|o| match o.outcome {
                Outcome::Generated(spec) => Some(spec),
                _ => None,
            })
            .collect();
        ItdTypeDetails::new(self.declared_by, self.governor, methods, self.imports)
    }
}
