//! Method-name templates.
//!
//! A template is literal text with two recognized placeholders:
//!
//! - `<TypeName>`: the governor's simple name
//! - `<TypeNamePlural>`: the governor's plural term
//!
//! Any other text, including unrecognized `<...>` sequences, is copied
//! verbatim. The substituted result must be a legal identifier.

use std::ops::Range;

use weave_meta::PluralName;

use crate::ident::{Identifier, IdentifierError};

pub const TYPE_NAME: &str = "<TypeName>";
pub const TYPE_NAME_PLURAL: &str = "<TypeNamePlural>";

/// One piece of a parsed template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    TypeName,
    TypeNamePlural,
}

/// A parsed template. Each segment keeps its byte span in the source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameTemplate {
    source: String,
    segments: Vec<(Segment, Range<usize>)>,
}

/// The values placeholders are replaced with.
pub struct NameContext<'a> {
    pub simple_name: &'a str,
    pub plural: &'a PluralName<'a>,
}

impl<'a> NameContext<'a> {
    pub fn new(simple_name: &'a str, plural: &'a PluralName<'a>) -> Self {
        NameContext {
            simple_name,
            plural,
        }
    }
}

/// A template whose substituted text is not a legal identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameError {
    pub resolved: String,
    pub reason: IdentifierError,
    /// The part of the template responsible for the failure.
    pub span: Range<usize>,
}

impl NameTemplate {
    /// Parse `source`. Returns `None` for an empty template.
    pub fn parse(source: &str) -> Option<NameTemplate> {
        if source.is_empty() {
            return None;
        }

        let mut segments = Vec::new();
        let mut literal_start = 0;
        let mut pos = 0;
        while pos < source.len() {
            let rest = &source[pos..];
            let placeholder = if rest.starts_with(TYPE_NAME_PLURAL) {
                Some((Segment::TypeNamePlural, TYPE_NAME_PLURAL.len()))
            } else if rest.starts_with(TYPE_NAME) {
                Some((Segment::TypeName, TYPE_NAME.len()))
            } else {
                None
            };

            match placeholder {
                Some((segment, len)) => {
                    if literal_start < pos {
                        segments.push((
                            Segment::Literal(source[literal_start..pos].to_string()),
                            literal_start..pos,
                        ));
                    }
                    segments.push((segment, pos..pos + len));
                    pos += len;
                    literal_start = pos;
                }
                None => {
                    pos += rest.chars().next().map_or(1, char::len_utf8);
                }
            }
        }
        if literal_start < source.len() {
            segments.push((
                Segment::Literal(source[literal_start..].to_string()),
                literal_start..source.len(),
            ));
        }

        Some(NameTemplate {
            source: source.to_string(),
            segments,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().map(|(segment, _)| segment)
    }

    /// Whether rendering needs the plural term.
    pub fn needs_plural(&self) -> bool {
        self.segments()
            .any(|segment| matches!(segment, Segment::TypeNamePlural))
    }

    /// Substitute placeholders. The plural is only looked up if the template
    /// references it.
    pub fn render(&self, ctx: &NameContext<'_>) -> String {
        let mut out = String::new();
        for (segment, _) in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::TypeName => out.push_str(ctx.simple_name),
                Segment::TypeNamePlural => out.push_str(ctx.plural.get()),
            }
        }
        out
    }

    /// Render and validate.
    pub fn resolve(&self, ctx: &NameContext<'_>) -> Result<Identifier, NameError> {
        let resolved = self.render(ctx);
        Identifier::new(resolved.as_str()).map_err(|reason| {
            let span = reason
                .offset()
                .and_then(|offset| self.locate(offset, ctx))
                .unwrap_or(0..self.source.len());
            NameError {
                resolved,
                reason,
                span,
            }
        })
    }

    /// Map a byte offset in the rendered name back to the template text that
    /// produced it. Placeholders map to their whole span.
    fn locate(&self, offset: usize, ctx: &NameContext<'_>) -> Option<Range<usize>> {
        let mut out_pos = 0;
        for (segment, span) in &self.segments {
            let len = match segment {
                Segment::Literal(text) => text.len(),
                Segment::TypeName => ctx.simple_name.len(),
                Segment::TypeNamePlural => ctx.plural.get().len(),
            };
            if offset < out_pos + len {
                return Some(match segment {
                    Segment::Literal(text) => {
                        let start = span.start + (offset - out_pos);
                        let width = text[offset - out_pos..]
                            .chars()
                            .next()
                            .map_or(1, char::len_utf8);
                        start..start + width
                    }
                    _ => span.clone(),
                });
            }
            out_pos += len;
        }
        None
    }
}

/// Resolve an optional template to a method name.
///
/// `Ok(None)` means the operation is disabled: the template is absent or
/// empty. That is not an error.
pub fn resolve(
    template: Option<&str>,
    ctx: &NameContext<'_>,
) -> Result<Option<Identifier>, NameError> {
    match template.and_then(NameTemplate::parse) {
        None => Ok(None),
        Some(template) => template.resolve(ctx).map(Some),
    }
}
