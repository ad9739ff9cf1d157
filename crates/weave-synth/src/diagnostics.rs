//! Ariadne-based rendering of synthesis errors.
//!
//! Per-operation failures are reported against the method-name template
//! that caused them, with the offending part of the template underlined.
//! Output is either a human-readable report or, in JSON mode, a single line
//! of JSON for tooling.

use std::ops::Range;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};

use crate::error::SynthError;

// ── Error Codes ────────────────────────────────────────────────────────

fn error_code(err: &SynthError) -> &'static str {
    match err {
        SynthError::InvalidIdentifier { .. } => "J0001",
        SynthError::SignatureClash { .. } => "J0002",
        SynthError::MissingCollaborator(_) => "J0003",
        SynthError::ForeignIdentifier { .. } => "J0004",
    }
}

// ── Options ────────────────────────────────────────────────────────────

/// How diagnostics are written.
#[derive(Clone, Debug)]
pub struct DiagnosticOptions {
    pub color: bool,
    /// One JSON object per diagnostic instead of an ariadne report.
    pub json: bool,
}

impl Default for DiagnosticOptions {
    fn default() -> Self {
        DiagnosticOptions {
            color: true,
            json: false,
        }
    }
}

impl DiagnosticOptions {
    /// Plain text without ANSI escapes, for tests and piped output.
    pub fn colorless() -> Self {
        DiagnosticOptions {
            color: false,
            json: false,
        }
    }

    pub fn json_mode() -> Self {
        DiagnosticOptions {
            color: false,
            json: true,
        }
    }
}

// ── Rendering ──────────────────────────────────────────────────────────

/// Ariadne counts characters, templates are indexed by byte.
fn char_range(source: &str, span: &Range<usize>) -> Range<usize> {
    let start = span.start.min(source.len());
    let end = span.end.min(source.len()).max(start);
    let to_chars = |byte: usize| source.get(..byte).map_or(byte, |s| s.chars().count());
    to_chars(start)..to_chars(end)
}

struct Primary {
    span: Range<usize>,
    label: String,
    help: Option<String>,
}

fn primary(error: &SynthError) -> Option<Primary> {
    match error {
        SynthError::InvalidIdentifier {
            template,
            resolved,
            reason,
            span,
            ..
        } => Some(Primary {
            span: char_range(template, span),
            label: format!("resolves to `{}`: {}", resolved, reason),
            help: Some("method names must be legal Java identifiers".to_string()),
        }),
        SynthError::SignatureClash {
            template, first, ..
        } => Some(Primary {
            span: 0..template.chars().count(),
            label: format!("already generated for {}", first),
            help: Some(format!(
                "give this operation a different name, or disable the {} method",
                first
            )),
        }),
        SynthError::MissingCollaborator(_) | SynthError::ForeignIdentifier { .. } => None,
    }
}

/// Render `error`. `filename` names where the template came from, e.g. the
/// manifest and the type it configures.
pub fn render_diagnostic(error: &SynthError, filename: &str, opts: &DiagnosticOptions) -> String {
    let source = error.template().unwrap_or("");
    let primary = primary(error);

    if opts.json {
        return render_json(error, filename, primary.as_ref());
    }

    let config = Config::default().with_color(opts.color);
    let span = primary.as_ref().map_or(0..0, |p| p.span.clone());
    let mut builder = Report::build(ReportKind::Error, span)
        .with_code(error_code(error))
        .with_message(error.to_string())
        .with_config(config);
    if let Some(primary) = primary {
        builder.add_label(
            Label::new(primary.span)
                .with_message(primary.label)
                .with_color(Color::Red),
        );
        if let Some(help) = primary.help {
            builder.set_help(help);
        }
    }
    builder.set_note(format!("in {}", filename));
    let report = builder.finish();

    let mut buf = Vec::new();
    match report.write(Source::from(source), &mut buf) {
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        // Writing into a Vec only fails on a broken report; fall back to the
        // plain message.
        Err(_) => format!("error[{}]: {}\n", error_code(error), error),
    }
}

fn render_json(error: &SynthError, filename: &str, primary: Option<&Primary>) -> String {
    let spans: Vec<serde_json::Value> = primary
        .map(|p| {
            vec![serde_json::json!({
                "start": p.span.start,
                "end": p.span.end,
                "label": p.label,
            })]
        })
        .unwrap_or_default();
    serde_json::json!({
        "code": error_code(error),
        "severity": "error",
        "message": error.to_string(),
        "file": filename,
        "operation": error.operation().map(|op| op.label()),
        "template": error.template(),
        "spans": spans,
        "help": primary.and_then(|p| p.help.as_deref()),
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::JsonOperation;
    use crate::ident::IdentifierError;

    #[test]
    fn char_range_counts_characters() {
        assert_eq!(char_range("ab", &(1..2)), 1..2);
        assert_eq!(char_range("é<x>", &(2..5)), 1..4);
        assert_eq!(char_range("ab", &(5..9)), 2..2);
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(error_code(&SynthError::MissingCollaborator("x")), "J0003");
        let governor = weave_common::TypeRef::new("a.B");
        let foreign = SynthError::ForeignIdentifier {
            declared_by: weave_common::MetadataId::create(
                "other",
                &governor,
                weave_common::SourcePath::SrcMainJava,
            ),
            governor,
        };
        assert_eq!(error_code(&foreign), "J0004");
        let clash = SynthError::SignatureClash {
            operation: JsonOperation::FromJsonArray,
            template: "parse".into(),
            name: crate::ident::Identifier::trusted("parse"),
            first: JsonOperation::FromJson,
        };
        assert_eq!(error_code(&clash), "J0002");
        let invalid = SynthError::InvalidIdentifier {
            operation: JsonOperation::ToJson,
            template: "1x".into(),
            resolved: "1x".into(),
            reason: IdentifierError::InvalidStart('1'),
            span: 0..1,
        };
        assert_eq!(error_code(&invalid), "J0001");
    }
}
