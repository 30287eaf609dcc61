use miette::{Diagnostic, NamedSource, SourceSpan};
use schema_bridge_core::MalformedSchemaError;
use schema_bridge_dsl::{DslError, ParseWarning, Span};

/// A diagnostic wrapping a `DslError` for rich miette rendering.
///
/// The module-level `#[allow(unused_assignments)]` in main.rs is required
/// because miette's derive macro generates assignment patterns that rustc
/// flags as unused.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct SchemaDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("{label}")]
    span: SourceSpan,

    message: String,
    label: String,

    #[help]
    suggestion: Option<String>,
}

/// A skipped block or statement, rendered at warning severity.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(severity(Warning))]
pub struct SkippedDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("{label}")]
    span: SourceSpan,

    message: String,
    label: String,
}

fn source_span(span: &Span) -> SourceSpan {
    (span.start, span.end.saturating_sub(span.start)).into()
}

/// Convert a `DslError` into a miette `SchemaDiagnostic`.
pub fn dsl_error_to_diagnostic(error: &DslError, source: &str, filename: &str) -> SchemaDiagnostic {
    let named_src = NamedSource::new(filename, source.to_string());

    match error {
        DslError::InvalidIdentifier { name, span } => SchemaDiagnostic {
            src: named_src,
            span: source_span(span),
            message: format!("invalid identifier '{name}'"),
            label: "must match [A-Za-z_][A-Za-z0-9_]*".to_string(),
            suggestion: Some(format!("Rename to '{}'.", to_identifier(name))),
        },

        DslError::DuplicateAttribute {
            class,
            attribute,
            span,
        } => SchemaDiagnostic {
            src: named_src,
            span: source_span(span),
            message: format!("duplicate attribute '{attribute}' in class '{class}'"),
            label: "already defined above".to_string(),
            suggestion: Some("Remove the duplicate or rename one of the attributes.".to_string()),
        },

        DslError::CoreSchemaError { source: cause, span } => SchemaDiagnostic {
            src: named_src,
            span: source_span(span),
            message: format!("schema validation error: {cause}"),
            label: "validation failed".to_string(),
            suggestion: match cause {
                MalformedSchemaError::DuplicateAttribute { .. } => Some(
                    "Remove the duplicate or rename one of the attributes.".to_string(),
                ),
                _ => None,
            },
        },

        // Catch future non_exhaustive variants
        _ => SchemaDiagnostic {
            src: named_src,
            span: source_span(error.span()),
            message: error.to_string(),
            label: "error".to_string(),
            suggestion: None,
        },
    }
}

/// Convert a `ParseWarning` into a warning-severity diagnostic.
pub fn warning_to_diagnostic(
    warning: &ParseWarning,
    source: &str,
    filename: &str,
) -> SkippedDiagnostic {
    let label = match warning {
        ParseWarning::UnnamedClass { .. } => "class has no name",
        ParseWarning::MissingBody { .. } => "expected '{' after the class name",
        ParseWarning::UnterminatedClass { .. } => {
            "no closing '}' before the next class or end of input"
        }
        ParseWarning::IgnoredStatement { .. } => "expected 'name : Type;'",
        _ => "skipped",
    };
    SkippedDiagnostic {
        src: NamedSource::new(filename, source.to_string()),
        span: source_span(warning.span()),
        message: warning.to_string(),
        label: label.to_string(),
    }
}

/// Render all parse errors for a file using miette.
pub fn render_diagnostics(
    errors: &[DslError],
    source: &str,
    filename: &str,
) -> Vec<miette::Report> {
    errors
        .iter()
        .map(|e| miette::Report::new(dsl_error_to_diagnostic(e, source, filename)))
        .collect()
}

/// Render parse warnings for a file using miette.
pub fn render_warnings(
    warnings: &[ParseWarning],
    source: &str,
    filename: &str,
) -> Vec<miette::Report> {
    warnings
        .iter()
        .map(|w| miette::Report::new(warning_to_diagnostic(w, source, filename)))
        .collect()
}

/// Nearest valid identifier: invalid characters become `_`, and a leading
/// digit gets a `_` prefix.
fn to_identifier(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 1);
    if s.chars().next().map_or(true, |c| c.is_ascii_digit()) {
        result.push('_');
    }
    for c in s.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            result.push(c);
        } else {
            result.push('_');
        }
    }
    result
}
