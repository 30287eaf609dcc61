use std::fmt;

use schema_bridge_core::error::MalformedSchemaError;

/// A byte-offset span in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    /// Creates a new span from start (inclusive) to end (exclusive).
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Fatal errors that occur while parsing class definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DslError {
    /// An attribute statement used a name or type that is not an identifier.
    InvalidIdentifier { name: String, span: Span },

    /// The same attribute name appears twice in one class body.
    DuplicateAttribute {
        class: String,
        attribute: String,
        span: Span,
    },

    /// An error propagated from schema-bridge-core validation.
    CoreSchemaError {
        source: MalformedSchemaError,
        span: Span,
    },
}

impl DslError {
    /// Location of the offending text.
    pub fn span(&self) -> &Span {
        match self {
            Self::InvalidIdentifier { span, .. }
            | Self::DuplicateAttribute { span, .. }
            | Self::CoreSchemaError { span, .. } => span,
        }
    }

    /// Drops the source location, keeping the schema-level cause.
    pub fn to_schema_error(&self) -> MalformedSchemaError {
        match self {
            Self::InvalidIdentifier { name, .. } => {
                MalformedSchemaError::InvalidIdentifier { name: name.clone() }
            }
            Self::DuplicateAttribute {
                class, attribute, ..
            } => MalformedSchemaError::DuplicateAttribute {
                class: class.clone(),
                attribute: attribute.clone(),
            },
            Self::CoreSchemaError { source, .. } => source.clone(),
        }
    }
}

impl fmt::Display for DslError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIdentifier { name, span } => {
                write!(
                    f,
                    "invalid identifier '{name}' at {span}: must match [A-Za-z_][A-Za-z0-9_]*"
                )
            }
            Self::DuplicateAttribute {
                class,
                attribute,
                span,
            } => {
                write!(
                    f,
                    "duplicate attribute '{attribute}' in class '{class}' at {span}"
                )
            }
            Self::CoreSchemaError { source, span } => {
                write!(f, "schema validation error at {span}: {source}")
            }
        }
    }
}

impl std::error::Error for DslError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CoreSchemaError { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Non-fatal findings: text the parser skipped instead of failing on.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseWarning {
    /// `class` was not followed by a usable name; its block was skipped.
    UnnamedClass { span: Span },

    /// `class Name` was not followed by `{`.
    MissingBody { name: String, span: Span },
    /// A class body reached the next `class <name> {` or end of input without a closing `}`.
    /// A class body ran to end of input without a closing `}`.
    UnterminatedClass { name: String, span: Span },

    /// A statement inside a class body did not have the `name : Type` shape.
    IgnoredStatement {
        class: String,
        text: String,
        span: Span,
    },
}

impl ParseWarning {
    pub fn span(&self) -> &Span {
        match self {
            Self::UnnamedClass { span }
            | Self::MissingBody { span, .. }
            | Self::UnterminatedClass { span, .. }
            | Self::IgnoredStatement { span, .. } => span,
        }
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnnamedClass { span } => {
                write!(f, "class without a name at {span} skipped")
            }
            Self::MissingBody { name, span } => {
                write!(f, "class '{name}' at {span} has no body; skipped")
            }
            Self::UnterminatedClass { name, span } => {
                write!(f, "class '{name}' at {span} is missing a closing '}}'; skipped")
            }
            Self::IgnoredStatement { class, text, span } => {
                write!(f, "ignored statement '{text}' in class '{class}' at {span}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn span_display() {
        let span = Span::new(10, 20);
        assert_eq!(span.to_string(), "10..20");
    }

    #[test]
    fn error_display_messages() {
        let cases = vec![
            (
                DslError::InvalidIdentifier {
                    name: "1st".into(),
                    span: Span::new(4, 7),
                },
                "invalid identifier '1st' at 4..7",
            ),
            (
                DslError::DuplicateAttribute {
                    class: "Foo".into(),
                    attribute: "a".into(),
                    span: Span::new(20, 21),
                },
                "duplicate attribute 'a' in class 'Foo' at 20..21",
            ),
        ];
        for (err, expected) in cases {
            let msg = err.to_string();
            assert!(msg.starts_with(expected), "got: {msg}");
        }
    }

    #[test]
    fn warning_display_messages() {
        let cases = vec![
            (
                ParseWarning::UnnamedClass {
                    span: Span::new(0, 5),
                },
                "class without a name at 0..5",
            ),
            (
                ParseWarning::MissingBody {
                    name: "Foo".into(),
                    span: Span::new(6, 9),
                },
                "class 'Foo' at 6..9 has no body",
            ),
            (
                ParseWarning::UnterminatedClass {
                    name: "Foo".into(),
                    span: Span::new(6, 9),
                },
                "class 'Foo' at 6..9 is missing a closing '}'",
            ),
            (
                ParseWarning::IgnoredStatement {
                    class: "Foo".into(),
                    text: "a : List < String >".into(),
                    span: Span::new(12, 30),
                },
                "ignored statement 'a : List < String >' in class 'Foo'",
            ),
        ];
        for (warning, expected) in cases {
            let msg = warning.to_string();
            assert!(msg.starts_with(expected), "got: {msg}");
        }
    }

    #[test]
    fn to_schema_error_drops_span() {
        let err = DslError::DuplicateAttribute {
            class: "Foo".into(),
            attribute: "a".into(),
            span: Span::new(0, 1),
        };
        assert_eq!(
            err.to_schema_error(),
            MalformedSchemaError::DuplicateAttribute {
                class: "Foo".into(),
                attribute: "a".into(),
            }
        );
        assert_eq!(err.span(), &Span::new(0, 1));
    }

    #[test]
    fn core_schema_error_has_source() {
        let err = DslError::CoreSchemaError {
            source: MalformedSchemaError::InvalidIdentifier { name: "x-y".into() },
            span: Span::new(0, 10),
        };
        assert!(err.source().is_some());
        assert_eq!(
            err.to_schema_error(),
            MalformedSchemaError::InvalidIdentifier { name: "x-y".into() }
        );
    }

    #[test]
    fn non_core_errors_have_no_source() {
        let err = DslError::InvalidIdentifier {
            name: "1".into(),
            span: Span::new(0, 1),
        };
        assert!(err.source().is_none());
    }
}
