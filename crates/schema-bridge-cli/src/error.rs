use std::path::PathBuf;

use schema_bridge_backend::BackendError;
use schema_bridge_core::document::DocumentError;
use schema_bridge_core::MalformedSchemaError;
use schema_bridge_dsl::DslError;

/// Exit codes for the CLI process.
///
/// - 0: success
/// - 1: general error
/// - 2: invalid arguments / usage error
/// - 3: model text failed to parse
/// - 4: malformed columnar schema
/// - 10: warehouse errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    InvalidArguments = 2,
    ParseError = 3,
    MalformedSchema = 4,
    BackendError = 10,
}

/// Errors returned by CLI command handlers.
///
/// Each variant maps to an `ExitCode` and can produce structured
/// output in JSON mode.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Parse errors from schema-bridge-dsl.
    #[error("parse errors in {file}")]
    Parse {
        errors: Vec<DslError>,
        source_text: String,
        file: PathBuf,
    },

    /// A columnar schema outside the supported subset.
    #[error("malformed schema in {file}: {source}")]
    Malformed {
        file: PathBuf,
        source: MalformedSchemaError,
    },

    /// A schema document that is not valid JSON in the table shape.
    #[error("{file}: {source}")]
    Document {
        file: PathBuf,
        source: DocumentError,
    },

    /// Warehouse or resource store errors.
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    /// IO errors (file not found, permission denied).
    #[error("IO error for {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration errors.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Model file or directory not found.
    #[error("no model files found in {path}")]
    NoSchemaFiles { path: PathBuf },

    /// Input file over the configured size limit.
    #[error("{path} is {size} bytes, over the {limit} byte input limit")]
    InputTooLarge { path: PathBuf, size: u64, limit: u64 },

    /// Table not present in the warehouse.
    #[error("table '{name}' not found in the warehouse")]
    TableNotFound { name: String },

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl CliError {
    /// Maps this error to the appropriate exit code.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Parse { .. } => ExitCode::ParseError,
            Self::Malformed { .. } | Self::Document { .. } => ExitCode::MalformedSchema,
            Self::Backend(_) | Self::TableNotFound { .. } => ExitCode::BackendError,
            Self::Config { .. } | Self::NoSchemaFiles { .. } | Self::InputTooLarge { .. } => {
                ExitCode::InvalidArguments
            }
            Self::Io { .. } | Self::Other(_) => ExitCode::GeneralError,
        }
    }

    /// Serializes this error as a JSON value for `--format json` output.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Parse { errors, file, .. } => {
                let error_list: Vec<serde_json::Value> = errors
                    .iter()
                    .map(|e| {
                        let span = e.span();
                        serde_json::json!({
                            "message": e.to_string(),
                            "start": span.start,
                            "end": span.end,
                        })
                    })
                    .collect();
                serde_json::json!({
                    "error": "parse_error",
                    "file": file.display().to_string(),
                    "errors": error_list,
                })
            }
            Self::Malformed { file, source } => serde_json::json!({
                "error": "malformed_schema",
                "file": file.display().to_string(),
                "message": source.to_string(),
                "table": source.class_name(),
                "field": source.attribute_name(),
            }),
            Self::Document { file, source } => serde_json::json!({
                "error": "malformed_schema",
                "file": file.display().to_string(),
                "message": source.to_string(),
                "line": source.line(),
                "column": source.column(),
            }),
            Self::Backend(e) => serde_json::json!({
                "error": "backend_error",
                "message": e.to_string(),
            }),
            Self::Io { path, source } => serde_json::json!({
                "error": "io_error",
                "path": path.display().to_string(),
                "message": source.to_string(),
            }),
            Self::Config { message } => serde_json::json!({
                "error": "config_error",
                "message": message,
            }),
            other => serde_json::json!({
                "error": "error",
                "message": other.to_string(),
            }),
        }
    }
}
