use std::path::PathBuf;

use schema_bridge_core::types::ClassDef;

use crate::cli::{GlobalOpts, ParseArgs};
use crate::commands::read_source;
use crate::config::{load_config, resolve_schema_paths};
use crate::error::CliError;
use crate::output::{OutputContext, ParseSummary};

/// Run the `parse` command: validate .pure files and render diagnostics.
pub async fn run(
    args: ParseArgs,
    global: &GlobalOpts,
    output: &OutputContext,
) -> Result<(), CliError> {
    let config = load_config(global.config.as_deref())?;
    let paths = resolve_schema_paths(&config, &args.paths);
    let files = discover_model_files(&paths)?;

    let mut summary = ParseSummary::default();
    let mut failed_file: Option<PathBuf> = None;

    for file in &files {
        let source_text = read_source(file, config.cli.max_input_bytes)?;
        match schema_bridge_dsl::parse_document(&source_text) {
            Ok(document) => {
                let text = args
                    .print
                    .then(|| schema_bridge_dsl::emit(&document.classes));
                output.parsed_file(&mut summary, file, &source_text, &document, text.as_deref());
            }
            Err(errors) => {
                failed_file.get_or_insert_with(|| file.clone());
                output.failed_file(&mut summary, file, &source_text, &errors);
            }
        }
    }
    output.parse_summary(&summary, args.print);

    match failed_file {
        Some(file) => Err(CliError::Parse {
            errors: vec![], // individual errors already rendered
            source_text: String::new(),
            file,
        }),
        None => Ok(()),
    }
}

/// Discover .pure files from a list of paths.
///
/// Paths can be files (used directly) or directories (searched recursively
/// for files matching `**/*.pure`).
pub fn discover_model_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            let pattern = format!("{}/**/*.pure", path.display());
            let entries = glob::glob(&pattern).map_err(|e| CliError::Other(e.to_string()))?;
            for entry in entries {
                let entry = entry.map_err(|e| CliError::Other(e.to_string()))?;
                files.push(entry);
            }
        } else {
            return Err(CliError::NoSchemaFiles { path: path.clone() });
        }
    }

    if files.is_empty() {
        let display_path = paths
            .first()
            .cloned()
            .unwrap_or_else(|| PathBuf::from("models/"));
        return Err(CliError::NoSchemaFiles { path: display_path });
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// Parse all model files and return their classes in discovery order.
///
/// Shared by `build` and `apply`. Stops at the first file with errors;
/// warnings are reported and parsing continues.
pub fn parse_all_classes(
    paths: &[PathBuf],
    max_input_bytes: u64,
    output: &OutputContext,
) -> Result<Vec<ClassDef>, CliError> {
    let files = discover_model_files(paths)?;
    let mut all_classes = Vec::new();

    for file in &files {
        let source_text = read_source(file, max_input_bytes)?;

        match schema_bridge_dsl::parse_document(&source_text) {
            Ok(document) => {
                output.skipped(file, &document.warnings);
                all_classes.extend(document.classes);
            }
            Err(errors) => {
                return Err(CliError::Parse {
                    errors,
                    source_text,
                    file: file.clone(),
                });
            }
        }
    }

    Ok(all_classes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputMode;

    fn quiet_output() -> OutputContext {
        OutputContext {
            mode: OutputMode::Human,
            quiet: true,
            use_color: false,
        }
    }

    #[test]
    fn discover_model_files_nonexistent_path() {
        let result = discover_model_files(&[PathBuf::from("/nonexistent/path")]);
        assert!(matches!(result, Err(CliError::NoSchemaFiles { .. })));
    }

    #[test]
    fn discover_model_files_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = discover_model_files(&[dir.path().to_path_buf()]);
        assert!(result.is_err());
    }

    #[test]
    fn discover_model_files_finds_nested_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("hr")).unwrap();
        let nested = dir.path().join("hr/employee.pure");
        let top = dir.path().join("company.pure");
        std::fs::write(&nested, "class Employee {\n}").unwrap();
        std::fs::write(&top, "class Company {\n}").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a model").unwrap();

        let files = discover_model_files(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(files, vec![top, nested]);
    }

    #[test]
    fn discover_model_files_accepts_direct_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("direct.model");
        std::fs::write(&path, "class Direct {\n}").unwrap();
        let files = discover_model_files(std::slice::from_ref(&path)).unwrap();
        assert_eq!(files, vec![path]);
    }

    #[test]
    fn discover_model_files_deduplicates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.pure");
        std::fs::write(&path, "class Test {\n}").unwrap();
        let files = discover_model_files(&[path.clone(), path]).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn parse_all_classes_keeps_file_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("a.pure"),
            "class B {\n  x : String;\n}\n\nclass A {\n}",
        )
        .unwrap();
        std::fs::write(dir.path().join("b.pure"), "class C {\n}").unwrap();

        let classes =
            parse_all_classes(&[dir.path().to_path_buf()], 1024, &quiet_output()).unwrap();
        let names: Vec<&str> = classes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn parse_all_classes_returns_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.pure");
        std::fs::write(&path, "class A {\n  a : String;\n  a : String;\n}").unwrap();

        let err = parse_all_classes(&[path.clone()], 1024, &quiet_output()).unwrap_err();
        match err {
            CliError::Parse { errors, file, .. } => {
                assert_eq!(file, path);
                assert_eq!(errors.len(), 1);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
