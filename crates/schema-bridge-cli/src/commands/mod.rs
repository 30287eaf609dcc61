pub mod apply;
pub mod build;
pub mod completions;
pub mod emit;
pub mod extract;
pub mod parse;

use std::path::Path;

use crate::error::CliError;
use crate::output::OutputContext;

/// Read an input file, refusing anything over `limit` bytes.
pub fn read_source(path: &Path, limit: u64) -> Result<String, CliError> {
    let io_error = |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let size = std::fs::metadata(path).map_err(io_error)?.len();
    if size > limit {
        return Err(CliError::InputTooLarge {
            path: path.to_path_buf(),
            size,
            limit,
        });
    }
    std::fs::read_to_string(path).map_err(io_error)
}

/// Write a command result to `path`, or to stdout when no path is given.
pub fn write_output(output: &OutputContext, path: Option<&Path>, text: &str) -> Result<(), CliError> {
    let Some(path) = path else {
        output.print_text(text);
        return Ok(());
    };

    let mut contents = text.to_string();
    if !contents.is_empty() && !contents.ends_with('\n') {
        contents.push('\n');
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| CliError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    std::fs::write(path, contents).map_err(|e| CliError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    output.success(&format!("Wrote {}", path.display()));
    Ok(())
}
