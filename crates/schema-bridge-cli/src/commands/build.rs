use std::path::{Path, PathBuf};

use schema_bridge_core::document;

use crate::cli::{BuildArgs, GlobalOpts};
use crate::commands::parse::parse_all_classes;
use crate::commands::write_output;
use crate::config::{build_type_mapper, load_config, resolve_schema_paths};
use crate::error::CliError;
use crate::output::OutputContext;

/// Run the `build` command: model files to a columnar schema document.
pub async fn run(
    args: BuildArgs,
    global: &GlobalOpts,
    output: &OutputContext,
) -> Result<(), CliError> {
    let config = load_config(global.config.as_deref())?;
    let mapper = build_type_mapper(&config, global)?;
    let paths = resolve_schema_paths(&config, &args.paths);

    let classes = parse_all_classes(&paths, config.cli.max_input_bytes, output)?;
    let translated = schema_bridge_core::build(&classes, &mapper);
    output.unmapped_types(&translated.warnings);

    let tables = translated.into_value();
    let text = document::to_json(&tables).map_err(|source| CliError::Document {
        file: destination(args.output.as_deref()),
        source,
    })?;
    write_output(output, args.output.as_deref(), &text)?;

    output.success(&format!("Built {} tables.", tables.len()));
    Ok(())
}

/// Where the document is written, for error reports.
fn destination(output: Option<&Path>) -> PathBuf {
    output.map_or_else(|| PathBuf::from("<stdout>"), Path::to_path_buf)
}
