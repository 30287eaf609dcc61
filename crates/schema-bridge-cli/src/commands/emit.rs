use schema_bridge_core::document;

use crate::cli::{EmitArgs, GlobalOpts};
use crate::commands::{read_source, write_output};
use crate::config::{build_type_mapper, load_config};
use crate::error::CliError;
use crate::output::OutputContext;

/// Run the `emit` command: columnar schema document to model text.
pub async fn run(
    args: EmitArgs,
    global: &GlobalOpts,
    output: &OutputContext,
) -> Result<(), CliError> {
    let config = load_config(global.config.as_deref())?;
    let mapper = build_type_mapper(&config, global)?;

    let text = read_source(&args.file, config.cli.max_input_bytes)?;
    let tables = document::from_json(&text).map_err(|source| CliError::Document {
        file: args.file.clone(),
        source,
    })?;

    let translated =
        schema_bridge_core::read(&tables, &mapper).map_err(|source| CliError::Malformed {
            file: args.file.clone(),
            source,
        })?;
    output.unmapped_types(&translated.warnings);

    let classes = translated.into_value();
    write_output(
        output,
        args.output.as_deref(),
        &schema_bridge_dsl::emit(&classes),
    )?;

    output.success(&format!("Emitted {} classes.", classes.len()));
    Ok(())
}
