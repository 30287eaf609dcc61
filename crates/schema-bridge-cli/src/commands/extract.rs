use std::path::PathBuf;

use schema_bridge_backend::{LocalWarehouse, SchemaSink};
use schema_bridge_core::types::Identifier;

use crate::cli::{ExtractArgs, GlobalOpts};
use crate::commands::write_output;
use crate::config::{build_type_mapper, load_config, resolve_warehouse_dir};
use crate::error::CliError;
use crate::output::OutputContext;

/// Run the `extract` command: read warehouse tables back into model text.
pub async fn run(
    args: ExtractArgs,
    global: &GlobalOpts,
    output: &OutputContext,
) -> Result<(), CliError> {
    let config = load_config(global.config.as_deref())?;
    let mapper = build_type_mapper(&config, global)?;
    let warehouse = LocalWarehouse::new(resolve_warehouse_dir(&config, global));

    let mut tables = Vec::with_capacity(args.tables.len());
    for name in &args.tables {
        let table_name = Identifier::new(name.as_str()).map_err(|_| CliError::Config {
            message: format!("'{name}' is not a valid table name"),
        })?;
        let table = warehouse
            .fetch_schema(&table_name)
            .await?
            .ok_or_else(|| CliError::TableNotFound { name: name.clone() })?;
        tables.push(table);
    }

    let translated =
        schema_bridge_core::read(&tables, &mapper).map_err(|source| CliError::Malformed {
            file: warehouse_file(warehouse.root(), source.class_name()),
            source,
        })?;
    output.unmapped_types(&translated.warnings);

    let classes = translated.into_value();
    write_output(
        output,
        args.output.as_deref(),
        &schema_bridge_dsl::emit(&classes),
    )?;

    output.success(&format!("Extracted {} classes.", classes.len()));
    Ok(())
}

fn warehouse_file(root: &std::path::Path, table: Option<&str>) -> PathBuf {
    match table {
        Some(table) => root.join(format!("{table}.json")),
        None => root.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warehouse_file_names_table() {
        let root = std::path::Path::new("/data/wh");
        assert_eq!(
            warehouse_file(root, Some("Employee")),
            PathBuf::from("/data/wh/Employee.json")
        );
        assert_eq!(warehouse_file(root, None), PathBuf::from("/data/wh"));
    }
}
