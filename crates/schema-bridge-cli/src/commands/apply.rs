use std::collections::BTreeSet;

use schema_bridge_backend::{ApplyReport, BackendError, LocalWarehouse, MemoryWarehouse, SchemaSink};
use schema_bridge_core::types::TableDescriptor;

use crate::cli::{ApplyArgs, GlobalOpts};
use crate::commands::parse::parse_all_classes;
use crate::config::{build_type_mapper, load_config, resolve_schema_paths, resolve_warehouse_dir};
use crate::error::CliError;
use crate::output::OutputContext;
use crate::progress::ApplyProgress;

/// Run the `apply` command: parse models, build tables, merge them into the
/// warehouse.
pub async fn run(
    args: ApplyArgs,
    global: &GlobalOpts,
    output: &OutputContext,
) -> Result<(), CliError> {
    let config = load_config(global.config.as_deref())?;
    let mapper = build_type_mapper(&config, global)?;
    let paths = resolve_schema_paths(&config, &args.paths);

    output.status("Parsing models...");
    let classes = parse_all_classes(&paths, config.cli.max_input_bytes, output)?;
    output.status(&format!("  {} classes parsed.", classes.len()));

    let translated = schema_bridge_core::build(&classes, &mapper);
    output.unmapped_types(&translated.warnings);
    let tables = translated.into_value();

    let warehouse = LocalWarehouse::new(resolve_warehouse_dir(&config, global));
    let progress = ApplyProgress::start(output, warehouse.root(), args.dry_run);
    let reports = match apply_tables(&warehouse, &tables, args.dry_run, &progress).await {
        Ok(reports) => reports,
        Err(e) => {
            progress.fail(&e);
            return Err(e.into());
        }
    };
    progress.finish(reports.len());

    output.retained_fields(&reports);
    output.apply_summary(&reports, args.dry_run);
    Ok(())
}

/// Plans the whole batch, then writes it unless `dry_run` is set.
///
/// A conflict anywhere in the batch fails before the warehouse is touched.
async fn apply_tables(
    warehouse: &LocalWarehouse,
    tables: &[TableDescriptor],
    dry_run: bool,
    progress: &ApplyProgress,
) -> Result<Vec<ApplyReport>, BackendError> {
    let reports = plan(warehouse, tables, progress).await?;
    if !dry_run {
        for table in tables {
            warehouse.apply_schema(&table.name, table).await?;
        }
    }
    Ok(reports)
}

/// Runs every table through an in-memory copy of the tables it touches.
///
/// Later tables with the same name merge into earlier ones, exactly as the
/// real apply would.
async fn plan(
    warehouse: &LocalWarehouse,
    tables: &[TableDescriptor],
    progress: &ApplyProgress,
) -> Result<Vec<ApplyReport>, BackendError> {
    let scratch = MemoryWarehouse::new();
    let mut seeded = BTreeSet::new();
    for table in tables {
        if !seeded.insert(&table.name) {
            continue;
        }
        if let Some(existing) = warehouse.fetch_schema(&table.name).await? {
            scratch.apply_schema(&table.name, &existing).await?;
        }
    }

    let mut reports = Vec::with_capacity(tables.len());
    for table in tables {
        progress.table(&table.name);
        reports.push(scratch.apply_schema(&table.name, table).await?);
    }
    Ok(reports)
}
