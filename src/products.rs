//! Product catalog export: resolve columns, extract records, renumber per
//! manufacturer, write JSON.

use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::{
    cli::ProductsArgs,
    config::{ExportSettings, Overrides},
    extract::{self, Record},
    fields::FieldTable,
    output,
    renumber::{self, GroupCounters},
    resolver::{self, ResolvedMapping},
    workbook::{self, SourceTable},
};

const DEFAULT_PREVIEW_ROWS: usize = 3;

#[derive(Debug, Clone)]
pub struct ProductExport {
    pub mapping: ResolvedMapping,
    pub records: Vec<Record>,
    pub counters: Option<GroupCounters>,
}

pub fn load_field_table(path: Option<&Path>) -> Result<FieldTable> {
    match path {
        Some(path) => FieldTable::load(path),
        None => Ok(FieldTable::products()),
    }
}

/// Runs resolution, extraction, and renumbering over an in-memory table.
pub fn export_products(table: &SourceTable, fields: &FieldTable) -> ProductExport {
    let mapping = resolver::resolve(&table.headers, fields);
    let mut records = extract::extract_records(table, &mapping);
    let counters = fields.renumbering().map(|spec| {
        renumber::renumber(
            &mut records,
            spec.group_field,
            spec.sequence_field,
            GroupCounters::new(),
        )
    });
    ProductExport {
        mapping,
        records,
        counters,
    }
}

pub fn execute(args: &ProductsArgs) -> Result<()> {
    let settings = ExportSettings::resolve(
        &args.source,
        Overrides {
            config: args.config.as_deref(),
            output: args.output.as_deref(),
            fields: args.fields.as_deref(),
            preview: args.preview,
        },
    )?;
    let destination = settings.require_output()?;
    let fields = load_field_table(settings.fields.as_deref())?;

    info!("Reading product catalog {:?}", settings.source);
    let table = workbook::load_table(&settings.source, &settings.load)
        .with_context(|| format!("Loading product catalog {:?}", settings.source))?;
    info!(
        "Loaded {} row(s) across {} column(s)",
        table.row_count(),
        table.headers.len()
    );

    let export = export_products(&table, &fields);
    log_mapping(&export.mapping);
    if let Some(counters) = &export.counters {
        info!("Renumbered records across {} group(s)", counters.group_count());
    }

    output::write_records(destination, &export.records)?;
    info!(
        "Saved {:?} ({} row(s))",
        destination,
        export.records.len()
    );
    output::print_preview(&export.records, settings.preview_or(DEFAULT_PREVIEW_ROWS))
}

fn log_mapping(mapping: &ResolvedMapping) {
    info!("Column mapping:");
    for binding in mapping.bindings() {
        match &binding.column {
            Some(column) => info!(
                "  {:16} <- {:?} ({})",
                binding.field, column.header, column.kind
            ),
            None => warn!(
                "  {:16} <- no matching column; exporting empty values",
                binding.field
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> SourceTable {
        SourceTable::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|row| {
                    row.iter()
                        .map(|cell| (!cell.is_empty()).then(|| cell.to_string()))
                        .collect::<Vec<_>>()
                })
                .collect(),
        )
    }

    #[test]
    fn export_renumbers_seq_per_manufacturer() {
        let source = table(
            &["序号", "生产厂商", "元器件名称"],
            &[&["10", "A", "运放"], &["11", "B", "ADC"], &["12", "A", "DAC"]],
        );
        let export = export_products(&source, &FieldTable::products());
        let seqs: Vec<String> = export.records.iter().map(|r| r.text("seq")).collect();
        assert_eq!(seqs, vec!["1", "1", "2"]);
        assert_eq!(export.records[2].text("name"), "DAC");
        assert_eq!(export.records[0].len(), 18);
    }

    #[test]
    fn tables_without_renumbering_keep_source_values() {
        let fields = FieldTable::new(vec![crate::fields::FieldSpec::new(
            "seq",
            &["序号"],
            &[],
        )]);
        let source = table(&["序号"], &[&["7"]]);
        let export = export_products(&source, &fields);
        assert!(export.counters.is_none());
        assert_eq!(export.records[0].text("seq"), "7");
    }
}
