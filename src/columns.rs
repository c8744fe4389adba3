//! Resolved-mapping report.
//!
//! Loads a source table, resolves the field table against its headers, and prints one
//! line per logical field showing the chosen column and how it was matched.

use anyhow::Result;
use log::info;

use crate::{
    cli::ColumnsArgs,
    config::{ExportSettings, Overrides},
    products::load_field_table,
    resolver::{self, ResolvedMapping},
    table, workbook,
};

pub fn execute(args: &ColumnsArgs) -> Result<()> {
    let settings = ExportSettings::resolve(
        &args.source,
        Overrides {
            config: args.config.as_deref(),
            fields: args.fields.as_deref(),
            ..Overrides::default()
        },
    )?;
    let fields = load_field_table(settings.fields.as_deref())?;
    let source = workbook::load_table(&settings.source, &settings.load)?;
    let mapping = resolver::resolve(&source.headers, &fields);

    let headers = vec![
        "field".to_string(),
        "column".to_string(),
        "#".to_string(),
        "match".to_string(),
    ];
    table::print_table(&headers, &mapping_rows(&mapping));
    info!(
        "Resolved {} of {} field(s) against {} column(s) in {:?}",
        mapping.len() - mapping.unresolved().count(),
        mapping.len(),
        source.headers.len(),
        settings.source
    );
    Ok(())
}

pub fn mapping_rows(mapping: &ResolvedMapping) -> Vec<Vec<String>> {
    mapping
        .bindings()
        .iter()
        .map(|binding| match &binding.column {
            Some(column) => vec![
                binding.field.clone(),
                column.header.clone(),
                (column.index + 1).to_string(),
                column.kind.to_string(),
            ],
            None => vec![
                binding.field.clone(),
                "<none>".to_string(),
                String::new(),
                "unresolved".to_string(),
            ],
        })
        .collect()
}
