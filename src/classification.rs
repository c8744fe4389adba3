//! Classification table export.
//!
//! The classification workbook has no stable header text, only a stable layout: the
//! first three columns hold the level-one, level-two, and level-three categories.

use anyhow::{Context, Result};
use log::info;

use crate::{
    cli::ClassificationArgs,
    config::{ExportSettings, Overrides},
    extract::Record,
    output,
    workbook::{self, SourceTable},
};

pub const LEVEL_FIELDS: [&str; 3] = ["level1", "level2", "level3"];

const DEFAULT_PREVIEW_ROWS: usize = 5;

pub fn extract_levels(table: &SourceTable) -> Vec<Record> {
    table
        .rows
        .iter()
        .map(|row| {
            LEVEL_FIELDS
                .iter()
                .enumerate()
                .map(|(column, field)| (*field, SourceTable::cell(row, column).unwrap_or("")))
                .collect::<Record>()
        })
        .collect()
}

pub fn execute(args: &ClassificationArgs) -> Result<()> {
    let settings = ExportSettings::resolve(
        &args.source,
        Overrides {
            config: args.config.as_deref(),
            output: args.output.as_deref(),
            preview: args.preview,
            ..Overrides::default()
        },
    )?;
    let destination = settings.require_output()?;

    info!("Reading classification table {:?}", settings.source);
    let table = workbook::load_table(&settings.source, &settings.load)
        .with_context(|| format!("Loading classification table {:?}", settings.source))?;
    if table.headers.len() < LEVEL_FIELDS.len() {
        info!(
            "Source has {} column(s); missing levels export as empty strings",
            table.headers.len()
        );
    }

    let records = extract_levels(&table);
    output::write_records(destination, &records)?;
    info!("Saved {:?} ({} row(s))", destination, records.len());
    output::print_preview(&records, settings.preview_or(DEFAULT_PREVIEW_ROWS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_come_from_leading_columns() {
        let table = SourceTable::new(
            vec!["一级".into(), "二级".into(), "三级".into(), "备注".into()],
            vec![vec![
                Some("数字单片集成电路".into()),
                Some("微处理器".into()),
                Some("中央处理器（CPU）".into()),
                Some("ignored".into()),
            ]],
        );
        let records = extract_levels(&table);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text("level3"), "中央处理器（CPU）");
        assert_eq!(
            records[0].field_names().collect::<Vec<_>>(),
            vec!["level1", "level2", "level3"]
        );
    }

    #[test]
    fn narrow_tables_fill_missing_levels() {
        let table = SourceTable::new(
            vec!["一级".into()],
            vec![vec![Some("分立器件".into())]],
        );
        let records = extract_levels(&table);
        assert_eq!(records[0].text("level1"), "分立器件");
        assert_eq!(records[0].text("level2"), "");
        assert_eq!(records[0].text("level3"), "");
    }
}
