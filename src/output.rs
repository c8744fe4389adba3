//! JSON output.
//!
//! Records are written as a pretty-printed UTF-8 array with non-ASCII text left
//! unescaped. The document is streamed into a temporary file beside the destination
//! and renamed into place only once it is complete, so a failed run never leaves a
//! truncated export behind.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use tempfile::NamedTempFile;

use crate::extract::Record;

pub fn write_records(path: &Path, records: &[Record]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !dir.is_dir() {
        return Err(anyhow!("Output directory {dir:?} does not exist"));
    }
    let staging = NamedTempFile::new_in(dir)
        .with_context(|| format!("Creating temporary output in {dir:?}"))?;
    {
        let mut writer = BufWriter::new(staging.as_file());
        serde_json::to_writer_pretty(&mut writer, records)
            .with_context(|| format!("Serializing {} record(s)", records.len()))?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    staging
        .as_file()
        .sync_all()
        .with_context(|| format!("Flushing output for {path:?}"))?;
    staging
        .persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("Writing output file {path:?}"))?;
    Ok(())
}

pub fn read_records(path: &Path) -> Result<Vec<Record>> {
    let file = File::open(path).with_context(|| format!("Opening JSON file {path:?}"))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Parsing JSON records from {path:?}"))
}

/// Compact single-line form used for previews.
pub fn preview_line(record: &Record) -> Result<String> {
    Ok(serde_json::to_string(record)?)
}

pub fn print_preview(records: &[Record], rows: usize) -> Result<()> {
    if rows == 0 || records.is_empty() {
        return Ok(());
    }
    let shown = rows.min(records.len());
    println!("preview (first {shown} row(s)):");
    for record in &records[..shown] {
        println!("{}", preview_line(record)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn non_ascii_is_written_literally_with_indentation() {
        let record: Record = [("manufacturer", "甲厂"), ("temperature_range", "-55℃~125℃")]
            .into_iter()
            .collect();
        let dir = tempdir().expect("temp dir");
        let target = dir.path().join("out.json");
        write_records(&target, &[record]).expect("write");
        let json = std::fs::read_to_string(&target).expect("read");
        assert!(json.contains("\"manufacturer\": \"甲厂\""));
        assert!(json.contains("-55℃~125℃"));
        assert!(json.starts_with("[\n  {\n    \"manufacturer\""));
    }

    #[test]
    fn missing_directory_fails_without_creating_output() {
        let dir = tempdir().expect("temp dir");
        let target = dir.path().join("missing").join("out.json");
        let err = write_records(&target, &[]).expect_err("should fail");
        assert!(err.to_string().contains("does not exist"));
        assert!(!target.exists());
    }

    #[test]
    fn empty_export_is_an_empty_array() {
        let dir = tempdir().expect("temp dir");
        let target = dir.path().join("out.json");
        write_records(&target, &[]).expect("write");
        let contents = std::fs::read_to_string(&target).expect("read");
        assert_eq!(contents.trim(), "[]");
        assert!(read_records(&target).expect("read back").is_empty());
    }
}
