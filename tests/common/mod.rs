#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;
use tempfile::{TempDir, tempdir};

/// One cell of a generated worksheet.
#[derive(Debug, Clone, Copy)]
pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    Bool(bool),
    Empty,
}

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.file(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }

    /// Writes a single-sheet workbook with `headers` in row one. An empty header leaves
    /// its cell unwritten.
    pub fn write_xlsx(&self, name: &str, headers: &[&str], rows: &[Vec<Cell<'_>>]) -> PathBuf {
        self.write_xlsx_sheets(name, &[("Sheet1", headers, rows)])
    }

    pub fn write_xlsx_sheets(
        &self,
        name: &str,
        sheets: &[(&str, &[&str], &[Vec<Cell<'_>>])],
    ) -> PathBuf {
        let path = self.file(name);
        let mut workbook = Workbook::new();
        for (sheet_name, headers, rows) in sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(*sheet_name).expect("sheet name");
            for (col, header) in headers.iter().enumerate() {
                if header.is_empty() {
                    continue;
                }
                worksheet
                    .write_string(0, col as u16, *header)
                    .expect("write header");
            }
            for (row_idx, row) in rows.iter().enumerate() {
                let row_num = row_idx as u32 + 1;
                for (col, cell) in row.iter().enumerate() {
                    let col = col as u16;
                    match cell {
                        Cell::Text(text) => {
                            worksheet.write_string(row_num, col, *text).expect("write text");
                        }
                        Cell::Number(value) => {
                            worksheet
                                .write_number(row_num, col, *value)
                                .expect("write number");
                        }
                        Cell::Bool(value) => {
                            worksheet
                                .write_boolean(row_num, col, *value)
                                .expect("write bool");
                        }
                        Cell::Empty => {}
                    }
                }
            }
        }
        workbook.save(&path).expect("save workbook");
        path
    }
}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
