//! Job configuration.
//!
//! Paths are never compiled in. They come from command-line flags or from a YAML job
//! file such as:
//!
//! ```yaml
//! source: 商业航天产品数据信息表.xlsx
//! output: out/domestic_products.json
//! sheet: Sheet1
//! fields: product_fields.yaml
//! preview: 3
//! keep_placeholders: false
//! ```
//!
//! Relative paths in a job file are resolved against the job file's directory, and
//! any flag given on the command line wins over the job file, including
//! `--keep-placeholders false` against `keep_placeholders: true`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::{
    cli::SourceArgs,
    workbook::{LoadOptions, PlaceholderPolicy},
    yaml_io,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobConfig {
    #[serde(default)]
    pub source: Option<PathBuf>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub sheet: Option<String>,
    #[serde(default)]
    pub fields: Option<PathBuf>,
    #[serde(default)]
    pub preview: Option<usize>,
    #[serde(default)]
    pub keep_placeholders: Option<bool>,
}

impl JobConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let mut config: JobConfig = yaml_io::load_from_path(path)
            .with_context(|| format!("Loading job configuration from {path:?}"))?;
        let base = path.parent().filter(|p| !p.as_os_str().is_empty());
        config.source = config.source.map(|p| resolve_relative(base, &p));
        config.output = config.output.map(|p| resolve_relative(base, &p));
        config.fields = config.fields.map(|p| resolve_relative(base, &p));
        Ok(config)
    }
}

pub fn resolve_relative(base: Option<&Path>, path: &Path) -> PathBuf {
    match base {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path.to_path_buf(),
    }
}

/// Options a single run needs after flags and job file are merged.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub source: PathBuf,
    pub output: Option<PathBuf>,
    pub fields: Option<PathBuf>,
    pub preview: Option<usize>,
    pub load: LoadOptions,
}

/// Flags that override a job file; `None` means "not given on the command line".
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides<'a> {
    pub config: Option<&'a Path>,
    pub output: Option<&'a Path>,
    pub fields: Option<&'a Path>,
    pub preview: Option<usize>,
}

impl ExportSettings {
    pub fn resolve(source: &SourceArgs, overrides: Overrides<'_>) -> Result<Self> {
        let job = match overrides.config {
            Some(path) => JobConfig::load(path)?,
            None => JobConfig::default(),
        };
        let input = source.input.clone().or(job.source).ok_or_else(|| {
            anyhow!("No source file given; pass --input or set `source` in --config")
        })?;
        let keep_placeholders = source
            .keep_placeholders
            .or(job.keep_placeholders)
            .unwrap_or(false);
        Ok(Self {
            source: input,
            output: overrides.output.map(Path::to_path_buf).or(job.output),
            fields: overrides.fields.map(Path::to_path_buf).or(job.fields),
            preview: overrides.preview.or(job.preview),
            load: LoadOptions {
                sheet: source.sheet.clone().or(job.sheet),
                placeholders: if keep_placeholders {
                    PlaceholderPolicy::Keep
                } else {
                    PlaceholderPolicy::TreatAsMissing
                },
                delimiter: source.delimiter,
                input_encoding: source.input_encoding.clone(),
            },
        })
    }

    pub fn require_output(&self) -> Result<&Path> {
        self.output.as_deref().ok_or_else(|| {
            anyhow!("No output file given; pass --output or set `output` in --config")
        })
    }

    pub fn preview_or(&self, default: usize) -> usize {
        self.preview.unwrap_or(default)
    }
}
