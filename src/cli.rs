use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::io_utils::parse_delimiter;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Export component catalog spreadsheets to JSON",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Export the product catalog, renumbering `seq` per manufacturer
    Products(ProductsArgs),
    /// Export the three-level classification table
    Classification(ClassificationArgs),
    /// Show which source column each logical field resolves to
    Columns(ColumnsArgs),
    /// Print or save the built-in product field table as YAML
    Fields(FieldsArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Input spreadsheet (.xlsx, .xls, .ods) or delimited file (.csv, .tsv)
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,
    /// Sheet to read (defaults to the first sheet)
    #[arg(long)]
    pub sheet: Option<String>,
    /// Keep tokens such as `NA` or `nan` instead of treating them as empty
    /// (`--keep-placeholders false` overrides a job file)
    #[arg(
        long = "keep-placeholders",
        num_args = 0..=1,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub keep_placeholders: Option<bool>,
    /// Delimiter for CSV input (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of CSV input (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct ProductsArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Destination JSON file
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// YAML job file supplying source, output, and options
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
    /// YAML field table replacing the built-in product columns
    #[arg(short = 'f', long = "fields")]
    pub fields: Option<PathBuf>,
    /// Number of exported records to print (default 3)
    #[arg(long)]
    pub preview: Option<usize>,
}

#[derive(Debug, Args)]
pub struct ClassificationArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Destination JSON file
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// YAML job file supplying source, output, and options
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
    /// Number of exported records to print (default 5)
    #[arg(long)]
    pub preview: Option<usize>,
}

#[derive(Debug, Args)]
pub struct ColumnsArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// YAML job file supplying the source and field table
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
    /// YAML field table replacing the built-in product columns
    #[arg(short = 'f', long = "fields")]
    pub fields: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct FieldsArgs {
    /// Write the table to this file instead of stdout
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}
