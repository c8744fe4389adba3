pub mod classification;
pub mod cli;
pub mod columns;
pub mod config;
pub mod extract;
pub mod fields;
pub mod io_utils;
pub mod output;
pub mod products;
pub mod renumber;
pub mod resolver;
pub mod table;
pub mod workbook;
mod yaml_io;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, info};

use crate::{
    cli::{Cli, Commands},
    fields::FieldTable,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("catalog_export", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Products(args) => products::execute(&args),
        Commands::Classification(args) => classification::execute(&args),
        Commands::Columns(args) => columns::execute(&args),
        Commands::Fields(args) => handle_fields(&args),
    }
}

fn handle_fields(args: &cli::FieldsArgs) -> Result<()> {
    let table = FieldTable::products();
    match &args.output {
        Some(path) => {
            table.save(path)?;
            info!(
                "Wrote {} field definition(s) to {:?}",
                table.fields.len(),
                path
            );
        }
        None => print!("{}", table.to_yaml()?),
    }
    Ok(())
}
