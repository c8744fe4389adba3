use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

fn read_to_string(path: &Path) -> Result<String> {
    let mut file = File::open(path).with_context(|| format!("Opening YAML file {path:?}"))?;
    let mut buf = String::new();
    file.read_to_string(&mut buf)
        .with_context(|| format!("Reading YAML file {path:?}"))?;
    Ok(buf)
}

pub fn load_from_path<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = read_to_string(path)?;
    serde_yaml::from_str(&raw).with_context(|| format!("Parsing YAML file {path:?}"))
}

pub fn save_to_path<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let serialized = to_string(data)?;
    let file = File::create(path).with_context(|| format!("Creating YAML file {path:?}"))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(serialized.as_bytes())?;
    writer.flush()?;
    Ok(())
}

pub fn to_string<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_yaml::to_string(value)?)
}
