//! Declarative field-candidate tables.
//!
//! A [`FieldTable`] lists the logical fields an export produces, in output order,
//! together with the header names and keywords used to bind each field to a physical
//! column (see [`crate::resolver`]). Tables can be loaded from and saved to YAML so a
//! catalog whose headers drift can be handled without a rebuild.

use std::{collections::HashSet, path::Path};

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::yaml_io;

pub const SEQUENCE_FIELD: &str = "seq";
pub const MANUFACTURER_FIELD: &str = "manufacturer";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldTableError {
    #[error("Field table entry {0} has an empty name")]
    EmptyName(usize),
    #[error("Field '{0}' is declared more than once")]
    DuplicateField(String),
    #[error("Renumbering refers to unknown field '{0}'")]
    UnknownRenumberField(String),
    #[error("Renumbering needs both sequence_field and group_field")]
    IncompleteRenumbering,
}

/// Candidate headers and fallback keywords for one logical field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exact: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

impl FieldSpec {
    pub fn new(name: &str, exact: &[&str], keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            exact: exact.iter().map(|s| s.to_string()).collect(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTable {
    pub fields: Vec<FieldSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_field: Option<String>,
}

/// Fields renumbered per group after extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renumbering<'a> {
    pub sequence_field: &'a str,
    pub group_field: &'a str,
}

impl FieldTable {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self {
            fields,
            sequence_field: None,
            group_field: None,
        }
    }

    pub fn with_renumbering(mut self, sequence_field: &str, group_field: &str) -> Self {
        self.sequence_field = Some(sequence_field.to_string());
        self.group_field = Some(group_field.to_string());
        self
    }

    /// The domestic component catalog layout, including the header variants seen
    /// across catalog revisions.
    pub fn products() -> Self {
        Self::new(vec![
            FieldSpec::new(SEQUENCE_FIELD, &["序号"], &["序号"]),
            FieldSpec::new("level1", &["一级分类"], &["一级"]),
            FieldSpec::new("level2", &["二级分类"], &["二级"]),
            FieldSpec::new("level3", &["三级分类"], &["三级"]),
            FieldSpec::new("name", &["元器件名称"], &["元器件", "名称"]),
            FieldSpec::new(MANUFACTURER_FIELD, &["生产厂商"], &["厂商", "生产"]),
            FieldSpec::new("model", &["规格型号"], &["规格", "型号"]),
            FieldSpec::new("key_specs", &["关键功能性能指标"], &["关键", "性能", "指标"]),
            FieldSpec::new("temperature_range", &["工作温度范围（单位：℃）"], &["温度"]),
            FieldSpec::new(
                "radiation",
                &["抗辐照指标（单位：kRad. Si）", "抗辐照指标\n（单位：kRad.Si）"],
                &["辐照", "krad"],
            ),
            FieldSpec::new("package", &["封装形式"], &["封装"]),
            FieldSpec::new("quality", &["质量等级"], &["质量"]),
            FieldSpec::new("price_range", &["参考价格区间"], &["价格"]),
            FieldSpec::new(
                "lead_time",
                &["供货周期区间", "货期周期", "供期周期"],
                &["供货", "货期", "供期"],
            ),
            FieldSpec::new("space_supply", &["商业航天供货经历", "航天供货"], &["航天"]),
            FieldSpec::new("is_promoted", &["是否主推产品"], &["主推"]),
            FieldSpec::new("contact", &["联系人"], &["联系人", "联系"]),
            FieldSpec::new("material_code", &["材料编号", "材料编码"], &["材料", "物料"]),
        ])
        .with_renumbering(SEQUENCE_FIELD, MANUFACTURER_FIELD)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let table: FieldTable = yaml_io::load_from_path(path)
            .with_context(|| format!("Loading field table from {path:?}"))?;
        table
            .validate()
            .with_context(|| format!("Validating field table {path:?}"))?;
        table.warn_unmatchable_keywords();
        Ok(table)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        yaml_io::save_to_path(path, self)
            .with_context(|| format!("Writing field table to {path:?}"))
    }

    pub fn to_yaml(&self) -> Result<String> {
        yaml_io::to_string(self)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn renumbering(&self) -> Option<Renumbering<'_>> {
        match (&self.sequence_field, &self.group_field) {
            (Some(sequence_field), Some(group_field)) => Some(Renumbering {
                sequence_field,
                group_field,
            }),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), FieldTableError> {
        let mut seen = HashSet::new();
        for (idx, field) in self.fields.iter().enumerate() {
            if field.name.trim().is_empty() {
                return Err(FieldTableError::EmptyName(idx + 1));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(FieldTableError::DuplicateField(field.name.clone()));
            }
        }
        match (&self.sequence_field, &self.group_field) {
            (None, None) => Ok(()),
            (Some(sequence), Some(group)) => {
                for name in [sequence, group] {
                    if !seen.contains(name.as_str()) {
                        return Err(FieldTableError::UnknownRenumberField(name.clone()));
                    }
                }
                Ok(())
            }
            _ => Err(FieldTableError::IncompleteRenumbering),
        }
    }

    // Headers are lower-cased before keyword matching, so an upper-case keyword is dead.
    fn warn_unmatchable_keywords(&self) {
        for field in &self.fields {
            for keyword in &field.keywords {
                if keyword.chars().any(char::is_uppercase) {
                    warn!(
                        "Keyword '{}' for field '{}' has upper-case characters; will never match",
                        keyword, field.name
                    );
                }
            }
        }
    }
}
