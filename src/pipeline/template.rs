//! CSV stage template import.
//!
//! Recruiters hand around pipeline templates as small CSV exports with
//! `Name`, `Order`, `Color`, and `Description` columns. Parsing produces
//! [`StageDraft`]s; creation still flows through the repository so the usual
//! validation and color derivation apply.

use std::io::Read;

use serde::{Deserialize, Deserializer};

use super::domain::StageDraft;

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("failed to read stage template: {0}")]
    Csv(#[from] csv::Error),
    #[error("stage template row {row} has an empty name")]
    EmptyName { row: usize },
}

#[derive(Debug, Deserialize)]
struct TemplateRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Order")]
    order: u32,
    #[serde(rename = "Color", default, deserialize_with = "empty_string_as_none")]
    color: Option<String>,
    #[serde(
        rename = "Description",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    description: Option<String>,
}

pub fn parse_stage_templates<R: Read>(reader: R) -> Result<Vec<StageDraft>, TemplateError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut drafts = Vec::new();
    for (index, record) in csv_reader.deserialize::<TemplateRow>().enumerate() {
        let row = record?;
        if row.name.trim().is_empty() {
            // Row numbering counts the header line.
            return Err(TemplateError::EmptyName { row: index + 2 });
        }
        drafts.push(StageDraft {
            name: row.name,
            order: row.order,
            color: row.color,
            description: row.description,
        });
    }
    Ok(drafts)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
