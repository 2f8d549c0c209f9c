//! Reloadable JSON project files.

use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Block, BlockKind};

pub const PROJECT_VERSION: &str = "2.0";
pub const DEFAULT_THEME: &str = "tsw";

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("Not a JSON project file: {0}")]
    NotJson(String),
    #[error("Invalid project file: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("Invalid project file: missing reportData list")]
    MissingReportData,
    #[error("Failed to serialize project: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// On-disk shape of a saved project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    #[serde(default)]
    pub version: String,
    /// ISO-8601 save time, kept as written
    #[serde(default)]
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(rename = "reportData")]
    pub report_data: Vec<Block>,
}

impl ProjectFile {
    pub fn new(blocks: Vec<Block>, theme: &str, saved_at: DateTime<Utc>) -> Self {
        Self {
            version: PROJECT_VERSION.to_string(),
            timestamp: saved_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            theme: Some(theme.to_string()),
            report_data: blocks,
        }
    }

    /// Parse project JSON.
    ///
    /// `reportData` must be present and a list; anything else malformed is
    /// reported as a parse error before any state is touched. Tables are
    /// normalized to a rectangular grid of 1 to 6 columns.
    pub fn parse(text: &str) -> Result<Self, ProjectError> {
        let value: serde_json::Value = serde_json::from_str(text).map_err(ProjectError::Parse)?;
        if !value.get("reportData").is_some_and(serde_json::Value::is_array) {
            return Err(ProjectError::MissingReportData);
        }
        let mut file: ProjectFile = serde_json::from_value(value).map_err(ProjectError::Parse)?;
        for block in &mut file.report_data {
            if let BlockKind::Table(table) = &mut block.kind {
                table.normalize();
            }
        }
        Ok(file)
    }

    /// Pretty-printed JSON with two-space indentation
    pub fn to_json(&self) -> Result<String, ProjectError> {
        serde_json::to_string_pretty(self).map_err(ProjectError::Serialize)
    }
}

/// Only `.json` names are accepted for loading
pub fn check_file_name(file_name: &str) -> Result<(), ProjectError> {
    if file_name.ends_with(".json") {
        Ok(())
    } else {
        Err(ProjectError::NotJson(file_name.to_string()))
    }
}

/// Suggested file name, e.g. `REPORTE-FECHA-2024-05-01-HORA-13-45.json`
pub fn project_file_name(now: DateTime<Local>) -> String {
    now.format("REPORTE-FECHA-%Y-%m-%d-HORA-%H-%M.json").to_string()
}
