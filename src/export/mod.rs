use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::engine::StatsResult;

pub mod csv;
pub mod json;
pub mod text;

/// Export format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
    Text,
}

impl ExportFormat {
    /// File extension conventionally used for the format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Text => "txt",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "text" | "txt" => Ok(ExportFormat::Text),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Export errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] ::csv::Error),
}

/// Write a stats result to `output_path` in the given format
pub fn export_stats<P: AsRef<Path>>(
    stats: &StatsResult,
    format: ExportFormat,
    output_path: P,
) -> Result<(), ExportError> {
    let output_path = output_path.as_ref();

    match format {
        ExportFormat::Json => json::export_json(stats, output_path)?,
        ExportFormat::Csv => csv::export_daily_rows(stats, output_path)?,
        ExportFormat::Text => text::export_report(stats, output_path)?,
    }

    tracing::info!(
        format = ?format,
        path = %output_path.display(),
        "Stats exported"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compute_activity_stats;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert!(matches!(
            "xml".parse::<ExportFormat>(),
            Err(ExportError::UnsupportedFormat(f)) if f == "xml"
        ));
        assert_eq!(ExportFormat::Text.extension(), "txt");
    }

    #[test]
    fn test_export_every_format() {
        let today = NaiveDate::from_ymd_opt(2024, 9, 30).unwrap();
        let stats = compute_activity_stats(today, &[], &[], &[], None, None);
        let dir = tempdir().unwrap();

        for format in [ExportFormat::Json, ExportFormat::Csv, ExportFormat::Text] {
            let path = dir.path().join(format!("stats.{}", format.extension()));
            export_stats(&stats, format, &path).unwrap();
            assert!(std::fs::metadata(&path).unwrap().len() > 0);
        }
    }
}
