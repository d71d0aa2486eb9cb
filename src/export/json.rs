use super::ExportError;
use std::io::Write;
use std::path::Path;

/// Render any serializable stats structure as pretty JSON
pub fn to_json_string<T: serde::Serialize>(data: &T) -> Result<String, ExportError> {
    serde_json::to_string_pretty(data).map_err(|e| ExportError::SerializationError(e.to_string()))
}

/// Export any serializable stats structure to a JSON file
pub fn export_json<T, P>(data: &T, output_path: P) -> Result<(), ExportError>
where
    T: serde::Serialize,
    P: AsRef<Path>,
{
    let json_data = to_json_string(data)?;

    let mut file = std::fs::File::create(output_path)?;
    file.write_all(json_data.as_bytes())?;
    writeln!(file)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{compute_activity_stats, StatsResult};
    use crate::models::WaterIntakeLog;
    use chrono::NaiveDate;
    use tempfile::NamedTempFile;

    #[test]
    fn test_export_stats_result() {
        let today = NaiveDate::from_ymd_opt(2024, 9, 30).unwrap();
        let water = vec![WaterIntakeLog {
            date: today,
            glasses: 9,
        }];
        let stats = compute_activity_stats(today, &[], &water, &[], None, None);

        let temp_file = NamedTempFile::new().unwrap();
        export_json(&stats, temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("\"currentStreak\": 1"));
        assert!(content.contains("\"bestDay\""));
        assert!(content.contains("\"date\": \"2024-09-30\""));

        let parsed: StatsResult = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, stats);
    }

    #[test]
    fn test_export_json_generic() {
        #[derive(serde::Serialize)]
        struct Snapshot {
            label: String,
            value: u32,
        }

        let data = Snapshot {
            label: "streak".to_string(),
            value: 12,
        };

        let temp_file = NamedTempFile::new().unwrap();
        export_json(&data, temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("\"label\": \"streak\""));
        assert!(content.contains("\"value\": 12"));
    }
}
