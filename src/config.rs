use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::adherence::DietScoring;
use crate::error::StatsError;
use crate::insights::InsightThresholds;
use crate::logging::LogConfig;
use crate::lookup::DuplicatePolicy;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application metadata
    #[serde(default)]
    pub metadata: ConfigMetadata,

    /// Analytics engine settings
    #[serde(default)]
    pub stats: StatsConfig,

    /// Logging output settings
    #[serde(default)]
    pub logging: LogConfig,
}

/// Configuration metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Everything that tunes a stats run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Same-day duplicate handling for water and workout lookups
    pub lookup: DuplicatePolicy,

    /// Fallbacks for plans that are missing or carry no usable goal
    pub defaults: PlanDefaults,

    /// Fixed daily targets
    pub targets: DailyTargets,

    /// Diet adherence tolerance band
    pub scoring: DietScoring,

    /// Insight trigger levels
    pub insights: InsightThresholds,
}

/// Goals assumed when the user has no active plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanDefaults {
    /// kcal per day
    pub daily_calorie_goal: f64,

    pub planned_sessions_per_week: u32,
}

/// Daily targets that do not come from a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyTargets {
    /// Glasses of water per day
    pub hydration_goal_glasses: u32,

    /// Breakfast, lunch and dinner
    pub expected_meals: u32,
}

// NaN is not positive.
fn is_positive(value: f64) -> bool {
    value > 0.0
}

impl StatsConfig {
    /// Reject settings that would turn a score or average into a division
    /// by zero
    pub fn validate(&self) -> crate::error::Result<()> {
        let invalid = |reason: &str| Err(StatsError::Configuration(reason.to_string()));

        if self.defaults.planned_sessions_per_week == 0 {
            return invalid("stats.defaults.planned_sessions_per_week must be at least 1");
        }
        if !is_positive(self.defaults.daily_calorie_goal) {
            return invalid("stats.defaults.daily_calorie_goal must be positive");
        }
        if !is_positive(self.scoring.kcal_per_point) {
            return invalid("stats.scoring.kcal_per_point must be positive");
        }
        if self.targets.hydration_goal_glasses == 0 {
            return invalid("stats.targets.hydration_goal_glasses must be at least 1");
        }
        Ok(())
    }
}

impl Default for ConfigMetadata {
    fn default() -> Self {
        let now = Utc::now();
        ConfigMetadata {
            version: "1.0".to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Default for PlanDefaults {
    fn default() -> Self {
        PlanDefaults {
            daily_calorie_goal: 2000.0,
            planned_sessions_per_week: 3,
        }
    }
}

impl Default for DailyTargets {
    fn default() -> Self {
        DailyTargets {
            hydration_goal_glasses: 8,
            expected_meals: 3,
        }
    }
}

/// Configuration management implementation
impl AppConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML configuration")?;
        config.stats.validate()?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.metadata.updated_at = Utc::now();

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".fitstats")
            .join("config.toml")
    }

    /// Load configuration from `path` (or the default location), falling back
    /// to defaults when the file is missing or unreadable
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_config_path);

        match Self::load_from_file(&config_path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(
                    path = %config_path.display(),
                    error = %err,
                    "Config file not loaded, using defaults"
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ActivityStatsEngine;
    use crate::models::ActivityInput;
    use crate::window::DateWindow;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.metadata.version, deserialized.metadata.version);
        assert_eq!(config.stats, deserialized.stats);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let toml_str = r#"
            [stats.defaults]
            daily_calorie_goal = 1800.0

            [stats.insights]
            min_streak_days = 5
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(config.stats.defaults.daily_calorie_goal, 1800.0);
        assert_eq!(config.stats.defaults.planned_sessions_per_week, 3);
        assert_eq!(config.stats.insights.min_streak_days, 5);
        assert_eq!(config.stats.insights.calorie_burn_growth, 1.1);
        assert_eq!(config.stats.targets.hydration_goal_glasses, 8);
        assert_eq!(config.stats.lookup, DuplicatePolicy::FirstMatch);
    }

    #[test]
    fn test_duplicate_policy_in_toml() {
        let config: AppConfig = toml::from_str("[stats]\nlookup = \"last_match\"\n").unwrap();
        assert_eq!(config.stats.lookup, DuplicatePolicy::LastMatch);
    }

    #[test]
    fn test_config_file_io() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut original_config = AppConfig::default();
        original_config.stats.scoring.tolerance_kcal = 150.0;

        original_config.save_to_file(&config_path).unwrap();
        let loaded_config = AppConfig::load_from_file(&config_path).unwrap();

        assert_eq!(loaded_config.stats.scoring.tolerance_kcal, 150.0);
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("absent.toml");

        let config = AppConfig::load_or_default(Some(&missing));
        assert_eq!(config.stats, StatsConfig::default());
    }

    #[test]
    fn test_default_stats_config_is_valid() {
        assert!(StatsConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_divisors() {
        let mut config = StatsConfig::default();
        config.defaults.planned_sessions_per_week = 0;
        assert!(matches!(config.validate(), Err(StatsError::Configuration(_))));

        let mut config = StatsConfig::default();
        config.defaults.daily_calorie_goal = 0.0;
        assert!(config.validate().is_err());

        let mut config = StatsConfig::default();
        config.scoring.kcal_per_point = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = StatsConfig::default();
        config.targets.hydration_goal_glasses = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_planned_sessions_falls_back_to_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[stats.defaults]\nplanned_sessions_per_week = 0\n").unwrap();

        let err = AppConfig::load_from_file(&config_path).unwrap_err();
        assert!(err.to_string().contains("planned_sessions_per_week"));

        let config = AppConfig::load_or_default(Some(&config_path));
        assert_eq!(config.stats.defaults.planned_sessions_per_week, 3);

        let window = DateWindow::new(NaiveDate::from_ymd_opt(2024, 9, 30).unwrap());
        let engine = ActivityStatsEngine::with_config(config.stats);
        let result = engine.compute(&window, &ActivityInput::default());
        let adherence = &result.workout_adherence;
        assert_eq!(adherence.overall, 0.0);
        assert!(adherence.weekly_trend.iter().all(|w| (0.0..=100.0).contains(w)));
    }
}
