//! Configuration management and validation.
//!
//! Provides the layered configuration for the cleaning pipeline: built-in
//! defaults, an optional TOML file, then CLI overrides applied by the command
//! layer. Validation bounds default to the values in [`crate::constants`].

use crate::constants::{self, bounds};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Global configuration for trip processing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Input/output paths and run behaviour
    pub processing: ProcessingConfig,

    /// Validity filter bounds
    pub validation: ValidationConfig,

    /// Output artifact settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Paths and run behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Path to the raw trip CSV file
    pub input_path: PathBuf,

    /// Directory for generated artifacts
    pub output_path: PathBuf,

    /// Show progress bars during processing
    pub show_progress: bool,
}

/// Bounds applied by the validity filter
///
/// Defaults mirror the NYC plausibility constants; a TOML file can narrow or
/// widen them for other deployments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Minimum plausible latitude
    pub min_latitude: f64,

    /// Maximum plausible latitude
    pub max_latitude: f64,

    /// Minimum plausible longitude
    pub min_longitude: f64,

    /// Maximum plausible longitude
    pub max_longitude: f64,

    /// Maximum trip duration in seconds
    pub max_duration_seconds: f64,

    /// Maximum trip distance in miles
    pub max_distance_miles: f64,

    /// Maximum fare amount
    pub max_fare_amount: f64,

    /// Maximum passenger count
    pub max_passenger_count: f64,

    /// Speed above which the derived value is nulled (km/h)
    pub max_plausible_speed_kmh: f64,
}

/// Output artifact settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// File name for the cleaned dataset
    pub cleaned_data_filename: String,

    /// File name for the exclusion log
    pub exclusion_log_filename: String,

    /// File name for the cleaning report
    pub cleaning_report_filename: String,

    /// Maximum record snapshots persisted in the exclusion log
    pub exclusion_log_limit: usize,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,

    /// Use the full structured format rather than the compact one
    pub structured: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_latitude: bounds::MIN_LATITUDE,
            max_latitude: bounds::MAX_LATITUDE,
            min_longitude: bounds::MIN_LONGITUDE,
            max_longitude: bounds::MAX_LONGITUDE,
            max_duration_seconds: bounds::MAX_DURATION_SECONDS,
            max_distance_miles: bounds::MAX_DISTANCE_MILES,
            max_fare_amount: bounds::MAX_FARE_AMOUNT,
            max_passenger_count: bounds::MAX_PASSENGER_COUNT,
            max_plausible_speed_kmh: bounds::MAX_PLAUSIBLE_SPEED_KMH,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            cleaned_data_filename: constants::CLEANED_DATA_FILENAME.to_string(),
            exclusion_log_filename: constants::EXCLUSION_LOG_FILENAME.to_string(),
            cleaning_report_filename: constants::CLEANING_REPORT_FILENAME.to_string(),
            exclusion_log_limit: constants::EXCLUSION_LOG_LIMIT,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            structured: true,
        }
    }
}

impl Config {
    /// Create a configuration with explicit input and output paths
    pub fn new(input_path: PathBuf, output_path: PathBuf) -> Self {
        Self {
            processing: ProcessingConfig {
                input_path,
                output_path,
                show_progress: false,
            },
            validation: ValidationConfig::default(),
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Default configuration file location (~/.config/trip-processor/config.toml)
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))?;
        Ok(config_dir.join("trip-processor").join("config.toml"))
    }

    /// Load configuration with layered resolution: defaults, then an optional
    /// TOML file. CLI overrides are applied afterwards by the command layer.
    pub fn load_layered(
        input_path: PathBuf,
        output_path: PathBuf,
        config_file: Option<&Path>,
    ) -> Result<Self> {
        let mut config = Self::new(input_path, output_path);

        if let Some(path) = config_file {
            let file_config = Self::from_file(path)?;
            config.validation = file_config.validation;
            config.output = file_config.output;
            config.logging = file_config.logging;
            debug!("Applied configuration file: {}", path.display());
        }

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&contents).map_err(|e| {
            Error::configuration(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Enable progress bars
    pub fn with_progress(mut self) -> Self {
        self.processing.show_progress = true;
        self
    }

    /// Override the exclusion log snapshot limit
    pub fn with_exclusion_log_limit(mut self, limit: usize) -> Self {
        self.output.exclusion_log_limit = limit;
        self
    }

    /// Ensure the output directory exists, creating it if necessary
    pub fn ensure_output_directory(&self) -> Result<()> {
        let output = &self.processing.output_path;
        if !output.exists() {
            std::fs::create_dir_all(output).map_err(|e| {
                Error::configuration(format!(
                    "Failed to create output directory '{}': {}",
                    output.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<()> {
        if !self.processing.input_path.exists() {
            return Err(Error::file_not_found(
                self.processing.input_path.display().to_string(),
            ));
        }

        let v = &self.validation;
        if v.min_latitude >= v.max_latitude {
            return Err(Error::configuration(format!(
                "Invalid latitude bounds: min {} must be below max {}",
                v.min_latitude, v.max_latitude
            )));
        }

        if v.min_longitude >= v.max_longitude {
            return Err(Error::configuration(format!(
                "Invalid longitude bounds: min {} must be below max {}",
                v.min_longitude, v.max_longitude
            )));
        }

        if v.max_duration_seconds <= 0.0 {
            return Err(Error::configuration(
                "Maximum trip duration must be positive".to_string(),
            ));
        }

        if v.max_plausible_speed_kmh <= 0.0 {
            return Err(Error::configuration(
                "Maximum plausible speed must be positive".to_string(),
            ));
        }

        if self.output.cleaned_data_filename.trim().is_empty()
            || self.output.exclusion_log_filename.trim().is_empty()
            || self.output.cleaning_report_filename.trim().is_empty()
        {
            return Err(Error::configuration(
                "Output file names cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_validation_bounds() {
        let validation = ValidationConfig::default();

        assert_eq!(validation.min_latitude, 40.5);
        assert_eq!(validation.max_latitude, 41.0);
        assert_eq!(validation.min_longitude, -74.3);
        assert_eq!(validation.max_longitude, -73.7);
        assert_eq!(validation.max_duration_seconds, 86_400.0);
        assert_eq!(validation.max_plausible_speed_kmh, 120.0);
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("trips.csv");
        std::fs::write(&input, "pickup_datetime\n").unwrap();

        let mut config = Config::new(input, temp_dir.path().join("out"));
        config.validation.min_latitude = 41.5;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::new(
            temp_dir.path().join("missing.csv"),
            temp_dir.path().join("out"),
        );

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let input = temp_dir.path().join("trips.csv");
        std::fs::write(&input, "pickup_datetime\n").unwrap();

        let config = Config::new(input, temp_dir.path().join("out"));
        let serialized = toml::to_string_pretty(&config).unwrap();
        std::fs::write(&config_path, serialized).unwrap();

        let loaded = Config::from_file(&config_path).unwrap();
        assert_eq!(loaded.validation.max_fare_amount, 500.0);
        assert_eq!(loaded.output.exclusion_log_limit, 1000);
    }

    #[test]
    fn test_ensure_output_directory_creates_missing() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("trips.csv");
        std::fs::write(&input, "pickup_datetime\n").unwrap();

        let output = temp_dir.path().join("nested").join("out");
        let config = Config::new(input, output.clone());

        config.ensure_output_directory().unwrap();
        assert!(output.exists());
    }
}
