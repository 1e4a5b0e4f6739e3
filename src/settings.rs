//! Layered settings for the acquisition commands.
//!
//! Values come from, lowest precedence first: built-in defaults, an optional
//! TOML file, then `AQZIP_*` environment variables (`__` separates nesting,
//! e.g. `AQZIP_GEOCODE__API_KEY`). Command-line flags override all of these.

use crate::error::{ProcessingError, Result};
use crate::utils::constants::*;
use chrono::{Datelike, Local};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub download: DownloadSettings,
    pub geocode: GeocodeSettings,
}

/// One pollutant as named in file names, with its pre-encoded AQS query code
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PollutantCode {
    pub name: String,
    pub code: String,
}

impl PollutantCode {
    pub fn new(name: &str, code: &str) -> Self {
        Self {
            name: name.to_string(),
            code: code.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DownloadSettings {
    pub base_url: String,
    pub county_code: String,
    pub start_year: i32,
    pub end_year: i32,
    pub output_dir: PathBuf,
    pub combined_file: PathBuf,
    pub pollutants: Vec<PollutantCode>,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            base_url: EPA_BROKER_URL.to_string(),
            county_code: DEFAULT_COUNTY_CODE.to_string(),
            start_year: DEFAULT_START_YEAR,
            end_year: DEFAULT_END_YEAR,
            output_dir: PathBuf::from(DEFAULT_DOWNLOAD_DIR),
            combined_file: PathBuf::from(DEFAULT_COMBINED_FILE),
            pollutants: default_pollutants(),
        }
    }
}

impl DownloadSettings {
    /// Reject empty or inverted year ranges and years in the future
    pub fn validate_years(&self) -> Result<()> {
        let current_year = Local::now().year();

        if self.start_year > self.end_year {
            return Err(ProcessingError::Config(format!(
                "start year {} is after end year {}",
                self.start_year, self.end_year
            )));
        }
        if self.end_year > current_year {
            return Err(ProcessingError::Config(format!(
                "end year {} is in the future (current year {})",
                self.end_year, current_year
            )));
        }
        Ok(())
    }
}

/// AirNow daily-data pollutants; multi-parameter codes are already URL-encoded
pub fn default_pollutants() -> Vec<PollutantCode> {
    vec![
        PollutantCode::new("CO", "42101"),
        PollutantCode::new("Pb", "12128%27%2C%2714129%27%2C%2785129"),
        PollutantCode::new("NO2", "42602"),
        PollutantCode::new("Ozone", "44201"),
        PollutantCode::new("PM10", "81102"),
        PollutantCode::new("PM2.5", "88101%27%2C%2788502"),
        PollutantCode::new("SO2", "42401"),
    ]
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeocodeSettings {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub output: PathBuf,
    pub batch_size: usize,
    pub delay_secs: f64,
}

impl Default for GeocodeSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: GOOGLE_GEOCODE_URL.to_string(),
            output: PathBuf::from(DEFAULT_CENTROIDS_FILE),
            batch_size: DEFAULT_GEOCODE_BATCH_SIZE,
            delay_secs: DEFAULT_GEOCODE_DELAY_SECS,
        }
    }
}

impl Settings {
    /// Load settings from `path` (if it exists) and the environment.
    ///
    /// An explicitly named file must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env_prefix(path, SETTINGS_ENV_PREFIX)
    }

    fn load_with_env_prefix(path: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let (file, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_SETTINGS_FILE), false),
        };

        let settings = Config::builder()
            .add_source(
                File::from(file)
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.download.county_code, "42003");
        assert_eq!(settings.download.pollutants.len(), 7);
        assert_eq!(settings.download.pollutants[5].name, "PM2.5");
        assert_eq!(settings.geocode.batch_size, 10);
        assert!(settings.geocode.api_key.is_none());
    }

    #[test]
    fn test_load_toml_overrides_defaults() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "[download]")?;
        writeln!(file, "county_code = \"42007\"")?;
        writeln!(file, "start_year = 2014")?;
        writeln!(file, "pollutants = [{{ name = \"Ozone\", code = \"44201\" }}]")?;
        writeln!(file, "[geocode]")?;
        writeln!(file, "batch_size = 25")?;

        let settings = Settings::load(Some(file.path()))?;

        assert_eq!(settings.download.county_code, "42007");
        assert_eq!(settings.download.start_year, 2014);
        assert_eq!(settings.download.end_year, DEFAULT_END_YEAR);
        assert_eq!(
            settings.download.pollutants,
            vec![PollutantCode::new("Ozone", "44201")]
        );
        assert_eq!(settings.geocode.batch_size, 25);
        assert_eq!(settings.geocode.delay_secs, DEFAULT_GEOCODE_DELAY_SECS);
        Ok(())
    }

    #[test]
    fn test_environment_overrides_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "[geocode]")?;
        writeln!(file, "batch_size = 25")?;
        writeln!(file, "delay_secs = 1.5")?;

        // Own prefix so other tests loading settings never see this variable
        std::env::set_var("AQZIPENVTEST_GEOCODE__BATCH_SIZE", "40");
        let settings = Settings::load_with_env_prefix(Some(file.path()), "AQZIPENVTEST");
        std::env::remove_var("AQZIPENVTEST_GEOCODE__BATCH_SIZE");
        let settings = settings?;

        assert_eq!(settings.geocode.batch_size, 40);
        assert_eq!(settings.geocode.delay_secs, 1.5);
        assert_eq!(settings.download.county_code, DEFAULT_COUNTY_CODE);
        Ok(())
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = Settings::load(Some(Path::new("/nonexistent/aqzip.toml")));
        assert!(matches!(result, Err(ProcessingError::Settings(_))));
    }

    #[test]
    fn test_validate_years() {
        let mut download = DownloadSettings::default();
        assert!(download.validate_years().is_ok());

        download.start_year = 2018;
        download.end_year = 2016;
        assert!(download.validate_years().is_err());

        download.start_year = 2016;
        download.end_year = Local::now().year() + 1;
        assert!(download.validate_years().is_err());
    }
}
