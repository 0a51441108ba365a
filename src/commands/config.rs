use crate::Result;
use crate::analysis::{CategoryMapping, overlapping_labels};
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up when `--config` is not given
pub const CONFIG_FILE_NAME: &str = "evalog.toml";

/// Upper bound for the number of decimals shown for rates
const MAX_PRECISION: usize = 10;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Only files whose name ends with this suffix are read
    #[serde(default = "default_file_suffix")]
    pub file_suffix: String,

    /// Width of a distance bin, in meters
    #[serde(default = "default_bin_size")]
    pub bin_size: f64,

    /// Number of decimals shown for rates
    #[serde(default = "default_precision")]
    pub precision: usize,

    /// General categories and the raw labels they cover
    #[serde(default)]
    pub categories: CategoryMapping,
}

fn default_file_suffix() -> String {
    ".jsonl".into()
}

const fn default_bin_size() -> f64 {
    10.0
}

const fn default_precision() -> usize {
    2
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds invalid values
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!("No '{path}' found, using the default configuration");
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        log::info!("Loaded configuration from '{final_path}'");
        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// Labels listed under more than one category are accepted with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if a value is out of range
    fn validate(&self) -> Result<()> {
        if self.file_suffix.is_empty() {
            return Err(app_err!("file_suffix must not be empty"));
        }

        if !(self.bin_size.is_finite() && self.bin_size > 0.0) {
            return Err(app_err!("bin_size must be a positive number, got {}", self.bin_size));
        }

        if self.precision > MAX_PRECISION {
            return Err(app_err!("precision must be at most {MAX_PRECISION}, got {}", self.precision));
        }

        if self.categories.is_empty() {
            log::warn!("No categories are configured; every label will be reported as unclassified");
        }

        for (label, categories) in overlapping_labels(&self.categories) {
            log::warn!("Label '{label}' is listed under several categories ({}); the last one wins", categories.join(", "));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
