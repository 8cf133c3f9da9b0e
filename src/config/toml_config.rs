use crate::core::regions::RegionTable;
use crate::core::scoring::{Scaling, DEFAULT_RATIO_MAX, DEFAULT_RATIO_MIN};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{HomeScoreError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_region_codes, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.census.gov/data";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 5;
const MAX_TIMEOUT_SECONDS: u64 = 120;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub service: ServiceConfig,
    pub datasets: DatasetConfig,
    pub variables: VariableConfig,
    pub scoring: ScoringConfig,
    /// Replaces the built-in state table when present.
    pub regions: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: concat!("home-score/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub regions: String,
    pub places: String,
    pub metrics: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            regions: "2010/dec/sf1".to_string(),
            places: "2019/pep/population".to_string(),
            metrics: "2019/acs/acs5".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariableConfig {
    /// Median value of owner-occupied housing units.
    pub home_value: String,
    /// Median household income in the past 12 months.
    pub income: String,
}

impl Default for VariableConfig {
    fn default() -> Self {
        Self {
            home_value: "B25077_001E".to_string(),
            income: "B19013_001E".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingMode {
    ReferenceRange,
    SingleSample,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub mode: ScalingMode,
    pub ratio_min: f64,
    pub ratio_max: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            mode: ScalingMode::ReferenceRange,
            ratio_min: DEFAULT_RATIO_MIN,
            ratio_max: DEFAULT_RATIO_MAX,
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HomeScoreError::Config {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| HomeScoreError::Config {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn scaling(&self) -> Scaling {
        match self.scoring.mode {
            ScalingMode::SingleSample => Scaling::SingleSample,
            ScalingMode::ReferenceRange => Scaling::ReferenceRange {
                ratio_min: self.scoring.ratio_min,
                ratio_max: self.scoring.ratio_max,
            },
        }
    }

    pub fn region_table(&self) -> Result<RegionTable> {
        match &self.regions {
            Some(codes) => RegionTable::new(codes.clone()),
            None => Ok(RegionTable::default()),
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        &self.service.base_url
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.service.timeout_seconds)
    }

    fn user_agent(&self) -> &str {
        &self.service.user_agent
    }

    fn regions_dataset(&self) -> &str {
        &self.datasets.regions
    }

    fn places_dataset(&self) -> &str {
        &self.datasets.places
    }

    fn metrics_dataset(&self) -> &str {
        &self.datasets.metrics
    }

    fn home_value_variable(&self) -> &str {
        &self.variables.home_value
    }

    fn income_variable(&self) -> &str {
        &self.variables.income
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("service.base_url", &self.service.base_url)?;
        validate_range(
            "service.timeout_seconds",
            self.service.timeout_seconds,
            1,
            MAX_TIMEOUT_SECONDS,
        )?;
        validate_non_empty_string("service.user_agent", &self.service.user_agent)?;

        validate_non_empty_string("datasets.regions", &self.datasets.regions)?;
        validate_non_empty_string("datasets.places", &self.datasets.places)?;
        validate_non_empty_string("datasets.metrics", &self.datasets.metrics)?;
        validate_non_empty_string("variables.home_value", &self.variables.home_value)?;
        validate_non_empty_string("variables.income", &self.variables.income)?;

        if self.scoring.mode == ScalingMode::ReferenceRange {
            let (min, max) = (self.scoring.ratio_min, self.scoring.ratio_max);
            if !min.is_finite() || !max.is_finite() || min < 0.0 || min >= max {
                return Err(HomeScoreError::InvalidConfigValue {
                    field: "scoring".to_string(),
                    value: format!("[{}, {}]", min, max),
                    reason: "ratio_min must be non-negative and below ratio_max".to_string(),
                });
            }
        }

        if let Some(codes) = &self.regions {
            if codes.is_empty() {
                return Err(HomeScoreError::Config {
                    field: "regions".to_string(),
                    message: "region table cannot be empty".to_string(),
                });
            }
            validate_region_codes("regions", codes)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config, TomlConfig::default());
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.scaling(), Scaling::default());
        assert_eq!(config.region_table().unwrap().len(), 50);
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[service]
base_url = "http://localhost:9000/data"
timeout_seconds = 3

[datasets]
places = "2020/pep/population"

[scoring]
mode = "single_sample"

[regions]
"Puerto Rico" = "72"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url(), "http://localhost:9000/data");
        assert_eq!(config.places_dataset(), "2020/pep/population");
        assert_eq!(config.metrics_dataset(), "2019/acs/acs5");
        assert_eq!(config.scaling(), Scaling::SingleSample);

        let table = config.region_table().unwrap();
        assert_eq!(table.code_for("Puerto Rico").unwrap(), "72");
        assert!(!table.contains("California"));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("HOME_SCORE_TEST_BASE_URL", "https://census.example.com/data");

        let toml_content = r#"
[service]
base_url = "${HOME_SCORE_TEST_BASE_URL}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.service.base_url, "https://census.example.com/data");

        std::env::remove_var("HOME_SCORE_TEST_BASE_URL");
    }

    #[test]
    fn test_config_validation() {
        let bad_url = TomlConfig::from_toml_str("[service]\nbase_url = \"invalid-url\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let no_timeout = TomlConfig::from_toml_str("[service]\ntimeout_seconds = 0\n").unwrap();
        assert!(no_timeout.validate().is_err());

        let inverted = TomlConfig::from_toml_str("[scoring]\nratio_min = 8.0\nratio_max = 3.0\n").unwrap();
        assert!(inverted.validate().is_err());

        let bad_code = TomlConfig::from_toml_str("[regions]\nOhio = \"O39\"\n").unwrap();
        assert!(bad_code.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[scoring]\nratio_min = 1.5\nratio_max = 12.0\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(
            config.scaling(),
            Scaling::ReferenceRange {
                ratio_min: 1.5,
                ratio_max: 12.0
            }
        );
    }
}
