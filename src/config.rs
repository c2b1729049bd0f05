use crate::core::score::RiskLevel;
use crate::core::{PatientInputs, Sex, SmokingStatus};
use crate::form;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "riskstrat.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub defaults: FormDefaults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub fail_on: FailOn,
    pub json: bool,
    pub interactive: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            fail_on: FailOn::None,
            json: false,
            interactive: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailOn {
    #[default]
    None,
    Moderate,
    High,
}

impl FailOn {
    pub fn is_met_by(self, level: RiskLevel) -> bool {
        match self {
            Self::None => false,
            Self::Moderate => level >= RiskLevel::Moderate,
            Self::High => level >= RiskLevel::High,
        }
    }
}

impl fmt::Display for FailOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Moderate => write!(f, "moderate"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Values the form starts from when a field is left blank.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FormDefaults {
    pub age: i32,
    pub bmi: f64,
    pub sex: Sex,
    pub smoking_status: SmokingStatus,
    pub systolic_bp: i32,
    pub cholesterol: i32,
    pub fasting_glucose: i32,
    pub family_history_diabetes: bool,
    pub smoking_years: i32,
    pub fev1: i32,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            age: 30,
            bmi: 22.0,
            sex: Sex::Male,
            smoking_status: SmokingStatus::NonSmoker,
            systolic_bp: 120,
            cholesterol: 180,
            fasting_glucose: 90,
            family_history_diabetes: true,
            smoking_years: 0,
            fev1: 80,
        }
    }
}

impl From<&FormDefaults> for PatientInputs {
    fn from(defaults: &FormDefaults) -> Self {
        Self {
            age: defaults.age,
            bmi: defaults.bmi,
            sex: defaults.sex,
            smoking_status: defaults.smoking_status,
            systolic_bp: defaults.systolic_bp,
            cholesterol: defaults.cholesterol,
            fasting_glucose: defaults.fasting_glucose,
            family_history_diabetes: defaults.family_history_diabetes,
            smoking_years: defaults.smoking_years,
            fev1: defaults.fev1,
        }
    }
}

pub fn load_config(cli_config_path: Option<&Path>, cwd: &Path) -> Result<Config> {
    if let Some(path) = cli_config_path {
        if !path.exists() {
            bail!(
                "config file not found at {} (passed with --config)",
                path.display()
            );
        }
        return read_config(path);
    }

    let local_path = cwd.join(CONFIG_FILE_NAME);
    if local_path.exists() {
        return read_config(&local_path);
    }

    log::debug!("no {CONFIG_FILE_NAME} found, using built-in defaults");
    Ok(Config::default())
}

pub fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!(
            "refusing to overwrite existing config file: {}",
            path.display()
        );
    }

    let content = default_config_toml()?;
    fs::write(path, content).with_context(|| format!("failed writing {}", path.display()))?;
    Ok(())
}

pub fn default_config_toml() -> Result<String> {
    toml::to_string_pretty(&Config::default()).context("failed to serialize default config")
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading config file {}", path.display()))?;
    let config = toml::from_str::<Config>(&content)
        .with_context(|| format!("failed parsing config file {}", path.display()))?;
    form::check_inputs(&PatientInputs::from(&config.defaults))
        .with_context(|| format!("invalid [defaults] in {}", path.display()))?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_init() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        write_default_config(&path).unwrap();

        let loaded = load_config(None, dir.path()).unwrap();
        assert_eq!(loaded.defaults, FormDefaults::default());
        assert_eq!(loaded.general.fail_on, FailOn::None);
        assert!(loaded.general.interactive);
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "").unwrap();
        assert!(write_default_config(&path).is_err());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(
            &path,
            "[general]\nfail_on = \"high\"\n\n[defaults]\nage = 65\nsmoking_status = \"former-smoker\"\n",
        )
        .unwrap();

        let loaded = load_config(Some(&path), dir.path()).unwrap();
        assert_eq!(loaded.general.fail_on, FailOn::High);
        assert_eq!(loaded.defaults.age, 65);
        assert_eq!(loaded.defaults.smoking_status, SmokingStatus::FormerSmoker);
        assert_eq!(loaded.defaults.fev1, 80);
    }

    #[test]
    fn out_of_range_defaults_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[defaults]\nage = 12\n").unwrap();

        let err = load_config(None, dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("age"));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_config(Some(&missing), dir.path()).is_err());
    }

    #[test]
    fn fail_on_thresholds() {
        assert!(!FailOn::None.is_met_by(RiskLevel::High));
        assert!(FailOn::Moderate.is_met_by(RiskLevel::Moderate));
        assert!(!FailOn::High.is_met_by(RiskLevel::Moderate));
        assert!(FailOn::High.is_met_by(RiskLevel::High));
    }
}
