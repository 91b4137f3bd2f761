//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::grade::Grade;
use crate::validation::CreditPolicy;

/// Top-level cgpa configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CgpaConfig {
    /// Where the gradebook JSON document lives.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Smallest credit-hour value accepted for a course.
    #[serde(default = "default_min_credits")]
    pub min_credit_hours: f64,
    /// Largest credit-hour value accepted for a course.
    #[serde(default = "default_max_credits")]
    pub max_credit_hours: f64,
    /// Grade assumed when adding a course without one.
    #[serde(default = "default_grade")]
    pub default_grade: Grade,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("./cgpa-data.json")
}
fn default_min_credits() -> f64 {
    1.0
}
fn default_max_credits() -> f64 {
    6.0
}
fn default_grade() -> Grade {
    Grade::A
}

impl Default for CgpaConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            min_credit_hours: default_min_credits(),
            max_credit_hours: default_max_credits(),
            default_grade: default_grade(),
        }
    }
}

impl CgpaConfig {
    /// The credit-hour policy described by this config.
    pub fn credit_policy(&self) -> CreditPolicy {
        CreditPolicy::new(self.min_credit_hours, self.max_credit_hours)
    }

    fn check(&self) -> Result<()> {
        anyhow::ensure!(
            self.min_credit_hours > 0.0 && self.min_credit_hours.is_finite(),
            "min_credit_hours must be a positive number"
        );
        anyhow::ensure!(
            self.max_credit_hours >= self.min_credit_hours && self.max_credit_hours.is_finite(),
            "max_credit_hours must be at least min_credit_hours"
        );
        Ok(())
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Parse a TOML config string.
pub fn parse_config_str(content: &str) -> Result<CgpaConfig> {
    let config: CgpaConfig = toml::from_str(content).context("failed to parse config TOML")?;
    config.check()?;
    Ok(config)
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `cgpa.toml` in the current directory
/// 2. `~/.config/cgpa/config.toml`
///
/// Environment variable override: `CGPA_DATA_FILE`.
pub fn load_config() -> Result<CgpaConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<CgpaConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("cgpa.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("invalid config: {}", path.display()))?
        }
        None => CgpaConfig::default(),
    };

    if let Ok(data_file) = std::env::var("CGPA_DATA_FILE") {
        if !data_file.trim().is_empty() {
            config.data_file = PathBuf::from(data_file);
        }
    }

    let raw = config.data_file.to_string_lossy().into_owned();
    if raw.contains("${") {
        config.data_file = PathBuf::from(resolve_env_vars(&raw));
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("cgpa"))
}

/// Starter config written by `cgpa init`.
pub const SAMPLE_CONFIG: &str = r#"# cgpa configuration

# Gradebook location. ${VAR} references are expanded from the environment.
data_file = "./cgpa-data.json"

# Accepted credit-hour range for a single course.
min_credit_hours = 1.0
max_credit_hours = 6.0

# Grade used when `cgpa add-course` is given no --grade.
default_grade = "A"
"#;
