use crate::config::{
    RateApiConfig, SkillConfig, ACCESS_KEY_ENV, DEFAULT_RATE_API_URL, DEFAULT_TIMEOUT_SECS,
};
use crate::utils::error::{Result, SkillError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk form of the skill config, used by the local CLI.
///
/// ```toml
/// [rate_api]
/// base_url = "http://apilayer.net/api/live"
/// access_key = "${api_layer_key}"
/// timeout_secs = 10
///
/// [skill]
/// application_id = "amzn1.ask.skill.xxxx"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub rate_api: RateApiSection,
    #[serde(default)]
    pub skill: SkillSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateApiSection {
    pub base_url: Option<String>,
    pub access_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillSection {
    pub application_id: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the value of the environment variable. Unknown
    /// variables are left untouched.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SkillError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Resolves the file into a [`SkillConfig`]. The access key may be left
    /// out of the file, in which case `lookup(ACCESS_KEY_ENV)` supplies it.
    pub fn into_skill_config<F>(self, lookup: F) -> Result<SkillConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_key = self
            .rate_api
            .access_key
            .filter(|key| !key.starts_with("${"))
            .or_else(|| lookup(ACCESS_KEY_ENV))
            .ok_or_else(|| SkillError::MissingConfigError {
                field: ACCESS_KEY_ENV.to_string(),
            })?;

        Ok(SkillConfig {
            rate_api: RateApiConfig {
                base_url: self
                    .rate_api
                    .base_url
                    .unwrap_or_else(|| DEFAULT_RATE_API_URL.to_string()),
                access_key,
                timeout_secs: self.rate_api.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            },
            application_id: self.skill.application_id,
        })
    }
}

impl SkillConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        TomlConfig::from_file(path)?.into_skill_config(|name| std::env::var(name).ok())
    }
}
