use crate::errors::{MentorError, MentorResult};
use crate::profile::StudentProfile;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, env, fs, path::PathBuf, sync::RwLock};

pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_key: String,
    pub api_base_url: String,
    pub model: String,
    pub log_level: String,
    #[serde(default)]
    pub profile: StudentProfile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            log_level: "info".to_string(),
            profile: StudentProfile::default(),
        }
    }
}

static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

pub fn initialize_config() -> MentorResult<()> {
    let config_path = get_config_path()?;

    // If config exists, load it
    if config_path.exists() {
        let config_str = fs::read_to_string(&config_path)
            .map_err(|e| MentorError::config_error(format!("failed to read config file: {}", e)))?;

        let config: Config = serde_json::from_str(&config_str)
            .map_err(|e| MentorError::config_error(format!("failed to parse config: {}", e)))?;

        validate_config(&config)?;

        *CONFIG.write().unwrap() = config;
    } else {
        // First run: create a default config, seeding the key from the environment
        let mut config = Config::default();
        if let Ok(key) = env::var("GEMINI_API_KEY") {
            config.api_key = key;
        }

        fs::create_dir_all(config_path.parent().unwrap()).map_err(|e| {
            MentorError::config_error(format!("failed to create config directory: {}", e))
        })?;

        let config_str = serde_json::to_string_pretty(&config)
            .map_err(|e| MentorError::config_error(format!("failed to serialize config: {}", e)))?;

        fs::write(&config_path, config_str)
            .map_err(|e| MentorError::config_error(format!("failed to write config file: {}", e)))?;

        *CONFIG.write().unwrap() = config;
    }

    Ok(())
}

fn get_config_path() -> MentorResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| MentorError::config_error("could not determine home directory"))?;

    Ok(home_dir.join(".config").join("mentora").join("config.json"))
}

/// A missing API key is deliberately NOT a validation failure: the app still
/// starts and each request surfaces the gap as a configuration error.
fn validate_config(config: &Config) -> MentorResult<()> {
    if config.model.is_empty() {
        return Err(MentorError::config_error("model name is required"));
    }

    if config.api_base_url.is_empty() {
        return Err(MentorError::config_error("API base URL is required"));
    }

    if config.log_level.is_empty() {
        return Err(MentorError::config_error("log level is required"));
    }

    let mut seen = HashSet::new();
    for mark in &config.profile.marks {
        if !seen.insert(mark.subject.as_str()) {
            return Err(MentorError::config_error(format!(
                "duplicate subject in profile marks: {}",
                mark.subject
            )));
        }
        if mark.percent > 100 {
            return Err(MentorError::config_error(format!(
                "mark for {} exceeds 100%",
                mark.subject
            )));
        }
    }

    Ok(())
}

pub fn get_config() -> Config {
    CONFIG.read().unwrap().clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::SubjectMark;

    #[test]
    fn test_validate_config_valid() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_accepts_missing_api_key() {
        let mut config = Config::default();
        config.api_key = "".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_rejects_empty_model() {
        let mut config = Config::default();
        config.model = "".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_rejects_duplicate_subjects() {
        let mut config = Config::default();
        config.profile.marks.push(SubjectMark::new("Math", 50));
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_rejects_marks_above_100() {
        let mut config = Config::default();
        config.profile.marks.push(SubjectMark::new("Chemistry", 101));
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_missing_profile_field_falls_back_to_default() {
        let config: Config = serde_json::from_str(
            r#"{"api_key":"k","api_base_url":"https://example.com","model":"gemini-1.5-flash","log_level":"info"}"#,
        )
        .unwrap();
        assert_eq!(config.profile, StudentProfile::default());
    }
}
