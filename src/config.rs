//! Runtime configuration loaded from the environment.

use std::env;
use std::path::PathBuf;

use crate::generator::{DEFAULT_API_BASE, DEFAULT_MODEL};

/// Environment variable pointing at a directory holding the bundled font files.
pub const FONTS_DIR_ENV: &str = "JOB_PDF_FONTS_DIR";

/// Settings read from environment variables, after loading `.env` if one exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// `GEMINI_API_KEY`.
    pub gemini_api_key: Option<String>,
    /// `GEMINI_MODELS`, comma separated and tried in order.
    pub gemini_models: Vec<String>,
    /// `GEMINI_API_BASE`.
    pub gemini_api_base: String,
    /// `JOB_PDF_FONTS_DIR`, searched first for the bundled fonts.
    pub fonts_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let gemini_models = non_empty("GEMINI_MODELS")
            .map(|value| parse_models(&value))
            .filter(|models| !models.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_MODEL.to_string()]);

        Self {
            gemini_api_key: non_empty("GEMINI_API_KEY"),
            gemini_models,
            gemini_api_base: non_empty("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            fonts_dir: non_empty(FONTS_DIR_ENV).map(PathBuf::from),
        }
    }
}

fn parse_models(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|model| !model.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config(&[]);
        assert_eq!(config.gemini_api_key, None);
        assert_eq!(config.gemini_models, vec![DEFAULT_MODEL.to_string()]);
        assert_eq!(config.gemini_api_base, DEFAULT_API_BASE);
        assert_eq!(config.fonts_dir, None);
    }

    #[test]
    fn models_are_split_and_trimmed() {
        let config = config(&[("GEMINI_MODELS", " gemini-2.0-flash , ,gemini-1.5-flash ")]);
        assert_eq!(
            config.gemini_models,
            vec!["gemini-2.0-flash".to_string(), "gemini-1.5-flash".to_string()]
        );
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config(&[("GEMINI_API_KEY", "  "), ("GEMINI_MODELS", ",")]);
        assert_eq!(config.gemini_api_key, None);
        assert_eq!(config.gemini_models, vec![DEFAULT_MODEL.to_string()]);
    }

    #[test]
    fn fonts_dir_is_read_from_its_variable() {
        let config = config(&[(FONTS_DIR_ENV, "/opt/job-pdf/fonts")]);
        assert_eq!(config.fonts_dir, Some(PathBuf::from("/opt/job-pdf/fonts")));
    }
}
