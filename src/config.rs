use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::tools::research;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub vision_model: String,
    pub text_model: String,
    pub research_base_url: String,
    pub log_dir: PathBuf,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let openai_api_key = var("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .context("OPENAI_API_KEY must be set (in the environment or a .env file)")?;

        let log_format = match var("LOG_FORMAT").as_deref().unwrap_or("text") {
            "text" => LogFormat::Text,
            "json" => LogFormat::Json,
            other => anyhow::bail!("LOG_FORMAT must be 'text' or 'json', got '{}'", other),
        };

        Ok(Self {
            openai_api_key,
            openai_base_url: var("OPENAI_BASE_URL")
                .unwrap_or_else(|| "https://api.openai.com/v1/chat/completions".into()),
            vision_model: var("VISION_MODEL").unwrap_or_else(|| "gpt-4o".into()),
            text_model: var("TEXT_MODEL").unwrap_or_else(|| "gpt-4o-mini".into()),
            research_base_url: var("RESEARCH_BASE_URL")
                .unwrap_or_else(|| research::DEFAULT_BASE_URL.into()),
            log_dir: var("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("logs")),
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY must be set"));

        assert!(Config::from_lookup(lookup(&[("OPENAI_API_KEY", "  ")])).is_err());
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-test")])).unwrap();

        assert_eq!(config.vision_model, "gpt-4o");
        assert_eq!(config.text_model, "gpt-4o-mini");
        assert_eq!(
            config.research_base_url,
            "https://eutils.ncbi.nlm.nih.gov/entrez/eutils"
        );
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("TEXT_MODEL", "gpt-4.1-mini"),
            ("LOG_FORMAT", "json"),
        ]))
        .unwrap();

        assert_eq!(config.text_model, "gpt-4.1-mini");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_unknown_log_format() {
        let result = Config::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("LOG_FORMAT", "xml"),
        ]));
        assert!(result.is_err());
    }
}
