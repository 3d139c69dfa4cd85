use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::nlp::resources::ResourceSource;
use crate::scoring::weights::ScoringWeights;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory overriding the embedded language resources.
    pub resources_dir: Option<PathBuf>,
    pub max_upload_bytes: usize,
    pub weights: ScoringWeights,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            resources_dir: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            weights: ScoringWeights::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let weights = ScoringWeights {
            content: parse_or(&lookup, "SCORE_WEIGHT_CONTENT", defaults.weights.content)?,
            skills: parse_or(&lookup, "SCORE_WEIGHT_SKILLS", defaults.weights.skills)?,
            education: parse_or(&lookup, "SCORE_WEIGHT_EDUCATION", defaults.weights.education)?,
            experience: parse_or(&lookup, "SCORE_WEIGHT_EXPERIENCE", defaults.weights.experience)?,
        };
        weights.validate().context("Invalid SCORE_WEIGHT_* configuration")?;

        Ok(Config {
            port: parse_or(&lookup, "PORT", defaults.port)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            resources_dir: lookup("SCREENER_RESOURCES_DIR")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            weights,
        })
    }

    pub fn resource_source(&self) -> ResourceSource {
        match &self.resources_dir {
            Some(dir) => ResourceSource::Directory(dir.clone()),
            None => ResourceSource::Embedded,
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
