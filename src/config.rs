//! Configuration management.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::ocr::TesseractConfig;
use crate::validation::ValidationRules;

/// Environment variable overriding the OCR language profile.
pub const ENV_OCR_LANGUAGE: &str = "ADHIKAR_OCR_LANGUAGE";
/// Environment variable overriding the tesseract executable.
pub const ENV_TESSERACT_BIN: &str = "ADHIKAR_TESSERACT_BIN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config {path}: {message}")]
    Parse {
        path: PathBuf,
        format: &'static str,
        message: String,
    },

    #[error("Invalid cutoff date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

/// OCR settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSettings {
    /// Tesseract language profile. English+Hindi by default.
    pub language: String,
    /// Tesseract `--oem`.
    pub engine_mode: u8,
    /// Tesseract `--psm`.
    pub page_segmentation: u8,
    /// Rasterization resolution for PDF pages.
    pub pdf_dpi: u32,
    pub tesseract_bin: String,
}

impl Default for OcrSettings {
    fn default() -> Self {
        let defaults = TesseractConfig::default();
        Self {
            language: defaults.language,
            engine_mode: defaults.engine_mode,
            page_segmentation: defaults.page_segmentation,
            pdf_dpi: defaults.pdf_dpi,
            tesseract_bin: defaults.binary,
        }
    }
}

impl OcrSettings {
    pub fn tesseract_config(&self) -> TesseractConfig {
        TesseractConfig {
            binary: self.tesseract_bin.clone(),
            language: self.language.clone(),
            engine_mode: self.engine_mode,
            page_segmentation: self.page_segmentation,
            pdf_dpi: self.pdf_dpi,
        }
    }
}

/// Statutory validation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    /// `YYYY-MM-DD`.
    pub cutoff_date: String,
    pub max_area_hectares: f64,
    pub min_evidence: usize,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        let rules = ValidationRules::default();
        Self {
            cutoff_date: rules.cutoff_date.format("%Y-%m-%d").to_string(),
            max_area_hectares: rules.max_area_hectares,
            min_evidence: rules.min_evidence,
        }
    }
}

impl ValidationSettings {
    pub fn rules(&self) -> Result<ValidationRules, ConfigError> {
        let cutoff_date = NaiveDate::parse_from_str(self.cutoff_date.trim(), "%Y-%m-%d")
            .map_err(|_| ConfigError::InvalidDate(self.cutoff_date.clone()))?;
        Ok(ValidationRules {
            cutoff_date,
            max_area_hectares: self.max_area_hectares,
            min_evidence: self.min_evidence,
        })
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ocr: OcrSettings,
    #[serde(default)]
    pub validation: ValidationSettings,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load from an explicit path when given, otherwise discover one.
    pub async fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from_path(path).await,
            None => Ok(Self::load().await),
        }
    }

    /// Load configuration using prefer for discovery.
    /// Falls back to defaults when no file is found or it fails to parse.
    pub async fn load() -> Self {
        match prefer::load("adhikar").await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            warn!("{}; using defaults", e);
                            Self::default_with_env()
                        }
                    }
                } else {
                    Self::default_with_env()
                }
            }
            Err(_) => {
                debug!("No config file found, using defaults");
                Self::default_with_env()
            }
        }
    }

    /// Create a default config with environment variable overrides applied.
    pub fn default_with_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Load configuration from a specific file path.
    /// The format follows the extension: TOML, YAML, otherwise JSON.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let mut config = Self::parse(path, &contents)?;
        config.source_path = Some(path.to_path_buf());
        debug!("Loaded config from {}", path.display());
        Ok(config.with_env_overrides())
    }

    fn parse(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let parse_error = |format: &'static str, message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            format,
            message,
        };

        match ext {
            "toml" => toml::from_str(contents).map_err(|e| parse_error("TOML", e.to_string())),
            "yaml" | "yml" => {
                serde_yaml::from_str(contents).map_err(|e| parse_error("YAML", e.to_string()))
            }
            _ => serde_json::from_str(contents).map_err(|e| parse_error("JSON", e.to_string())),
        }
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(language) = lookup(ENV_OCR_LANGUAGE).filter(|s| !s.is_empty()) {
            debug!("Using {} from environment: {}", ENV_OCR_LANGUAGE, language);
            self.ocr.language = language;
        }
        if let Some(binary) = lookup(ENV_TESSERACT_BIN).filter(|s| !s.is_empty()) {
            debug!("Using {} from environment: {}", ENV_TESSERACT_BIN, binary);
            self.ocr.tesseract_bin = binary;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.ocr.language, "eng+hin");
        assert_eq!(config.ocr.tesseract_bin, "tesseract");
        assert_eq!(config.validation.rules().unwrap(), ValidationRules::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::parse(
            Path::new("adhikar.toml"),
            "[ocr]\nlanguage = \"eng\"\n\n[validation]\nmax_area_hectares = 2.5\n",
        )
        .unwrap();
        assert_eq!(config.ocr.language, "eng");
        assert_eq!(config.ocr.pdf_dpi, 300);
        assert_eq!(config.validation.max_area_hectares, 2.5);
        assert_eq!(config.validation.min_evidence, 2);
    }

    #[test]
    fn test_yaml_and_json() {
        let yaml = Config::parse(Path::new("adhikar.yaml"), "ocr:\n  pdf_dpi: 200\n").unwrap();
        assert_eq!(yaml.ocr.pdf_dpi, 200);

        let json = Config::parse(Path::new("adhikar.json"), r#"{"validation": {"min_evidence": 3}}"#)
            .unwrap();
        assert_eq!(json.validation.min_evidence, 3);
    }

    #[test]
    fn test_parse_error_names_format() {
        let err = Config::parse(Path::new("bad.toml"), "ocr = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { format: "TOML", .. }));
    }

    #[test]
    fn test_invalid_cutoff_date() {
        let settings = ValidationSettings {
            cutoff_date: "13/12/2005".to_string(),
            ..Default::default()
        };
        assert!(matches!(settings.rules(), Err(ConfigError::InvalidDate(_))));
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::default().with_overrides_from(|key| match key {
            ENV_OCR_LANGUAGE => Some("hin".to_string()),
            ENV_TESSERACT_BIN => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.ocr.language, "hin");
        assert_eq!(config.ocr.tesseract_bin, "tesseract");
    }

    #[tokio::test]
    async fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adhikar.toml");
        std::fs::write(&path, "[validation]\ncutoff_date = \"2006-01-01\"\n").unwrap();

        let config = Config::load_from_path(&path).await.unwrap();
        assert_eq!(config.source_path.as_deref(), Some(path.as_path()));
        assert_eq!(config.validation.rules().unwrap().cutoff_date.to_string(), "2006-01-01");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = Config::resolve(Some(Path::new("/nonexistent/adhikar.toml")))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
