//! Configuration management for the skill matcher

use crate::error::{Result, SkillMatchError};
use crate::processing::ranker::{DEFAULT_LARGE_COLLECTION_WARNING, DEFAULT_RECOMMENDATION_LIMIT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub fetch: FetchConfig,
    pub extraction: ExtractionConfig,
    pub matching: MatchingConfig,
    pub vocabulary: VocabularyConfig,
    pub recommendations: RecommendationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Upper bound for the whole fetch: request, body and text extraction
    pub timeout_secs: u64,
    pub max_document_bytes: usize,
    pub user_agent: String,
    pub use_system_proxy: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub min_entry_chars: usize,
    pub max_entry_chars: usize,
    /// Longest entry admitted by the "looks like a skill name" rule
    pub max_name_chars: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub strategy: StrategyKind,
    pub min_partial_chars: usize,
    pub similarity_threshold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    Substring,
    JaroWinkler,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VocabularyConfig {
    pub additional_skills: Vec<String>,
    pub replace_defaults: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    pub default_limit: usize,
    pub large_collection_warning: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_document_bytes: 10 * 1024 * 1024,
            user_agent: concat!("skill-matcher/", env!("CARGO_PKG_VERSION")).to_string(),
            use_system_proxy: true,
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_entry_chars: 2,
            max_entry_chars: 50,
            max_name_chars: 30,
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Substring,
            min_partial_chars: 3,
            similarity_threshold: 0.9,
        }
    }
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_RECOMMENDATION_LIMIT,
            large_collection_warning: DEFAULT_LARGE_COLLECTION_WARNING,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            color_output: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            extraction: ExtractionConfig::default(),
            matching: MatchingConfig::default(),
            vocabulary: VocabularyConfig::default(),
            recommendations: RecommendationConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| SkillMatchError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| SkillMatchError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("skill-matcher")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.fetch.timeout_secs == 0 {
            return Err(SkillMatchError::Configuration(
                "fetch.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.fetch.max_document_bytes == 0 {
            return Err(SkillMatchError::Configuration(
                "fetch.max_document_bytes must be greater than zero".to_string(),
            ));
        }
        let extraction = &self.extraction;
        if extraction.min_entry_chars > extraction.max_entry_chars {
            return Err(SkillMatchError::Configuration(format!(
                "extraction.min_entry_chars ({}) exceeds extraction.max_entry_chars ({})",
                extraction.min_entry_chars, extraction.max_entry_chars
            )));
        }
        if extraction.max_name_chars > extraction.max_entry_chars {
            return Err(SkillMatchError::Configuration(format!(
                "extraction.max_name_chars ({}) exceeds extraction.max_entry_chars ({})",
                extraction.max_name_chars, extraction.max_entry_chars
            )));
        }
        if !(0.0..=1.0).contains(&self.matching.similarity_threshold) {
            return Err(SkillMatchError::Configuration(
                "matching.similarity_threshold must be between 0.0 and 1.0".to_string(),
            ));
        }
        if self.recommendations.default_limit == 0 {
            return Err(SkillMatchError::Configuration(
                "recommendations.default_limit must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
