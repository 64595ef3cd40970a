//! Report structures rendered by the CLI

use crate::processing::engine::EngineStats;
use crate::processing::matcher::MatchResult;
use crate::processing::ranker::{JobListing, RankedJob};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Report {
    Match(MatchReport),
    Extraction(ExtractionReport),
    Recommendations(RecommendationReport),
    Vocabulary(VocabularyReport),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub candidate_skills: Vec<String>,
    pub job_requirements: Vec<String>,
    pub result: MatchResult,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionReport {
    pub locator: String,
    pub skills: Vec<String>,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationReport {
    pub candidate_skills: Vec<String>,
    pub jobs_considered: usize,
    pub recommendations: Vec<RankedJob<JobListing>>,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyReport {
    pub skills: Vec<String>,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub strategy: String,
    pub vocabulary_size: usize,
    pub version: String,
}

impl ReportMetadata {
    pub fn new(stats: &EngineStats) -> Self {
        Self {
            generated_at: Utc::now(),
            strategy: stats.strategy.clone(),
            vocabulary_size: stats.vocabulary_size,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Label for a match percentage
pub fn verdict(percentage: u8) -> &'static str {
    match percentage {
        80..=100 => "Strong match",
        60..=79 => "Good match",
        40..=59 => "Partial match",
        1..=39 => "Weak match",
        _ => "No match",
    }
}
