//! Matching engine wiring vocabulary, extractor, aggregator, matcher and ranker together

use crate::config::Config;
use crate::error::Result;
use crate::input::fetcher::{DocumentSource, HttpDocumentFetcher};
use crate::processing::aggregator::{CandidateProfile, SkillAggregator};
use crate::processing::matcher::{MatchBreakdown, MatchResult, SkillMatcher};
use crate::processing::ranker::{JobPosting, RankedJob, RecommendationRanker};
use crate::processing::skill_extractor::SkillExtractor;
use crate::vocabulary::SkillVocabulary;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Main engine; one per process, shared across requests
pub struct SkillMatchEngine<S = HttpDocumentFetcher> {
    aggregator: SkillAggregator<S>,
    matcher: SkillMatcher,
    default_limit: usize,
    large_collection_warning: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStats {
    pub vocabulary_size: usize,
    pub strategy: String,
    pub default_limit: usize,
}

impl SkillMatchEngine<HttpDocumentFetcher> {
    pub fn new(config: &Config) -> Result<Self> {
        let vocabulary = Arc::new(SkillVocabulary::from_config(&config.vocabulary)?);
        let fetcher = HttpDocumentFetcher::new(&config.fetch)?;
        Ok(Self::with_source(config, vocabulary, fetcher))
    }
}

impl<S: DocumentSource> SkillMatchEngine<S> {
    pub fn with_source(config: &Config, vocabulary: Arc<SkillVocabulary>, source: S) -> Self {
        let extractor = SkillExtractor::with_config(vocabulary, config.extraction.clone());

        Self {
            aggregator: SkillAggregator::new(source, extractor),
            matcher: SkillMatcher::from_config(&config.matching),
            default_limit: config.recommendations.default_limit,
            large_collection_warning: config.recommendations.large_collection_warning,
        }
    }

    pub fn compute_match_percentage<A: AsRef<str>, B: AsRef<str>>(&self, candidate_skills: &[A], job_requirements: &[B]) -> u8 {
        self.matcher.compute_match_percentage(candidate_skills, job_requirements)
    }

    pub fn compute_matched_missing<A: AsRef<str>, B: AsRef<str>>(
        &self,
        candidate_skills: &[A],
        job_requirements: &[B],
    ) -> MatchBreakdown {
        self.matcher.compute_matched_missing(candidate_skills, job_requirements)
    }

    pub fn evaluate<A: AsRef<str>, B: AsRef<str>>(&self, candidate_skills: &[A], job_requirements: &[B]) -> MatchResult {
        self.matcher.evaluate(candidate_skills, job_requirements)
    }

    pub async fn resolve_effective_skills(&self, candidate: &CandidateProfile) -> Vec<String> {
        self.aggregator.resolve_effective_skills(candidate).await
    }

    /// Skills found in a document, empty when it cannot be read
    pub async fn extract_document_skills(&self, locator: &str) -> Vec<String> {
        self.aggregator.document_skills(locator).await.unwrap_or_default()
    }

    pub fn extract_text_skills(&self, text: &str) -> Vec<String> {
        self.aggregator.extractor().extract(text)
    }

    /// `limit` of `None` uses the configured default
    pub fn rank_recommended_jobs<J: JobPosting, K: AsRef<str>>(
        &self,
        jobs: Vec<J>,
        candidate_skills: &[K],
        limit: Option<usize>,
    ) -> Vec<RankedJob<J>> {
        RecommendationRanker::new(&self.matcher)
            .with_large_collection_warning(self.large_collection_warning)
            .rank_recommended_jobs(jobs, candidate_skills, limit.unwrap_or(self.default_limit))
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        self.aggregator.extractor().vocabulary()
    }

    pub fn get_stats(&self) -> EngineStats {
        EngineStats {
            vocabulary_size: self.vocabulary().len(),
            strategy: self.matcher.strategy_name().to_string(),
            default_limit: self.default_limit,
        }
    }
}
