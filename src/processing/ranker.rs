//! Job recommendations ranked by match percentage

use crate::processing::canonical::canonicalize_all;
use crate::processing::matcher::SkillMatcher;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 6;

/// Ranking rescans every job on each call (jobs × skills); above this size it is worth caching.
pub const DEFAULT_LARGE_COLLECTION_WARNING: usize = 500;

/// A job record that carries a requirement list
pub trait JobPosting {
    fn requirements(&self) -> &[String];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
}

impl JobPosting for JobListing {
    fn requirements(&self) -> &[String] {
        &self.requirements
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedJob<J> {
    #[serde(flatten)]
    pub job: J,
    pub match_percentage: u8,
}

pub struct RecommendationRanker<'a> {
    matcher: &'a SkillMatcher,
    large_collection_warning: usize,
}

impl<'a> RecommendationRanker<'a> {
    pub fn new(matcher: &'a SkillMatcher) -> Self {
        Self {
            matcher,
            large_collection_warning: DEFAULT_LARGE_COLLECTION_WARNING,
        }
    }

    pub fn with_large_collection_warning(mut self, threshold: usize) -> Self {
        self.large_collection_warning = threshold;
        self
    }

    /// Jobs sorted by descending percentage, ties kept in incoming order, truncated to `limit`.
    pub fn rank_recommended_jobs<J, S>(&self, jobs: Vec<J>, candidate_skills: &[S], limit: usize) -> Vec<RankedJob<J>>
    where
        J: JobPosting,
        S: AsRef<str>,
    {
        if jobs.len() > self.large_collection_warning {
            warn!(
                "Ranking {} jobs exceeds {}; scoring is recomputed per request without caching",
                jobs.len(),
                self.large_collection_warning
            );
        }

        let candidates = canonicalize_all(candidate_skills);
        let mut ranked: Vec<RankedJob<J>> = jobs
            .into_iter()
            .map(|job| {
                let match_percentage = self.matcher.percentage_canonical(&candidates, job.requirements());
                RankedJob { job, match_percentage }
            })
            .collect();

        // stable: equal percentages keep their incoming (newest-first) order
        ranked.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));
        ranked.truncate(limit);

        debug!("Ranked jobs, returning top {}", ranked.len());
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: &str, requirements: &[&str]) -> JobListing {
        JobListing {
            id: id.to_string(),
            title: format!("Job {}", id),
            company: None,
            requirements: requirements.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn jobs() -> Vec<JobListing> {
        vec![
            job("newest", &["cobol"]),
            job("half", &["rust", "haskell"]),
            job("full", &["rust"]),
            job("tie-a", &["python", "elm"]),
            job("empty", &[]),
            job("tie-b", &["docker", "ocaml"]),
            job("partial", &["kubernetes operators"]),
        ]
    }

    #[test]
    fn test_sorted_descending_with_stable_ties() {
        let matcher = SkillMatcher::default();
        let ranker = RecommendationRanker::new(&matcher);
        let skills = ["Rust", "Python", "Docker", "Kubernetes"];

        let ranked = ranker.rank_recommended_jobs(jobs(), &skills, 10);
        let ids: Vec<&str> = ranked.iter().map(|r| r.job.id.as_str()).collect();
        let percentages: Vec<u8> = ranked.iter().map(|r| r.match_percentage).collect();

        assert_eq!(ids, vec!["full", "half", "tie-a", "tie-b", "partial", "newest", "empty"]);
        assert_eq!(percentages, vec![100, 50, 50, 50, 50, 0, 0]);
        assert!(percentages.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_truncates_to_limit() {
        let matcher = SkillMatcher::default();
        let ranker = RecommendationRanker::new(&matcher);

        let ranked = ranker.rank_recommended_jobs(jobs(), &["rust"], DEFAULT_RECOMMENDATION_LIMIT);
        assert_eq!(ranked.len(), DEFAULT_RECOMMENDATION_LIMIT);
        assert_eq!(ranked[0].job.id, "full");

        let ranked = ranker.rank_recommended_jobs(jobs(), &["rust"], 0);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_no_skills_keeps_incoming_order() {
        let matcher = SkillMatcher::default();
        let ranker = RecommendationRanker::new(&matcher).with_large_collection_warning(2);
        let no_skills: [&str; 0] = [];

        let ranked = ranker.rank_recommended_jobs(jobs(), &no_skills, 3);
        let ids: Vec<&str> = ranked.iter().map(|r| r.job.id.as_str()).collect();
        assert_eq!(ids, vec!["newest", "half", "full"]);
        assert!(ranked.iter().all(|r| r.match_percentage == 0));
    }

    #[test]
    fn test_ranked_job_serializes_flat() {
        let ranked = RankedJob {
            job: job("42", &["rust"]),
            match_percentage: 80,
        };
        let value = serde_json::to_value(&ranked).unwrap();
        assert_eq!(value["id"], "42");
        assert_eq!(value["matchPercentage"], 80);
        assert_eq!(value["requirements"][0], "rust");
    }
}
