//! Candidate skill vs job requirement matching and scoring

use crate::config::{MatchingConfig, StrategyKind};
use crate::processing::canonical::canonicalize_all;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use strsim::jaro_winkler;

/// Decides whether two canonical tokens that are not equal still count as a partial match.
pub trait MatchStrategy: Send + Sync {
    fn is_partial(&self, candidate: &str, requirement: &str) -> bool;

    fn name(&self) -> &'static str;
}

/// One token containing the other, with a minimum length on the contained token.
#[derive(Debug, Clone)]
pub struct SubstringStrategy {
    pub min_chars: usize,
}

impl Default for SubstringStrategy {
    fn default() -> Self {
        Self { min_chars: 3 }
    }
}

impl MatchStrategy for SubstringStrategy {
    fn is_partial(&self, candidate: &str, requirement: &str) -> bool {
        (candidate.chars().count() >= self.min_chars && requirement.contains(candidate))
            || (requirement.chars().count() >= self.min_chars && candidate.contains(requirement))
    }

    fn name(&self) -> &'static str {
        "substring"
    }
}

/// Jaro-Winkler similarity above a threshold; tolerates spelling variants like "postgres"/"postgresql".
#[derive(Debug, Clone)]
pub struct SimilarityStrategy {
    pub threshold: f64,
    pub min_chars: usize,
}

impl MatchStrategy for SimilarityStrategy {
    fn is_partial(&self, candidate: &str, requirement: &str) -> bool {
        candidate.chars().count() >= self.min_chars
            && requirement.chars().count() >= self.min_chars
            && jaro_winkler(candidate, requirement) >= self.threshold
    }

    fn name(&self) -> &'static str {
        "jaro-winkler"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub percentage: u8,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub exact_count: usize,
    pub partial_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchBreakdown {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

/// Raw score in half points: exact matches are worth 2, partial matches 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Score {
    exact: usize,
    partial: usize,
}

impl Score {
    /// round-half-up of score / requirements * 100, capped at 100
    fn percentage(&self, requirement_count: usize) -> u8 {
        if requirement_count == 0 {
            return 0;
        }
        let halves = 2 * self.exact + self.partial;
        let denominator = 2 * requirement_count;
        let rounded = (halves * 100 + denominator / 2) / denominator;
        rounded.min(100) as u8
    }
}

pub struct SkillMatcher {
    strategy: Box<dyn MatchStrategy>,
}

impl Default for SkillMatcher {
    fn default() -> Self {
        Self::new(Box::new(SubstringStrategy::default()))
    }
}

impl SkillMatcher {
    pub fn new(strategy: Box<dyn MatchStrategy>) -> Self {
        Self { strategy }
    }

    pub fn from_config(config: &MatchingConfig) -> Self {
        let strategy: Box<dyn MatchStrategy> = match config.strategy {
            StrategyKind::Substring => Box::new(SubstringStrategy {
                min_chars: config.min_partial_chars,
            }),
            StrategyKind::JaroWinkler => Box::new(SimilarityStrategy {
                threshold: config.similarity_threshold,
                min_chars: config.min_partial_chars,
            }),
        };
        Self::new(strategy)
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Percentage plus the requirement-centric matched/missing split
    pub fn evaluate<A, B>(&self, candidate_skills: &[A], job_requirements: &[B]) -> MatchResult
    where
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let candidates = canonicalize_all(candidate_skills);
        let requirements = canonicalize_all(job_requirements);

        let score = self.score_canonical(&candidates, &requirements);
        let breakdown = self.breakdown_canonical(&candidates, requirements);

        MatchResult {
            percentage: score.percentage(breakdown.matched.len() + breakdown.missing.len()),
            matched: breakdown.matched,
            missing: breakdown.missing,
            exact_count: score.exact,
            partial_count: score.partial,
        }
    }

    pub fn compute_match_percentage<A, B>(&self, candidate_skills: &[A], job_requirements: &[B]) -> u8
    where
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let candidates = canonicalize_all(candidate_skills);
        self.percentage_canonical(&candidates, job_requirements)
    }

    pub fn compute_matched_missing<A, B>(&self, candidate_skills: &[A], job_requirements: &[B]) -> MatchBreakdown
    where
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let candidates = canonicalize_all(candidate_skills);
        self.breakdown_canonical(&candidates, canonicalize_all(job_requirements))
    }

    /// Percentage against raw requirements for candidates that are already canonical
    pub(crate) fn percentage_canonical<B: AsRef<str>>(&self, candidates: &[String], job_requirements: &[B]) -> u8 {
        let requirements = canonicalize_all(job_requirements);
        self.score_canonical(candidates, &requirements)
            .percentage(requirements.len())
    }

    fn score_canonical(&self, candidates: &[String], requirements: &[String]) -> Score {
        if candidates.is_empty() || requirements.is_empty() {
            return Score { exact: 0, partial: 0 };
        }

        let required: HashSet<&str> = requirements.iter().map(String::as_str).collect();
        let (exact, rest): (Vec<&String>, Vec<&String>) = candidates
            .iter()
            .partition(|candidate| required.contains(candidate.as_str()));

        let partial = rest
            .iter()
            .filter(|candidate| {
                requirements
                    .iter()
                    .any(|requirement| self.strategy.is_partial(candidate, requirement))
            })
            .count();

        Score {
            exact: exact.len(),
            partial,
        }
    }

    fn breakdown_canonical(&self, candidates: &[String], requirements: Vec<String>) -> MatchBreakdown {
        if candidates.is_empty() {
            return MatchBreakdown {
                matched: Vec::new(),
                missing: requirements,
            };
        }

        let owned: HashSet<&str> = candidates.iter().map(String::as_str).collect();
        let (matched, missing) = requirements.into_iter().partition(|requirement| {
            owned.contains(requirement.as_str())
                || candidates
                    .iter()
                    .any(|candidate| self.strategy.is_partial(candidate, requirement))
        });

        MatchBreakdown { matched, missing }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reference_example() {
        let matcher = SkillMatcher::default();
        let candidate = strings(&["JavaScript", " React ", "Node.js"]);
        let requirements = strings(&["javascript", "python", "react native"]);

        let result = matcher.evaluate(&candidate, &requirements);
        assert_eq!(result.percentage, 50);
        assert_eq!(result.exact_count, 1);
        assert_eq!(result.partial_count, 1);
        assert_eq!(result.matched, strings(&["javascript", "react native"]));
        assert_eq!(result.missing, strings(&["python"]));
    }

    #[test]
    fn test_empty_inputs_score_zero() {
        let matcher = SkillMatcher::default();
        let skills = strings(&["rust", "go"]);
        let empty: Vec<String> = Vec::new();

        let result = matcher.evaluate(&empty, &skills);
        assert_eq!(result.percentage, 0);
        assert!(result.matched.is_empty());
        assert_eq!(result.missing, skills);

        let result = matcher.evaluate(&skills, &empty);
        assert_eq!(result.percentage, 0);
        assert!(result.matched.is_empty());
        assert!(result.missing.is_empty());

        // blank entries canonicalize away
        assert_eq!(matcher.compute_match_percentage(&["  "], &["rust"]), 0);
    }

    #[test]
    fn test_identical_sets_score_full() {
        let matcher = SkillMatcher::default();
        let skills = strings(&["Rust", "Kubernetes", "SQL", "go", "c#"]);
        assert_eq!(matcher.compute_match_percentage(&skills, &skills), 100);
    }

    #[test]
    fn test_oversaturated_score_is_capped() {
        let matcher = SkillMatcher::default();
        let candidate = strings(&["java", "javascript", "javafx", "java ee"]);
        let requirements = strings(&["java"]);

        let result = matcher.evaluate(&candidate, &requirements);
        assert_eq!(result.exact_count, 1);
        assert_eq!(result.partial_count, 3);
        assert_eq!(result.percentage, 100);
    }

    #[test]
    fn test_rounding_is_half_up() {
        let matcher = SkillMatcher::default();
        // 0.5 / 8 = 6.25% -> 6
        let reqs = strings(&["python", "aaa", "bbb", "ccc", "ddd", "eee", "fff", "ggg"]);
        assert_eq!(matcher.compute_match_percentage(&["pythonista"], &reqs), 6);
        // 1.5 / 4 = 37.5% -> 38
        let reqs = strings(&["python", "docker", "aaa", "bbb"]);
        assert_eq!(matcher.compute_match_percentage(&["python", "dockerfile"], &reqs), 38);
    }

    #[test]
    fn test_candidate_partial_counted_once() {
        let matcher = SkillMatcher::default();
        let result = matcher.evaluate(&["java"], &["javascript", "javafx"]);

        assert_eq!(result.exact_count, 0);
        assert_eq!(result.partial_count, 1);
        assert_eq!(result.percentage, 25);
        // the requirement-centric breakdown still marks both
        assert_eq!(result.matched, strings(&["javascript", "javafx"]));
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_short_tokens_never_partially_match() {
        let matcher = SkillMatcher::default();
        let result = matcher.evaluate(&["go"], &["golang", "mongodb"]);
        assert_eq!(result.percentage, 0);
        assert_eq!(result.missing, strings(&["golang", "mongodb"]));
    }

    #[test]
    fn test_matched_and_missing_partition_requirements() {
        let matcher = SkillMatcher::default();
        let candidate = strings(&["Docker", "aws lambda", "Postgres"]);
        let requirements = strings(&["docker", "AWS", "postgresql", "Terraform", "docker "]);

        let breakdown = matcher.compute_matched_missing(&candidate, &requirements);
        let canonical = canonicalize_all(&requirements);

        assert_eq!(breakdown.matched.len() + breakdown.missing.len(), canonical.len());
        for requirement in &canonical {
            let in_matched = breakdown.matched.contains(requirement);
            let in_missing = breakdown.missing.contains(requirement);
            assert!(in_matched ^ in_missing, "{} must be in exactly one list", requirement);
        }
        assert_eq!(breakdown.missing, strings(&["terraform"]));
    }

    #[test]
    fn test_similarity_strategy() {
        let matcher = SkillMatcher::from_config(&MatchingConfig {
            strategy: StrategyKind::JaroWinkler,
            min_partial_chars: 3,
            similarity_threshold: 0.9,
        });
        assert_eq!(matcher.strategy_name(), "jaro-winkler");

        let result = matcher.evaluate(&["kubernetis"], &["kubernetes", "haskell"]);
        assert_eq!(result.partial_count, 1);
        assert_eq!(result.matched, strings(&["kubernetes"]));
        assert_eq!(result.percentage, 25);
    }
}
