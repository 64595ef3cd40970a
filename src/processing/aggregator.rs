//! Effective candidate skills: declared skills merged with skills found in the uploaded CV

use crate::input::fetcher::{DocumentSource, FetchOutcome};
use crate::processing::canonical::canonicalize_all;
use crate::processing::skill_extractor::SkillExtractor;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
    #[serde(default)]
    pub declared_skills: Vec<String>,
    #[serde(default)]
    pub document_locator: Option<String>,
}

impl CandidateProfile {
    /// Blank locators count as absent
    pub fn locator(&self) -> Option<&str> {
        self.document_locator
            .as_deref()
            .map(str::trim)
            .filter(|locator| !locator.is_empty())
    }
}

pub struct SkillAggregator<S> {
    source: S,
    extractor: SkillExtractor,
}

impl<S: DocumentSource> SkillAggregator<S> {
    pub fn new(source: S, extractor: SkillExtractor) -> Self {
        Self { source, extractor }
    }

    pub fn extractor(&self) -> &SkillExtractor {
        &self.extractor
    }

    /// Skills found in the document at `locator`, or `None` when it could not be read
    pub async fn document_skills(&self, locator: &str) -> Option<Vec<String>> {
        match self.source.fetch(Some(locator)).await {
            FetchOutcome::Text(text) => Some(self.extractor.extract(&text)),
            FetchOutcome::Failed(failure) => {
                warn!("Could not read candidate document {}: {}", locator, failure);
                None
            }
        }
    }

    /// Never fails: without a readable document the declared skills come back untouched.
    ///
    /// Declared skills are canonicalized only when merged with document skills.
    pub async fn resolve_effective_skills(&self, candidate: &CandidateProfile) -> Vec<String> {
        let Some(locator) = candidate.locator() else {
            return candidate.declared_skills.clone();
        };

        let Some(extracted) = self.document_skills(locator).await else {
            return candidate.declared_skills.clone();
        };

        let combined = canonicalize_all(candidate.declared_skills.iter().chain(extracted.iter()));
        debug!(
            "Merged {} declared and {} extracted skills into {}",
            candidate.declared_skills.len(),
            extracted.len(),
            combined.len()
        );
        combined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::fetcher::FetchFailure;
    use crate::vocabulary::SkillVocabulary;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct StubSource {
        outcome: FetchOutcome,
        calls: AtomicUsize,
    }

    impl StubSource {
        fn new(outcome: FetchOutcome) -> Self {
            Self {
                outcome,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl DocumentSource for StubSource {
        async fn fetch(&self, _locator: Option<&str>) -> FetchOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    fn aggregator(outcome: FetchOutcome) -> SkillAggregator<StubSource> {
        let vocabulary = Arc::new(SkillVocabulary::with_defaults().unwrap());
        SkillAggregator::new(StubSource::new(outcome), SkillExtractor::new(vocabulary))
    }

    fn candidate(skills: &[&str], locator: Option<&str>) -> CandidateProfile {
        CandidateProfile {
            declared_skills: skills.iter().map(|s| s.to_string()).collect(),
            document_locator: locator.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_no_locator_returns_declared_verbatim() {
        let aggregator = aggregator(FetchOutcome::Text("Skills: Rust".to_string()));
        let profile = candidate(&[" React ", "SQL"], None);

        let skills = aggregator.resolve_effective_skills(&profile).await;
        assert_eq!(skills, vec![" React ".to_string(), "SQL".to_string()]);
        assert_eq!(aggregator.source.calls.load(Ordering::SeqCst), 0);

        let blank = candidate(&["SQL"], Some("  "));
        assert_eq!(aggregator.resolve_effective_skills(&blank).await, vec!["SQL".to_string()]);
        assert_eq!(aggregator.source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_document_skills_are_merged_and_canonical() {
        let aggregator = aggregator(FetchOutcome::Text("Skills: Python, Docker\nShipped Rust services.".to_string()));
        let profile = candidate(&[" React ", "python"], Some("https://cdn.example.com/cv.pdf"));

        let skills = aggregator.resolve_effective_skills(&profile).await;
        assert_eq!(skills[..2], ["react".to_string(), "python".to_string()]);
        assert!(skills.contains(&"docker".to_string()));
        assert!(skills.contains(&"rust".to_string()));
        assert_eq!(skills.iter().filter(|s| s.as_str() == "python").count(), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_degrades_to_declared() {
        let aggregator = aggregator(FetchOutcome::Failed(FetchFailure::Status(404)));
        let profile = candidate(&[" React ", "SQL"], Some("https://cdn.example.com/cv.pdf"));

        let skills = aggregator.resolve_effective_skills(&profile).await;
        assert_eq!(skills, vec![" React ".to_string(), "SQL".to_string()]);
        assert_eq!(aggregator.source.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_profile_deserializes_from_camel_case() {
        let profile: CandidateProfile =
            serde_json::from_str(r#"{"declaredSkills":["Go"],"documentLocator":"file:///tmp/cv.pdf"}"#).unwrap();
        assert_eq!(profile.declared_skills, vec!["Go".to_string()]);
        assert_eq!(profile.locator(), Some("file:///tmp/cv.pdf"));

        let bare: CandidateProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(bare, CandidateProfile::default());
    }
}
