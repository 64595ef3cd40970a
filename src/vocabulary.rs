//! The fixed dictionary of recognised skills

use crate::config::VocabularyConfig;
use crate::error::{Result, SkillMatchError};
use crate::processing::canonical::canonicalize_all;
use aho_corasick::AhoCorasick;
use std::collections::HashSet;

/// Immutable set of canonical skill tokens plus an automaton over them.
///
/// The automaton matches canonical (lower-cased) tokens, so callers scan lower-cased text.
/// Built once at startup and shared read-only (typically behind an `Arc`).
#[derive(Debug)]
pub struct SkillVocabulary {
    tokens: Vec<String>,
    lookup: HashSet<String>,
    automaton: AhoCorasick,
}

impl SkillVocabulary {
    /// Build a vocabulary from arbitrary tokens; they are canonicalized and deduplicated.
    pub fn new<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens = canonicalize_all(tokens);
        if tokens.is_empty() {
            return Err(SkillMatchError::Vocabulary(
                "vocabulary must contain at least one skill".to_string(),
            ));
        }

        let automaton = AhoCorasick::builder()
            .build(&tokens)
            .map_err(|e| SkillMatchError::Vocabulary(format!("Failed to build skill matcher: {}", e)))?;

        let lookup = tokens.iter().cloned().collect();

        Ok(Self {
            tokens,
            lookup,
            automaton,
        })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(DEFAULT_SKILLS)
    }

    pub fn from_config(config: &VocabularyConfig) -> Result<Self> {
        if config.replace_defaults {
            Self::new(&config.additional_skills)
        } else {
            let combined = DEFAULT_SKILLS
                .iter()
                .map(|s| s.to_string())
                .chain(config.additional_skills.iter().cloned());
            Self::new(combined)
        }
    }

    /// Exact membership of an already-canonical token
    pub fn contains(&self, token: &str) -> bool {
        self.lookup.contains(token)
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub(crate) fn automaton(&self) -> &AhoCorasick {
        &self.automaton
    }

    pub(crate) fn token(&self, pattern_index: usize) -> &str {
        &self.tokens[pattern_index]
    }
}

const DEFAULT_SKILLS: &[&str] = &[
    // Languages
    "javascript", "typescript", "python", "java", "c++", "c#", "go", "golang", "rust",
    "ruby", "php", "swift", "kotlin", "scala", "sql", "html", "css",
    // Frameworks and libraries
    "react", "react native", "angular", "vue", "next.js", "node.js", "express", "django",
    "flask", "spring", "spring boot", "laravel", ".net", "flutter", "tensorflow", "pytorch",
    "pandas",
    // Platforms and tooling
    "aws", "azure", "gcp", "docker", "kubernetes", "terraform", "jenkins", "git", "linux",
    "graphql", "rest", "mongodb", "postgresql", "mysql", "redis", "elasticsearch", "kafka",
    "firebase",
    // Practices
    "machine learning", "data analysis", "devops", "ci/cd", "microservices", "agile",
    "scrum", "tdd", "ui/ux", "figma", "project management", "communication", "leadership",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary() {
        let vocabulary = SkillVocabulary::with_defaults().unwrap();
        assert!(vocabulary.len() > 40);
        assert!(vocabulary.contains("python"));
        assert!(vocabulary.contains("node.js"));
        assert!(!vocabulary.contains("Python"));
    }

    #[test]
    fn test_tokens_are_canonical_and_unique() {
        let vocabulary = SkillVocabulary::new(["  Rust ", "rust", "ELIXIR"]).unwrap();
        assert_eq!(vocabulary.tokens(), &["rust".to_string(), "elixir".to_string()]);
    }

    #[test]
    fn test_empty_vocabulary_rejected() {
        let result = SkillVocabulary::new(Vec::<String>::new());
        assert!(matches!(result, Err(SkillMatchError::Vocabulary(_))));
    }

    #[test]
    fn test_from_config_extends_or_replaces() {
        let extended = SkillVocabulary::from_config(&VocabularyConfig {
            additional_skills: vec!["Elixir".to_string()],
            replace_defaults: false,
        })
        .unwrap();
        assert!(extended.contains("elixir"));
        assert!(extended.contains("python"));

        let replaced = SkillVocabulary::from_config(&VocabularyConfig {
            additional_skills: vec!["Elixir".to_string()],
            replace_defaults: true,
        })
        .unwrap();
        assert_eq!(replaced.len(), 1);
        assert!(!replaced.contains("python"));
    }
}
