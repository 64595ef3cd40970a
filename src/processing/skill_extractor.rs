//! Skill extraction from free-form document text
//!
//! Two passes, unioned by canonical form:
//! 1. dictionary scan: every vocabulary skill that occurs as a whole word
//! 2. heading scan: entries listed after headings such as `Skills:` or `Proficient in:`

use crate::config::ExtractionConfig;
use crate::processing::canonical::canonicalize;
use crate::vocabulary::SkillVocabulary;
use log::debug;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::{Arc, OnceLock};

/// Heading labels that introduce a skill list; the list starts after the colon.
fn heading_regex() -> &'static Regex {
    static HEADING: OnceLock<Regex> = OnceLock::new();
    HEADING.get_or_init(|| {
        Regex::new(
            r"(?im)^[^\S\n]*(?:[-*•][^\S\n]*)?(?:(?:technical|core|key|professional)[^\S\n]+)?(?:skills|proficient[^\S\n]+in|expertise|technologies)[^\S\n]*:",
        )
        .expect("Invalid heading regex")
    })
}

/// A following line that starts a new section, e.g. `Experience:` or `Work History:`
fn next_heading_regex() -> &'static Regex {
    static NEXT_HEADING: OnceLock<Regex> = OnceLock::new();
    NEXT_HEADING.get_or_init(|| Regex::new(r"^[A-Z][A-Za-z&/ ]{0,40}:").expect("Invalid section heading regex"))
}

const SEPARATORS: &[char] = &[',', '|', '•', '·', '▪', '●', ';', '\n'];

pub struct SkillExtractor {
    vocabulary: Arc<SkillVocabulary>,
    config: ExtractionConfig,
}

impl SkillExtractor {
    pub fn new(vocabulary: Arc<SkillVocabulary>) -> Self {
        Self::with_config(vocabulary, ExtractionConfig::default())
    }

    pub fn with_config(vocabulary: Arc<SkillVocabulary>, config: ExtractionConfig) -> Self {
        Self { vocabulary, config }
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    /// Sorted, deduplicated canonical skills found in `text`. Never fails; empty text yields nothing.
    pub fn extract(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let mut skills = self.scan_vocabulary(text);
        let from_headings = self.scan_headings(text);
        debug!(
            "Extracted {} dictionary skills and {} heading skills",
            skills.len(),
            from_headings.len()
        );
        skills.extend(from_headings);

        skills.into_iter().collect()
    }

    /// Case-insensitive whole-word occurrences of vocabulary skills
    pub fn scan_vocabulary(&self, text: &str) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        // offsets below refer to the lowered text, not the original
        let lowered = text.to_lowercase();

        for mat in self.vocabulary.automaton().find_overlapping_iter(&lowered) {
            if is_word_boundary(&lowered, mat.start(), mat.end()) {
                found.insert(self.vocabulary.token(mat.pattern().as_usize()).to_string());
            }
        }

        found
    }

    /// Entries listed under skill headings, filtered by the admission rules
    pub fn scan_headings(&self, text: &str) -> BTreeSet<String> {
        let mut found = BTreeSet::new();

        for heading in heading_regex().find_iter(text) {
            let section = capture_section(&text[heading.end()..]);

            for entry in section.split(SEPARATORS) {
                let entry = entry.trim().trim_start_matches(['-', '*']).trim();
                if let Some(skill) = self.admit(entry) {
                    found.insert(skill);
                }
            }
        }

        found
    }

    fn admit(&self, entry: &str) -> Option<String> {
        let chars = entry.chars().count();
        if chars < self.config.min_entry_chars || chars > self.config.max_entry_chars {
            return None;
        }

        let canonical = canonicalize(entry);
        let known = self
            .vocabulary
            .tokens()
            .iter()
            .any(|token| canonical.contains(token.as_str()) || token.contains(canonical.as_str()));
        if known {
            return Some(canonical);
        }

        let looks_like_name = chars <= self.config.max_name_chars
            && entry.chars().all(|c| c.is_alphabetic() || c == ' ');
        looks_like_name.then_some(canonical)
    }
}

/// The heading's own line remainder plus following lines, up to a blank line or the next heading
fn capture_section(rest: &str) -> String {
    let mut lines = rest.lines();
    let mut captured = vec![lines.next().unwrap_or_default()];

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() || next_heading_regex().is_match(trimmed) {
            break;
        }
        captured.push(line);
    }

    captured.join("\n")
}

/// A match counts only if it is not glued to letters or digits on either side
fn is_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = text.get(..start).and_then(|s| s.chars().next_back());
    let after = text.get(end..).and_then(|s| s.chars().next());
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}
