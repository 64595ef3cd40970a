//! Canonical skill token form: trimmed and lower-cased

use std::collections::HashSet;

/// Trimmed, lower-cased form used for every skill comparison
pub fn canonicalize(token: &str) -> String {
    token.trim().to_lowercase()
}

/// Canonicalize a token list, dropping blanks and keeping the first occurrence of each token.
pub fn canonicalize_all<I, S>(tokens: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    tokens
        .into_iter()
        .map(|t| canonicalize(t.as_ref()))
        .filter(|t| !t.is_empty() && seen.insert(t.clone()))
        .collect()
}
