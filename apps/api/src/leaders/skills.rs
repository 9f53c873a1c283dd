//! Keyword-based skill tags for a leader's page.

use std::collections::BTreeSet;

/// Only the head of the article is scanned.
pub const SKILL_SCAN_CHARS: usize = 10_000;

pub const TECHNICAL_KEYWORDS: &[&str] = &[
    "AI",
    "artificial intelligence",
    "machine learning",
    "deep learning",
    "technology",
    "computing",
    "software",
    "hardware",
    "engineering",
    "programming",
    "computer science",
    "data science",
    "cloud computing",
    "robotics",
    "automation",
];

pub const BUSINESS_KEYWORDS: &[&str] = &[
    "innovation",
    "entrepreneurship",
    "leadership",
    "business strategy",
    "management",
    "startup",
    "venture capital",
    "investment",
    "philanthropy",
    "strategic planning",
    "business development",
];

/// Returns every keyword that occurs in `text` (case-insensitive substring),
/// spelled as in the keyword lists, deduplicated and sorted.
pub fn extract_skills(text: &str) -> Vec<String> {
    let haystack = text.to_lowercase();

    TECHNICAL_KEYWORDS
        .iter()
        .chain(BUSINESS_KEYWORDS)
        .filter(|keyword| haystack.contains(&keyword.to_lowercase()))
        .copied()
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(String::from)
        .collect()
}

/// The first `SKILL_SCAN_CHARS` characters of an article.
pub fn scan_window(content: &str) -> &str {
    match content.char_indices().nth(SKILL_SCAN_CHARS) {
        Some((idx, _)) => &content[..idx],
        None => content,
    }
}
