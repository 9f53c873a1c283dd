//! Leader Resolver: turns a person's name into a profile built from Wikipedia.
//!
//! Flow: exact-title lookup → (disambiguation: first role-matching candidate
//! that resolves) → summary + portrait + skill tags.
//!
//! Disambiguation is followed one level deep. A candidate that fails or is
//! itself ambiguous is skipped.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::leaders::skills::{extract_skills, scan_window};
use crate::leaders::wikipedia::{find_portrait_url, PageLookup, WikiError, WikiPage, WikiSource};

/// Candidate titles on a disambiguation page that describe a business figure.
static ROLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(businessman|entrepreneur|executive|CEO)\b").expect("valid role pattern")
});

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Failed to fetch information for {name}")]
    Fetch {
        name: String,
        #[source]
        source: WikiError,
    },

    #[error("Could not resolve disambiguation for {0}")]
    DisambiguationUnresolved(String),
}

/// A profile before it is paired with a roster id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLeader {
    /// The title that resolved; a disambiguation candidate when one was followed.
    pub name: String,
    pub summary: String,
    pub image: Option<String>,
    pub skills: Vec<String>,
    pub url: String,
}

/// Whether a disambiguation candidate names a business role.
pub fn is_role_candidate(option: &str) -> bool {
    ROLE_PATTERN.is_match(option)
}

#[derive(Clone)]
pub struct LeaderResolver {
    source: Arc<dyn WikiSource>,
}

impl LeaderResolver {
    pub fn new(source: Arc<dyn WikiSource>) -> Self {
        Self { source }
    }

    pub async fn resolve(&self, name: &str) -> Result<ResolvedLeader, ResolveError> {
        match self.source.lookup(name).await {
            Ok(PageLookup::Article(page)) => Ok(self.build_profile(name, page).await),
            Ok(PageLookup::Disambiguation(options)) => {
                warn!(
                    "Disambiguation error for {name}: {} candidate(s)",
                    options.len()
                );
                self.resolve_disambiguation(name, &options).await
            }
            Err(source) => {
                warn!("Error fetching info for {name}: {source}");
                Err(ResolveError::Fetch {
                    name: name.to_string(),
                    source,
                })
            }
        }
    }

    async fn resolve_disambiguation(
        &self,
        name: &str,
        options: &[String],
    ) -> Result<ResolvedLeader, ResolveError> {
        for option in options.iter().filter(|o| is_role_candidate(o)) {
            match self.source.lookup(option).await {
                Ok(PageLookup::Article(page)) => {
                    info!("Resolved \"{name}\" to \"{option}\"");
                    return Ok(self.build_profile(option, page).await);
                }
                Ok(PageLookup::Disambiguation(_)) => {
                    warn!("Candidate \"{option}\" for {name} is itself ambiguous, skipping");
                }
                Err(e) => {
                    warn!("Candidate \"{option}\" for {name} failed: {e}");
                }
            }
        }
        Err(ResolveError::DisambiguationUnresolved(name.to_string()))
    }

    async fn build_profile(&self, name: &str, page: WikiPage) -> ResolvedLeader {
        debug!("Building profile for {name} from \"{}\"", page.title);
        let image = self.portrait(name, &page.url).await;
        let skills = extract_skills(scan_window(&page.content));

        ResolvedLeader {
            name: name.to_string(),
            summary: page.summary,
            image,
            skills,
            url: page.url,
        }
    }

    /// A missing portrait is not an error.
    async fn portrait(&self, name: &str, url: &str) -> Option<String> {
        match self.source.page_html(url).await {
            Ok(html) => find_portrait_url(&html),
            Err(e) => {
                warn!("Error fetching image for {name}: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    /// In-memory wiki. Unknown titles are `PageNotFound`.
    #[derive(Default)]
    pub(crate) struct FakeWiki {
        pages: HashMap<String, PageLookup>,
        html: HashMap<String, String>,
        pub(crate) lookups: Mutex<Vec<String>>,
    }

    impl FakeWiki {
        pub(crate) fn with_article(mut self, title: &str, content: &str, html: Option<&str>) -> Self {
            let url = format!("https://en.wikipedia.org/wiki/{}", title.replace(' ', "_"));
            if let Some(html) = html {
                self.html.insert(url.clone(), html.to_string());
            }
            self.pages.insert(
                title.to_string(),
                PageLookup::Article(WikiPage {
                    title: title.to_string(),
                    url,
                    summary: format!("{title} is a person."),
                    content: content.to_string(),
                }),
            );
            self
        }

        pub(crate) fn with_disambiguation(mut self, title: &str, options: &[&str]) -> Self {
            self.pages.insert(
                title.to_string(),
                PageLookup::Disambiguation(options.iter().map(|o| o.to_string()).collect()),
            );
            self
        }

        pub(crate) fn lookups(&self) -> Vec<String> {
            self.lookups.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WikiSource for FakeWiki {
        async fn lookup(&self, title: &str) -> Result<PageLookup, WikiError> {
            self.lookups.lock().unwrap().push(title.to_string());
            self.pages
                .get(title)
                .cloned()
                .ok_or_else(|| WikiError::PageNotFound(title.to_string()))
        }

        async fn page_html(&self, url: &str) -> Result<String, WikiError> {
            self.html.get(url).cloned().ok_or(WikiError::Status(404))
        }
    }

    fn resolver(wiki: FakeWiki) -> (LeaderResolver, Arc<FakeWiki>) {
        let wiki = Arc::new(wiki);
        (LeaderResolver::new(wiki.clone()), wiki)
    }

    const PORTRAIT_HTML: &str = r#"<html><body><table class="infobox"><tr><td>
        <img src="//upload.wikimedia.org/x.jpg"></td></tr></table></body></html>"#;

    #[test]
    fn test_role_pattern_matches_whole_words_any_case() {
        assert!(is_role_candidate("X (businessman)"));
        assert!(is_role_candidate("X (Entrepreneur)"));
        assert!(is_role_candidate("X, former ceo of Y"));
        assert!(!is_role_candidate("X (footballer)"));
        assert!(!is_role_candidate("X (executives' union)"));
        assert!(!is_role_candidate("X (CEOs)"));
    }

    #[tokio::test]
    async fn test_direct_article_builds_full_profile() {
        let (resolver, _) = resolver(FakeWiki::default().with_article(
            "Bill Gates",
            "Gates co-founded a software company and turned to philanthropy.",
            Some(PORTRAIT_HTML),
        ));

        let leader = resolver.resolve("Bill Gates").await.unwrap();
        assert_eq!(leader.name, "Bill Gates");
        assert_eq!(leader.summary, "Bill Gates is a person.");
        assert_eq!(leader.url, "https://en.wikipedia.org/wiki/Bill_Gates");
        assert_eq!(
            leader.image.as_deref(),
            Some("https://upload.wikimedia.org/x.jpg")
        );
        assert_eq!(leader.skills, vec!["philanthropy", "software"]);
    }

    #[tokio::test]
    async fn test_image_failure_is_not_an_error() {
        let (resolver, _) =
            resolver(FakeWiki::default().with_article("Sam Altman", "Startup investor.", None));

        let leader = resolver.resolve("Sam Altman").await.unwrap();
        assert_eq!(leader.image, None);
        assert_eq!(leader.skills, vec!["startup"]);
    }

    #[tokio::test]
    async fn test_disambiguation_follows_role_candidate() {
        let (resolver, wiki) = resolver(
            FakeWiki::default()
                .with_disambiguation("X", &["X (footballer)", "X (businessman)"])
                .with_article("X (businessman)", "Leadership in management.", None)
                .with_article("X (footballer)", "Plays as a striker.", None),
        );

        let leader = resolver.resolve("X").await.unwrap();
        assert_eq!(leader.name, "X (businessman)");
        assert_eq!(leader.skills, vec!["leadership", "management"]);
        // The footballer page is never consulted.
        assert_eq!(wiki.lookups(), vec!["X", "X (businessman)"]);
    }

    #[tokio::test]
    async fn test_failed_candidate_is_skipped() {
        let (resolver, wiki) = resolver(
            FakeWiki::default()
                .with_disambiguation(
                    "Y",
                    &["Y (entrepreneur)", "Y (executive)", "Y (CEO)"],
                )
                .with_disambiguation("Y (executive)", &["Y (executive, born 1950)"])
                .with_article("Y (CEO)", "Runs a robotics company.", None),
        );

        let leader = resolver.resolve("Y").await.unwrap();
        assert_eq!(leader.name, "Y (CEO)");
        assert_eq!(
            wiki.lookups(),
            vec!["Y", "Y (entrepreneur)", "Y (executive)", "Y (CEO)"]
        );
    }

    #[tokio::test]
    async fn test_no_role_candidate_is_unresolved() {
        let (resolver, wiki) = resolver(
            FakeWiki::default()
                .with_disambiguation("Z", &["Z (footballer)", "Z (album)"])
                .with_article("Z (footballer)", "", None),
        );

        let err = resolver.resolve("Z").await.unwrap_err();
        assert!(matches!(err, ResolveError::DisambiguationUnresolved(ref n) if n == "Z"));
        assert_eq!(err.to_string(), "Could not resolve disambiguation for Z");
        assert_eq!(wiki.lookups(), vec!["Z"]);
    }

    #[tokio::test]
    async fn test_missing_page_is_fetch_error() {
        let (resolver, _) = resolver(FakeWiki::default());

        let err = resolver.resolve("Nobody Inparticular").await.unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Fetch {
                source: WikiError::PageNotFound(_),
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "Failed to fetch information for Nobody Inparticular"
        );
    }
}
