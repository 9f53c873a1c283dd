//! Wikipedia access: page lookup through the MediaWiki Action API and
//! portrait scraping from the rendered article HTML.
//!
//! Titles are looked up exactly as given (redirects are followed, but there is
//! no search-based auto-suggestion).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

const USER_AGENT: &str = concat!(
    env!("CARGO_PKG_NAME"),
    "/",
    env!("CARGO_PKG_VERSION"),
    " (leader profiles)"
);
/// Timeout for fetching article HTML (image lookup only).
const HTML_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum WikiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Wikipedia returned status {0}")]
    Status(u16),

    #[error("Wikipedia API error: {0}")]
    Api(String),

    #[error("Page id \"{0}\" does not match any pages")]
    PageNotFound(String),

    #[error("Unexpected Wikipedia response: {0}")]
    Decode(String),
}

/// An article page with the text the resolver needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiPage {
    pub title: String,
    pub url: String,
    pub summary: String,
    pub content: String,
}

/// Outcome of looking up an exact title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLookup {
    Article(WikiPage),
    /// The title is a disambiguation page; holds the candidate titles in page order.
    Disambiguation(Vec<String>),
}

/// Source of Wikipedia pages. Carried in `AppState` as `Arc<dyn WikiSource>`.
#[async_trait]
pub trait WikiSource: Send + Sync {
    async fn lookup(&self, title: &str) -> Result<PageLookup, WikiError>;

    /// Rendered HTML of an article, by URL.
    async fn page_html(&self, url: &str) -> Result<String, WikiError>;
}

// ────────────────────────────────────────────────────────────────────────────
// MediaWiki Action API responses (formatversion=2)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: Option<QueryBody>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: Vec<QueryPage>,
}

#[derive(Debug, Deserialize)]
struct QueryPage {
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    fullurl: Option<String>,
    pageprops: Option<PageProps>,
    extract: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PageProps {
    disambiguation: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ParseResponse {
    parse: Option<ParseBody>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ParseBody {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    info: String,
}

/// MediaWiki Action API client for English Wikipedia (or any compatible wiki).
#[derive(Clone)]
pub struct WikipediaClient {
    client: Client,
    api_url: String,
}

impl WikipediaClient {
    pub fn new(api_url: String) -> Result<Self, WikiError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client, api_url })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        params: &[(&str, &str)],
    ) -> Result<T, WikiError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[("format", "json"), ("formatversion", "2")])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WikiError::Status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| WikiError::Decode(e.to_string()))
    }

    async fn query_page(&self, params: &[(&str, &str)]) -> Result<QueryPage, WikiError> {
        let response: QueryResponse = self.get_json(params).await?;
        if let Some(error) = response.error {
            return Err(WikiError::Api(error.info));
        }
        response
            .query
            .and_then(|q| q.pages.into_iter().next())
            .ok_or_else(|| WikiError::Decode("query returned no pages".to_string()))
    }

    async fn extract(&self, title: &str, intro_only: bool) -> Result<String, WikiError> {
        let mut params = vec![
            ("action", "query"),
            ("prop", "extracts"),
            ("explaintext", "1"),
            ("redirects", "1"),
            ("titles", title),
        ];
        if intro_only {
            params.push(("exintro", "1"));
        }
        let page = self.query_page(&params).await?;
        Ok(page.extract.unwrap_or_default())
    }

    async fn disambiguation_options(&self, title: &str) -> Result<Vec<String>, WikiError> {
        let response: ParseResponse = self
            .get_json(&[
                ("action", "parse"),
                ("prop", "text"),
                ("redirects", "1"),
                ("page", title),
            ])
            .await?;
        if let Some(error) = response.error {
            return Err(WikiError::Api(error.info));
        }
        let body = response
            .parse
            .ok_or_else(|| WikiError::Decode("parse returned no text".to_string()))?;
        Ok(parse_disambiguation_options(&body.text))
    }
}

#[async_trait]
impl WikiSource for WikipediaClient {
    async fn lookup(&self, title: &str) -> Result<PageLookup, WikiError> {
        let page = self
            .query_page(&[
                ("action", "query"),
                ("prop", "info|pageprops"),
                ("inprop", "url"),
                ("ppprop", "disambiguation"),
                ("redirects", "1"),
                ("titles", title),
            ])
            .await?;

        if page.missing || page.invalid {
            return Err(WikiError::PageNotFound(title.to_string()));
        }

        if page
            .pageprops
            .as_ref()
            .is_some_and(|props| props.disambiguation.is_some())
        {
            debug!("\"{}\" is a disambiguation page", page.title);
            let options = self.disambiguation_options(&page.title).await?;
            return Ok(PageLookup::Disambiguation(options));
        }

        let url = page
            .fullurl
            .ok_or_else(|| WikiError::Decode(format!("no URL for \"{}\"", page.title)))?;
        let summary = self.extract(&page.title, true).await?;
        let content = self.extract(&page.title, false).await?;

        Ok(PageLookup::Article(WikiPage {
            title: page.title,
            url,
            summary,
            content,
        }))
    }

    async fn page_html(&self, url: &str) -> Result<String, WikiError> {
        let response = self
            .client
            .get(url)
            .timeout(HTML_FETCH_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WikiError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// HTML scraping
// ────────────────────────────────────────────────────────────────────────────

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

fn first_match<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = selector(css)?;
    let found = scope.select(&selector).next();
    found
}

/// Candidate titles listed on a disambiguation page: the text of the first
/// link in every list item, skipping table-of-contents entries.
pub fn parse_disambiguation_options(html: &str) -> Vec<String> {
    let document = Html::parse_fragment(html);
    let Some(items) = selector("li") else {
        return Vec::new();
    };

    let options = document
        .select(&items)
        .filter(|li| {
            !li.value()
                .attr("class")
                .is_some_and(|class| class.contains("tocsection"))
        })
        .filter_map(|li| first_match(li, "a"))
        .map(|a| a.text().collect::<String>())
        .collect();
    options
}

/// Finds the portrait of an article: the first image of the first infobox,
/// else an image tagged as a biography photo or thumbnail. Protocol-relative
/// URLs are completed with `https:`.
pub fn find_portrait_url(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let image = first_match(root, "table.infobox")
        .and_then(|infobox| first_match(infobox, "img"))
        .or_else(|| first_match(root, "img.biography"))
        .or_else(|| first_match(root, "img.thumbimage"))?;

    let src = image.value().attr("src")?;
    if src.starts_with("http") {
        Some(src.to_string())
    } else {
        Some(format!("https:{src}"))
    }
}
