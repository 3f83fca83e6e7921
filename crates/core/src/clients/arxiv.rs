use crate::config::ArxivConfig;
use crate::feed::parse_feed;
use crate::traits::PaperSearch;
use crate::{Paper, SearchError, SearchQuery};
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};
use url::Url;

const MODERN_ID_PATTERN: &str = r"^\d{4}\.\d{4,5}(v\d+)?$";
const LEGACY_ID_PATTERN: &str = r"^[a-z]+(-[a-z]+)*(\.[A-Z]{2})?/\d{7}(v\d+)?$";

static MODERN_ID: OnceLock<Regex> = OnceLock::new();
static LEGACY_ID: OnceLock<Regex> = OnceLock::new();

pub struct ArxivClient {
    client: Arc<Client>,
    endpoint: String,
}

impl ArxivClient {
    pub fn new(config: &ArxivConfig) -> Result<Self, SearchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: Arc::new(builder.build()?),
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn search_url(&self, query: &SearchQuery) -> Result<Url, SearchError> {
        let expression = query.search_expression();
        if expression.is_empty() {
            return Err(SearchError::InvalidQuery("query is empty".to_string()));
        }
        if query.max_results == 0 {
            return Err(SearchError::InvalidQuery(
                "max_results must be at least 1".to_string(),
            ));
        }

        let mut url = Url::parse(&self.endpoint)?;
        url.query_pairs_mut()
            .append_pair("search_query", &expression)
            .append_pair("start", &query.start.to_string())
            .append_pair("max_results", &query.max_results.to_string())
            .append_pair("sortBy", query.sort_by.as_param())
            .append_pair("sortOrder", query.sort_order.as_param());
        Ok(url)
    }

    pub fn id_url(&self, article_id: &str) -> Result<Url, SearchError> {
        let article_id = article_id.trim();
        validate_article_id(article_id)?;

        let mut url = Url::parse(&self.endpoint)?;
        url.query_pairs_mut()
            .append_pair("id_list", article_id)
            .append_pair("max_results", "1");
        Ok(url)
    }

    async fn fetch_feed(&self, url: Url) -> Result<Vec<Paper>, SearchError> {
        debug!(%url, "querying arxiv");
        let response = self
            .client
            .get(url)
            .header("Accept", "application/atom+xml")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SearchError::BackendResponse {
                backend: "arxiv".to_string(),
                details: response.status().to_string(),
            });
        }

        let body = response.text().await?;
        parse_feed(&body)
    }
}

#[async_trait]
impl PaperSearch for ArxivClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Paper>, SearchError> {
        let url = self.search_url(query)?;
        let papers = self.fetch_feed(url).await?;
        info!(query = %query.text, hits = papers.len(), "arxiv search");
        Ok(papers)
    }

    async fn fetch_by_id(&self, article_id: &str) -> Result<Option<Paper>, SearchError> {
        let url = self.id_url(article_id)?;
        let papers = self.fetch_feed(url).await?;
        Ok(papers.into_iter().next())
    }
}

pub fn validate_article_id(article_id: &str) -> Result<(), SearchError> {
    let modern = compiled(&MODERN_ID, MODERN_ID_PATTERN)?;
    let legacy = compiled(&LEGACY_ID, LEGACY_ID_PATTERN)?;

    if modern.is_match(article_id) || legacy.is_match(article_id) {
        Ok(())
    } else {
        Err(SearchError::InvalidQuery(format!(
            "not an arXiv identifier: {article_id}"
        )))
    }
}

/// Compiles `pattern` on first use and hands out the cached regex afterwards.
fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> Result<&'static Regex, SearchError> {
    if let Some(regex) = cell.get() {
        return Ok(regex);
    }
    let regex = Regex::new(pattern)?;
    Ok(cell.get_or_init(|| regex))
}
