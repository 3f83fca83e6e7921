use super::render::{self, Notice};
use super::AppState;
use crate::messages::{ARTICLE_NOT_FOUND, MISSING_LOOKUP_FIELDS, NO_PAPERS_FOUND, PAPER_NOT_FOUND};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
};
use scholarly_insight_core::{Paper, SearchError, SearchQuery};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

const SEARCH_TITLE: &str = "📚 Scholarly Insight - Research Paper Summarizer";
const LOOKUP_TITLE: &str = "📚 Research Paper Summarizer";

type PageResponse = (StatusCode, Html<String>);

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SummarizeParams {
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct LookupParams {
    pub title: Option<String>,
    pub author: Option<String>,
}

pub async fn search_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> PageResponse {
    let query = params.q.trim();
    let mut body = render::search_form(query);

    if query.is_empty() {
        return respond(StatusCode::OK, SEARCH_TITLE, body);
    }

    let status = match state.search.search(&SearchQuery::keywords(query)).await {
        Ok(papers) if papers.is_empty() => {
            info!(query, "no papers found");
            body.push_str(&render::notice(Notice::Warning, NO_PAPERS_FOUND));
            StatusCode::OK
        }
        Ok(papers) => {
            body.push_str(&render::notice(
                Notice::Success,
                &format!("Found {} papers", papers.len()),
            ));
            body.push_str(&render::result_list(&papers));
            StatusCode::OK
        }
        Err(error) => {
            warn!(query, %error, "paper search failed");
            body.push_str(&render::notice(
                Notice::Error,
                &format!("Search failed: {error}"),
            ));
            search_error_status(&error)
        }
    };

    respond(status, SEARCH_TITLE, body)
}

pub async fn summarize_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SummarizeParams>,
) -> PageResponse {
    let article_id = params.id.trim();
    let mut body = render::search_form("");

    if article_id.is_empty() {
        body.push_str(&render::notice(Notice::Warning, "Choose a paper to summarize."));
        return respond(StatusCode::BAD_REQUEST, SEARCH_TITLE, body);
    }

    let status = match state.search.fetch_by_id(article_id).await {
        Ok(Some(paper)) => {
            body.push_str(&render::paper_details(&paper));
            append_digest(&state, &paper, &mut body).await
        }
        Ok(None) => {
            body.push_str(&render::notice(Notice::Error, ARTICLE_NOT_FOUND));
            StatusCode::NOT_FOUND
        }
        Err(error) => {
            warn!(article_id, %error, "fetching article details failed");
            body.push_str(&render::notice(
                Notice::Error,
                &format!("Could not fetch article details: {error}"),
            ));
            search_error_status(&error)
        }
    };

    respond(status, SEARCH_TITLE, body)
}

pub async fn lookup_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LookupParams>,
) -> PageResponse {
    // First visit: nothing submitted yet.
    if params.title.is_none() && params.author.is_none() {
        return respond(StatusCode::OK, LOOKUP_TITLE, render::lookup_form("", ""));
    }

    let title = params.title.as_deref().unwrap_or_default().trim();
    let author = params.author.as_deref().unwrap_or_default().trim();
    let mut body = render::lookup_form(title, author);

    if title.is_empty() || author.is_empty() {
        body.push_str(&render::notice(Notice::Warning, MISSING_LOOKUP_FIELDS));
        return respond(StatusCode::BAD_REQUEST, LOOKUP_TITLE, body);
    }

    let status = match state.search.find_by_title_and_author(title, author).await {
        Ok(Some(paper)) => {
            body.push_str(&render::notice(Notice::Success, "✅ Paper found!"));
            body.push_str(&render::paper_details(&paper));
            append_digest(&state, &paper, &mut body).await
        }
        Ok(None) => {
            info!(title, author, "paper not found");
            body.push_str(&render::notice(Notice::Error, PAPER_NOT_FOUND));
            StatusCode::OK
        }
        Err(error) => {
            warn!(title, author, %error, "paper lookup failed");
            body.push_str(&render::notice(
                Notice::Error,
                &format!("Lookup failed: {error}"),
            ));
            search_error_status(&error)
        }
    };

    respond(status, LOOKUP_TITLE, body)
}

/// Summary, key points and PDF link. Each section renders on its own, so one
/// failed generation does not hide the other.
async fn append_digest(state: &AppState, paper: &Paper, body: &mut String) -> StatusCode {
    let summary = state.summarizer.summarize(&paper.summary).await;
    body.push_str(&render::generated_section("📌 Summary", &summary));

    let key_points = state.summarizer.extract_key_points(&paper.summary).await;
    body.push_str(&render::generated_section("🧠 Key Points", &key_points));

    body.push_str(&render::pdf_link(paper));

    if summary.is_err() || key_points.is_err() {
        warn!(paper = paper.short_id(), "generation failed for at least one section");
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    }
}

fn search_error_status(error: &SearchError) -> StatusCode {
    match error {
        SearchError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::BAD_GATEWAY,
    }
}

fn respond(status: StatusCode, title: &str, body: String) -> PageResponse {
    (status, Html(render::page(title, &body)))
}
