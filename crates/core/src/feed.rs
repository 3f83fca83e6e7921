//! Atom feed parsing for arXiv API responses.

use crate::models::{Author, Link, Paper};
use crate::SearchError;
use chrono::{DateTime, Utc};
use roxmltree::{Document, Node};

const ERROR_ENTRY_MARKER: &str = "/api/errors";

pub fn parse_feed(xml: &str) -> Result<Vec<Paper>, SearchError> {
    let document = Document::parse(xml)?;
    let feed = document.root_element();

    if feed.tag_name().name() != "feed" {
        return Err(SearchError::Feed(format!(
            "expected <feed> root, found <{}>",
            feed.tag_name().name()
        )));
    }

    let mut papers = Vec::new();
    for entry in feed.children().filter(|node| is_element(node, "entry")) {
        if let Some(paper) = parse_entry(entry)? {
            papers.push(paper);
        }
    }

    Ok(papers)
}

fn parse_entry(entry: Node<'_, '_>) -> Result<Option<Paper>, SearchError> {
    let entry_id = child_text(entry, "id").unwrap_or_default();

    if entry_id.contains(ERROR_ENTRY_MARKER) {
        return Err(SearchError::BackendResponse {
            backend: "arxiv".to_string(),
            details: child_text(entry, "summary").unwrap_or_else(|| entry_id.clone()),
        });
    }

    // Unknown ids come back as an entry with nothing but an id.
    let title = match child_text(entry, "title") {
        Some(title) if !title.is_empty() => collapse_whitespace(&title),
        _ => return Ok(None),
    };

    if entry_id.is_empty() {
        return Err(SearchError::Feed(format!("entry '{title}' has no id")));
    }

    let published = child_text(entry, "published")
        .ok_or_else(|| SearchError::Feed(format!("entry {entry_id} has no published date")))
        .and_then(|raw| parse_timestamp(&raw))?;
    let updated = match child_text(entry, "updated") {
        Some(raw) => parse_timestamp(&raw)?,
        None => published,
    };

    let authors = entry
        .children()
        .filter(|node| is_element(node, "author"))
        .filter_map(|node| {
            child_text(node, "name").map(|name| Author {
                name,
                affiliation: child_text(node, "affiliation"),
            })
        })
        .collect();

    let links: Vec<Link> = entry
        .children()
        .filter(|node| is_element(node, "link"))
        .filter_map(|node| {
            node.attribute("href").map(|href| Link {
                href: href.to_string(),
                rel: node.attribute("rel").map(str::to_string),
                title: node.attribute("title").map(str::to_string),
                content_type: node.attribute("type").map(str::to_string),
            })
        })
        .collect();

    let pdf_url = links
        .iter()
        .find(|link| link.title.as_deref() == Some("pdf"))
        .map(|link| link.href.clone());

    let categories = entry
        .children()
        .filter(|node| is_element(node, "category"))
        .filter_map(|node| node.attribute("term").map(str::to_string))
        .collect::<Vec<_>>();

    let primary_category = entry
        .children()
        .find(|node| is_element(node, "primary_category"))
        .and_then(|node| node.attribute("term").map(str::to_string))
        .or_else(|| categories.first().cloned());

    Ok(Some(Paper {
        entry_id,
        title,
        authors,
        published,
        updated,
        summary: child_text(entry, "summary").unwrap_or_default(),
        comment: child_text(entry, "comment"),
        journal_ref: child_text(entry, "journal_ref"),
        doi: child_text(entry, "doi"),
        primary_category,
        categories,
        links,
        pdf_url,
    }))
}

fn is_element(node: &Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

fn child_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.children()
        .find(|child| is_element(child, name))
        .and_then(|child| child.text())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, SearchError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|value| value.with_timezone(&Utc))
        .map_err(|error| SearchError::Feed(format!("bad timestamp '{raw}': {error}")))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
