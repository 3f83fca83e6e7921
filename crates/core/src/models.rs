use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_RESULTS: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub affiliation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub rel: Option<String>,
    pub title: Option<String>,
    pub content_type: Option<String>,
}

/// One arXiv record as returned by the search service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Paper {
    pub entry_id: String,
    pub title: String,
    pub authors: Vec<Author>,
    pub published: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub summary: String,
    pub comment: Option<String>,
    pub journal_ref: Option<String>,
    pub doi: Option<String>,
    pub primary_category: Option<String>,
    pub categories: Vec<String>,
    pub links: Vec<Link>,
    pub pdf_url: Option<String>,
}

impl Paper {
    /// `http://arxiv.org/abs/1706.03762v7` -> `1706.03762v7`
    pub fn short_id(&self) -> &str {
        let trimmed = self.entry_id.trim_end_matches('/');
        match trimmed.split_once("/abs/") {
            Some((_, id)) => id,
            None => trimmed.rsplit('/').next().unwrap_or(trimmed),
        }
    }

    pub fn author_names(&self) -> String {
        self.authors
            .iter()
            .map(|author| author.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn abstract_preview(&self, max_chars: usize) -> String {
        let preview: String = self.summary.chars().take(max_chars).collect();
        format!("{preview}...")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum SortCriterion {
    #[default]
    Relevance,
    LastUpdatedDate,
    SubmittedDate,
}

impl SortCriterion {
    pub fn as_param(self) -> &'static str {
        match self {
            SortCriterion::Relevance => "relevance",
            SortCriterion::LastUpdatedDate => "lastUpdatedDate",
            SortCriterion::SubmittedDate => "submittedDate",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn as_param(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }
}

/// Bounds on `submittedDate`, in arXiv's `YYYYMMDDHHMM` form. An open `to`
/// searches up to now.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub from: String,
    pub to: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SearchQuery {
    pub text: String,
    pub max_results: usize,
    pub start: usize,
    pub sort_by: SortCriterion,
    pub sort_order: SortOrder,
    pub categories: Vec<String>,
    pub submitted: Option<DateRange>,
}

impl SearchQuery {
    pub fn keywords(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            max_results: DEFAULT_MAX_RESULTS,
            start: 0,
            sort_by: SortCriterion::Relevance,
            sort_order: SortOrder::Descending,
            categories: Vec::new(),
            submitted: None,
        }
    }

    /// Structured lookup: `ti:"<title>" AND au:"<author>"`, best match only.
    pub fn title_and_author(title: &str, author: &str) -> Self {
        let mut query = Self::keywords(format!(
            "ti:\"{}\" AND au:\"{}\"",
            strip_quotes(title),
            strip_quotes(author)
        ));
        query.max_results = 1;
        query
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn search_expression(&self) -> String {
        let mut expression = self.text.trim().to_string();
        if expression.is_empty() {
            return expression;
        }

        if !self.categories.is_empty() {
            expression.push_str(&format!(" AND cat:({})", self.categories.join(" OR ")));
        }

        if let Some(range) = &self.submitted {
            expression.push_str(&format!(
                " AND submittedDate:[{} TO {}]",
                range.from,
                range.to.as_deref().unwrap_or("*")
            ));
        }

        expression
    }
}

fn strip_quotes(value: &str) -> String {
    value.trim().replace('"', "")
}
