use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scholarly_insight_core::{
    Author, GenerationError, Paper, PaperSearch, SearchError, SearchQuery, TextGenerator,
};
use std::sync::Mutex;

pub fn sample_paper(title: &str) -> Paper {
    let published = DateTime::parse_from_rfc3339("2017-06-12T17:57:34Z")
        .expect("valid timestamp")
        .with_timezone(&Utc);

    Paper {
        entry_id: "http://arxiv.org/abs/1706.03762v7".to_string(),
        title: title.to_string(),
        authors: vec![
            Author {
                name: "Ashish Vaswani".to_string(),
                affiliation: None,
            },
            Author {
                name: "Noam Shazeer".to_string(),
                affiliation: None,
            },
        ],
        published,
        updated: published,
        summary: "The dominant sequence transduction models are based on complex recurrent or \
                  convolutional neural networks in an encoder-decoder configuration. We propose a \
                  new simple network architecture, the Transformer, based solely on attention \
                  mechanisms, dispensing with recurrence and convolutions entirely."
            .to_string(),
        comment: None,
        journal_ref: None,
        doi: None,
        primary_category: Some("cs.CL".to_string()),
        categories: vec!["cs.CL".to_string(), "cs.LG".to_string()],
        links: Vec::new(),
        pdf_url: Some("http://arxiv.org/pdf/1706.03762v7".to_string()),
    }
}

pub struct FakeSearch {
    papers: Vec<Paper>,
    fail: bool,
    queries: Mutex<Vec<String>>,
}

impl FakeSearch {
    pub fn empty() -> Self {
        Self::with(Vec::new())
    }

    pub fn with(papers: Vec<Paper>) -> Self {
        Self {
            papers,
            fail: false,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::empty()
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().expect("query log").clone()
    }

    fn outage(&self) -> SearchError {
        SearchError::BackendResponse {
            backend: "arxiv".to_string(),
            details: "503 Service Unavailable".to_string(),
        }
    }
}

#[async_trait]
impl PaperSearch for FakeSearch {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Paper>, SearchError> {
        self.queries
            .lock()
            .expect("query log")
            .push(query.search_expression());
        if self.fail {
            return Err(self.outage());
        }
        Ok(self.papers.iter().take(query.max_results).cloned().collect())
    }

    async fn fetch_by_id(&self, article_id: &str) -> Result<Option<Paper>, SearchError> {
        if self.fail {
            return Err(self.outage());
        }
        Ok(self
            .papers
            .iter()
            .find(|paper| paper.short_id() == article_id)
            .cloned())
    }
}

pub struct FakeGenerator {
    reply: String,
    fail: bool,
    prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            fail: false,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::replying("")
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().expect("prompt log").len()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    fn model(&self) -> &str {
        "fake-model"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().expect("prompt log").push(prompt.to_string());
        if self.fail {
            return Err(GenerationError::BackendResponse {
                backend: "gemini".to_string(),
                details: "403 Forbidden: API key not valid.".to_string(),
            });
        }
        Ok(self.reply.clone())
    }
}
