use crate::{GenerationError, Paper, SearchError, SearchQuery};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait PaperSearch: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Paper>, SearchError>;

    async fn fetch_by_id(&self, article_id: &str) -> Result<Option<Paper>, SearchError>;

    /// Best match for an exact title and author, or `None` when nothing matches.
    async fn find_by_title_and_author(
        &self,
        title: &str,
        author: &str,
    ) -> Result<Option<Paper>, SearchError> {
        let query = SearchQuery::title_and_author(title, author);
        let papers = self.search(&query).await?;
        Ok(papers.into_iter().next())
    }
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn model(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[async_trait]
impl<T: PaperSearch + ?Sized> PaperSearch for Arc<T> {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Paper>, SearchError> {
        (**self).search(query).await
    }

    async fn fetch_by_id(&self, article_id: &str) -> Result<Option<Paper>, SearchError> {
        (**self).fetch_by_id(article_id).await
    }

    async fn find_by_title_and_author(
        &self,
        title: &str,
        author: &str,
    ) -> Result<Option<Paper>, SearchError> {
        (**self).find_by_title_and_author(title, author).await
    }
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for Arc<T> {
    fn model(&self) -> &str {
        (**self).model()
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        (**self).generate(prompt).await
    }
}
