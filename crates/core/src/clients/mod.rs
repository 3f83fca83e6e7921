pub mod arxiv;
pub mod gemini;
#[cfg(test)]
mod test_server;

pub use arxiv::{validate_article_id, ArxivClient};
pub use gemini::GeminiClient;
