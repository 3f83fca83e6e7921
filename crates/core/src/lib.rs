pub mod clients;
pub mod config;
pub mod error;
pub mod extractor;
pub mod feed;
pub mod ingest;
pub mod models;
pub mod prompts;
pub mod summarizer;
pub mod traits;

pub use clients::{validate_article_id, ArxivClient, GeminiClient};
pub use config::{ArxivConfig, GeminiConfig};
pub use error::{GenerationError, IngestError, SearchError};
pub use extractor::{extract_page_texts, load_pdf, PageText, PdfDocument, PdfExtractor};
pub use feed::parse_feed;
pub use ingest::{discover_pdf_files, load_documents_best_effort, LoadReport, SkippedPdf};
pub use models::{
    Author, DateRange, Link, Paper, SearchQuery, SortCriterion, SortOrder, DEFAULT_MAX_RESULTS,
};
pub use summarizer::{Summarizer, KEY_POINTS_FALLBACK, SUMMARY_FALLBACK};
pub use traits::{PaperSearch, TextGenerator};
