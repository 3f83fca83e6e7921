pub const NO_PAPERS_FOUND: &str = "No papers found. Try different search terms.";
pub const PAPER_NOT_FOUND: &str =
    "Paper not found. Please check the title and authors and try again.";
pub const ARTICLE_NOT_FOUND: &str = "No arXiv article matches that identifier.";
pub const MISSING_LOOKUP_FIELDS: &str = "Please enter both the paper title and authors.";
pub const DEFAULT_QUESTION: &str = "What are the main points discussed in this document?";
pub const ABSTRACT_PREVIEW_CHARS: usize = 300;
