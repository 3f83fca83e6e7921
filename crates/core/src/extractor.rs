use crate::error::IngestError;
use lopdf::Document;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub number: u32,
    pub text: String,
}

/// Text of one PDF, kept page by page in page order.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    pub source_path: String,
    pub pages: Vec<PageText>,
}

impl PdfDocument {
    /// Page texts joined in order, with no separator and no normalization.
    pub fn text(&self) -> String {
        self.pages.iter().map(|page| page.text.as_str()).collect()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

pub trait PdfExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<PageText>, IngestError>;
}

#[derive(Default)]
pub struct LopdfExtractor;

impl PdfExtractor for LopdfExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<PageText>, IngestError> {
        if !path.exists() {
            return Err(IngestError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )));
        }

        let document = Document::load(path).map_err(|error| IngestError::PdfParse(error.to_string()))?;

        let mut pages = Vec::new();
        for (page_no, _page_id) in document.get_pages() {
            // A page that cannot be decoded contributes no text.
            let text = match document.extract_text(&[page_no]) {
                Ok(text) => text,
                Err(error) => {
                    debug!(path = %path.display(), page = page_no, %error, "page has no extractable text");
                    String::new()
                }
            };

            pages.push(PageText {
                number: page_no,
                text,
            });
        }

        Ok(pages)
    }
}

pub fn extract_page_texts(path: &Path) -> Result<Vec<PageText>, IngestError> {
    LopdfExtractor::default().extract_pages(path)
}

pub fn load_pdf(path: &Path) -> Result<PdfDocument, IngestError> {
    load_pdf_with(&LopdfExtractor::default(), path)
}

pub fn load_pdf_with<E: PdfExtractor>(extractor: &E, path: &Path) -> Result<PdfDocument, IngestError> {
    let pages = extractor.extract_pages(path)?;
    debug!(path = %path.display(), pages = pages.len(), "extracted pdf text");

    Ok(PdfDocument {
        source_path: path.to_string_lossy().to_string(),
        pages,
    })
}
