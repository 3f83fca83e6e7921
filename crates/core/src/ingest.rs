use crate::extractor::{load_pdf_with, LopdfExtractor, PdfDocument, PdfExtractor};
use crate::IngestError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub fn discover_pdf_files(folder: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(folder)
        .into_iter()
        .filter_map(|item| item.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let is_pdf = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

        if is_pdf {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort_unstable();
    files
}

pub struct SkippedPdf {
    pub path: PathBuf,
    pub reason: String,
}

pub struct LoadReport {
    pub documents: Vec<PdfDocument>,
    pub skipped_files: Vec<SkippedPdf>,
}

/// Loads a single PDF, or every PDF below a directory.
///
/// A single file that cannot be read is an error. Inside a directory,
/// unreadable files are recorded in `skipped_files` and the rest still load.
pub fn load_documents_best_effort(path: &Path) -> Result<LoadReport, IngestError> {
    load_documents_with(&LopdfExtractor::default(), path)
}

pub fn load_documents_with<E: PdfExtractor>(
    extractor: &E,
    path: &Path,
) -> Result<LoadReport, IngestError> {
    if !path.is_dir() {
        let document = load_pdf_with(extractor, path)?;
        return Ok(LoadReport {
            documents: vec![document],
            skipped_files: Vec::new(),
        });
    }

    let files = discover_pdf_files(path);

    if files.is_empty() {
        return Err(IngestError::InvalidArgument(format!(
            "no pdf files found in {}",
            path.display()
        )));
    }

    let mut documents = Vec::new();
    let mut skipped_files = Vec::new();

    for file in files {
        match load_pdf_with(extractor, &file) {
            Ok(document) => documents.push(document),
            Err(error) => skipped_files.push(SkippedPdf {
                path: file,
                reason: error.to_string(),
            }),
        }
    }

    Ok(LoadReport {
        documents,
        skipped_files,
    })
}

#[cfg(test)]
mod tests {
    use super::{discover_pdf_files, load_documents_best_effort};
    use crate::IngestError;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn discover_pdf_files_is_recursive() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let base = dir.path();
        let nested = base.join("nested");
        fs::create_dir(&nested)?;

        File::create(base.join("a.pdf")).and_then(|mut file| file.write_all(b"%PDF-1.4\n%fake"))?;
        File::create(nested.join("b.PDF"))
            .and_then(|mut file| file.write_all(b"%PDF-1.4\n%fake"))?;
        File::create(base.join("notes.txt")).and_then(|mut file| file.write_all(b"plain"))?;

        let files = discover_pdf_files(base);
        assert_eq!(files.len(), 2);
        Ok(())
    }

    #[test]
    fn loading_fails_without_pdfs() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let result = load_documents_best_effort(dir.path());
        assert!(matches!(result, Err(IngestError::InvalidArgument(_))));
        Ok(())
    }

    #[test]
    fn single_missing_file_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let result = load_documents_best_effort(&dir.path().join("missing.pdf"));
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn best_effort_skips_unreadable_pdfs() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::write(dir.path().join("unreadable.pdf"), b"%PDF-1.4\n%broken")?;

        let report = load_documents_best_effort(dir.path())?;

        assert_eq!(report.documents.len(), 0);
        assert_eq!(report.skipped_files.len(), 1);
        assert_eq!(
            report.skipped_files[0]
                .path
                .file_name()
                .and_then(|name| name.to_str()),
            Some("unreadable.pdf")
        );
        Ok(())
    }
}
