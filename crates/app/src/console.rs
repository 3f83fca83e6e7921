use crate::messages::{
    ABSTRACT_PREVIEW_CHARS, ARTICLE_NOT_FOUND, MISSING_LOOKUP_FIELDS, NO_PAPERS_FOUND,
    PAPER_NOT_FOUND,
};
use anyhow::{anyhow, Context};
use scholarly_insight_core::{Paper, PaperSearch, PdfDocument, Summarizer, TextGenerator};
use std::io::Write;

pub async fn print_pdf_report<W, G>(
    out: &mut W,
    summarizer: &Summarizer<G>,
    document: &PdfDocument,
    question: &str,
) -> anyhow::Result<()>
where
    W: Write,
    G: TextGenerator,
{
    let text = document.text();

    let summary = summarizer.summarize(&text).await?;
    let answer = summarizer.answer(&text, question).await?;

    writeln!(out, "Document: {} ({} pages)", document.source_path, document.page_count())?;
    writeln!(out, "Summary:\n{summary}\n")?;
    writeln!(out, "Answer:\n{answer}\n")?;
    Ok(())
}

pub fn print_search_results<W: Write>(out: &mut W, papers: &[Paper]) -> anyhow::Result<()> {
    if papers.is_empty() {
        writeln!(out, "{NO_PAPERS_FOUND}")?;
        return Ok(());
    }

    writeln!(out, "Found {} papers", papers.len())?;
    for (index, paper) in papers.iter().enumerate() {
        writeln!(out, "\n{}. {}", index + 1, paper.title)?;
        writeln!(out, "   Authors: {}", paper.author_names())?;
        writeln!(out, "   Published: {}", paper.published.to_rfc3339())?;
        writeln!(out, "   Id: {}", paper.short_id())?;
        writeln!(out, "   Abstract: {}", paper.abstract_preview(ABSTRACT_PREVIEW_CHARS))?;
    }
    Ok(())
}

/// Re-fetches the chosen result (1-based) by id and prints its digest.
pub async fn summarize_result<W, S, G>(
    out: &mut W,
    search: &S,
    summarizer: &Summarizer<G>,
    papers: &[Paper],
    position: usize,
) -> anyhow::Result<()>
where
    W: Write,
    S: PaperSearch,
    G: TextGenerator,
{
    let chosen = position
        .checked_sub(1)
        .and_then(|index| papers.get(index))
        .ok_or_else(|| anyhow!("result {position} is out of range (1..={})", papers.len()))?;

    let Some(paper) = search
        .fetch_by_id(chosen.short_id())
        .await
        .with_context(|| format!("fetching details for {}", chosen.short_id()))?
    else {
        writeln!(out, "{ARTICLE_NOT_FOUND}")?;
        return Ok(());
    };

    print_digest(out, summarizer, &paper).await
}

pub async fn lookup<W, S, G>(
    out: &mut W,
    search: &S,
    summarizer: &Summarizer<G>,
    title: &str,
    author: &str,
) -> anyhow::Result<bool>
where
    W: Write,
    S: PaperSearch,
    G: TextGenerator,
{
    let (title, author) = (title.trim(), author.trim());
    if title.is_empty() || author.is_empty() {
        return Err(anyhow!(MISSING_LOOKUP_FIELDS));
    }

    match search.find_by_title_and_author(title, author).await? {
        Some(paper) => {
            print_paper_details(out, &paper)?;
            print_digest(out, summarizer, &paper).await?;
            Ok(true)
        }
        None => {
            writeln!(out, "{PAPER_NOT_FOUND}")?;
            Ok(false)
        }
    }
}

pub fn print_paper_details<W: Write>(out: &mut W, paper: &Paper) -> anyhow::Result<()> {
    writeln!(out, "Title: {}", paper.title)?;
    writeln!(out, "Authors: {}", paper.author_names())?;
    writeln!(out, "Published: {}", paper.published.to_rfc3339())?;
    Ok(())
}

async fn print_digest<W, G>(out: &mut W, summarizer: &Summarizer<G>, paper: &Paper) -> anyhow::Result<()>
where
    W: Write,
    G: TextGenerator,
{
    let summary = summarizer.summarize(&paper.summary).await?;
    writeln!(out, "\nSummary:\n{summary}")?;

    let key_points = summarizer.extract_key_points(&paper.summary).await?;
    writeln!(out, "\nKey Points:\n{key_points}")?;

    if let Some(pdf_url) = &paper.pdf_url {
        writeln!(out, "\nPDF: {pdf_url}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_paper, FakeGenerator, FakeSearch};
    use scholarly_insight_core::{PageText, SUMMARY_FALLBACK};

    fn rendered(buffer: Vec<u8>) -> String {
        String::from_utf8(buffer).expect("utf-8 output")
    }

    #[test]
    fn empty_search_prints_no_papers_found_only() {
        let mut out = Vec::new();
        print_search_results(&mut out, &[]).expect("printed");

        assert_eq!(rendered(out).trim(), NO_PAPERS_FOUND);
    }

    #[test]
    fn search_results_are_numbered_with_previews() {
        let mut out = Vec::new();
        let paper = sample_paper("Attention Is All You Need");
        print_search_results(&mut out, &[paper]).expect("printed");

        let output = rendered(out);
        assert!(output.starts_with("Found 1 papers"));
        assert!(output.contains("1. Attention Is All You Need"));
        assert!(output.contains("Authors: Ashish Vaswani, Noam Shazeer"));
        assert!(output.contains("Id: 1706.03762v7"));
        assert!(output.contains("..."));
    }

    #[tokio::test]
    async fn pdf_report_prints_summary_and_answer() {
        let summarizer = Summarizer::new(FakeGenerator::replying("A graph has nodes and edges."));
        let document = PdfDocument {
            source_path: "graphs.pdf".to_string(),
            pages: vec![PageText {
                number: 1,
                text: "Graphs are data structures consisting of nodes and edges.".to_string(),
            }],
        };

        let mut out = Vec::new();
        print_pdf_report(&mut out, &summarizer, &document, "What is a graph?")
            .await
            .expect("report printed");

        let output = rendered(out);
        assert!(output.contains("Document: graphs.pdf (1 pages)"));
        assert!(output.contains("Summary:\nA graph has nodes and edges."));
        assert!(output.contains("Answer:\nA graph has nodes and edges."));
    }

    #[tokio::test]
    async fn empty_pdf_uses_fallback_summary() {
        let generator = FakeGenerator::replying("answer");
        let summarizer = Summarizer::new(generator);
        let document = PdfDocument {
            source_path: "scanned.pdf".to_string(),
            pages: vec![PageText {
                number: 1,
                text: String::new(),
            }],
        };

        let mut out = Vec::new();
        print_pdf_report(&mut out, &summarizer, &document, "Anything?")
            .await
            .expect("report printed");

        assert!(rendered(out).contains(SUMMARY_FALLBACK));
        // Only the question reaches the model.
        assert_eq!(summarizer.generator().calls(), 1);
    }

    #[tokio::test]
    async fn lookup_miss_prints_not_found() {
        let search = FakeSearch::empty();
        let summarizer = Summarizer::new(FakeGenerator::replying("unused"));

        let mut out = Vec::new();
        let found = lookup(&mut out, &search, &summarizer, "Missing", "Nobody")
            .await
            .expect("lookup ran");

        assert!(!found);
        assert_eq!(rendered(out).trim(), PAPER_NOT_FOUND);
        assert_eq!(summarizer.generator().calls(), 0);
    }

    #[tokio::test]
    async fn lookup_rejects_blank_title_or_author_before_searching() {
        let search = FakeSearch::with(vec![sample_paper("Attention Is All You Need")]);
        let summarizer = Summarizer::new(FakeGenerator::replying("unused"));

        let mut out = Vec::new();
        let error = lookup(&mut out, &search, &summarizer, "  ", "Vaswani")
            .await
            .expect_err("blank title rejected");
        assert_eq!(error.to_string(), MISSING_LOOKUP_FIELDS);

        assert!(lookup(&mut out, &search, &summarizer, "Attention Is All You Need", "")
            .await
            .is_err());

        assert!(search.queries().is_empty());
        assert_eq!(summarizer.generator().calls(), 0);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn lookup_hit_prints_details_digest_and_pdf() {
        let search = FakeSearch::with(vec![sample_paper("Attention Is All You Need")]);
        let summarizer = Summarizer::new(FakeGenerator::replying("Transformers use attention."));

        let mut out = Vec::new();
        let found = lookup(&mut out, &search, &summarizer, "Attention Is All You Need", "Vaswani")
            .await
            .expect("lookup ran");

        let output = rendered(out);
        assert!(found);
        assert!(output.contains("Title: Attention Is All You Need"));
        assert!(output.contains("Summary:\nTransformers use attention."));
        assert!(output.contains("Key Points:\nTransformers use attention."));
        assert!(output.contains("PDF: http://arxiv.org/pdf/1706.03762v7"));
        assert_eq!(
            search.queries(),
            vec!["ti:\"Attention Is All You Need\" AND au:\"Vaswani\"".to_string()]
        );
    }

    #[tokio::test]
    async fn summarize_result_rejects_out_of_range_positions() {
        let search = FakeSearch::with(vec![sample_paper("Attention Is All You Need")]);
        let summarizer = Summarizer::new(FakeGenerator::replying("unused"));
        let papers = vec![sample_paper("Attention Is All You Need")];

        let mut out = Vec::new();
        assert!(summarize_result(&mut out, &search, &summarizer, &papers, 0).await.is_err());
        assert!(summarize_result(&mut out, &search, &summarizer, &papers, 2).await.is_err());

        summarize_result(&mut out, &search, &summarizer, &papers, 1)
            .await
            .expect("first result summarized");
        assert!(rendered(out).contains("Key Points:"));
    }
}
