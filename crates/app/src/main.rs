mod console;
mod messages;
#[cfg(test)]
mod test_support;
mod web;

use anyhow::{anyhow, Context};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use messages::DEFAULT_QUESTION;
use scholarly_insight_core::config::{
    DEFAULT_ARXIV_ENDPOINT, DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL,
};
use scholarly_insight_core::{
    load_documents_best_effort, ArxivClient, ArxivConfig, DateRange, GeminiClient, GeminiConfig,
    PaperSearch, SearchQuery, SortCriterion, SortOrder, Summarizer, TextGenerator,
    DEFAULT_MAX_RESULTS,
};
use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "scholarly-insight", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,

    /// Gemini model name
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    model: String,

    /// Gemini API base URL
    #[arg(long, default_value = DEFAULT_GEMINI_ENDPOINT)]
    gemini_url: String,

    /// arXiv query endpoint
    #[arg(long, default_value = DEFAULT_ARXIV_ENDPOINT)]
    arxiv_url: String,

    /// Timeout applied to every outbound request; unset means wait indefinitely.
    #[arg(long)]
    request_timeout_secs: Option<u64>,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize a PDF (or every PDF under a folder) and answer a question about it.
    Pdf {
        /// PDF file or folder that contains PDFs recursively.
        #[arg(long)]
        path: PathBuf,
        /// Question to answer from the document text.
        #[arg(long, default_value = DEFAULT_QUESTION)]
        question: String,
    },
    /// Search arXiv and list matching papers.
    Search {
        /// Keywords, or an arXiv query such as `ti:"..." AND au:"..."`.
        #[arg(long)]
        query: String,
        #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
        max_results: usize,
        #[arg(long, value_enum, default_value_t = SortArg::Relevance)]
        sort: SortArg,
        #[arg(long, value_enum, default_value_t = OrderArg::Descending)]
        order: OrderArg,
        /// Restrict to an arXiv category; repeatable.
        #[arg(long = "category")]
        categories: Vec<String>,
        /// Earliest submission date, YYYYMMDDHHMM.
        #[arg(long)]
        from: Option<String>,
        /// Latest submission date, YYYYMMDDHHMM.
        #[arg(long, requires = "from")]
        to: Option<String>,
        /// Summarize the n-th result (1-based) after listing.
        #[arg(long)]
        summarize: Option<usize>,
    },
    /// Find one paper by title and author, then summarize it.
    Lookup {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
    },
    /// Serve the search and lookup forms over HTTP.
    Serve {
        #[arg(long, default_value = "127.0.0.1:8501")]
        addr: SocketAddr,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Relevance,
    LastUpdated,
    Submitted,
}

impl From<SortArg> for SortCriterion {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Relevance => SortCriterion::Relevance,
            SortArg::LastUpdated => SortCriterion::LastUpdatedDate,
            SortArg::Submitted => SortCriterion::SubmittedDate,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    Ascending,
    Descending,
}

impl From<OrderArg> for SortOrder {
    fn from(value: OrderArg) -> Self {
        match value {
            OrderArg::Ascending => SortOrder::Ascending,
            OrderArg::Descending => SortOrder::Descending,
        }
    }
}

impl Cli {
    fn timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    fn arxiv_client(&self) -> anyhow::Result<ArxivClient> {
        let config = ArxivConfig {
            endpoint: self.arxiv_url.clone(),
            timeout: self.timeout(),
        };
        ArxivClient::new(&config).map_err(|error| anyhow!(error.to_string()))
    }

    fn gemini_client(&self) -> anyhow::Result<GeminiClient> {
        let api_key = self
            .gemini_api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| anyhow!("GEMINI_API_KEY is not set; export it or pass --gemini-api-key"))?;

        let mut config = GeminiConfig::new(api_key);
        config.model = self.model.clone();
        config.endpoint = self.gemini_url.clone();
        config.timeout = self.timeout();

        GeminiClient::new(config).map_err(|error| anyhow!(error.to_string()))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        "scholarly-insight boot"
    );

    let mut out = io::stdout();

    match &cli.command {
        Command::Pdf { path, question } => {
            let summarizer = Summarizer::new(cli.gemini_client()?);
            let report = load_documents_best_effort(path)
                .with_context(|| format!("reading {}", path.display()))?;

            for skipped in &report.skipped_files {
                warn!(path = %skipped.path.display(), reason = %skipped.reason, "skipped pdf");
            }

            if report.documents.is_empty() {
                println!("0 documents loaded (all files were skipped)");
            }

            for document in &report.documents {
                info!(path = %document.source_path, pages = document.page_count(), "summarizing pdf");
                console::print_pdf_report(&mut out, &summarizer, document, question).await?;
            }
        }
        Command::Search {
            query,
            max_results,
            sort,
            order,
            categories,
            from,
            to,
            summarize,
        } => {
            let search = cli.arxiv_client()?;
            let mut search_query = SearchQuery::keywords(query.as_str()).with_max_results(*max_results);
            search_query.sort_by = (*sort).into();
            search_query.sort_order = (*order).into();
            search_query.categories = categories.clone();
            search_query.submitted = from.clone().map(|from| DateRange {
                from,
                to: to.clone(),
            });

            let papers = search
                .search(&search_query)
                .await
                .map_err(|error| anyhow!(error.to_string()))?;
            console::print_search_results(&mut out, &papers)?;

            if let Some(position) = summarize {
                if !papers.is_empty() {
                    let summarizer = Summarizer::new(cli.gemini_client()?);
                    console::summarize_result(&mut out, &search, &summarizer, &papers, *position)
                        .await?;
                }
            }
        }
        Command::Lookup { title, author } => {
            let search = cli.arxiv_client()?;
            let summarizer = Summarizer::new(cli.gemini_client()?);
            console::lookup(&mut out, &search, &summarizer, title, author).await?;
        }
        Command::Serve { addr } => {
            let search: Arc<dyn PaperSearch> = Arc::new(cli.arxiv_client()?);
            let generator: Arc<dyn TextGenerator> = Arc::new(cli.gemini_client()?);
            let app = web::create_app(web::AppState {
                search,
                summarizer: Summarizer::new(generator),
            });

            let listener = TcpListener::bind(addr).await?;
            info!(%addr, "serving search and lookup forms");
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
