use crate::messages::ABSTRACT_PREVIEW_CHARS;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};
use scholarly_insight_core::{GenerationError, Paper};
use url::{ParseError, Url};

const LINK_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

#[derive(Debug, Clone, Copy)]
pub enum Notice {
    Success,
    Warning,
    Error,
}

impl Notice {
    fn class(self) -> &'static str {
        match self {
            Notice::Success => "notice success",
            Notice::Warning => "notice warning",
            Notice::Error => "notice error",
        }
    }
}

pub fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }}
.notice {{ padding: 0.5rem 1rem; border-radius: 4px; }}
.success {{ background: #e6f4ea; }}
.warning {{ background: #fef7e0; }}
.error {{ background: #fce8e6; }}
details {{ margin: 0.5rem 0; }}
</style>
</head>
<body>
<nav><a href="/">Search</a> | <a href="/lookup">Lookup</a></nav>
<h1>{title}</h1>
{body}
</body>
</html>
"#,
        title = escape_html(title),
    )
}

pub fn search_form(query: &str) -> String {
    format!(
        r#"<form action="/" method="get">
<label for="q">🔍 Search for research papers</label>
<input id="q" name="q" type="text" value="{}" placeholder="Enter keywords, paper title, or author name">
<button type="submit">Search</button>
</form>
"#,
        escape_html(query)
    )
}

pub fn lookup_form(title: &str, author: &str) -> String {
    format!(
        r#"<form action="/lookup" method="get">
<label for="title">📝 Paper Title</label>
<input id="title" name="title" type="text" value="{}" placeholder="Enter the exact title of the paper">
<label for="author">👥 Authors</label>
<input id="author" name="author" type="text" value="{}" placeholder="Enter the authors' names">
<button type="submit">Generate Summary</button>
</form>
"#,
        escape_html(title),
        escape_html(author)
    )
}

pub fn notice(kind: Notice, message: &str) -> String {
    format!(
        "<p class=\"{}\">{}</p>\n",
        kind.class(),
        escape_html(message)
    )
}

/// Search hits as expandable entries, each with a button that summarizes it.
pub fn result_list(papers: &[Paper]) -> String {
    let mut out = String::from("<ol class=\"results\">\n");

    for (index, paper) in papers.iter().enumerate() {
        out.push_str(&format!(
            r#"<li><details>
<summary>{number}. {title}</summary>
<p><strong>Authors:</strong> {authors}</p>
<p><strong>Published:</strong> {published}</p>
<p><strong>Abstract:</strong> {preview}</p>
<form action="/summarize" method="get">
<input type="hidden" name="id" value="{id}">
<button type="submit">Summarize</button>
</form>
</details></li>
"#,
            number = index + 1,
            title = escape_html(&paper.title),
            authors = escape_html(&paper.author_names()),
            published = escape_html(&paper.published.to_rfc3339()),
            preview = escape_html(&paper.abstract_preview(ABSTRACT_PREVIEW_CHARS)),
            id = escape_html(paper.short_id()),
        ));
    }

    out.push_str("</ol>\n");
    out
}

pub fn paper_details(paper: &Paper) -> String {
    format!(
        r#"<h2>📄 Paper Details</h2>
<p><strong>Title:</strong> {}</p>
<p><strong>Authors:</strong> {}</p>
<p><strong>Published:</strong> {}</p>
"#,
        escape_html(&paper.title),
        escape_html(&paper.author_names()),
        escape_html(&paper.published.to_rfc3339())
    )
}

/// One generated section; a failed generation renders as an error notice.
pub fn generated_section(heading: &str, outcome: &Result<String, GenerationError>) -> String {
    let body = match outcome {
        Ok(text) => format!("<div class=\"generated\">{}</div>\n", markdown_to_html(text)),
        Err(error) => notice(Notice::Error, &format!("Could not generate this section: {error}")),
    };

    format!("<h2>{}</h2>\n{body}", escape_html(heading))
}

pub fn pdf_link(paper: &Paper) -> String {
    match &paper.pdf_url {
        Some(url) => format!(
            "<p><a href=\"{}\">📄 Download PDF</a></p>\n",
            escape_html(url)
        ),
        None => String::new(),
    }
}

/// Renders model output as Markdown. Raw HTML in the output is shown as text,
/// images become plain links, and links outside `LINK_SCHEMES` point at `#`.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH)
        .map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            })
            | Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            }) => Event::Start(Tag::Link {
                link_type,
                dest_url: safe_destination(dest_url),
                title,
                id,
            }),
            Event::End(TagEnd::Image) => Event::End(TagEnd::Link),
            other => other,
        });

    let mut rendered = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut rendered, parser);
    rendered
}

fn safe_destination(dest_url: CowStr<'_>) -> CowStr<'_> {
    let allowed = match Url::parse(&dest_url) {
        Ok(url) => LINK_SCHEMES.contains(&url.scheme()),
        // Relative targets and fragments stay on this site.
        Err(ParseError::RelativeUrlWithoutBase) => true,
        Err(_) => false,
    };

    if allowed {
        dest_url
    } else {
        CowStr::Borrowed("#")
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
