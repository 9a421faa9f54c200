// src/draft/mod.rs
//! Markdown drafts: a TOML front matter block followed by one
//! `## Highlight N` section per captured quote.

pub mod hugo;
pub mod slug;

pub use hugo::HugoPost;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const FENCE: &str = "+++";
const HEADING_PREFIX: &str = "## Highlight";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub quote: String,
    pub commentary: String,
}

impl Highlight {
    pub fn new(quote: impl Into<String>, commentary: impl Into<String>) -> Self {
        Highlight { quote: quote.into(), commentary: commentary.into() }
    }

    pub fn is_blank(&self) -> bool {
        self.quote.trim().is_empty() && self.commentary.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftMeta {
    pub source_url: String,
    pub created_at: DateTime<FixedOffset>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_draft")]
    pub draft: bool,
}

fn default_draft() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub meta: DraftMeta,
    pub highlights: Vec<Highlight>,
}

impl Draft {
    pub fn new(
        source_url: impl Into<String>,
        tags: Vec<String>,
        highlights: Vec<Highlight>,
        created_at: DateTime<FixedOffset>,
    ) -> Self {
        Draft {
            meta: DraftMeta { source_url: source_url.into(), created_at, tags, draft: true },
            highlights,
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let (front, body) = split_front_matter(text)?;
        let meta: DraftMeta = toml::from_str(front)?;
        Ok(Draft { meta, highlights: parse_body(body) })
    }

    pub fn to_markdown(&self) -> Result<String> {
        let front = toml::to_string(&self.meta)?;
        Ok(format!("{FENCE}\n{front}{FENCE}\n\n{}\n", self.body()))
    }

    pub fn body(&self) -> String {
        render_body(&self.highlights)
    }

    /// `YYYY-MM-DD-<slug>.md`, the name the draft is conventionally stored under.
    pub fn file_name(&self) -> String {
        format!(
            "{}-{}.md",
            self.meta.created_at.format("%Y-%m-%d"),
            slug::generate_slug(&self.meta.source_url)
        )
    }
}

/// Splits `+++` fenced front matter from the body.
pub fn split_front_matter(text: &str) -> Result<(&str, &str)> {
    let text = text.trim_start_matches('\u{feff}');
    let rest = text
        .strip_prefix(FENCE)
        .and_then(|r| r.strip_prefix('\n').or_else(|| r.strip_prefix("\r\n")))
        .ok_or_else(|| Error::MalformedDraft("missing opening `+++`".to_string()))?;

    let end = rest
        .find("\n+++")
        .ok_or_else(|| Error::MalformedDraft("missing closing `+++`".to_string()))?;

    let front = &rest[..end + 1];
    let body = rest[end + 1 + FENCE.len()..].trim_start_matches(['\r', '\n']);
    Ok((front, body))
}

pub fn render_body(highlights: &[Highlight]) -> String {
    let mut parts: Vec<String> = Vec::new();

    for (i, highlight) in highlights.iter().filter(|h| !h.is_blank()).enumerate() {
        parts.push(format!("{} {}", HEADING_PREFIX, i + 1));

        let quote = highlight.quote.trim();
        if !quote.is_empty() {
            for line in quote.lines() {
                if line.trim().is_empty() {
                    parts.push(">".to_string());
                } else {
                    parts.push(format!("> {line}"));
                }
            }
            parts.push(String::new());
        }

        let commentary = highlight.commentary.trim();
        if !commentary.is_empty() {
            parts.push(commentary.to_string());
            parts.push(String::new());
        }
    }

    parts.join("\n")
}

pub fn parse_body(content: &str) -> Vec<Highlight> {
    let mut highlights = Vec::new();
    let mut quote: Vec<&str> = Vec::new();
    let mut commentary: Vec<&str> = Vec::new();
    let mut in_quote = false;

    for line in content.lines() {
        if line.starts_with(HEADING_PREFIX) {
            flush(&mut highlights, &mut quote, &mut commentary);
            in_quote = true;
        } else if let Some(rest) = line.strip_prefix('>') {
            quote.push(rest.strip_prefix(' ').unwrap_or(rest));
            in_quote = true;
        } else if line.trim().is_empty() {
            // A blank line closes a quote; inside commentary it separates paragraphs.
            if in_quote {
                in_quote = false;
            } else if !commentary.is_empty() {
                commentary.push("");
            }
        } else {
            in_quote = false;
            commentary.push(line);
        }
    }
    flush(&mut highlights, &mut quote, &mut commentary);

    highlights
}

fn flush<'a>(highlights: &mut Vec<Highlight>, quote: &mut Vec<&'a str>, commentary: &mut Vec<&'a str>) {
    while commentary.last().is_some_and(|l| l.is_empty()) {
        commentary.pop();
    }
    if !quote.is_empty() || !commentary.is_empty() {
        highlights.push(Highlight::new(quote.join("\n"), commentary.join("\n")));
    }
    quote.clear();
    commentary.clear();
}
