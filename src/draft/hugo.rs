// src/draft/hugo.rs
use serde::Serialize;

use super::slug::{generate_description, title_from_url};
use super::{Draft, FENCE, HEADING_PREFIX};
use crate::error::Result;

const HUGO_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HugoParams {
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HugoFrontMatter {
    pub title: String,
    pub date: String,
    pub draft: bool,
    pub tags: Vec<String>,
    pub description: String,
    pub params: HugoParams,
}

/// A draft rewritten as a publishable Hugo post.
#[derive(Debug, Clone, PartialEq)]
pub struct HugoPost {
    pub front: HugoFrontMatter,
    pub content: String,
}

impl HugoPost {
    pub fn from_draft(draft: &Draft, title: Option<&str>) -> Self {
        let source = draft.meta.source_url.trim();
        let title = match title.map(str::trim).filter(|t| !t.is_empty()) {
            Some(title) => title.to_string(),
            None => title_from_url(source),
        };

        let mut content = to_hugo_content(&draft.body());
        if !source.is_empty() {
            content.push_str(&format!("\n\n---\n\n**Source:** [{source}]({source})\n"));
        }

        let front = HugoFrontMatter {
            title,
            date: draft.meta.created_at.format(HUGO_DATE_FORMAT).to_string(),
            draft: false,
            tags: draft.meta.tags.clone(),
            description: generate_description(&content),
            params: HugoParams { source: source.to_string() },
        };

        HugoPost { front, content }
    }

    pub fn to_markdown(&self) -> Result<String> {
        let front = toml::to_string(&self.front)?;
        Ok(format!("{FENCE}\n{front}{FENCE}\n\n{}\n", self.content.trim_end()))
    }
}

#[derive(Default)]
struct InsightSection<'a> {
    title: Option<String>,
    quote: Vec<&'a str>,
    commentary: Vec<&'a str>,
}

impl InsightSection<'_> {
    fn is_empty(&self) -> bool {
        self.quote.is_empty() && self.commentary.is_empty()
    }

    fn write(&self, out: &mut Vec<String>, last: bool) {
        if let Some(ref title) = self.title {
            out.push(title.clone());
            out.push(String::new());
        }

        if !self.quote.is_empty() {
            out.extend(self.quote.iter().map(|l| l.to_string()));
            out.push(String::new());
        }

        if let Some((first, rest)) = self.commentary.split_first() {
            out.push(format!("**My thoughts:** {first}"));
            out.extend(rest.iter().map(|l| l.to_string()));
            if !last {
                out.push(String::new());
            }
        }

        if !last {
            out.push("---".to_string());
            out.push(String::new());
        }
    }
}

/// Rewrites draft highlights as numbered "Key Insight" sections separated by
/// horizontal rules.
pub fn to_hugo_content(body: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut section = InsightSection::default();
    let mut insight = 1;
    let mut in_quote = false;

    for line in body.lines() {
        if line.starts_with(HEADING_PREFIX) {
            if !section.is_empty() {
                section.write(&mut out, false);
            }
            section = InsightSection {
                title: Some(format!("## Key Insight {insight}")),
                ..InsightSection::default()
            };
            insight += 1;
            in_quote = false;
        } else if line.starts_with('>') {
            section.quote.push(line);
            in_quote = true;
        } else if line.trim().is_empty() {
            in_quote = false;
        } else if !in_quote {
            section.commentary.push(line);
        }
    }

    if !section.is_empty() {
        section.write(&mut out, true);
    }

    out.join("\n").trim().to_string()
}
