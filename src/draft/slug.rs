// src/draft/slug.rs
use std::sync::OnceLock;

use regex::Regex;

const MAX_SLUG_LEN: usize = 50;
const MAX_DESCRIPTION_LEN: usize = 160;
const DEFAULT_SLUG: &str = "note";
const DEFAULT_TITLE: &str = "Learning Notes";
const DEFAULT_DESCRIPTION: &str = "Notes and insights from recent learning";

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static pattern"))
}

/// Host and path of a URL, without scheme, query or fragment.
fn split_url(url: &str) -> (&str, &str) {
    let rest = url.trim().split_once("://").map(|(_, r)| r).unwrap_or(url.trim());
    let rest = rest.split(['?', '#']).next().unwrap_or("");
    match rest.find('/') {
        Some(i) => (&rest[..i], &rest[i..]),
        None => (rest, ""),
    }
}

/// Last path segment, or the host when the path is empty.
fn source_segment(url: &str) -> String {
    let (host, path) = split_url(url);
    let path = path.trim_matches('/');
    if path.is_empty() {
        host.replace("www.", "")
    } else {
        path.rsplit('/').next().unwrap_or(path).to_string()
    }
}

pub fn generate_slug(url: &str) -> String {
    static STRIP: OnceLock<Regex> = OnceLock::new();
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();

    let segment = source_segment(url);
    let slug = regex(&STRIP, r"[^\w\s-]").replace_all(&segment, "");
    let slug = regex(&SEPARATORS, r"[-\s]+").replace_all(&slug, "-");
    let slug: String = slug.chars().take(MAX_SLUG_LEN).collect();

    if slug.is_empty() {
        DEFAULT_SLUG.to_string()
    } else {
        slug
    }
}

pub fn title_from_url(url: &str) -> String {
    static PUNCTUATION: OnceLock<Regex> = OnceLock::new();

    let segment = source_segment(url).replace(['-', '_'], " ");
    let cleaned = regex(&PUNCTUATION, r"[^\w\s]").replace_all(&segment, "");
    let title = cleaned
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");

    if title.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        title
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// First plain prose line of `content` with inline markup removed.
pub fn generate_description(content: &str) -> String {
    static LINK: OnceLock<Regex> = OnceLock::new();
    static BOLD: OnceLock<Regex> = OnceLock::new();
    static ITALIC: OnceLock<Regex> = OnceLock::new();

    let line = content.lines().map(str::trim).find(|line| {
        !line.is_empty()
            && !line.starts_with('#')
            && !line.starts_with('>')
            && !line.starts_with("**")
            && !line.chars().all(|c| c == '-')
    });

    let Some(line) = line else {
        return DEFAULT_DESCRIPTION.to_string();
    };

    let desc = regex(&LINK, r"\[([^\]]+)\]\([^)]+\)").replace_all(line, "$1");
    let desc = regex(&BOLD, r"\*\*([^*]+)\*\*").replace_all(&desc, "$1");
    let desc = regex(&ITALIC, r"\*([^*]+)\*").replace_all(&desc, "$1");

    if desc.chars().count() > MAX_DESCRIPTION_LEN {
        let truncated: String = desc.chars().take(MAX_DESCRIPTION_LEN - 3).collect();
        format!("{truncated}...")
    } else {
        desc.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_from_last_segment() {
        assert_eq!(generate_slug("https://blog.example.com/2024/05/why-rust?ref=x#top"), "why-rust");
        assert_eq!(generate_slug("https://example.com/Some Title: Part 2/"), "Some-Title-Part-2");
    }

    #[test]
    fn test_slug_fallbacks() {
        assert_eq!(generate_slug("https://www.example.org"), "exampleorg");
        assert_eq!(generate_slug(""), "note");
        assert_eq!(generate_slug("https://example.com/!!!"), "note");
    }

    #[test]
    fn test_slug_is_truncated() {
        let url = format!("https://example.com/{}", "a".repeat(80));
        assert_eq!(generate_slug(&url).len(), 50);
    }

    #[test]
    fn test_title_from_url() {
        assert_eq!(title_from_url("https://example.com/the-MYTHICAL_man-month"), "The Mythical Man Month");
        assert_eq!(title_from_url("https://www.paulgraham.com"), "Paulgrahamcom");
        assert_eq!(title_from_url(""), "Learning Notes");
    }

    #[test]
    fn test_description_skips_markup_lines() {
        let content = "## Key Insight 1\n\n> quoted\n\n**My thoughts:** skip\nA [linked](https://x.y) and **bold** and *soft* line.\n";
        assert_eq!(generate_description(content), "A linked and bold and soft line.");
    }

    #[test]
    fn test_description_truncates() {
        let long = "word ".repeat(50);
        let desc = generate_description(&long);
        assert_eq!(desc.chars().count(), 160);
        assert!(desc.ends_with("..."));
    }

    #[test]
    fn test_description_default() {
        assert_eq!(generate_description("# Title\n> quote only\n---"), DEFAULT_DESCRIPTION);
    }
}
