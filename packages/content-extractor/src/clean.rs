//! HTML to readable text.
//!
//! Regex-based rather than DOM-based: proxies hand back arbitrary and often
//! broken markup, and the goal is a plain-text excerpt for a prompt, not a
//! faithful rendering.

use regex::Regex;
use std::sync::LazyLock;

/// Elements removed wholesale, including their text.
pub const BOILERPLATE_TAGS: [&str; 6] = ["script", "style", "nav", "header", "footer", "aside"];

/// Lines containing any of these (case-insensitive) are dropped.
pub const BLOCKED_PHRASES: [&str; 6] = [
    "cookie",
    "privacy policy",
    "terms of service",
    "subscribe",
    "newsletter",
    "advertisement",
];

/// Lines of this many characters or fewer are dropped.
pub const MIN_LINE_CHARS: usize = 10;

static BOILERPLATE_BLOCKS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    BOILERPLATE_TAGS
        .iter()
        .map(|tag| {
            Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>"))
                .expect("boilerplate block regex is valid")
        })
        .collect()
});

static MAIN_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<main\b[^>]*>(.*?)</main>").expect("main regex is valid")
});

static ARTICLE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<article\b[^>]*>(.*?)</article>").expect("article regex is valid")
});

static CONTENT_DIV: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)<div[^>]*(?:class|id)="[^"]*(?:content|article|post|main)[^"]*"[^>]*>(.*?)</div>"#,
    )
    .expect("content div regex is valid")
});

static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag regex is valid"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

/// Run the full cleaning pipeline over raw page markup.
///
/// Order matters: boilerplate blocks go first so a `<nav>` inside `<main>`
/// cannot leak, and entities are decoded only after tags are gone so an
/// escaped `&lt;script&gt;` survives as text.
pub fn clean_html(html: &str) -> String {
    let without_boilerplate = strip_boilerplate(html);
    let region = select_main_region(&without_boilerplate);
    let text = strip_tags(region);
    let text = decode_entities(&text);
    let text = collapse_whitespace(&text);
    filter_lines(&text)
}

/// Remove `<script>`, `<style>`, `<nav>`, `<header>`, `<footer>` and `<aside>` blocks.
pub fn strip_boilerplate(html: &str) -> String {
    BOILERPLATE_BLOCKS
        .iter()
        .fold(html.to_string(), |text, pattern| {
            pattern.replace_all(&text, "").into_owned()
        })
}

/// Inner markup of the first `<main>`, else `<article>`, else content-like `<div>`.
///
/// Falls back to the whole document when nothing matches or the match is empty.
pub fn select_main_region(html: &str) -> &str {
    [&*MAIN_BLOCK, &*ARTICLE_BLOCK, &*CONTENT_DIV]
        .into_iter()
        .find_map(|pattern| {
            pattern
                .captures(html)
                .and_then(|cap| cap.get(1))
                .map(|m| m.as_str())
        })
        .filter(|inner| !inner.is_empty())
        .unwrap_or(html)
}

/// Replace every remaining tag with a space.
pub fn strip_tags(html: &str) -> String {
    ANY_TAG.replace_all(html, " ").into_owned()
}

/// Decode the common named entities plus `&#39;`, in a fixed order.
pub fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

/// Collapse every whitespace run, newlines included, to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Drop short lines and lines that look like site chrome, then rejoin.
pub fn filter_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| is_content_line(line))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn is_content_line(line: &str) -> bool {
    let lowered = line.to_lowercase();
    lowered.chars().count() > MIN_LINE_CHARS
        && !BLOCKED_PHRASES.iter().any(|phrase| lowered.contains(phrase))
}
