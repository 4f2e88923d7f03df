//! Display-text helpers for catalog descriptions
//!
//! Index descriptions arrive as publisher-supplied HTML fragments;
//! surfaces want short plain text. Stripping is tolerant, not a
//! sanitizer: unknown entities pass through untouched.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Comments first: a comment may legally contain '>' inside, which
    // would otherwise end the tag match early.
    static ref COMMENT_REGEX: Regex =
        Regex::new(r"(?s)<!--.*?-->").expect("comment pattern compiles");
    static ref TAG_REGEX: Regex = Regex::new(r"<[^>]*>").expect("tag pattern compiles");
}

/// Drop HTML tags and comment markers and decode the handful of
/// entities publisher feeds actually use.
pub fn strip_html(html: &str) -> String {
    let without_comments = COMMENT_REGEX.replace_all(html, " ");
    let without_tags = TAG_REGEX.replace_all(&without_comments, " ");

    // Ampersand last, or escaped entities ("&amp;lt;") decode twice.
    let decoded = without_tags
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    collapse_spaces(&decoded)
}

/// Cut text at `max_chars`, appending an ellipsis. Counts characters,
/// not bytes, so accented text never splits mid-codepoint.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

/// The short display form of a raw description.
pub fn display_blurb(description: &str, max_chars: usize) -> String {
    truncate(&strip_html(description), max_chars)
}

fn collapse_spaces(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_space = false;

    for c in s.chars() {
        if c.is_whitespace() {
            if !prev_was_space && !result.is_empty() {
                result.push(' ');
                prev_was_space = true;
            }
        } else {
            result.push(c);
            prev_was_space = false;
        }
    }

    result.trim_end().to_string()
}
