//! Structure-aware truncation of sanitized preview HTML

use regex::Regex;
use std::sync::LazyLock;

use crate::sanitize::plain_text;

/// Maximum visible characters in a preview
pub const PREVIEW_CHAR_BUDGET: usize = 1000;

/// A hard cut only backs off to a space found past this many characters
pub const MIN_TRUNCATED_CHARS: usize = 800;

const ELLIPSIS: &str = "...";

/// Closing tags that end a block and are safe places to cut
static BLOCK_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</(?:p|h[1-6]|li|blockquote)>").expect("block close regex should compile")
});

static FIRST_PARAGRAPH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<p(?:\s[^>]*)?>.*?</p>").expect("paragraph regex should compile")
});

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Truncate sanitized HTML to the default preview budget
pub fn truncate_html(html: &str) -> String {
    truncate_html_with(html, PREVIEW_CHAR_BUDGET, MIN_TRUNCATED_CHARS)
}

/// Truncate sanitized HTML so its visible text fits in `budget` characters
///
/// Input that already fits is returned unchanged. Otherwise whole blocks are
/// kept for as long as they fit; if not even the first block does, the first
/// paragraph (or the whole text) is cut at a word boundary and ellipsized.
pub fn truncate_html_with(html: &str, budget: usize, minimum: usize) -> String {
    let text = plain_text(html);
    if char_len(&text) <= budget {
        return html.to_string();
    }

    if !BLOCK_CLOSE_RE.is_match(html) {
        return wrap_paragraph(&hard_truncate(&text, budget, minimum));
    }

    let blocks = take_whole_blocks(html, budget);
    if !blocks.trim().is_empty() {
        return blocks;
    }

    match FIRST_PARAGRAPH_RE.find(html) {
        Some(paragraph) => {
            let paragraph_text = plain_text(paragraph.as_str());
            if char_len(&paragraph_text) > budget {
                wrap_paragraph(&hard_truncate(&paragraph_text, budget, minimum))
            } else {
                paragraph.as_str().to_string()
            }
        }
        None => wrap_paragraph(&hard_truncate(&text, budget, minimum)),
    }
}

/// Greedily keep (content, closing tag) pairs while their text fits the budget
///
/// Adjacent blocks read as separated by one space, which counts toward the budget.
fn take_whole_blocks(html: &str, budget: usize) -> String {
    let mut kept = String::new();
    let mut kept_chars = 0;
    let mut start = 0;

    let closers = BLOCK_CLOSE_RE
        .find_iter(html)
        .map(Some)
        .chain(std::iter::once(None));

    for closer in closers {
        let (content, closing, next) = match closer {
            Some(m) => (&html[start..m.start()], m.as_str(), m.end()),
            None => (&html[start..], "", html.len()),
        };

        let content_chars = char_len(&plain_text(content));
        let separator = usize::from(kept_chars > 0 && content_chars > 0);
        if kept_chars + separator + content_chars > budget {
            break;
        }

        kept.push_str(content);
        kept.push_str(closing);
        kept_chars += separator + content_chars;
        start = next;
    }

    kept
}

/// Cut plain text to `budget` characters, backing off to the last space past `minimum`
fn hard_truncate(text: &str, budget: usize, minimum: usize) -> String {
    let cut: String = text.chars().take(budget).collect();
    let cut = cut.trim();

    let shortened = cut
        .rfind(' ')
        .filter(|&idx| char_len(&cut[..idx]) > minimum)
        .map_or(cut, |idx| &cut[..idx]);

    format!("{shortened}{ELLIPSIS}")
}

fn wrap_paragraph(text: &str) -> String {
    format!("<p>{text}</p>")
}
