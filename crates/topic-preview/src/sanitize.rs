//! HTML sanitization for post previews
//!
//! The cooked post HTML is rewritten in a fixed sequence of regex passes; later
//! passes rely on earlier ones having run. No DOM is built, so behaviour on
//! malformed or deeply nested markup is best-effort. The output is meant for a
//! trusted preview pane, not as an XSS boundary.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Tags that survive sanitization
pub const ALLOWED_TAGS: &[&str] = &[
    "p",
    "br",
    "strong",
    "b",
    "em",
    "i",
    "u",
    "ul",
    "ol",
    "li",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "div",
    "span",
    "blockquote",
    "pre",
    "code",
];

/// Generic containers, stripped of attributes in their own pass
const CONTAINER_TAGS: &[&str] = &["div", "span"];

/// Class markers added by the quote and code rewrites; the only attributes kept
const MARKERS: &[(&str, &str)] = &[
    ("blockquote", r#" class="forum-quote""#),
    ("pre", r#" class="code-block""#),
    ("code", r#" class="inline-code""#),
];

fn paired_element(tag: &str) -> Regex {
    Regex::new(&format!(r"(?is)<{tag}[^>]*>.*?</{tag}>")).expect("element regex should compile")
}

fn single_tag(tag: &str) -> Regex {
    Regex::new(&format!(r"(?i)<{tag}[^>]*>")).expect("tag regex should compile")
}

/// Executable and non-content markup
static DANGEROUS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        paired_element("script"),
        paired_element("iframe"),
        paired_element("object"),
        single_tag("embed"),
        single_tag("link"),
        single_tag("meta"),
        paired_element("style"),
    ]
});

/// Image elements and their wrappers
static IMAGE_TAGS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        single_tag("img"),
        paired_element("figure"),
        paired_element("picture"),
        single_tag("source"),
    ]
});

/// Image markup in markdown and BBCode
static IMAGE_MARKUP: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"!\[.*?\]\(.*?\)",
        r"(?i)\[img\].*?\[/img\]",
        r"(?i)\[screenshot\].*?\[/screenshot\]",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("image markup regex should compile"))
    .collect()
});

static FORUM_QUOTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<aside class="quote[^>]*>.*?</aside>"#).expect("quote regex should compile")
});

static CODE_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<pre[^>]*><code[^>]*>(.*?)</code></pre>")
        .expect("code block regex should compile")
});

static INLINE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<code[^>]*>(.*?)</code>").expect("inline code regex should compile")
});

/// Opening tag: group 1 is the name, group 2 everything up to `>`
static OPEN_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([A-Za-z][A-Za-z0-9_-]*)([^>]*)>").expect("open tag regex should compile")
});

/// Any tag-like run, opening or closing; group 1 is the (possibly empty) name
static ANY_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"</?([A-Za-z0-9_-]*)[^>]*>").expect("any tag regex should compile")
});

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag regex should compile"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex should compile"));

/// Collapse whitespace runs to a single space and trim
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

/// Visible text of an HTML fragment: tags become spaces, whitespace collapses
pub fn plain_text(html: &str) -> String {
    collapse_whitespace(&TAG_RE.replace_all(html, " "))
}

fn is_allowed(name: &str) -> bool {
    ALLOWED_TAGS.iter().any(|tag| tag.eq_ignore_ascii_case(name))
}

fn remove_all(html: String, patterns: &[Regex]) -> String {
    patterns.iter().fold(html, |acc, re| re.replace_all(&acc, "").into_owned())
}

fn convert_forum_quotes(html: &str) -> String {
    FORUM_QUOTE_RE
        .replace_all(html, |caps: &Captures| {
            format!(
                r#"<blockquote class="forum-quote">{}</blockquote>"#,
                plain_text(&caps[0])
            )
        })
        .into_owned()
}

fn convert_code(html: &str) -> String {
    let html = CODE_BLOCK_RE.replace_all(html, r#"<pre class="code-block">${1}</pre>"#);
    INLINE_CODE_RE
        .replace_all(&html, r#"<code class="inline-code">${1}</code>"#)
        .into_owned()
}

/// Drop the attributes of every opening tag named in `tags`
///
/// Tag names match whole, so `<ul>` is never taken for `<u>`.
fn strip_attributes(html: &str, tags: &[&str]) -> String {
    OPEN_TAG_RE
        .replace_all(html, |caps: &Captures| {
            let name = &caps[1];
            let attrs = &caps[2];

            if !tags.iter().any(|tag| tag.eq_ignore_ascii_case(name)) {
                return caps[0].to_string();
            }

            let is_marker = MARKERS
                .iter()
                .any(|(tag, marker)| *tag == name && *marker == attrs);
            if is_marker {
                caps[0].to_string()
            } else {
                format!("<{name}>")
            }
        })
        .into_owned()
}

/// Remove every tag that is not allow-listed, keeping the text around it
fn remove_unknown_tags(html: &str) -> String {
    ANY_TAG_RE
        .replace_all(html, |caps: &Captures| {
            if is_allowed(&caps[1]) {
                caps[0].to_string()
            } else {
                String::new()
            }
        })
        .into_owned()
}

/// Sanitize cooked post HTML down to the allow-listed tags
pub fn sanitize_html(html: &str) -> String {
    let cleaned = remove_all(html.to_string(), &DANGEROUS);
    let cleaned = remove_all(cleaned, &IMAGE_TAGS);
    let cleaned = remove_all(cleaned, &IMAGE_MARKUP);

    let cleaned = convert_forum_quotes(&cleaned);
    let cleaned = convert_code(&cleaned);
    let cleaned = collapse_whitespace(&cleaned);

    let cleaned = strip_attributes(&cleaned, CONTAINER_TAGS);
    let cleaned = strip_attributes(&cleaned, ALLOWED_TAGS);

    // Dropping unknown tags can join image markup that was split across them
    let cleaned = remove_all(remove_unknown_tags(&cleaned), &IMAGE_MARKUP);
    collapse_whitespace(&cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_script_and_image() {
        let html = "<img src=x><p>Hello <script>alert(1)</script>world</p>";
        assert_eq!(sanitize_html(html), "<p>Hello world</p>");
    }

    #[test]
    fn test_removes_dangerous_elements_across_lines() {
        let html = "<style>\n.a { color: red }\n</style><p>kept</p>\
                    <iframe src=\"https://example.com\">\nfallback\n</iframe>\
                    <object data=\"x\">inner</object><embed src=\"y\">\
                    <link rel=\"stylesheet\" href=\"z\"><meta charset=\"utf-8\">";
        assert_eq!(sanitize_html(html), "<p>kept</p>");
    }

    #[test]
    fn test_removes_image_constructs() {
        let html = r#"<figure><img src="a.png"><figcaption>cap</figcaption></figure>
            <picture><source srcset="b.webp"><img src="b.png"></picture>
            <p>Text ![alt](http://x/y.png) [img]http://x/z.png[/img] [SCREENSHOT]s.png[/SCREENSHOT] end</p>"#;
        assert_eq!(sanitize_html(html), "<p>Text end</p>");
    }

    #[test]
    fn test_forum_quote_becomes_flat_blockquote() {
        let html = r#"<aside class="quote no-group" data-username="bob">
            <div class="title"><img src="avatar.png"> bob:</div>
            <blockquote><p>quoted <em>text</em></p></blockquote>
        </aside><p>reply</p>"#;

        assert_eq!(
            sanitize_html(html),
            r#"<blockquote class="forum-quote">bob: quoted text</blockquote><p>reply</p>"#
        );
    }

    #[test]
    fn test_code_block_and_inline_code() {
        let html = r#"<pre data-lang="lua"><code class="lang-lua">local x = 1</code></pre>
            <p>Use <code>ensure name</code> in <span class="hljs">cfg</span></p>"#;

        assert_eq!(
            sanitize_html(html),
            r#"<pre class="code-block">local x = 1</pre> <p>Use <code class="inline-code">ensure name</code> in <span>cfg</span></p>"#
        );
    }

    #[test]
    fn test_strips_attributes_from_allowed_tags() {
        let html = r#"<div class="wrap" id="w"><h2 id="title">Title</h2><ul class="list"><li data-x="1">one</li></ul><p style="color:red">x<br/>y</p></div>"#;

        assert_eq!(
            sanitize_html(html),
            "<div><h2>Title</h2><ul><li>one</li></ul><p>x<br>y</p></div>"
        );
    }

    #[test]
    fn test_tag_names_match_whole() {
        let html = r#"<ul class="a"><li>x</li></ul><pre class="b">y</pre><u class="c">z</u>"#;
        assert_eq!(
            sanitize_html(html),
            "<ul><li>x</li></ul><pre>y</pre><u>z</u>"
        );
    }

    #[test]
    fn test_foreign_blockquote_attributes_are_stripped() {
        let html = r#"<blockquote cite="http://x">said</blockquote>"#;
        assert_eq!(sanitize_html(html), "<blockquote>said</blockquote>");
    }

    #[test]
    fn test_unknown_tags_removed_text_kept() {
        let html = r#"<p>See <a href="https://example.com" class="onebox">the <mark>docs</mark></a><!-- note --></p><table><tr><td>cell</td></tr></table>"#;
        assert_eq!(sanitize_html(html), "<p>See the docs</p>cell");
    }

    #[test]
    fn test_whitespace_collapsed_and_trimmed() {
        let html = "\n\n  <p>a   \n\t b</p>   <p> c </p>\n";
        assert_eq!(sanitize_html(html), "<p>a b</p> <p> c </p>");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let html = r##"<aside class="quote"><p>q</p></aside>
            <h1 id="x">Title</h1><div class="d"><span style="s">in</span></div>
            <pre><code>code()</code></pre><p>a <code>b</code> <a href="#">c</a> <img src="i"></p>
            <ol><li>1</li></ol><script>bad()</script>"##;

        let once = sanitize_html(html);
        let twice = sanitize_html(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_image_markup_split_by_link_is_removed() {
        let html = r#"<p>!<a href="x">[alt](y.png)</a> text</p>"#;

        let once = sanitize_html(html);
        assert_eq!(once, "<p> text</p>");
        assert_eq!(sanitize_html(&once), once);
    }

    #[test]
    fn test_output_contains_only_allowed_tags() {
        let html = r#"<section><article><p class="x">one</p><hr><nav>two</nav></article></section>"#;
        let output = sanitize_html(html);

        for caps in ANY_TAG_RE.captures_iter(&output) {
            assert!(is_allowed(&caps[1]), "unexpected tag in {output}");
        }
        assert_eq!(output, "<p>one</p>two");
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(plain_text("<p>Hello <b>big</b>\n world</p>"), "Hello big world");
        assert_eq!(plain_text("  "), "");
    }
}
