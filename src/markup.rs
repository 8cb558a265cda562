//! Server markup to terminal text.
//!
//! Post bodies arrive as Markdown, raw HTML, or a mix of both. They are
//! flattened to plain lines for the detail view:
//! - Markdown block structure is walked with pulldown_cmark
//! - HTML fragments have their tags removed, with block-level tags turned
//!   into line breaks and entities decoded
//! - `<script>` and `<style>` bodies are dropped entirely
//!
//! Every string that reaches the terminal from the server passes through
//! [`sanitize`] first. A terminal never runs scripts, but it does obey
//! escape sequences, so those are removed along with other control
//! characters.

use once_cell::sync::Lazy;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use regex::Regex;

/// CSI, OSC and two-byte escape sequences.
static ESCAPE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x1b\[[0-?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)?|\x1b[@-Z\\-_]?")
        .expect("Invalid escape regex pattern")
});

static SCRIPT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(?:script|style)\s*>")
        .expect("Invalid script regex pattern")
});

static BREAK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").expect("Invalid break regex pattern"));

static BLOCK_END_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)</(p|div|h[1-6]|li|ul|ol|blockquote|pre|tr|table|section|article)\s*>")
        .expect("Invalid block regex pattern")
});

static LIST_ITEM_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<li\b[^>]*>").expect("Invalid list regex pattern"));

static TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("Invalid tag regex pattern"));

static ENTITY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]+);").expect("Invalid entity regex pattern")
});

/// Remove escape sequences and control characters, keeping newlines and
/// turning tabs into spaces.
pub fn sanitize(text: &str) -> String {
    ESCAPE_REGEX
        .replace_all(text, "")
        .chars()
        .filter_map(|c| match c {
            '\n' => Some('\n'),
            '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// Single-line variant of [`sanitize`] for titles, names and the like.
pub fn sanitize_inline(text: &str) -> String {
    sanitize(text).replace('\n', " ")
}

fn decode_entity(entity: &str) -> Option<String> {
    let decoded = match entity {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "mdash" => '\u{2014}',
        "ndash" => '\u{2013}',
        "hellip" => '\u{2026}',
        "copy" => '\u{a9}',
        "rsquo" => '\u{2019}',
        "lsquo" => '\u{2018}',
        "rdquo" => '\u{201d}',
        "ldquo" => '\u{201c}',
        _ => {
            let code = if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                entity.strip_prefix('#')?.parse::<u32>().ok()?
            };
            char::from_u32(code)?
        }
    };
    Some(decoded.to_string())
}

/// Decode named and numeric character references. Unknown names are left
/// as written.
pub fn decode_entities(text: &str) -> String {
    ENTITY_REGEX
        .replace_all(text, |caps: &regex::Captures| {
            decode_entity(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Flatten an HTML fragment to text.
pub fn html_to_text(html: &str) -> String {
    let text = SCRIPT_REGEX.replace_all(html, "");
    let text = BREAK_REGEX.replace_all(&text, "\n");
    let text = LIST_ITEM_REGEX.replace_all(&text, "\n\u{2022} ");
    let text = BLOCK_END_REGEX.replace_all(&text, "\n\n");
    let text = TAG_REGEX.replace_all(&text, "");
    let text = decode_entities(&text);

    // Source indentation is not content
    text.lines().map(str::trim).collect::<Vec<_>>().join("\n")
}

fn ensure_block_break(out: &mut String) {
    if out.is_empty() || out.ends_with("\n\n") {
        return;
    }
    if out.ends_with('\n') {
        out.push('\n');
    } else {
        out.push_str("\n\n");
    }
}

fn ensure_line_break(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn flush_html(out: &mut String, pending: &mut String) {
    if !pending.is_empty() {
        out.push_str(&html_to_text(pending));
        pending.clear();
    }
}

/// Turn post body markup into display lines.
///
/// Consecutive blank lines collapse to one and leading/trailing blank lines
/// are dropped. Empty input yields no lines.
pub fn to_plain_lines(markup: &str) -> Vec<String> {
    let clean = sanitize(markup);
    let mut out = String::new();
    let mut pending_html = String::new();

    for event in Parser::new(&clean) {
        if let Event::Html(html) | Event::InlineHtml(html) = &event {
            pending_html.push_str(html);
            continue;
        }
        flush_html(&mut out, &mut pending_html);

        match event {
            Event::Start(Tag::Paragraph)
            | Event::Start(Tag::Heading { .. })
            | Event::Start(Tag::BlockQuote(_))
            | Event::Start(Tag::CodeBlock(_))
            | Event::Start(Tag::List(_)) => ensure_block_break(&mut out),
            Event::Start(Tag::Item) => {
                ensure_line_break(&mut out);
                out.push_str("\u{2022} ");
            }
            Event::End(TagEnd::Paragraph)
            | Event::End(TagEnd::Heading(_))
            | Event::End(TagEnd::CodeBlock)
            | Event::End(TagEnd::Item) => ensure_line_break(&mut out),
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak => out.push(' '),
            Event::HardBreak => out.push('\n'),
            Event::Rule => {
                ensure_block_break(&mut out);
                out.push_str("\u{2500}\u{2500}\u{2500}\u{2500}\n");
            }
            Event::TaskListMarker(done) => out.push_str(if done { "[x] " } else { "[ ] " }),
            _ => {}
        }
    }
    flush_html(&mut out, &mut pending_html);

    // Decoded entities may have produced control characters again
    let out = sanitize(&out);

    let mut lines: Vec<String> = Vec::new();
    for line in out.lines().map(str::trim_end) {
        let blank = line.trim().is_empty();
        if blank && lines.last().map_or(true, |l| l.is_empty()) {
            continue;
        }
        lines.push(if blank { String::new() } else { line.to_string() });
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}
