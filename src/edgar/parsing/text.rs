use scraper::Html;
use unicode_normalization::UnicodeNormalization;

// Word processors leave this behind when an internal cross-reference
// breaks; it carries no information and pollutes the section text.
const BROKEN_BOOKMARK: &str = "Error! Bookmark not defined.";

/// Flatten a markup span to plain text: block structure becomes newlines,
/// tags disappear, entities decode, and the result is NFKC-normalized.
/// Parsing is lenient html5ever semantics, so unclosed or misnested tags
/// degrade to best-effort text instead of failing the filing.
pub fn markup_to_text(content: &str) -> String {
    let cleaned = content.replace(BROKEN_BOOKMARK, "");
    let html = Html::parse_document(&cleaned);
    let text = html
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join("\n");
    text.nfkc().collect()
}
