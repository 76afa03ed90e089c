use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use super::super::error::ExtractError;
use super::types::SectionSpan;

/// The sections kept from a 10-K body: business, risk factors, MD&A, and
/// quantitative/qualitative market risk disclosures.
pub const WANTED_ITEMS: [&str; 4] = ["item1", "item1a", "item7", "item7a"];

// Item headings show up in two conventions: an inline tag-attribute form
// (">Item 1A.") and a plain uppercase form ("ITEM 1A"). Non-breaking space
// entities stand in for the separator in the tagged form.
static ITEM_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(>(Item|ITEM)(\s|&#160;|&nbsp;)(1A|1B|1\.|7A|7|8)\.{0,1})|(ITEM\s(1A|1B|1\.|7A|7|8))")
        .unwrap()
});

// Canonical key for a heading match: "item1a" from ">Item&#160;1A.".
fn canonical_label(matched: &str) -> String {
    let lowered = matched.to_lowercase();
    let decoded = html_escape::decode_html_entities(&lowered);
    decoded
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.' && *c != '>')
        .collect()
}

/// Single pattern pass over a 10-K body, yielding one span per recognized
/// item label. Duplicate labels collapse to the occurrence with the
/// greatest start offset, since a table of contents lists every item
/// before its real body appears. Boundaries are then derived in one
/// forward scan: each span ends where the next surviving heading starts,
/// and the last span runs to the end of the document.
pub fn locate_sections(doc: &str) -> Vec<SectionSpan> {
    let mut matches: Vec<(String, usize)> = ITEM_HEADING
        .find_iter(doc)
        .map(|m| (canonical_label(m.as_str()), m.start()))
        .collect();
    matches.sort_by_key(|&(_, start)| start);

    let mut last_start: HashMap<String, usize> = HashMap::new();
    for (label, start) in matches {
        last_start.insert(label, start);
    }

    let mut ordered: Vec<(String, usize)> = last_start.into_iter().collect();
    ordered.sort_by_key(|&(_, start)| start);

    ordered
        .iter()
        .enumerate()
        .map(|(i, (label, start))| SectionSpan {
            label: label.clone(),
            start: *start,
            end: ordered.get(i + 1).map_or(doc.len(), |&(_, next)| next),
        })
        .collect()
}

pub fn find_span<'a>(spans: &'a [SectionSpan], label: &str) -> Result<&'a SectionSpan, ExtractError> {
    spans
        .iter()
        .find(|s| s.label == label)
        .ok_or_else(|| ExtractError::MissingSection(label.to_string()))
}
