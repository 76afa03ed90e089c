use itertools::izip;
use once_cell::sync::Lazy;
use regex::Regex;

use super::super::error::ExtractError;

static DOC_BEGIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<DOCUMENT>").unwrap());
static DOC_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"</DOCUMENT>").unwrap());
// <TYPE> value runs to the end of its line
static DOC_TYPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<TYPE>[^\n]+").unwrap());

/// Pull the sub-document with the given `<TYPE>` out of a complete
/// submission text. A submission concatenates many `<DOCUMENT>` units (the
/// main form plus exhibits); the returned slice is the text strictly
/// between the begin and end markers of the matching unit.
///
/// If several units carry the target type, the first one in document order
/// wins. No matching unit is a hard error for the whole filing.
pub fn extract_document<'a>(raw: &'a str, doc_type: &str) -> Result<&'a str, ExtractError> {
    let begins = DOC_BEGIN.find_iter(raw).map(|m| m.end());
    let ends = DOC_END.find_iter(raw).map(|m| m.start());
    let types = DOC_TYPE
        .find_iter(raw)
        .map(|m| m.as_str()["<TYPE>".len()..].trim_end());

    // The i-th <TYPE> marker belongs to the i-th <DOCUMENT> unit.
    for (unit_type, begin, end) in izip!(types, begins, ends) {
        if unit_type == doc_type {
            return Ok(&raw[begin..end]);
        }
    }

    Err(ExtractError::ContainerNotFound(doc_type.to_string()))
}
