use super::super::error::ExtractError;
use super::super::report::ReportType;
use super::container::extract_document;
use super::section::{find_span, locate_sections, WANTED_ITEMS};
use super::text::markup_to_text;
use super::types::TenKSections;

/// Pull the annual-report body out of a complete submission and flatten
/// the four wanted items to plain text. Every wanted item must match;
/// callers decide per document whether a missing section is fatal.
pub fn extract_ten_k_sections(raw: &str, cik: &str) -> Result<TenKSections, ExtractError> {
    let doc = extract_document(raw, &ReportType::Form10K.to_string())?;
    let spans = locate_sections(doc);

    let mut texts = WANTED_ITEMS
        .iter()
        .map(|label| {
            let span = find_span(&spans, label)?;
            Ok(markup_to_text(&doc[span.start..span.end]))
        })
        .collect::<Result<Vec<String>, ExtractError>>()?;

    let item7a = texts.pop().unwrap_or_default();
    let item7 = texts.pop().unwrap_or_default();
    let item1a = texts.pop().unwrap_or_default();
    let item1 = texts.pop().unwrap_or_default();

    Ok(TenKSections {
        item1,
        item1a,
        item7,
        item7a,
        cik: cik.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten_k_submission() -> String {
        let body = concat!(
            "<html><body>",
            "<p>INDEX</p>",
            ">Item 1. Business (page 3) ",
            ">Item 1A. Risk Factors (page 9) ",
            "<div>>Item 1. Business</div><p>We design consumer products.</p>",
            "<div>>Item 1A. Risk Factors</div><p>Demand may decline.</p>",
            "<div>>Item 7. Management Discussion</div><p>Margins improved.</p>",
            "<div>>Item 7A. Market Risk</div><p>Rates are hedged.</p>",
            "<div>>Item 8. Financial Statements</div><p>See notes.</p>",
            "</body></html>"
        );
        format!(
            "<DOCUMENT>\n<TYPE>10-K\n<SEQUENCE>1\n<TEXT>\n{}\n</TEXT>\n</DOCUMENT>\n",
            body
        )
    }

    #[test]
    fn extracts_all_four_items_as_text() {
        let report = extract_ten_k_sections(&ten_k_submission(), "320193").unwrap();
        assert!(report.item1.contains("We design consumer products."));
        assert!(report.item1a.contains("Demand may decline."));
        assert!(report.item7.contains("Margins improved."));
        assert!(report.item7a.contains("Rates are hedged."));
        // spans end where the next item starts
        assert!(!report.item7a.contains("See notes."));
        assert!(!report.item1.contains("Demand may decline."));
        assert_eq!(report.cik, "320193");
    }

    #[test]
    fn toc_mentions_do_not_shadow_bodies() {
        let report = extract_ten_k_sections(&ten_k_submission(), "320193").unwrap();
        // the index lines come before the real bodies; last match wins
        assert!(!report.item1.contains("page 3"));
    }

    #[test]
    fn missing_item_is_reported() {
        let raw = "<DOCUMENT>\n<TYPE>10-K\n<TEXT>>Item 1. Business only</TEXT>\n</DOCUMENT>";
        let err = extract_ten_k_sections(raw, "1").unwrap_err();
        assert!(matches!(err, ExtractError::MissingSection(_)));
    }

    #[test]
    fn wrong_document_type_is_reported() {
        let raw = "<DOCUMENT>\n<TYPE>10-Q\n<TEXT>quarterly</TEXT>\n</DOCUMENT>";
        let err = extract_ten_k_sections(raw, "1").unwrap_err();
        assert!(matches!(err, ExtractError::ContainerNotFound(_)));
    }
}
