use chrono::NaiveDate;
use std::fs;
use tempfile::tempdir;

use edgar_extract::edgar::aggregate::{aggregate, filter_top_periods};
use edgar_extract::edgar::batch::parse_holdings_dir;
use edgar_extract::edgar::parsing::form10k::extract_ten_k_sections;
use edgar_extract::edgar::parsing::form13f::extract_manager_info;

// A 13F-HR submission in the shape EDGAR serves: SGML-style document
// markers around two embedded XML payloads. The information table holds
// three keepable positions (one duplicated) and three that the filter
// must drop.
const FILING_A: &str = r#"-----BEGIN PRIVACY-ENHANCED MESSAGE-----
<SEC-DOCUMENT>0001398344-23-009400.txt : 20230511
<DOCUMENT>
<TYPE>13F-HR
<SEQUENCE>1
<FILENAME>primary_doc.xml
<TEXT>
<XML>
<?xml version="1.0" encoding="UTF-8"?>
<edgarSubmission xmlns="http://www.sec.gov/edgar/thirteenffiler" xmlns:com="http://www.sec.gov/edgar/common">
  <headerData>
    <submissionType>13F-HR</submissionType>
    <filerInfo>
      <filer>
        <credentials>
          <cik>1962636</cik>
          <ccc>XXXXXXXX</ccc>
        </credentials>
      </filer>
      <periodOfReport>03-31-2023</periodOfReport>
    </filerInfo>
  </headerData>
  <formData>
    <coverPage>
      <reportCalendarOrQuarter>03-31-2023</reportCalendarOrQuarter>
      <filingManager>
        <name>Example Capital Management</name>
        <address>
          <com:street1>1 Main St</com:street1>
          <com:city>Boston</com:city>
          <com:stateOrCountry>MA</com:stateOrCountry>
          <com:zipCode>02110</com:zipCode>
        </address>
      </filingManager>
    </coverPage>
  </formData>
</edgarSubmission>
</XML>
</TEXT>
</DOCUMENT>
<DOCUMENT>
<TYPE>INFORMATION TABLE
<SEQUENCE>2
<FILENAME>infotable.xml
<TEXT>
<XML>
<?xml version="1.0" encoding="UTF-8"?>
<ns1:informationTable xmlns:ns1="http://www.sec.gov/edgar/document/thirteenf/informationtable">
  <ns1:infoTable>
    <ns1:nameOfIssuer>APPLE INC</ns1:nameOfIssuer>
    <ns1:titleOfClass>COM</ns1:titleOfClass>
    <ns1:cusip>037833100</ns1:cusip>
    <ns1:value>1500</ns1:value>
    <ns1:shrsOrPrnAmt>
      <ns1:sshPrnamt>9500</ns1:sshPrnamt>
      <ns1:sshPrnamtType>SH</ns1:sshPrnamtType>
    </ns1:shrsOrPrnAmt>
  </ns1:infoTable>
  <ns1:infoTable>
    <ns1:nameOfIssuer>APPLE INC</ns1:nameOfIssuer>
    <ns1:titleOfClass>COM</ns1:titleOfClass>
    <ns1:cusip>037833100</ns1:cusip>
    <ns1:value>500</ns1:value>
    <ns1:shrsOrPrnAmt>
      <ns1:sshPrnamt>3200</ns1:sshPrnamt>
      <ns1:sshPrnamtType>SH</ns1:sshPrnamtType>
    </ns1:shrsOrPrnAmt>
  </ns1:infoTable>
  <ns1:infoTable>
    <ns1:nameOfIssuer>MICROSOFT CORP</ns1:nameOfIssuer>
    <ns1:titleOfClass>COM</ns1:titleOfClass>
    <ns1:cusip>594918104</ns1:cusip>
    <ns1:value>2000</ns1:value>
    <ns1:shrsOrPrnAmt>
      <ns1:sshPrnamt>7000</ns1:sshPrnamt>
      <ns1:sshPrnamtType>SH</ns1:sshPrnamtType>
    </ns1:shrsOrPrnAmt>
  </ns1:infoTable>
  <ns1:infoTable>
    <ns1:nameOfIssuer>NONE TO REPORT</ns1:nameOfIssuer>
    <ns1:titleOfClass>COM</ns1:titleOfClass>
    <ns1:cusip>000000000</ns1:cusip>
    <ns1:value>0</ns1:value>
    <ns1:shrsOrPrnAmt>
      <ns1:sshPrnamt>0</ns1:sshPrnamt>
      <ns1:sshPrnamtType>SH</ns1:sshPrnamtType>
    </ns1:shrsOrPrnAmt>
  </ns1:infoTable>
  <ns1:infoTable>
    <ns1:nameOfIssuer>SOME ISSUER</ns1:nameOfIssuer>
    <ns1:titleOfClass>WARRANTS</ns1:titleOfClass>
    <ns1:cusip>12345P789</ns1:cusip>
    <ns1:value>900</ns1:value>
    <ns1:shrsOrPrnAmt>
      <ns1:sshPrnamt>100</ns1:sshPrnamt>
      <ns1:sshPrnamtType>SH</ns1:sshPrnamtType>
    </ns1:shrsOrPrnAmt>
  </ns1:infoTable>
  <ns1:infoTable>
    <ns1:nameOfIssuer>BOND ISSUER</ns1:nameOfIssuer>
    <ns1:titleOfClass>COM</ns1:titleOfClass>
    <ns1:cusip>98765R123</ns1:cusip>
    <ns1:value>800</ns1:value>
    <ns1:shrsOrPrnAmt>
      <ns1:sshPrnamt>50000</ns1:sshPrnamt>
      <ns1:sshPrnamtType>PRN</ns1:sshPrnamtType>
    </ns1:shrsOrPrnAmt>
  </ns1:infoTable>
</ns1:informationTable>
</XML>
</TEXT>
</DOCUMENT>
-----END PRIVACY-ENHANCED MESSAGE-----
"#;

// The information table payload is truncated mid-element, so the filing
// must fail as a whole without contributing records.
const FILING_B: &str = r#"<SEC-DOCUMENT>0009999999-23-000001.txt : 20230512
<DOCUMENT>
<TYPE>13F-HR
<TEXT>
<XML>
<edgarSubmission>
  <headerData><filerInfo><filer><credentials><cik>9999999</cik></credentials></filer></filerInfo></headerData>
  <formData>
    <coverPage>
      <reportCalendarOrQuarter>03-31-2023</reportCalendarOrQuarter>
      <filingManager>
        <name>Broken Filings LLC</name>
        <address><street1>2 Side St</street1><city>Reno</city></address>
      </filingManager>
    </coverPage>
  </formData>
</edgarSubmission>
</XML>
</TEXT>
</DOCUMENT>
<DOCUMENT>
<TYPE>INFORMATION TABLE
<TEXT>
<XML>
<informationTable>
  <infoTable>
    <nameOfIssuer>TRUNCATED CO</nameOfIssuer>
    <titleOfClass>COM
</XML>
</TEXT>
</DOCUMENT>
"#;

const FILE_A: &str = "_Archives_edgar_data_1962636_0001398344-23-009400.txt";
const FILE_B: &str = "_Archives_edgar_data_9999999_0009999999-23-000001.txt";

#[test]
fn batch_isolates_per_document_failures() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(FILE_A), FILING_A).unwrap();
    fs::write(dir.path().join(FILE_B), FILING_B).unwrap();
    fs::write(dir.path().join("notes.md"), "not a filing").unwrap();

    let (records, report) = parse_holdings_dir(dir.path()).unwrap();

    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.failed_ids, vec![FILE_B.to_string()]);

    // only document A contributes, all-or-nothing per document
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.source
        == "https://sec.gov/Archives/edgar/data/1962636/0001398344-23-009400.txt"));
    assert!(records.iter().all(|r| r.manager_cik == "1962636"));
    assert!(records
        .iter()
        .all(|r| r.manager_address == "1 Main St, Boston, MA, 02110"));
    assert!(records.iter().all(|r| r.report_period
        == NaiveDate::from_ymd_opt(2023, 3, 31).unwrap()));
}

#[test]
fn duplicate_positions_sum_in_aggregation() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(FILE_A), FILING_A).unwrap();

    let (records, _) = parse_holdings_dir(dir.path()).unwrap();
    assert_eq!(records.len(), 3);

    let aggregated = aggregate(records);
    assert_eq!(aggregated.len(), 2);

    let apple = aggregated.iter().find(|r| r.cusip == "037833100").unwrap();
    assert_eq!(apple.value, 2_000_000.0);
    assert_eq!(apple.shares, 12_700);
    assert_eq!(apple.company_name, "APPLE INC");
    assert_eq!(apple.cusip6, "037833");

    let msft = aggregated.iter().find(|r| r.cusip == "594918104").unwrap();
    assert_eq!(msft.value, 2_000_000.0);
    assert_eq!(msft.shares, 7_000);
}

#[test]
fn manager_info_reads_the_cover_page() {
    let manager = extract_manager_info(FILING_A).unwrap();
    assert_eq!(manager.cik, "1962636");
    assert_eq!(manager.name, "Example Capital Management");
    assert_eq!(manager.address, "1 Main St, Boston, MA, 02110");
    assert_eq!(
        manager.report_period,
        NaiveDate::from_ymd_opt(2023, 3, 31).unwrap()
    );
}

#[test]
fn top_period_filter_composes_with_the_batch() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(FILE_A), FILING_A).unwrap();

    let (records, _) = parse_holdings_dir(dir.path()).unwrap();
    let aggregated = aggregate(records);
    // every record is in the single period present, so any n >= 1 keeps all
    assert_eq!(filter_top_periods(aggregated.clone(), 1).len(), 2);
    assert_eq!(filter_top_periods(aggregated, 4).len(), 2);
}

#[test]
fn ten_k_sections_survive_entity_encoded_headings() {
    let body = concat!(
        "<html><body>",
        "<p>PART I</p>",
        "<div>>Item&#160;1. Business</div><p>We make widgets.</p>",
        "<div>>Item&nbsp;1A. Risk Factors</div><p>Widgets may fail. Error! Bookmark not defined.</p>",
        "<div>>Item 7. Management Discussion</div><p>Sales rose.</p>",
        "<div>>Item 7A. Market Risk</div><p>Mostly currency.</p>",
        "<div>>Item 8. Financial Statements</div><p>Audited.</p>",
        "</body></html>"
    );
    let raw = format!(
        "<DOCUMENT>\n<TYPE>10-K\n<TEXT>\n{}\n</TEXT>\n</DOCUMENT>\n",
        body
    );

    let report = extract_ten_k_sections(&raw, "320193").unwrap();
    assert!(report.item1.contains("We make widgets."));
    assert!(report.item1a.contains("Widgets may fail."));
    assert!(!report.item1a.contains("Bookmark"));
    assert!(report.item7.contains("Sales rose."));
    assert!(report.item7a.contains("Mostly currency."));
    assert!(!report.item7a.contains("Audited."));
    assert_eq!(report.cik, "320193");

    let json = serde_json::to_value(&report).unwrap();
    assert!(json.get("item1a").is_some());
    assert!(json.get("cik").is_some());
}
