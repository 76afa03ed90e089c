use chardet::detect;
use encoding_rs::Encoding;
use encoding_rs_io::DecodeReaderBytesBuilder;
use std::fs;
use std::io::Read;
use std::path::Path;

use super::error::ExtractError;

pub const EDGAR_ARCHIVES_URL: &str = "https://www.sec.gov";
pub const USER_AGENT: &str = "software@example.com";

// Raw filings are persisted with the archive path flattened into the file
// name, so the name round-trips back to the provenance url.
pub fn raw_file_name(archive_path: &str) -> String {
    archive_path.replace('/', "_")
}

pub fn file_id(url_path: &str) -> &str {
    url_path.rsplit('/').next().unwrap_or(url_path)
}

/// Decode raw filing bytes with a detected character encoding. Daily
/// index files arrive in a Latin-1-family encoding while filing bodies
/// are UTF-8; detection covers both without per-source configuration.
pub fn decode_filing_bytes(bytes: &[u8]) -> Result<String, ExtractError> {
    let charenc = detect(bytes).0;
    let mut reader = DecodeReaderBytesBuilder::new()
        .encoding(Encoding::for_label(charenc.as_bytes()))
        .build(bytes);

    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| ExtractError::Encoding(e.to_string()))?;
    Ok(text)
}

pub fn read_filing(path: &Path) -> Result<String, ExtractError> {
    let bytes = fs::read(path).map_err(|e| ExtractError::Encoding(e.to_string()))?;
    decode_filing_bytes(&bytes)
}
