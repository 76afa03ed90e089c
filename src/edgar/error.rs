use thiserror::Error;

/// Failure kinds that are recoverable at single-document granularity.
/// The batch loop records them against the document id and moves on;
/// none of them may abort a batch.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no <DOCUMENT> of type {0} in filing")]
    ContainerNotFound(String),

    #[error("section {0} never matched in document")]
    MissingSection(String),

    #[error("malformed filing payload: {0}")]
    Parse(String),

    #[error("cannot decode filing bytes: {0}")]
    Encoding(String),
}
