use thiserror::Error;

pub type Result<T> = std::result::Result<T, PixError>;

#[derive(Error, Debug)]
pub enum PixError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Field {tag} value is {len} bytes, at most 99 allowed")]
    FieldTooLong { tag: String, len: usize },
    #[error("Merchant key must not be empty")]
    EmptyMerchantKey,
    #[error("Merchant {0} is empty after normalization")]
    EmptyMerchantField(&'static str),
    #[error("Invalid tag {0:?}: expected two ASCII digits")]
    InvalidTag(String),
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
    #[error("Checksum mismatch: expected {expected}, found {found}")]
    ChecksumMismatch { expected: String, found: String },
    #[error("Unknown offer: {0}")]
    UnknownOffer(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
