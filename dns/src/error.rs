use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DnsError {
    #[error("Malformed header: need 12 bytes, got {0}")]
    MalformedHeader(usize),

    #[error("Malformed name at offset {offset}: {reason}")]
    MalformedName { offset: usize, reason: &'static str },

    #[error("Malformed record at offset {offset}: {reason}")]
    MalformedRecord { offset: usize, reason: &'static str },

    #[error("Label too long: '{0}' exceeds 63 bytes")]
    LabelTooLong(String),

    #[error("Resource data too long: {0} bytes")]
    DataTooLong(usize),
}

pub type Result<T> = std::result::Result<T, DnsError>;
