/// Errors raised by the bucket scheduling core.
///
/// Every variant is a contract violation by the caller. Anomalies like
/// a card missing from every bucket are normal outcomes, not errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An input failed a basic shape check. Nothing was mutated.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;
