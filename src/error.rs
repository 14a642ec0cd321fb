//! Unified error type for all store operations.

/// Things that can go wrong when using a record store.
///
/// Absence is never an error: a missing record is `None`, an empty collection
/// is an empty `Vec`. Errors mean the medium itself misbehaved.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// File system problem (create dir, write, rename).
    Io(String),
    /// Failed to serialize records or a patch to JSON.
    Serialize(String),
    /// Failed to decode JSON back into records.
    Deserialize(String),
    /// Bad configuration (blank endpoint, unusable directory, etc.).
    Config(String),
    /// A record failed a domain check before being stored.
    Validation(String),
    /// The HTTP request could not be sent or its body could not be read.
    Http(String),
    /// The remote table answered with a non-success status.
    Remote {
        /// HTTP status code.
        status: u16,
        /// Response body text, verbatim.
        body: String,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(msg) => write!(f, "i/o error: {msg}"),
            Error::Serialize(msg) => write!(f, "serialization error: {msg}"),
            Error::Deserialize(msg) => write!(f, "deserialization error: {msg}"),
            Error::Config(msg) => write!(f, "config error: {msg}"),
            Error::Validation(msg) => write!(f, "invalid record: {msg}"),
            Error::Http(msg) => write!(f, "http error: {msg}"),
            Error::Remote { status, body } => write!(f, "remote table error {status}: {body}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::Io(err.to_string())
        } else if err.is_syntax() || err.is_eof() || err.is_data() {
            Error::Deserialize(err.to_string())
        } else {
            Error::Serialize(err.to_string())
        }
    }
}

#[cfg(feature = "remote")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err.to_string())
    }
}

/// Result alias using our [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
