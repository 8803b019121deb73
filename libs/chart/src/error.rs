use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}: {1}")]
    IoError(String, #[source] std::io::Error),

    #[error("{0}: {1}")]
    SerializationError(String, #[source] serde_json::Error),

    #[error("{0}: {1}")]
    YamlError(String, #[source] serde_yaml::Error),

    #[error("{0}: {1}")]
    Utf8Error(String, #[source] std::str::Utf8Error),

    #[error("invalid chart version: {0:?}")]
    InvalidVersion(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// True when the underlying cause is a missing file, as opposed to a
    /// permission or read failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::IoError(_, e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}
