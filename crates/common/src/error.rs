//! Error types for driver-level operations

use thiserror::Error;

/// Result type alias using the driver-level Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by a [`UiDriver`](crate::UiDriver) implementation
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The element exists in the tree being built but is not attached yet,
    /// or a handle points at a node that has since been detached.
    #[error("Element not attached: {0}")]
    Detached(String),

    #[error("No element matches {0}")]
    NoSuchElement(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Driver error: {0}")]
    Driver(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Whether polling should keep going after this error.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Detached(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_detached_is_transient() {
        assert!(Error::Detached("collection_title".into()).is_transient());
        assert!(!Error::NoSuchElement("text=\"Home\"".into()).is_transient());
        assert!(!Error::Driver("app crashed".into()).is_transient());
    }

    #[test]
    fn test_error_display() {
        let err = Error::NoSuchElement("id=\"url_bar\"".into());
        assert_eq!(err.to_string(), "No element matches id=\"url_bar\"");
    }
}
