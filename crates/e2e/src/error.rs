//! Error types for scenario execution

use thiserror::Error;

use crate::robots::ScreenKind;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Stub server failed: {0}")]
    StubServer(String),

    #[error("Stub server health check failed after {0} attempts")]
    ServerHealthCheck(usize),

    #[error("Timeout after {waited_ms} ms waiting for {what}{}", screen_suffix(.screen))]
    Timeout {
        what: String,
        screen: Option<ScreenKind>,
        waited_ms: u64,
    },

    #[error("Assertion failed on {screen}: expected {expected}, observed {observed}")]
    AssertionFailed {
        screen: ScreenKind,
        expected: String,
        observed: String,
    },

    #[error("Expected to land on {expected} but {actual} is showing")]
    UnexpectedScreen {
        expected: ScreenKind,
        actual: ScreenKind,
    },

    #[error("Unknown scenario: {0}")]
    ScenarioNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Driver error: {0}")]
    Driver(#[from] tabshelf_common::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

fn screen_suffix(screen: &Option<ScreenKind>) -> String {
    match screen {
        Some(kind) => format!(" on {}", kind),
        None => String::new(),
    }
}

impl E2eError {
    /// Transient driver conditions that polling should ride out.
    pub fn is_transient(&self) -> bool {
        matches!(self, E2eError::Driver(e) if e.is_transient())
    }

    /// Attribute a timeout to `screen` unless it already names one.
    pub fn on_screen(self, screen: ScreenKind) -> Self {
        match self {
            E2eError::Timeout {
                what,
                screen: None,
                waited_ms,
            } => E2eError::Timeout {
                what,
                screen: Some(screen),
                waited_ms,
            },
            other => other,
        }
    }
}

pub type E2eResult<T> = Result<T, E2eError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_names_the_screen() {
        let err = E2eError::Timeout {
            what: "text=\"testcollection_1\"".into(),
            screen: Some(ScreenKind::Home),
            waited_ms: 1500,
        };
        assert_eq!(
            err.to_string(),
            "Timeout after 1500 ms waiting for text=\"testcollection_1\" on home screen"
        );
    }

    #[test]
    fn test_transient_classification() {
        let detached = E2eError::from(tabshelf_common::Error::Detached("x".into()));
        assert!(detached.is_transient());
        assert!(!E2eError::Config("bad".into()).is_transient());
    }

    #[test]
    fn test_on_screen_keeps_first_attribution() {
        let err = E2eError::Timeout {
            what: "x".into(),
            screen: None,
            waited_ms: 10,
        }
        .on_screen(ScreenKind::Browser)
        .on_screen(ScreenKind::Home);
        assert!(matches!(
            err,
            E2eError::Timeout {
                screen: Some(ScreenKind::Browser),
                ..
            }
        ));
    }
}
