//! Deterministic stub page descriptions

use serde::{Deserialize, Serialize};

/// A synthetic page served by the stub content server.
///
/// Every field is a pure function of the server's base URL and `index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StubAsset {
    pub index: u32,
    pub url: String,
    pub title: String,
    pub content: String,
}

impl StubAsset {
    /// Describe the generic page `index` hosted under `base_url`.
    pub fn generic(base_url: &str, index: u32) -> Self {
        Self {
            index,
            url: format!(
                "{}/{}",
                base_url.trim_end_matches('/'),
                Self::generic_path(index)
            ),
            title: Self::generic_title(index),
            content: Self::generic_content(index),
        }
    }

    /// Path of the generic page relative to the server root.
    pub fn generic_path(index: u32) -> String {
        format!("pages/generic{}.html", index)
    }

    pub fn generic_title(index: u32) -> String {
        format!("Test_Page_{}", index)
    }

    pub fn generic_content(index: u32) -> String {
        format!("Page content: {}", index)
    }

    /// Inverse of [`generic_path`](Self::generic_path) for the file name part.
    pub fn parse_generic_file(file: &str) -> Option<u32> {
        file.strip_prefix("generic")?
            .strip_suffix(".html")?
            .parse()
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_asset() {
        let asset = StubAsset::generic("http://127.0.0.1:4000/", 1);
        assert_eq!(asset.url, "http://127.0.0.1:4000/pages/generic1.html");
        assert_eq!(asset.title, "Test_Page_1");
        assert_eq!(asset.content, "Page content: 1");
    }

    #[test]
    fn test_distinct_indices_never_collide() {
        let base = "http://127.0.0.1:4000";
        for i in 0..50u32 {
            for j in 0..50u32 {
                if i == j {
                    continue;
                }
                let (a, b) = (StubAsset::generic(base, i), StubAsset::generic(base, j));
                assert_ne!(a.url, b.url);
                assert_ne!(a.content, b.content);
            }
        }
    }

    #[test]
    fn test_generic_asset_is_reproducible() {
        let base = "http://127.0.0.1:4000";
        assert_eq!(StubAsset::generic(base, 7), StubAsset::generic(base, 7));
    }

    #[test]
    fn test_parse_generic_file() {
        assert_eq!(StubAsset::parse_generic_file("generic12.html"), Some(12));
        assert_eq!(StubAsset::parse_generic_file("generic.html"), None);
        assert_eq!(StubAsset::parse_generic_file("other3.html"), None);
        assert_eq!(StubAsset::parse_generic_file("generic3.htm"), None);
    }
}
