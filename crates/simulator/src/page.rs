//! Page loading for simulated tabs

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::state::PageLoad;

static TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title>\s*(.*?)\s*</title>").expect("title pattern is valid"));

static CONTENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<[a-z0-9]+[^>]*\bid="testContent"[^>]*>\s*(.*?)\s*</"#)
        .expect("content pattern is valid")
});

/// Extract the title and the `testContent` marker from an HTML document.
pub(crate) fn parse_page(html: &str) -> PageLoad {
    let title = TITLE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    let content = CONTENT
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    PageLoad::Loaded { title, content }
}

/// Fetch `url` and turn the response into the tab's load outcome.
pub(crate) async fn load_page(client: &reqwest::Client, url: &str) -> PageLoad {
    let response = match client.get(url).send().await {
        Ok(resp) => resp,
        Err(e) => {
            warn!("Page load failed for {}: {}", url, e);
            return PageLoad::Failed;
        }
    };

    if !response.status().is_success() {
        warn!("Page load for {} returned {}", url, response.status());
        return PageLoad::Failed;
    }

    match response.text().await {
        Ok(body) => {
            debug!("Loaded {} ({} bytes)", url, body.len());
            parse_page(&body)
        }
        Err(e) => {
            warn!("Failed to read body of {}: {}", url, e);
            PageLoad::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generic_page() {
        let html = r#"<html>
<head><title>Test_Page_3</title></head>
<body><p id="testContent">Page content: 3</p></body>
</html>"#;
        assert_eq!(
            parse_page(html),
            PageLoad::Loaded {
                title: "Test_Page_3".to_string(),
                content: "Page content: 3".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_page_without_markers() {
        assert_eq!(
            parse_page("<html><body>nothing here</body></html>"),
            PageLoad::Loaded {
                title: String::new(),
                content: String::new(),
            }
        );
    }

    #[tokio::test]
    async fn test_load_page_connection_refused() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = reqwest::Client::new();
        let url = format!("http://127.0.0.1:{}/pages/generic1.html", port);
        assert_eq!(load_page(&client, &url).await, PageLoad::Failed);
    }
}
