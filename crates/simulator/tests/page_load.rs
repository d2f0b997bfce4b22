//! Page loads over real HTTP

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use std::time::Duration;
use tokio::net::TcpListener;

use tabshelf_common::labels::{self, ids};
use tabshelf_common::{Locator, Role, UiDriver};
use tabshelf_simulator::{SimulatedBrowser, SimulatorConfig};

async fn serve() -> String {
    let app = Router::new()
        .route(
            "/pages/generic7.html",
            get(|| async {
                "<html><head><title>Test_Page_7</title></head>\
                 <body><p id=\"testContent\">Page content: 7</p></body></html>"
            }),
        )
        .fallback(|| async { (StatusCode::NOT_FOUND, "not found") });
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn open(browser: &SimulatedBrowser, url: &str) {
    browser.launch().await.unwrap();
    let bar = browser
        .find(&Locator::id(ids::URL_BAR))
        .await
        .unwrap()
        .unwrap();
    browser.tap(&bar).await.unwrap();
    let field = browser
        .find(&Locator::role(Role::TextField))
        .await
        .unwrap()
        .unwrap();
    browser.type_text(&field, url).await.unwrap();
    browser.submit(&field).await.unwrap();
}

async fn eventually(browser: &SimulatedBrowser, locator: Locator) -> String {
    for _ in 0..100 {
        if let Ok(Some(handle)) = browser.find(&locator).await {
            return handle.text().to_string();
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("{} never appeared", locator);
}

fn instant() -> SimulatorConfig {
    SimulatorConfig {
        render_delay_ms: 0,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_loaded_page_shows_title_and_content() {
    let base = serve().await;
    let browser = SimulatedBrowser::new(instant()).unwrap();
    open(&browser, &format!("{}/pages/generic7.html", base)).await;

    assert_eq!(eventually(&browser, Locator::id(ids::PAGE_CONTENT)).await, "Page content: 7");
    assert_eq!(eventually(&browser, Locator::id(ids::PAGE_TITLE)).await, "Test_Page_7");
    assert_eq!(browser.snapshot().open_tabs, vec!["Test_Page_7".to_string()]);
}

#[tokio::test]
async fn test_missing_page_shows_error() {
    let base = serve().await;
    let browser = SimulatedBrowser::new(instant()).unwrap();
    open(&browser, &format!("{}/pages/other.html", base)).await;

    assert_eq!(
        eventually(&browser, Locator::id(ids::PAGE_ERROR)).await,
        labels::UNABLE_TO_CONNECT
    );
}
