//! `UiDriver` implementation over the simulated application

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use tabshelf_common::{ElementHandle, Error, Locator, Result, ScrollDirection, UiDriver};

use crate::config::SimulatorConfig;
use crate::page::load_page;
use crate::render::{max_scroll_offset, render, same_node, Node};
use crate::state::{AppState, Naming, NodeAction, Overlay, SavedTab, Surface};

/// In-process stand-in for the browser application.
///
/// Every state change re-renders the tree after `render_delay_ms`; until then
/// nodes of the new tree report [`Error::Detached`].
pub struct SimulatedBrowser {
    state: Arc<Mutex<AppState>>,
    client: reqwest::Client,
    config: SimulatorConfig,
}

/// Point-in-time view of the application's data, for white-box assertions
#[derive(Debug, Clone, Serialize)]
pub struct AppSnapshot {
    pub open_tabs: Vec<String>,
    pub collections: Vec<CollectionSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectionSnapshot {
    pub name: String,
    pub tabs: Vec<SavedTab>,
}

impl SimulatedBrowser {
    pub fn new(config: SimulatorConfig) -> Result<Self> {
        if config.viewport_rows == 0 {
            return Err(Error::InvalidConfig(
                "viewport_rows must be at least 1".to_string(),
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(config.page_load_timeout())
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        Ok(Self {
            state: Arc::new(Mutex::new(AppState::new())),
            client,
            config,
        })
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn snapshot(&self) -> AppSnapshot {
        let state = self.state.lock();
        AppSnapshot {
            open_tabs: state.tabs.iter().map(|t| t.label().to_string()).collect(),
            collections: state
                .collections
                .iter()
                .map(|c| CollectionSnapshot {
                    name: c.name.clone(),
                    tabs: c.tabs.clone(),
                })
                .collect(),
        }
    }

    /// Resolve `locator` against the tree, honouring the render lag.
    fn query(&self, locator: &Locator) -> Result<Vec<ElementHandle>> {
        let now = Instant::now();
        let state = self.state.lock();
        let matches: Vec<ElementHandle> = render(&state, self.config.viewport_rows, now)
            .into_iter()
            .filter(|n| locator.matches(&n.handle))
            .map(|n| n.handle)
            .collect();

        if state.is_settled(now) || matches.is_empty() {
            return Ok(matches);
        }
        Err(Error::Detached(locator.to_string()))
    }

    /// Find the attached node a handle refers to.
    fn resolve(&self, state: &AppState, handle: &ElementHandle) -> Result<Node> {
        let now = Instant::now();
        if !state.is_settled(now) {
            return Err(Error::Detached(handle.resource_id.clone()));
        }
        render(state, self.config.viewport_rows, now)
            .into_iter()
            .find(|n| same_node(n, handle))
            .ok_or_else(|| Error::Detached(format!("{} {:?}", handle.resource_id, handle.text)))
    }

    fn start_page_load(&self, tab_id: u64, url: String) {
        let state = Arc::clone(&self.state);
        let client = self.client.clone();
        let delay = self.config.render_delay();
        tokio::spawn(async move {
            let outcome = load_page(&client, &url).await;
            let mut state = state.lock();
            if state.finish_load(tab_id, outcome) {
                state.invalidate(delay);
            }
        });
    }
}

#[async_trait]
impl UiDriver for SimulatedBrowser {
    async fn launch(&self) -> Result<()> {
        info!("Launching simulated browser");
        let mut state = self.state.lock();
        state.launch();
        state.invalidate(self.config.render_delay());
        Ok(())
    }

    async fn find(&self, locator: &Locator) -> Result<Option<ElementHandle>> {
        Ok(self.query(locator)?.into_iter().next())
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<ElementHandle>> {
        self.query(locator)
    }

    async fn tap(&self, element: &ElementHandle) -> Result<()> {
        let mut state = self.state.lock();
        let node = self.resolve(&state, element)?;
        debug!("tap {} {:?}", element.resource_id, element.text);
        if state.apply(&node.action, self.config.snackbar_duration()) {
            state.invalidate(self.config.render_delay());
        }
        Ok(())
    }

    async fn type_text(&self, element: &ElementHandle, text: &str) -> Result<()> {
        let mut state = self.state.lock();
        let node = self.resolve(&state, element)?;
        debug!("type {:?} into {}", text, element.resource_id);
        match node.action {
            NodeAction::EditToolbar => state.toolbar_draft = text.to_string(),
            NodeAction::EditCollectionName => match &mut state.overlay {
                Some(Overlay::NameCollection { draft, .. }) => *draft = text.to_string(),
                _ => return Err(Error::Driver("name dialog is not open".to_string())),
            },
            _ => {
                return Err(Error::Driver(format!(
                    "{} is not a text field",
                    element.resource_id
                )))
            }
        }
        state.invalidate(self.config.render_delay());
        Ok(())
    }

    async fn submit(&self, element: &ElementHandle) -> Result<()> {
        let pending_load = {
            let mut state = self.state.lock();
            let node = self.resolve(&state, element)?;
            debug!("submit {}", element.resource_id);
            let pending = match node.action {
                NodeAction::EditToolbar => {
                    let url = state.toolbar_draft.trim().to_string();
                    if url.is_empty() {
                        None
                    } else {
                        let tab_id = state.open_tab(url.clone());
                        Some((tab_id, url))
                    }
                }
                NodeAction::EditCollectionName => {
                    if let Some(Overlay::NameCollection { purpose, draft }) = state.overlay.clone() {
                        match purpose {
                            Naming::SaveTab => {
                                state.create_collection(&draft, self.config.snackbar_duration());
                            }
                            Naming::Rename(index) => {
                                state.rename_collection(index, &draft);
                            }
                        }
                    }
                    None
                }
                _ => {
                    return Err(Error::Driver(format!(
                        "{} does not accept IME actions",
                        element.resource_id
                    )))
                }
            };
            state.invalidate(self.config.render_delay());
            pending
        };

        if let Some((tab_id, url)) = pending_load {
            info!("Loading {} in tab {}", url, tab_id);
            self.start_page_load(tab_id, url);
        }
        Ok(())
    }

    async fn scroll(&self, direction: ScrollDirection) -> Result<()> {
        let mut state = self.state.lock();
        if state.surface != Surface::Home || state.overlay.is_some() {
            debug!("scroll ignored outside the home surface");
            return Ok(());
        }
        let page = self.config.viewport_rows.saturating_sub(1).max(1);
        let max = max_scroll_offset(&state, self.config.viewport_rows);
        let before = state.scroll_offset;
        state.scroll_offset = match direction {
            ScrollDirection::Down => (before + page).min(max),
            ScrollDirection::Up => before.saturating_sub(page),
        };
        debug!("scroll {:?}: offset {} -> {}", direction, before, state.scroll_offset);
        if state.scroll_offset != before {
            state.invalidate(self.config.render_delay());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabshelf_common::labels::{self, ids};
    use tabshelf_common::Role;

    fn fast() -> SimulatorConfig {
        SimulatorConfig {
            render_delay_ms: 0,
            ..Default::default()
        }
    }

    async fn tap_text(browser: &SimulatedBrowser, text: &str) {
        let handle = browser
            .find(&Locator::text(text))
            .await
            .unwrap()
            .unwrap_or_else(|| panic!("{} not visible", text));
        browser.tap(&handle).await.unwrap();
    }

    #[test]
    fn test_zero_viewport_is_rejected() {
        let config = SimulatorConfig {
            viewport_rows: 0,
            ..Default::default()
        };
        assert!(matches!(
            SimulatedBrowser::new(config),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_render_lag_reports_detached() {
        let browser = SimulatedBrowser::new(SimulatorConfig {
            render_delay_ms: 60_000,
            ..Default::default()
        })
        .unwrap();
        browser.launch().await.unwrap();

        let wordmark = Locator::text(labels::WORDMARK);
        assert!(matches!(browser.find(&wordmark).await, Err(Error::Detached(_))));
        // Nodes that will not exist in the new tree are simply absent.
        assert!(browser.find(&Locator::text("nope")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_open_toolbar_and_submit_without_server() {
        let browser = SimulatedBrowser::new(fast()).unwrap();
        browser.launch().await.unwrap();
        tap_text(&browser, labels::URL_BAR_HINT).await;

        let field = browser
            .find(&Locator::role(Role::TextField))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(field.resource_id, ids::TOOLBAR_EDIT_URL);
        browser
            .type_text(&field, "http://127.0.0.1:9/pages/generic1.html")
            .await
            .unwrap();
        browser.submit(&field).await.unwrap();

        assert_eq!(browser.snapshot().open_tabs.len(), 1);
        assert!(browser
            .find(&Locator::id(ids::BROWSER_MENU_BUTTON))
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_stale_handle_is_detached() {
        let browser = SimulatedBrowser::new(fast()).unwrap();
        browser.launch().await.unwrap();
        let ghost = ElementHandle::new(ids::DELETE_PROMPT_CONFIRM, Some(labels::DELETE.into()), Role::Button);
        assert!(matches!(browser.tap(&ghost).await, Err(Error::Detached(_))));
    }

    #[tokio::test]
    async fn test_scroll_is_clamped_to_content() {
        let browser = SimulatedBrowser::new(fast()).unwrap();
        browser.launch().await.unwrap();
        browser.scroll(ScrollDirection::Down).await.unwrap();
        assert_eq!(browser.state.lock().scroll_offset, 0);
        assert!(browser
            .find(&Locator::text(labels::NO_COLLECTIONS_HEADER))
            .await
            .unwrap()
            .is_some());
    }
}
