//! Test session: the explicit context every robot carries
//!
//! A [`Session`] bundles the UI driver, the locator strategy, the wait
//! budgets and the step journal. It is cheap to clone; clones share the
//! driver and the journal.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use tabshelf_common::{ElementHandle, Locator, ScrollDirection, UiDriver};

use crate::config::WaitConfig;
use crate::error::{E2eError, E2eResult};
use crate::locators::{LocatorStrategy, UiElement};
use crate::robots::ScreenKind;
use crate::wait::{wait_for, wait_until_gone, WaitCondition};

/// One transition or verification as it ran
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    pub screen: ScreenKind,
    pub step: String,
    pub duration_ms: u64,
    pub error: Option<String>,
}

#[derive(Clone)]
pub struct Session {
    driver: Arc<dyn UiDriver>,
    locators: Arc<dyn LocatorStrategy>,
    wait: WaitConfig,
    journal: Arc<Mutex<Vec<StepRecord>>>,
}

impl Session {
    pub fn new(driver: Arc<dyn UiDriver>, locators: Arc<dyn LocatorStrategy>, wait: WaitConfig) -> Self {
        Self {
            driver,
            locators,
            wait,
            journal: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn driver(&self) -> &Arc<dyn UiDriver> {
        &self.driver
    }

    pub fn wait_config(&self) -> &WaitConfig {
        &self.wait
    }

    pub fn locate(&self, element: &UiElement) -> Locator {
        self.locators.locate(element)
    }

    /// Records of every step run so far, oldest first
    pub fn journal(&self) -> Vec<StepRecord> {
        self.journal.lock().clone()
    }

    /// Run one named step, timing it and recording the outcome.
    ///
    /// Timeouts that do not name a screen yet are attributed to `screen`.
    pub async fn step<T, Fut>(&self, screen: ScreenKind, name: &str, fut: Fut) -> E2eResult<T>
    where
        Fut: Future<Output = E2eResult<T>>,
    {
        let start = Instant::now();
        debug!("[{}] {} ...", screen, name);

        let result = fut.await.map_err(|e| e.on_screen(screen));
        let duration_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(_) => info!("[{}] {} ({} ms)", screen, name, duration_ms),
            Err(e) => warn!("[{}] {} failed after {} ms: {}", screen, name, duration_ms, e),
        }

        self.journal.lock().push(StepRecord {
            screen,
            step: name.to_string(),
            duration_ms,
            error: result.as_ref().err().map(|e| e.to_string()),
        });
        result
    }

    /// Look `element` up once, without waiting
    pub async fn find_now(&self, element: &UiElement) -> E2eResult<Option<ElementHandle>> {
        Ok(self.driver.find(&self.locate(element)).await?)
    }

    pub async fn wait_for_element(&self, element: &UiElement) -> E2eResult<ElementHandle> {
        self.wait_for_element_within(element, self.wait.timeout()).await
    }

    pub async fn wait_for_element_within(
        &self,
        element: &UiElement,
        timeout: Duration,
    ) -> E2eResult<ElementHandle> {
        let locator = self.locate(element);
        let condition = WaitCondition::new(locator.to_string(), &self.wait).with_timeout(timeout);
        let driver = &self.driver;
        let locator = &locator;
        wait_for(&condition, || async move { Ok(driver.find(locator).await?) }).await
    }

    /// Wait for `element`, scrolling the current surface down when it is
    /// not found directly.
    ///
    /// Each direct attempt waits `scroll_probe_ms`; after `max_scrolls`
    /// scrolls the final attempt waits the full timeout.
    pub async fn reveal(&self, element: &UiElement) -> E2eResult<ElementHandle> {
        self.with_scroll_fallback(element, move |budget, _| {
            self.wait_for_element_within(element, budget)
        })
        .await
    }

    /// Wait until more than `count` matches of `element` show, with the
    /// same scroll fallback as [`Session::reveal`].
    ///
    /// Scrolling moves earlier matches out of view, so once the surface has
    /// scrolled any visible match is accepted.
    pub async fn reveal_more(&self, element: &UiElement, count: usize) -> E2eResult<usize> {
        self.with_scroll_fallback(element, move |budget, scrolls| {
            let floor = if scrolls == 0 { count } else { 0 };
            self.wait_for_count(element, format!("more than {}", floor), budget, move |n| {
                n > floor
            })
        })
        .await
    }

    async fn with_scroll_fallback<T, F, Fut>(&self, element: &UiElement, mut attempt: F) -> E2eResult<T>
    where
        F: FnMut(Duration, u32) -> Fut,
        Fut: Future<Output = E2eResult<T>>,
    {
        let mut scrolls = 0;
        loop {
            let last = scrolls >= self.wait.max_scrolls;
            let budget = if last {
                self.wait.timeout()
            } else {
                self.wait.scroll_probe()
            };
            match attempt(budget, scrolls).await {
                Err(E2eError::Timeout { .. }) if !last => {
                    scrolls += 1;
                    warn!(
                        "{} not found, scrolling down ({}/{})",
                        element, scrolls, self.wait.max_scrolls
                    );
                    self.scroll(ScrollDirection::Down).await?;
                }
                other => return other,
            }
        }
    }

    pub async fn wait_for_absent(&self, element: &UiElement) -> E2eResult<()> {
        let locator = self.locate(element);
        let condition = WaitCondition::new(format!("absence of {}", locator), &self.wait);
        let driver = &self.driver;
        let locator = &locator;
        wait_until_gone(&condition, || async move {
            Ok(driver.find(locator).await?.is_some())
        })
        .await
    }

    /// Number of attached elements matching `element`
    pub async fn count(&self, element: &UiElement) -> E2eResult<usize> {
        let locator = self.locate(element);
        let driver = &self.driver;
        let locator = &locator;
        let condition = WaitCondition::new(format!("count of {}", locator), &self.wait);
        wait_for(&condition, || async move {
            Ok(Some(driver.find_all(locator).await?.len()))
        })
        .await
    }

    pub async fn wait_for_count_below(&self, element: &UiElement, count: usize) -> E2eResult<usize> {
        self.wait_for_count(element, format!("fewer than {}", count), self.wait.timeout(), |n| {
            n < count
        })
        .await
    }

    pub async fn wait_for_count_above(&self, element: &UiElement, count: usize) -> E2eResult<usize> {
        self.wait_for_count(element, format!("more than {}", count), self.wait.timeout(), |n| {
            n > count
        })
        .await
    }

    async fn wait_for_count(
        &self,
        element: &UiElement,
        expectation: String,
        timeout: Duration,
        accept: impl Fn(usize) -> bool,
    ) -> E2eResult<usize> {
        let locator = self.locate(element);
        let condition = WaitCondition::new(format!("{} of {}", expectation, locator), &self.wait)
            .with_timeout(timeout);
        let driver = &self.driver;
        let locator = &locator;
        let accept = &accept;
        wait_for(&condition, || async move {
            let n = driver.find_all(locator).await?.len();
            Ok(accept(n).then_some(n))
        })
        .await
    }

    /// Tap the first match of `element` once it is attached.
    ///
    /// A node that detaches between lookup and tap is looked up again.
    pub async fn tap(&self, element: &UiElement) -> E2eResult<()> {
        let locator = self.locate(element);
        let condition = WaitCondition::new(format!("tap on {}", locator), &self.wait);
        let driver = &self.driver;
        let locator = &locator;
        wait_for(&condition, || async move {
            match driver.find(locator).await? {
                Some(handle) => {
                    driver.tap(&handle).await?;
                    Ok(Some(()))
                }
                None => Ok(None),
            }
        })
        .await
    }

    /// Replace the text of the field `element`
    pub async fn type_into(&self, element: &UiElement, text: &str) -> E2eResult<()> {
        let locator = self.locate(element);
        let condition = WaitCondition::new(format!("typing into {}", locator), &self.wait);
        let driver = &self.driver;
        let locator = &locator;
        wait_for(&condition, || async move {
            match driver.find(locator).await? {
                Some(handle) => {
                    driver.type_text(&handle, text).await?;
                    Ok(Some(()))
                }
                None => Ok(None),
            }
        })
        .await
    }

    /// Press the IME action on the field `element`
    pub async fn submit(&self, element: &UiElement) -> E2eResult<()> {
        let locator = self.locate(element);
        let condition = WaitCondition::new(format!("submitting {}", locator), &self.wait);
        let driver = &self.driver;
        let locator = &locator;
        wait_for(&condition, || async move {
            match driver.find(locator).await? {
                Some(handle) => {
                    driver.submit(&handle).await?;
                    Ok(Some(()))
                }
                None => Ok(None),
            }
        })
        .await
    }

    pub async fn scroll(&self, direction: ScrollDirection) -> E2eResult<()> {
        Ok(self.driver.scroll(direction).await?)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("locators", &self.locators.name())
            .field("wait", &self.wait)
            .field("steps", &self.journal.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locators::{IdLocators, TextLocators};
    use tabshelf_common::labels;
    use tabshelf_simulator::{SimulatedBrowser, SimulatorConfig};

    fn quick_wait() -> WaitConfig {
        WaitConfig {
            timeout_ms: 1_000,
            poll_interval_ms: 10,
            scroll_probe_ms: 100,
            max_scrolls: 1,
        }
    }

    async fn launched(locators: Arc<dyn LocatorStrategy>) -> Session {
        let browser = SimulatedBrowser::new(SimulatorConfig {
            render_delay_ms: 20,
            ..Default::default()
        })
        .unwrap();
        browser.launch().await.unwrap();
        Session::new(Arc::new(browser), locators, quick_wait())
    }

    #[tokio::test]
    async fn test_wait_rides_out_render_lag() {
        let session = launched(Arc::new(TextLocators)).await;
        let handle = session.wait_for_element(&UiElement::Wordmark).await.unwrap();
        assert_eq!(handle.text(), labels::WORDMARK);
    }

    #[tokio::test]
    async fn test_step_records_outcome_and_attributes_timeouts() {
        let session = launched(Arc::new(IdLocators)).await;
        session
            .step(ScreenKind::Home, "find wordmark", async {
                session.wait_for_element(&UiElement::Wordmark).await.map(|_| ())
            })
            .await
            .unwrap();

        let err = session
            .step(ScreenKind::Home, "find missing", async {
                session
                    .wait_for_element_within(&UiElement::OpenTabsHeader, Duration::from_millis(50))
                    .await
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            E2eError::Timeout {
                screen: Some(ScreenKind::Home),
                ..
            }
        ));

        let journal = session.journal();
        assert_eq!(journal.len(), 2);
        assert_eq!(journal[0].step, "find wordmark");
        assert!(journal[0].error.is_none());
        assert_eq!(journal[1].step, "find missing");
        assert!(journal[1].error.as_deref().unwrap().contains("home screen"));
    }

    #[tokio::test]
    async fn test_reveal_is_bounded() {
        let session = launched(Arc::new(TextLocators)).await;
        let start = Instant::now();
        let result = session
            .reveal(&UiElement::CollectionRow("nowhere".into()))
            .await;
        assert!(matches!(result, Err(E2eError::Timeout { .. })));
        // one probe plus the final full wait
        assert!(start.elapsed() >= Duration::from_millis(1_100));
        assert!(start.elapsed() < Duration::from_millis(3_000));
    }

    #[tokio::test]
    async fn test_absent_and_counts() {
        let session = launched(Arc::new(TextLocators)).await;
        session.wait_for_absent(&UiElement::CollectionsHeader).await.unwrap();
        session.wait_for_element(&UiElement::Wordmark).await.unwrap();
        assert_eq!(session.count(&UiElement::CloseTabButton).await.unwrap(), 0);
    }
}
