//! The UI driver seam
//!
//! Robots never talk to the application directly; every lookup and gesture
//! goes through a [`UiDriver`]. Implementations wrap a real automation
//! backend or, in the harness's own tests, the in-process simulator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::locator::{ElementHandle, Locator};
use crate::Result;

/// Direction for a scroll gesture on the current scrollable surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    Up,
    Down,
}

#[async_trait]
pub trait UiDriver: Send + Sync {
    /// Bring the application to its entry screen.
    async fn launch(&self) -> Result<()>;

    /// First attached element matching `locator`, if any.
    ///
    /// Returns `Err(Error::Detached)` when a matching node exists but is not
    /// yet attached to the visible tree.
    async fn find(&self, locator: &Locator) -> Result<Option<ElementHandle>>;

    /// Every attached element matching `locator`, in tree order.
    async fn find_all(&self, locator: &Locator) -> Result<Vec<ElementHandle>>;

    async fn tap(&self, element: &ElementHandle) -> Result<()>;

    /// Replace the contents of a text field.
    async fn type_text(&self, element: &ElementHandle, text: &str) -> Result<()>;

    /// Press the IME action button on a focused field.
    async fn submit(&self, element: &ElementHandle) -> Result<()>;

    async fn scroll(&self, direction: ScrollDirection) -> Result<()>;
}
