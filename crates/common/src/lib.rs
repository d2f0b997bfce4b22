//! Tabshelf Common Library
//!
//! Vocabulary shared between the UI test harness and whatever drives the
//! application under test: element locators, element handles, the
//! [`UiDriver`] seam, and the deterministic stub asset description.

pub mod asset;
pub mod driver;
pub mod error;
pub mod labels;
pub mod locator;

pub use asset::StubAsset;
pub use driver::{ScrollDirection, UiDriver};
pub use error::{Error, Result};
pub use locator::{ElementHandle, Locator, Role};

/// Tabshelf version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
