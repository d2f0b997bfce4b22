//! Tabshelf Simulator
//!
//! A deterministic, in-process model of the browser's collections UI that
//! implements [`UiDriver`](tabshelf_common::UiDriver). It stands in for the
//! real application when the harness tests itself: pages are loaded over
//! HTTP from the stub content server, the tree re-attaches after a render
//! delay, and the home surface scrolls through a fixed-height viewport.

pub mod config;
pub mod driver;
mod page;
mod render;
mod state;

pub use config::SimulatorConfig;
pub use driver::{AppSnapshot, CollectionSnapshot, SimulatedBrowser};
pub use state::SavedTab;
