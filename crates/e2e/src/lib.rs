//! Tabshelf E2E Test Framework
//!
//! Drives the tab collections UI through screen robots:
//! - Serves deterministic pages from a stub content server on an ephemeral port
//! - Waits on UI conditions by bounded polling, never by fixed sleeps
//! - Models each screen as a robot that only exposes what is valid there
//! - Composes robots into scenario scripts and reports them as JSON
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    ScenarioRunner                           │
//! │    └── run_scenario(Scenario) -> TestResult                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TestFixture (one per scenario)                             │
//! │    ├── StubServer        GET /pages/generic<n>.html         │
//! │    ├── SimulatedBrowser  (UiDriver)                         │
//! │    └── Session           driver + locators + waits + journal│
//! ├─────────────────────────────────────────────────────────────┤
//! │  Robots                                                     │
//! │    HomeScreen ─▶ NavigationToolbar ─▶ BrowserView            │
//! │    BrowserView ─▶ ThreeDotMenu ─▶ SaveTarget                 │
//! │    SaveToCollectionDialog / CollectionNamingDialog<P>       │
//! │    CollectionMenu ─▶ DeleteCollectionPrompt                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  wait_for(condition, probe)                                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod fixture;
pub mod locators;
pub mod robots;
pub mod runner;
pub mod scenarios;
pub mod server;
pub mod session;
pub mod wait;

pub use config::{HarnessConfig, LocatorKind, WaitConfig};
pub use error::{E2eError, E2eResult};
pub use fixture::TestFixture;
pub use robots::{ready, HomeScreen, Robot, SaveTarget, ScreenKind};
pub use runner::{ScenarioRunner, TestResult, TestSuiteResult};
pub use scenarios::Scenario;
pub use server::StubServer;
pub use session::{Session, StepRecord};
