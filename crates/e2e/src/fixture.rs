//! Per-test fixture: a fresh stub server, application and session

use std::sync::Arc;
use tracing::info;

use tabshelf_common::StubAsset;
use tabshelf_simulator::{AppSnapshot, SimulatedBrowser};

use crate::config::HarnessConfig;
use crate::error::E2eResult;
use crate::locators;
use crate::robots::HomeScreen;
use crate::server::StubServer;
use crate::session::Session;

/// Everything one scenario owns. Nothing is shared between fixtures.
pub struct TestFixture {
    server: StubServer,
    browser: Arc<SimulatedBrowser>,
    session: Session,
}

impl TestFixture {
    pub async fn setup(config: &HarnessConfig) -> E2eResult<Self> {
        let server = StubServer::start(&config.server).await?;
        let browser = Arc::new(SimulatedBrowser::new(config.simulator.clone())?);
        let session = Session::new(
            browser.clone(),
            locators::for_kind(config.locators),
            config.wait.clone(),
        );
        info!(
            "Fixture ready: assets at {}, {:?} locators",
            server.base_url(),
            config.locators
        );
        Ok(Self {
            server,
            browser,
            session,
        })
    }

    /// Stub asset `index` served by this fixture's server
    pub fn asset(&self, index: u32) -> StubAsset {
        self.server.asset(index)
    }

    pub fn session(&self) -> Session {
        self.session.clone()
    }

    /// Launch the application and land on the home screen
    pub async fn launch(&self) -> E2eResult<HomeScreen> {
        self.session.launch_home().await
    }

    /// What the application currently holds
    pub fn snapshot(&self) -> AppSnapshot {
        self.browser.snapshot()
    }

    pub fn server(&self) -> &StubServer {
        &self.server
    }

    pub async fn teardown(mut self) {
        self.server.shutdown().await;
    }
}
