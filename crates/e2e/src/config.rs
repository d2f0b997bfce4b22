//! Harness configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tabshelf_simulator::SimulatorConfig;

use crate::error::{E2eError, E2eResult};

/// Environment variable overriding `wait.timeout_ms`
pub const ENV_WAIT_TIMEOUT_MS: &str = "TABSHELF_WAIT_TIMEOUT_MS";

/// Environment variable overriding `locators` (`text` or `id`)
pub const ENV_LOCATORS: &str = "TABSHELF_LOCATORS";

/// Top-level harness configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// How robots turn semantic elements into locators
    pub locators: LocatorKind,

    /// Directory for `test-results.json`
    pub output_dir: PathBuf,

    /// Condition wait budgets
    pub wait: WaitConfig,

    /// Stub content server
    pub server: StubServerConfig,

    /// Application stand-in
    pub simulator: SimulatorConfig,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            locators: LocatorKind::Text,
            output_dir: PathBuf::from("test-results"),
            wait: WaitConfig::default(),
            server: StubServerConfig::default(),
            simulator: SimulatorConfig::default(),
        }
    }
}

/// Polling budgets for the condition wait primitive
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitConfig {
    /// Budget for a single landmark or verification wait
    pub timeout_ms: u64,

    /// Delay between two probes
    pub poll_interval_ms: u64,

    /// Budget for a direct attempt before the scroll fallback kicks in
    pub scroll_probe_ms: u64,

    /// Upper bound on scroll gestures per fallback
    pub max_scrolls: u32,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 15_000,
            poll_interval_ms: 100,
            scroll_probe_ms: 2_000,
            max_scrolls: 1,
        }
    }
}

impl WaitConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn scroll_probe(&self) -> Duration {
        Duration::from_millis(self.scroll_probe_ms)
    }
}

/// Stub content server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StubServerConfig {
    /// Interface to bind; the port is always ephemeral
    pub host: String,

    /// Timeout for the server to answer its health check
    pub startup_timeout_ms: u64,
}

impl Default for StubServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            startup_timeout_ms: 10_000,
        }
    }
}

impl StubServerConfig {
    pub fn startup_timeout(&self) -> Duration {
        Duration::from_millis(self.startup_timeout_ms)
    }
}

/// Locator strategy selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocatorKind {
    /// Find elements by their visible text
    #[default]
    Text,
    /// Find elements by resource id
    Id,
}

impl std::str::FromStr for LocatorKind {
    type Err = E2eError;

    fn from_str(s: &str) -> E2eResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LocatorKind::Text),
            "id" => Ok(LocatorKind::Id),
            other => Err(E2eError::Config(format!(
                "unknown locator strategy '{}' (expected 'text' or 'id')",
                other
            ))),
        }
    }
}

impl HarnessConfig {
    /// Load configuration from file, falling back to defaults when absent
    pub fn load(path: &Path) -> E2eResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> E2eResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| E2eError::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply `TABSHELF_*` environment overrides
    pub fn apply_env(&mut self) -> E2eResult<()> {
        self.apply_overrides(
            std::env::var(ENV_WAIT_TIMEOUT_MS).ok().as_deref(),
            std::env::var(ENV_LOCATORS).ok().as_deref(),
        )
    }

    fn apply_overrides(&mut self, timeout_ms: Option<&str>, locators: Option<&str>) -> E2eResult<()> {
        if let Some(raw) = timeout_ms {
            self.wait.timeout_ms = raw.trim().parse().map_err(|_| {
                E2eError::Config(format!("{} must be an integer, got '{}'", ENV_WAIT_TIMEOUT_MS, raw))
            })?;
        }
        if let Some(raw) = locators {
            self.locators = raw.parse()?;
        }
        self.validate()
    }

    pub fn validate(&self) -> E2eResult<()> {
        if self.wait.poll_interval_ms == 0 {
            return Err(E2eError::Config("wait.poll_interval_ms must be positive".into()));
        }
        if self.wait.timeout_ms < self.wait.poll_interval_ms {
            return Err(E2eError::Config(
                "wait.timeout_ms must be at least one poll interval".into(),
            ));
        }
        if self.simulator.viewport_rows == 0 {
            return Err(E2eError::Config("simulator.viewport_rows must be positive".into()));
        }
        Ok(())
    }

    /// Results file inside the output directory
    pub fn results_path(&self) -> PathBuf {
        self.output_dir.join("test-results.json")
    }
}
