//! Simulator configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing and layout knobs of the simulated application
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Delay between a state change and the new tree becoming attached
    pub render_delay_ms: u64,

    /// How long the "Tab saved!" snackbar stays visible
    pub snackbar_duration_ms: u64,

    /// Number of home rows visible without scrolling
    pub viewport_rows: usize,

    /// Timeout for loading a page from the network
    pub page_load_timeout_ms: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            render_delay_ms: 120,
            snackbar_duration_ms: 4_000,
            viewport_rows: 5,
            page_load_timeout_ms: 5_000,
        }
    }
}

impl SimulatorConfig {
    pub fn render_delay(&self) -> Duration {
        Duration::from_millis(self.render_delay_ms)
    }

    pub fn snackbar_duration(&self) -> Duration {
        Duration::from_millis(self.snackbar_duration_ms)
    }

    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_millis(self.page_load_timeout_ms)
    }
}
