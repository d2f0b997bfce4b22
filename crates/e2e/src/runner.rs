//! Scenario runner: fresh fixture per scenario, JSON results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error, info};

use crate::config::HarnessConfig;
use crate::error::E2eResult;
use crate::fixture::TestFixture;
use crate::scenarios::Scenario;
use crate::session::StepRecord;

/// Result of running a single scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub success: bool,
    pub duration_ms: u64,
    pub steps: Vec<StepRecord>,
    /// `<screen>: <step>` of the step that failed, if any
    pub failed_step: Option<String>,
    pub error: Option<String>,
}

/// Result of running a set of scenarios
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSuiteResult {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub finished_at: DateTime<Utc>,
    pub results: Vec<TestResult>,
}

impl TestSuiteResult {
    pub fn from_results(results: Vec<TestResult>, duration_ms: u64) -> Self {
        let passed = results.iter().filter(|r| r.success).count();
        Self {
            total: results.len(),
            passed,
            failed: results.len() - passed,
            duration_ms,
            finished_at: Utc::now(),
            results,
        }
    }
}

pub struct ScenarioRunner {
    config: HarnessConfig,
}

impl ScenarioRunner {
    pub fn new() -> Self {
        Self::with_config(HarnessConfig::default())
    }

    pub fn with_config(config: HarnessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Run every known scenario
    pub async fn run_all(&self) -> TestSuiteResult {
        self.run_scenarios(&Scenario::all()).await
    }

    pub async fn run_scenarios(&self, scenarios: &[Scenario]) -> TestSuiteResult {
        let start = Instant::now();
        info!("Running {} scenario(s)...", scenarios.len());

        let mut results = Vec::with_capacity(scenarios.len());
        for scenario in scenarios {
            let result = self.run_scenario(*scenario).await;
            if result.success {
                info!("✓ {} ({} ms)", result.name, result.duration_ms);
            } else {
                error!(
                    "✗ {} at {} - {}",
                    result.name,
                    result.failed_step.as_deref().unwrap_or("setup"),
                    result.error.as_deref().unwrap_or("unknown error")
                );
            }
            results.push(result);
        }

        let suite = TestSuiteResult::from_results(results, start.elapsed().as_millis() as u64);
        info!(
            "Test Results: {} passed, {} failed ({} ms)",
            suite.passed, suite.failed, suite.duration_ms
        );
        suite
    }

    /// Run one scenario against its own fixture.
    ///
    /// Failures end the scenario and are reported in the result; nothing is
    /// retried.
    pub async fn run_scenario(&self, scenario: Scenario) -> TestResult {
        let start = Instant::now();
        debug!("Setting up fixture for {}", scenario);

        let fixture = match TestFixture::setup(&self.config).await {
            Ok(fixture) => fixture,
            Err(e) => {
                return TestResult {
                    name: scenario.name().to_string(),
                    success: false,
                    duration_ms: start.elapsed().as_millis() as u64,
                    steps: Vec::new(),
                    failed_step: Some("setup".to_string()),
                    error: Some(e.to_string()),
                }
            }
        };

        let outcome = scenario.run(&fixture).await;
        let steps = fixture.session().journal();
        fixture.teardown().await;

        let failed_step = steps
            .iter()
            .find(|s| s.error.is_some())
            .map(|s| format!("{}: {}", s.screen, s.step));

        TestResult {
            name: scenario.name().to_string(),
            success: outcome.is_ok(),
            duration_ms: start.elapsed().as_millis() as u64,
            steps,
            failed_step,
            error: outcome.err().map(|e| e.to_string()),
        }
    }

    /// Write test results to JSON file
    pub fn write_results(&self, results: &TestSuiteResult) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let path = self.config.results_path();
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
