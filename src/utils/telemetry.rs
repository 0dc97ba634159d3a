// file: src/utils/telemetry.rs
// description: service health reporting and operation timing for the check and sync commands
// reference: service health checks and timing

use serde::Serialize;
use std::fmt::Display;
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    /// Reachable in principle but not usable as configured (e.g. no API key).
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    fn icon(self) -> &'static str {
        match self {
            HealthStatus::Healthy => "✓",
            HealthStatus::Degraded => "⚠",
            HealthStatus::Unhealthy => "✗",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthCheck {
    pub service: String,
    pub status: HealthStatus,
    pub detail: Option<String>,
    pub response_time_ms: u64,
}

impl HealthCheck {
    pub fn healthy(service: &str, detail: Option<String>, response_time: Duration) -> Self {
        Self::build(service, HealthStatus::Healthy, detail, response_time)
    }

    pub fn degraded(service: &str, detail: String, response_time: Duration) -> Self {
        Self::build(service, HealthStatus::Degraded, Some(detail), response_time)
    }

    pub fn unhealthy(service: &str, detail: String, response_time: Duration) -> Self {
        Self::build(service, HealthStatus::Unhealthy, Some(detail), response_time)
    }

    /// Healthy on `Ok`, unhealthy with the error text otherwise.
    pub fn from_result<T, E: Display>(
        service: &str,
        result: &Result<T, E>,
        describe: impl FnOnce(&T) -> Option<String>,
        response_time: Duration,
    ) -> Self {
        match result {
            Ok(value) => Self::healthy(service, describe(value), response_time),
            Err(e) => Self::unhealthy(service, e.to_string(), response_time),
        }
    }

    fn build(
        service: &str,
        status: HealthStatus,
        detail: Option<String>,
        response_time: Duration,
    ) -> Self {
        Self {
            service: service.to_string(),
            status,
            detail,
            response_time_ms: response_time.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub overall_status: HealthStatus,
    pub checks: Vec<HealthCheck>,
    pub checked_at: String,
    pub version: String,
}

impl HealthReport {
    pub fn new(checks: Vec<HealthCheck>, version: String) -> Self {
        let overall_status = checks
            .iter()
            .map(|c| c.status)
            .max_by_key(|status| match status {
                HealthStatus::Healthy => 0,
                HealthStatus::Degraded => 1,
                HealthStatus::Unhealthy => 2,
            })
            .unwrap_or(HealthStatus::Healthy);

        Self {
            overall_status,
            checks,
            checked_at: chrono::Utc::now()
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
            version,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.overall_status == HealthStatus::Healthy
    }

    pub fn format(&self) -> String {
        let mut output = format!(
            "{} Service Health: {:?}\nVersion: {}\nChecked: {}\n\n",
            self.overall_status.icon(),
            self.overall_status,
            self.version,
            self.checked_at
        );

        for check in &self.checks {
            output.push_str(&format!(
                "{} {} ({:?}) - {}ms",
                check.status.icon(),
                check.service,
                check.status,
                check.response_time_ms
            ));

            if let Some(detail) = &check.detail {
                output.push_str(&format!("\n  {}", detail));
            }

            output.push('\n');
        }

        output
    }
}

/// Logs start and completion of a long-running step.
pub struct OperationTimer {
    operation: String,
    start: Instant,
}

impl OperationTimer {
    pub fn new(operation: &str) -> Self {
        info!("Starting: {}", operation);
        Self {
            operation: operation.to_string(),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn finish(self) -> Duration {
        let elapsed = self.elapsed();
        info!(
            "Completed: {} in {:.2}s",
            self.operation,
            elapsed.as_secs_f64()
        );
        elapsed
    }

    pub fn finish_with_count(self, count: usize) -> Duration {
        let elapsed = self.elapsed();
        info!(
            "Completed: {} - {} indexers in {:.2}s",
            self.operation,
            count,
            elapsed.as_secs_f64()
        );
        elapsed
    }

    pub fn warn_if_slow(&self, threshold: Duration) {
        let elapsed = self.elapsed();
        if elapsed > threshold {
            warn!(
                "Slow operation [{}]: took {:.2}s (threshold: {:.2}s)",
                self.operation,
                elapsed.as_secs_f64(),
                threshold.as_secs_f64()
            );
        }
    }
}
