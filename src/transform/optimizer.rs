use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::debug;

use super::{OptimizationMode, OutputFormat, optimize};
use crate::error::{PilotError, Result};

/// Latency that stands in for a remote model call.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1500);

/// Runs the transform behind a fixed delay, one request at a time.
///
/// A call made while another is pending is rejected with
/// [`PilotError::RequestInFlight`]; requests are never queued.
#[derive(Debug)]
pub struct Optimizer {
    latency: Duration,
    in_flight: AtomicBool,
}

impl Optimizer {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            in_flight: AtomicBool::new(false),
        }
    }

    /// An optimizer without the artificial delay.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn run(
        &self,
        input: &str,
        mode: Option<OptimizationMode>,
        format: OutputFormat,
    ) -> Result<String> {
        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or(PilotError::RequestInFlight)?;

        debug!(
            mode = mode.map(|m| m.label()).unwrap_or("none"),
            format = format.label(),
            latency_ms = self.latency.as_millis() as u64,
            "Optimizing prompt"
        );

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        Ok(optimize(input, mode, format))
    }
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY)
    }
}

/// Clears the in-flight flag on drop, including when the future is abandoned.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
