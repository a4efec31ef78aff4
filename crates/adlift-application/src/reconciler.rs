//! Background reconciliation scheduler.
//!
//! Runs `CampaignUseCase::reconcile` on a fixed interval so campaigns whose
//! generator callback never arrives are failed after the policy timeout and
//! become retry-eligible.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::time::interval;

use crate::campaign_usecase::CampaignUseCase;

/// Periodic reconciliation driver around a [`CampaignUseCase`].
pub struct Reconciler {
    usecase: Arc<CampaignUseCase>,
    running: Arc<AtomicBool>,
}

impl Reconciler {
    /// Creates a new `Reconciler` instance.
    pub fn new(usecase: Arc<CampaignUseCase>) -> Self {
        Self {
            usecase,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Starts the sweep loop.
    ///
    /// # Arguments
    ///
    /// * `interval_secs` - Interval in seconds between sweeps
    pub fn start(&self, interval_secs: u64) {
        // Prevent multiple scheduler instances
        if self.running.swap(true, Ordering::SeqCst) {
            tracing::warn!(target: "reconciler", "Scheduler already running, skipping");
            return;
        }

        let usecase = Arc::clone(&self.usecase);
        let running = Arc::clone(&self.running);

        tokio::spawn(async move {
            let mut ticker = interval(Duration::from_secs(interval_secs));
            tracing::info!(target: "reconciler", "Scheduler started ({}s interval)", interval_secs);

            loop {
                ticker.tick().await;
                if !running.load(Ordering::SeqCst) {
                    tracing::info!(target: "reconciler", "Scheduler stopped");
                    break;
                }

                match usecase.reconcile().await {
                    Ok(0) => {
                        tracing::debug!(target: "reconciler", "Tick - nothing to reconcile");
                    }
                    Ok(count) => {
                        tracing::info!(target: "reconciler", "Timed out {} campaign(s)", count);
                    }
                    Err(e) => {
                        tracing::error!(target: "reconciler", "Sweep failed: {}", e);
                    }
                }
            }
        });
    }

    /// Stops the sweep loop after its current tick.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Whether the sweep loop is running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}
