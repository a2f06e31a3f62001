//! Background scheduling for the inactivity sweep.
//!
//! One dedicated thread drives the notifier on a fixed interval. The
//! scheduler and live message handling share the same access gate, so
//! there is exactly one concurrency model in the system. Shutdown is
//! cooperative: the thread finishes any in-flight sweep before exiting.

use crate::gateway::ChatGateway;
use crate::notify::InactivityNotifier;
use crossbeam_channel::{bounded, select, tick, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{error, info};

/// Periodically runs the inactivity sweep until stopped.
pub struct SweepScheduler {
    shutdown: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl SweepScheduler {
    /// Start the sweep thread. Each tick runs one full sweep; a failed
    /// sweep is logged and the scheduler keeps running.
    pub fn start(
        notifier: InactivityNotifier,
        gateway: Arc<dyn ChatGateway>,
        interval: Duration,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = bounded::<()>(1);
        let ticker = tick(interval);

        let handle = thread::spawn(move || {
            info!(interval_secs = interval.as_secs_f64(), "sweep scheduler started");
            loop {
                select! {
                    recv(ticker) -> _ => {
                        if let Err(e) = notifier.run_once(gateway.as_ref()) {
                            error!(error = %e, "inactivity sweep failed");
                        }
                    }
                    recv(shutdown_rx) -> _ => break,
                }
            }
            info!("sweep scheduler stopped");
        });

        Self {
            shutdown: shutdown_tx,
            handle: Some(handle),
        }
    }

    /// Signal shutdown and wait for the thread to finish. An in-flight
    /// sweep completes before this returns.
    pub fn stop(mut self) {
        self.shutdown_and_join();
    }

    fn shutdown_and_join(&mut self) {
        let _ = self.shutdown.try_send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for SweepScheduler {
    fn drop(&mut self) {
        self.shutdown_and_join();
    }
}
