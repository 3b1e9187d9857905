use log::{error, info};
use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::Notify;

const SHUTDOWN_PERIOD_MS: u64 = 100;
const MAX_RETRIES: u64 = 10;

/// Turns Ctrl+C, or the end of a fixed run time, into a stop notification for
/// every task waiting on `notify`.
pub(crate) struct ShutdownSignal {
    notify: Arc<Notify>,
    run_for: Option<Duration>,
}

impl ShutdownSignal {
    fn new(notify: Arc<Notify>, run_for_millis: Option<u64>) -> Self {
        Self {
            notify,
            run_for: run_for_millis.map(Duration::from_millis),
        }
    }

    async fn wait_for_trigger(&self) {
        match self.run_for {
            Some(run_for) => tokio::time::sleep(run_for).await,
            None => {
                if !wait_for_ctrl_c(signal::ctrl_c).await {
                    // Without a handler the default Ctrl+C behavior still ends the process.
                    error!("Giving up on Ctrl+C handling. No stop signal will be sent");
                    std::future::pending::<()>().await;
                }
            }
        }
    }

    // Waiters that are busy when the first notification goes out would miss it,
    // so it is repeated a few times.
    async fn broadcast(&self) {
        for _ in 0..MAX_RETRIES {
            self.notify.notify_waiters();
            tokio::time::sleep(Duration::from_millis(SHUTDOWN_PERIOD_MS)).await;
        }
    }
}

/// Waits for Ctrl+C through `listen`. Returns false once `MAX_RETRIES`
/// attempts have failed.
async fn wait_for_ctrl_c<F, Fut>(mut listen: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = io::Result<()>>,
{
    for attempt in 1..=MAX_RETRIES {
        match listen().await {
            Ok(()) => {
                info!("Ctrl+C received. Sending stop signal...");
                return true;
            }
            Err(e) => {
                error!(
                    "Error while waiting for Ctrl+C (attempt {}/{}): {}",
                    attempt, MAX_RETRIES, e
                );
                tokio::time::sleep(Duration::from_millis(SHUTDOWN_PERIOD_MS)).await;
            }
        }
    }
    false
}

pub(crate) fn listen_for_shutdown(
    notify: Arc<Notify>,
    run_for_millis: Option<u64>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let shutdown_signal = ShutdownSignal::new(notify, run_for_millis);
        shutdown_signal.wait_for_trigger().await;
        shutdown_signal.broadcast().await;
    })
}
