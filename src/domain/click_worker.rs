//! Background worker persisting click events.
//!
//! The worker owns the receiving half of the click channel. Failures stay
//! inside the worker: they are logged and counted, never reported back to the
//! redirect path that produced the event.

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info};

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::NewClick;
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

/// Total insert attempts per click, including the first one.
const MAX_ATTEMPTS: usize = 3;

/// Consumes click events until every sender is dropped.
///
/// Up to `concurrency` inserts run at the same time. Once the channel closes,
/// in-flight inserts are awaited before the worker returns.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    clicks: Arc<dyn ClickRepository>,
    concurrency: usize,
) {
    let permits = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut in_flight = JoinSet::new();

    while let Some(event) = rx.recv().await {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };

        let clicks = clicks.clone();
        in_flight.spawn(async move {
            persist_click(clicks.as_ref(), event).await;
            drop(permit);
        });

        while in_flight.try_join_next().is_some() {}
    }

    while in_flight.join_next().await.is_some() {}
    info!("Click worker stopped");
}

/// Inserts one click, retrying transient store failures.
///
/// Returns `true` when the click was stored.
pub async fn persist_click(clicks: &dyn ClickRepository, event: ClickEvent) -> bool {
    let new_click = NewClick::from(event);
    let link_id = new_click.link_id;

    let strategy = ExponentialBackoff::from_millis(10)
        .map(jitter)
        .take(MAX_ATTEMPTS - 1);

    let result = RetryIf::spawn(
        strategy,
        || clicks.record_click(new_click.clone()),
        |e: &AppError| matches!(e, AppError::Internal { .. }),
    )
    .await;

    match result {
        Ok(click) => {
            debug!(link_id, click_id = click.id, "Click recorded");
            metrics::counter!("clicks_recorded_total").increment(1);
            true
        }
        Err(e) => {
            error!(link_id, error = %e, "Failed to record click");
            metrics::counter!("clicks_failed_total").increment(1);
            false
        }
    }
}
