//! Fire-and-forget hand-off of click events to the background worker.

use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::warn;

use crate::domain::click_event::ClickEvent;

/// Sending half of the click queue.
///
/// [`ClickRecorder::record`] never waits: a full or closed queue drops the
/// event with a warning instead of slowing the redirect down.
/// [`crate::domain::click_worker::run_click_worker`] consumes the other end.
#[derive(Clone)]
pub struct ClickRecorder {
    tx: mpsc::Sender<ClickEvent>,
    capacity: usize,
}

impl ClickRecorder {
    /// Creates a recorder and the receiver to hand to the click worker.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<ClickEvent>) {
        let capacity = capacity.max(1);
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx, capacity }, rx)
    }

    /// Queues a click for persistence. Returns `false` if it was dropped.
    pub fn record(&self, event: ClickEvent) -> bool {
        match self.tx.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                warn!(link_id = event.link_id, "Click queue full, dropping click");
                metrics::counter!("clicks_dropped_total").increment(1);
                false
            }
            Err(TrySendError::Closed(event)) => {
                warn!(link_id = event.link_id, "Click queue closed, dropping click");
                metrics::counter!("clicks_dropped_total").increment(1);
                false
            }
        }
    }

    /// True once the worker has stopped receiving.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of queued events not yet taken by the worker.
    pub fn queued(&self) -> usize {
        self.capacity.saturating_sub(self.tx.capacity())
    }
}
