use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::repositories::revalidation::PathRevalidator;

const CHANNEL_CAPACITY: usize = 64;

/// In-process fan-out of invalidated paths. Subscribers are the SSE clients.
#[derive(Clone)]
pub struct BroadcastRevalidator {
    sender: broadcast::Sender<String>,
}

impl BroadcastRevalidator {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastRevalidator {
    fn default() -> Self {
        Self::new()
    }
}

impl PathRevalidator for BroadcastRevalidator {
    fn revalidate(&self, path: &str) {
        match self.sender.send(path.to_string()) {
            Ok(receivers) => debug!(path, receivers, "revalidation: path invalidated"),
            Err(_) => debug!(path, "revalidation: no subscribers"),
        }
    }
}
