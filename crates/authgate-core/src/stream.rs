//! The broadcast result stream.
//!
//! One producer (the orchestrator), any number of subscribers. Publishing
//! never blocks and never fails: with no subscribers the event is simply
//! not delivered. Subscribers only see events published after they
//! subscribed. A subscriber that falls more than `capacity` events behind
//! loses the oldest ones and keeps going.

use tokio::sync::broadcast::{
    self,
    error::{RecvError, TryRecvError},
};
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};
use tracing::{debug, warn};

use authgate_contracts::outcome::OutcomeEvent;

/// Producer side of the outcome broadcast.
#[derive(Debug, Clone)]
pub struct ResultStream {
    sender: broadcast::Sender<OutcomeEvent>,
}

impl ResultStream {
    /// Events a slow subscriber may fall behind before it starts losing them.
    pub const DEFAULT_CAPACITY: usize = 64;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// `capacity` is clamped to at least 1.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish `event` to every current subscriber.
    ///
    /// Returns how many subscribers it was delivered to.
    pub fn publish(&self, event: OutcomeEvent) -> usize {
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(event)) => {
                debug!(
                    request_id = %event.request_id,
                    outcome = ?event.outcome.kind(),
                    "no subscribers; outcome not delivered"
                );
                0
            }
        }
    }

    /// Start observing. Only events published from now on are received.
    pub fn subscribe(&self) -> OutcomeSubscription {
        OutcomeSubscription {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ResultStream {
    fn default() -> Self {
        Self::new()
    }
}

/// Consumer side of the outcome broadcast.
#[derive(Debug)]
pub struct OutcomeSubscription {
    receiver: broadcast::Receiver<OutcomeEvent>,
}

impl OutcomeSubscription {
    /// Wait for the next event. `None` once the producer is gone.
    pub async fn recv(&mut self) -> Option<OutcomeEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Closed) => return None,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "outcome subscriber lagged; oldest outcomes dropped");
                }
            }
        }
    }

    /// Take the next event if one is already buffered.
    pub fn try_recv(&mut self) -> Option<OutcomeEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => return Some(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "outcome subscriber lagged; oldest outcomes dropped");
                }
            }
        }
    }

    /// Drain every buffered event without waiting.
    pub fn drain(&mut self) -> Vec<OutcomeEvent> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }

    /// Turn the subscription into a `Stream` that ends when the producer is
    /// dropped.
    pub fn into_stream(self) -> impl Stream<Item = OutcomeEvent> + Send + 'static {
        BroadcastStream::new(self.receiver).filter_map(|item| match item {
            Ok(event) => Some(event),
            Err(err) => {
                warn!(error = %err, "outcome stream lagged; oldest outcomes dropped");
                None
            }
        })
    }
}
