//! In-memory event bus with synchronous post-process hooks.

use crate::forwarding::domain::{DeliveredEvent, PostProcessEvent};
use crate::forwarding::ports::{EventBusError, EventBusResult, ForwardEventBus};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

type PostProcessHook = Arc<dyn Fn(&mut PostProcessEvent) + Send + Sync>;

const DEFAULT_CAPACITY: usize = 64;

/// In-memory event bus.
///
/// Post-process hooks run in registration order and may modify or cancel
/// the event. Delivered events are recorded and broadcast to subscribers.
#[derive(Clone)]
pub struct InMemoryEventBus {
    state: Arc<RwLock<BusState>>,
    delivered_tx: broadcast::Sender<DeliveredEvent>,
    fail_delivered: Arc<AtomicBool>,
}

#[derive(Default)]
struct BusState {
    hooks: Vec<PostProcessHook>,
    post_processed: Vec<PostProcessEvent>,
    delivered: Vec<DeliveredEvent>,
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEventBus {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        let (delivered_tx, _) = broadcast::channel(DEFAULT_CAPACITY);
        Self {
            state: Arc::new(RwLock::new(BusState::default())),
            delivered_tx,
            fail_delivered: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Registers a post-process hook.
    ///
    /// # Errors
    ///
    /// Returns a listener error when lock acquisition fails.
    pub fn on_post_process(
        &self,
        hook: impl Fn(&mut PostProcessEvent) + Send + Sync + 'static,
    ) -> EventBusResult<()> {
        self.write_state()?.hooks.push(Arc::new(hook));
        Ok(())
    }

    /// Subscribes to delivered events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DeliveredEvent> {
        self.delivered_tx.subscribe()
    }

    /// Makes delivered-event publishing fail, simulating a broken bus.
    pub fn fail_delivered(&self, fail: bool) {
        self.fail_delivered.store(fail, Ordering::Release);
    }

    /// Returns every post-process event, as left by the hooks.
    ///
    /// # Errors
    ///
    /// Returns a listener error when lock acquisition fails.
    pub fn post_processed(&self) -> EventBusResult<Vec<PostProcessEvent>> {
        Ok(self.read_state()?.post_processed.clone())
    }

    /// Returns every delivered event.
    ///
    /// # Errors
    ///
    /// Returns a listener error when lock acquisition fails.
    pub fn delivered(&self) -> EventBusResult<Vec<DeliveredEvent>> {
        Ok(self.read_state()?.delivered.clone())
    }

    fn read_state(&self) -> EventBusResult<std::sync::RwLockReadGuard<'_, BusState>> {
        self.state
            .read()
            .map_err(|err| EventBusError::listener(std::io::Error::other(err.to_string())))
    }

    fn write_state(&self) -> EventBusResult<std::sync::RwLockWriteGuard<'_, BusState>> {
        self.state
            .write()
            .map_err(|err| EventBusError::listener(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl ForwardEventBus for InMemoryEventBus {
    async fn publish_post_process(
        &self,
        mut event: PostProcessEvent,
    ) -> EventBusResult<PostProcessEvent> {
        let hooks = self.read_state()?.hooks.clone();
        for hook in hooks {
            hook(&mut event);
        }
        self.write_state()?.post_processed.push(event.clone());
        Ok(event)
    }

    async fn publish_delivered(&self, event: DeliveredEvent) -> EventBusResult<()> {
        if self.fail_delivered.load(Ordering::Acquire) {
            return Err(EventBusError::Closed);
        }
        self.write_state()?.delivered.push(event.clone());
        if self.delivered_tx.send(event).is_err() {
            tracing::trace!("no delivered-event subscribers");
        }
        Ok(())
    }
}
