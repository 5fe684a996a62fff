//! Delayed forwards that a contradicting event can cancel.

use super::ForwardError;
use crate::forwarding::domain::{GameChannelName, PlayerId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::Instant;

const PENDING: u8 = 0;
const FIRED: u8 = 1;
const CANCELLED: u8 = 2;

/// What a debounce record guards against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DebouncePurpose {
    /// A join waiting to be forwarded; a leave cancels it.
    PendingJoin,
    /// A leave waiting to be forwarded; a rejoin cancels it.
    RecentLeave,
}

/// How a debounced operation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebounceOutcome<T> {
    /// The window elapsed and the operation ran.
    Fired(T),
    /// A contradicting event cancelled the operation.
    Suppressed,
}

/// Handle to one debounced operation.
#[derive(Debug)]
pub struct DebounceHandle<T> {
    task: JoinHandle<DebounceOutcome<T>>,
}

impl<T> DebounceHandle<T> {
    /// Waits for the operation to fire or be suppressed.
    ///
    /// # Errors
    ///
    /// Returns [`ForwardError::Scheduling`] if the task panicked or the
    /// runtime shut down first.
    pub async fn wait(self) -> Result<DebounceOutcome<T>, ForwardError> {
        self.task
            .await
            .map_err(|err| ForwardError::Scheduling(err.to_string()))
    }
}

struct ScheduledOperation {
    game_channel: GameChannelName,
    state: Arc<AtomicU8>,
    wake: Arc<Notify>,
}

struct PendingDebounce {
    scheduled_at: DateTime<Utc>,
    retain_until: Instant,
    operations: Vec<ScheduledOperation>,
}

impl PendingDebounce {
    fn has_pending(&self) -> bool {
        self.operations
            .iter()
            .any(|operation| operation.state.load(Ordering::Acquire) == PENDING)
    }
}

/// In-memory registry of debounced forwards, keyed by player and purpose.
///
/// One record exists per `(player, purpose)`. It holds the delayed forward
/// of every game channel that scheduled one and lives for the longest
/// window configured for the purpose, so contradictions are detected even
/// after a shorter channel's forward has already fired.
pub struct DebounceRegistry<C>
where
    C: Clock + Send + Sync,
{
    clock: Arc<C>,
    pending: Mutex<HashMap<(PlayerId, DebouncePurpose), PendingDebounce>>,
}

impl<C> DebounceRegistry<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty registry.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            clock,
            pending: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<(PlayerId, DebouncePurpose), PendingDebounce>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `operation` for `game_channel` after `delay`, unless
    /// [`cancel`](Self::cancel) is called for the same player and purpose
    /// first.
    ///
    /// `retain` is how long the record stays available for contradiction
    /// checks; it is never shorter than `delay`.
    #[must_use]
    pub fn schedule<F, T>(
        &self,
        player_id: PlayerId,
        purpose: DebouncePurpose,
        game_channel: GameChannelName,
        delay: Duration,
        retain: Duration,
        operation: F,
    ) -> DebounceHandle<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let state = Arc::new(AtomicU8::new(PENDING));
        let wake = Arc::new(Notify::new());
        let now = Instant::now();
        let retain_until = now + retain.max(delay);

        {
            let mut pending = self.lock();
            pending.retain(|_, record| record.retain_until > now);
            let record = pending
                .entry((player_id, purpose))
                .or_insert_with(|| PendingDebounce {
                    scheduled_at: self.clock.utc(),
                    retain_until,
                    operations: Vec::new(),
                });
            record.retain_until = record.retain_until.max(retain_until);
            record.operations.push(ScheduledOperation {
                game_channel: game_channel.clone(),
                state: Arc::clone(&state),
                wake: Arc::clone(&wake),
            });
        }
        tracing::debug!(
            player_id = %player_id,
            ?purpose,
            game_channel = %game_channel,
            delay_ms = delay.as_millis(),
            "scheduled debounced forward"
        );

        let task = tokio::spawn(async move {
            tokio::select! {
                () = tokio::time::sleep(delay) => {}
                () = wake.notified() => {}
            }
            if state
                .compare_exchange(PENDING, FIRED, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                DebounceOutcome::Fired(operation.await)
            } else {
                DebounceOutcome::Suppressed
            }
        });
        DebounceHandle { task }
    }

    /// Cancels every still-pending operation for the player and purpose and
    /// removes the record.
    ///
    /// Returns the game channels whose operations were cancelled; channels
    /// whose forward already fired are not included.
    #[must_use]
    pub fn cancel(&self, player_id: PlayerId, purpose: DebouncePurpose) -> Vec<GameChannelName> {
        let Some(record) = self.lock().remove(&(player_id, purpose)) else {
            return Vec::new();
        };
        if record.retain_until <= Instant::now() {
            return Vec::new();
        }

        record
            .operations
            .into_iter()
            .filter(|operation| {
                operation
                    .state
                    .compare_exchange(PENDING, CANCELLED, Ordering::AcqRel, Ordering::Acquire)
                    .is_ok()
            })
            .map(|operation| {
                operation.wake.notify_one();
                operation.game_channel
            })
            .collect()
    }

    /// Returns whether any operation for the player and purpose has yet to
    /// fire.
    #[must_use]
    pub fn is_pending(&self, player_id: PlayerId, purpose: DebouncePurpose) -> bool {
        self.lock()
            .get(&(player_id, purpose))
            .is_some_and(PendingDebounce::has_pending)
    }

    /// Returns when the record for the player and purpose was created.
    #[must_use]
    pub fn pending_since(
        &self,
        player_id: PlayerId,
        purpose: DebouncePurpose,
    ) -> Option<DateTime<Utc>> {
        self.lock()
            .get(&(player_id, purpose))
            .map(|record| record.scheduled_at)
    }

    /// Drops records whose retention window has passed. Returns how many
    /// were dropped.
    #[must_use]
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut pending = self.lock();
        let before = pending.len();
        pending.retain(|_, record| record.retain_until > now);
        before - pending.len()
    }
}
