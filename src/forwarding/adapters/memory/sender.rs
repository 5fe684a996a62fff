//! Recording message sender with injectable failures.

use crate::forwarding::domain::{OutgoingMessage, ReceivedMessage};
use crate::forwarding::ports::{MessageSender, SendError, SendResult};
use crate::platform::{ChannelId, DestinationChannel, MessageId};
use async_trait::async_trait;
use mockable::Clock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// Records every message it accepts.
#[derive(Debug)]
pub struct InMemoryMessageSender<C> {
    clock: Arc<C>,
    state: RwLock<SenderState>,
    next_id: AtomicU64,
}

#[derive(Debug, Default)]
struct SenderState {
    sent: Vec<(DestinationChannel, OutgoingMessage)>,
    failures: HashMap<ChannelId, SendError>,
}

impl<C> InMemoryMessageSender<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a sender stamping messages with `clock`.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            clock,
            state: RwLock::new(SenderState::default()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Makes every send into `channel_id` fail with `error`.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn fail_channel(&self, channel_id: ChannelId, error: SendError) -> SendResult<()> {
        self.write_state()?.failures.insert(channel_id, error);
        Ok(())
    }

    /// Returns every accepted send, in acceptance order.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn sent(&self) -> SendResult<Vec<(DestinationChannel, OutgoingMessage)>> {
        let state = self
            .state
            .read()
            .map_err(|err| SendError::transport(std::io::Error::other(err.to_string())))?;
        Ok(state.sent.clone())
    }

    /// Returns the bodies accepted for `channel_id`.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn sent_to(&self, channel_id: ChannelId) -> SendResult<Vec<String>> {
        Ok(self
            .sent()?
            .into_iter()
            .filter(|(channel, _)| channel.id() == channel_id)
            .map(|(_, message)| message.content().to_owned())
            .collect())
    }

    fn write_state(&self) -> SendResult<std::sync::RwLockWriteGuard<'_, SenderState>> {
        self.state
            .write()
            .map_err(|err| SendError::transport(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl<C> MessageSender for InMemoryMessageSender<C>
where
    C: Clock + Send + Sync,
{
    async fn send(
        &self,
        channel: &DestinationChannel,
        message: &OutgoingMessage,
    ) -> SendResult<ReceivedMessage> {
        let mut state = self.write_state()?;
        if let Some(error) = state.failures.get(&channel.id()) {
            return Err(error.clone());
        }
        state.sent.push((channel.clone(), message.clone()));
        let id = MessageId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        Ok(ReceivedMessage::new(
            id,
            channel.id(),
            channel.guild_id(),
            message.content(),
            self.clock.utc(),
        ))
    }
}
