//! Normalized forward requests and their shared processing state.

use super::{GameChannelName, Player};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

/// Kind of game event being forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MessageKind {
    /// A player chat line.
    Chat,
    /// A player joined the server.
    Join,
    /// A player left the server.
    Leave,
    /// A player died.
    Death,
    /// A player earned an advancement or achievement.
    Award,
    /// A player moved between servers of a network.
    ServerSwitch,
    /// The game server finished starting.
    Start,
    /// The game server is stopping.
    Stop,
}

impl MessageKind {
    /// Every message kind, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Chat,
        Self::Join,
        Self::Leave,
        Self::Death,
        Self::Award,
        Self::ServerSwitch,
        Self::Start,
        Self::Stop,
    ];

    /// Returns the kind's configuration key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Join => "join",
            Self::Leave => "leave",
            Self::Death => "death",
            Self::Award => "award",
            Self::ServerSwitch => "server_switch",
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Kind-specific fields of a forward request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardPayload {
    /// A chat line as typed by the player.
    Chat {
        /// Raw chat text.
        message: String,
    },
    /// A join, with the game's own join line if it has one.
    Join {
        /// Game-rendered join text.
        message: Option<String>,
        /// Whether this is the player's first time on the server.
        first_join: bool,
    },
    /// A leave, with the game's own leave line if it has one.
    Leave {
        /// Game-rendered leave text.
        message: Option<String>,
    },
    /// A death.
    Death {
        /// Game-rendered death cause.
        message: String,
    },
    /// An advancement.
    Award {
        /// Advancement title.
        title: String,
        /// Game-rendered advancement text.
        message: Option<String>,
    },
    /// A move between network servers.
    ServerSwitch {
        /// Server the player left.
        from: String,
        /// Server the player joined.
        to: String,
    },
    /// Server start.
    Start,
    /// Server stop.
    Stop,
}

impl ForwardPayload {
    /// Returns the message kind this payload belongs to.
    #[must_use]
    pub const fn kind(&self) -> MessageKind {
        match self {
            Self::Chat { .. } => MessageKind::Chat,
            Self::Join { .. } => MessageKind::Join,
            Self::Leave { .. } => MessageKind::Leave,
            Self::Death { .. } => MessageKind::Death,
            Self::Award { .. } => MessageKind::Award,
            Self::ServerSwitch { .. } => MessageKind::ServerSwitch,
            Self::Start => MessageKind::Start,
            Self::Stop => MessageKind::Stop,
        }
    }
}

/// Processing state of a request, shared by every observer of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    /// Nobody has handled the request yet.
    Pending,
    /// A pipeline or another listener has taken the request.
    Processed,
    /// A listener cancelled the request.
    Cancelled,
}

impl RequestState {
    const fn to_u8(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Processed => 1,
            Self::Cancelled => 2,
        }
    }

    const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Pending,
            1 => Self::Processed,
            _ => Self::Cancelled,
        }
    }
}

/// One event to forward.
///
/// Clones share the same [`RequestState`], so a listener holding a clone
/// can cancel a request the pipeline is already working on.
#[derive(Debug, Clone)]
pub struct ForwardRequest {
    payload: ForwardPayload,
    player: Option<Player>,
    game_channel: Option<GameChannelName>,
    silent: bool,
    state: Arc<AtomicU8>,
}

impl ForwardRequest {
    /// Creates a pending request for every configured game channel.
    #[must_use]
    pub fn new(payload: ForwardPayload) -> Self {
        Self {
            payload,
            player: None,
            game_channel: None,
            silent: false,
            state: Arc::new(AtomicU8::new(RequestState::Pending.to_u8())),
        }
    }

    /// Sets the player that triggered the event.
    #[must_use]
    pub fn with_player(mut self, player: Player) -> Self {
        self.player = Some(player);
        self
    }

    /// Restricts the forward to one game channel.
    #[must_use]
    pub fn in_channel(mut self, game_channel: GameChannelName) -> Self {
        self.game_channel = Some(game_channel);
        self
    }

    /// Marks the request as silent, as for a vanished player.
    #[must_use]
    pub const fn silent(mut self) -> Self {
        self.silent = true;
        self
    }

    /// Returns the message kind.
    #[must_use]
    pub const fn kind(&self) -> MessageKind {
        self.payload.kind()
    }

    /// Returns the kind-specific payload.
    #[must_use]
    pub const fn payload(&self) -> &ForwardPayload {
        &self.payload
    }

    /// Returns the triggering player, if any.
    #[must_use]
    pub const fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    /// Returns the target game channel; `None` means every channel.
    #[must_use]
    pub const fn game_channel(&self) -> Option<&GameChannelName> {
        self.game_channel.as_ref()
    }

    /// Returns whether the request is silent.
    #[must_use]
    pub const fn is_silent(&self) -> bool {
        self.silent
    }

    /// Returns the current processing state.
    #[must_use]
    pub fn state(&self) -> RequestState {
        RequestState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Returns whether a listener cancelled the request.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.state() == RequestState::Cancelled
    }

    /// Moves a pending request to processed.
    ///
    /// # Errors
    ///
    /// Returns the state observed instead when the request is not pending.
    pub fn mark_processed(&self) -> Result<(), RequestState> {
        self.state
            .compare_exchange(
                RequestState::Pending.to_u8(),
                RequestState::Processed.to_u8(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .map(|_| ())
            .map_err(RequestState::from_u8)
    }

    /// Cancels the request, whether or not a pipeline already took it.
    pub fn cancel(&self) {
        self.state
            .store(RequestState::Cancelled.to_u8(), Ordering::Release);
    }
}
