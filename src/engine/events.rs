//! Engine events and their delivery.
//!
//! Events describe state changes after they are applied. Callers receive
//! them two ways:
//!
//! - **Observers**: callbacks registered with `subscribe`, invoked
//!   synchronously in emission order
//! - **Polling**: every event is also queued until `drain` is called. The
//!   queue is bounded; once full, the oldest event is dropped
//!
//! Neither channel is tied to a UI framework.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::session::EndReason;
use crate::core::{CardId, Difficulty};

/// Something that happened in a session.
///
/// Every event carries the `generation` of the session it belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// A fresh deck was dealt at level 1.
    SessionStarted {
        generation: u64,
        difficulty: Difficulty,
        card_count: usize,
    },

    /// A card was turned face-up.
    CardFlipped { generation: u64, card: CardId },

    /// Two face-up cards paired.
    PairMatched {
        generation: u64,
        first: CardId,
        second: CardId,
        points: u32,
    },

    /// Two face-up cards did not pair and were turned back.
    PairMismatched {
        generation: u64,
        first: CardId,
        second: CardId,
    },

    /// The board was cleared and a new level dealt.
    LevelAdvanced {
        generation: u64,
        level: u32,
        time_remaining: u32,
        card_count: usize,
    },

    /// One second came off the clock.
    Tick { generation: u64, time_remaining: u32 },

    Paused { generation: u64 },

    Resumed { generation: u64 },

    /// The session finished.
    GameOver {
        generation: u64,
        difficulty: Difficulty,
        score: u32,
        level: u32,
        reason: EndReason,
    },
}

impl EngineEvent {
    /// Generation of the session that emitted this event.
    #[must_use]
    pub fn generation(&self) -> u64 {
        match self {
            EngineEvent::SessionStarted { generation, .. }
            | EngineEvent::CardFlipped { generation, .. }
            | EngineEvent::PairMatched { generation, .. }
            | EngineEvent::PairMismatched { generation, .. }
            | EngineEvent::LevelAdvanced { generation, .. }
            | EngineEvent::Tick { generation, .. }
            | EngineEvent::Paused { generation }
            | EngineEvent::Resumed { generation }
            | EngineEvent::GameOver { generation, .. } => *generation,
        }
    }
}

/// Observer callback.
pub type EventListener = Box<dyn FnMut(&EngineEvent) + Send>;

/// Queue bound used by `EventBus::new`.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Fan-out of engine events to observers plus a pollable queue.
pub struct EventBus {
    listeners: Vec<EventListener>,
    queue: VecDeque<EngineEvent>,
    capacity: usize,
    dropped: u64,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_QUEUE_CAPACITY)
    }
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bus whose queue holds at most `capacity` undrained events.
    ///
    /// A capacity of zero disables the queue; observers still see every
    /// event.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            listeners: Vec::new(),
            queue: VecDeque::new(),
            capacity,
            dropped: 0,
        }
    }

    /// Register an observer. Observers live as long as the bus.
    pub fn subscribe(&mut self, listener: impl FnMut(&EngineEvent) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Deliver an event to every observer and queue it.
    ///
    /// When the queue is full the oldest undrained event is discarded.
    pub fn emit(&mut self, event: EngineEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
        if self.capacity == 0 {
            self.dropped += 1;
            return;
        }
        while self.queue.len() >= self.capacity {
            self.queue.pop_front();
            self.dropped += 1;
        }
        self.queue.push_back(event);
    }

    /// Take every queued event, oldest first.
    pub fn drain(&mut self) -> Vec<EngineEvent> {
        self.queue.drain(..).collect()
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Events discarded because nobody drained the queue in time.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .field("queue", &self.queue)
            .field("capacity", &self.capacity)
            .field("dropped", &self.dropped)
            .finish()
    }
}
