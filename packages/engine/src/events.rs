//! # Lifecycle Events
//!
//! The engine publishes lifecycle events to subscribers. Each subscription
//! owns an unbounded channel, so delivery never blocks the engine and a
//! subscriber drains its queue when it gets a turn. Dropping the
//! [`Subscription`] or calling [`EventBus::unsubscribe`] detaches it.

use crate::{CommandId, PageId};
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

/// Events emitted by an engine session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Canvas finished loading
    Load,
    PageAdded(PageId),
    PageRemoved(PageId),
    PageRenamed(PageId),
    PageSelected(PageId),
    CommandRun(CommandId),
    CommandStop(CommandId),
    /// Generic content change (also covers undo/redo availability)
    Update,
    AssetAdded(String),
    AssetRemoved(String),
}

/// Event discriminant, used for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Load,
    PageAdded,
    PageRemoved,
    PageRenamed,
    PageSelected,
    CommandRun,
    CommandStop,
    Update,
    AssetAdded,
    AssetRemoved,
}

impl EngineEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            EngineEvent::Load => EventKind::Load,
            EngineEvent::PageAdded(_) => EventKind::PageAdded,
            EngineEvent::PageRemoved(_) => EventKind::PageRemoved,
            EngineEvent::PageRenamed(_) => EventKind::PageRenamed,
            EngineEvent::PageSelected(_) => EventKind::PageSelected,
            EngineEvent::CommandRun(_) => EventKind::CommandRun,
            EngineEvent::CommandStop(_) => EventKind::CommandStop,
            EngineEvent::Update => EventKind::Update,
            EngineEvent::AssetAdded(_) => EventKind::AssetAdded,
            EngineEvent::AssetRemoved(_) => EventKind::AssetRemoved,
        }
    }
}

/// Which events a subscription receives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventFilter {
    All,
    Only(Vec<EventKind>),
}

impl EventFilter {
    pub fn only(kinds: &[EventKind]) -> Self {
        EventFilter::Only(kinds.to_vec())
    }

    pub fn accepts(&self, event: &EngineEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Only(kinds) => kinds.contains(&event.kind()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Receiving end of a subscription
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    receiver: UnboundedReceiver<EngineEvent>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Next queued event, if any
    pub fn try_next(&mut self) -> Option<EngineEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Take every queued event in delivery order
    pub fn drain(&mut self) -> Vec<EngineEvent> {
        std::iter::from_fn(|| self.try_next()).collect()
    }
}

#[derive(Debug)]
struct Listener {
    id: SubscriptionId,
    filter: EventFilter,
    sender: UnboundedSender<EngineEvent>,
}

/// Fan-out of engine events to subscribers
#[derive(Debug, Default)]
pub struct EventBus {
    next_id: u64,
    listeners: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, filter: EventFilter) -> Subscription {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        let (sender, receiver) = mpsc::unbounded_channel();
        self.listeners.push(Listener { id, filter, sender });

        Subscription { id, receiver }
    }

    /// Returns false when the id was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: EngineEvent) {
        tracing::trace!(?event, "Emitting engine event");
        // Listeners whose receiver was dropped are pruned here
        self.listeners.retain(|listener| {
            if !listener.filter.accepts(&event) {
                return !listener.sender.is_closed();
            }
            listener.sender.send(event.clone()).is_ok()
        });
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
