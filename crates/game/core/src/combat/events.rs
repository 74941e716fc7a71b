//! Domain events and the sink they are published into.

use std::time::Duration;

use strum::{Display, EnumDiscriminants, EnumIter, IntoStaticStr};

use crate::entity::{BulletKind, EnemyId, EnemyKind};
use crate::value::Vector2;

/// Events produced (and, for `SynthesisTriggered`, consumed) by the combat core.
#[derive(Clone, Debug, PartialEq, EnumDiscriminants)]
#[strum_discriminants(name(CombatEventKind), derive(Hash, Display, EnumIter, IntoStaticStr))]
#[strum_discriminants(strum(serialize_all = "snake_case"))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    /// An enemy's health reached zero. Published exactly once per enemy.
    EnemyDeath {
        enemy_id: EnemyId,
        kind: EnemyKind,
        position: Vector2,
    },

    /// The reload delay elapsed; the magazine should be refilled.
    ReloadComplete,

    /// A special-ammo buff started.
    BuffActivated { kind: BulletKind, duration: f32 },

    /// The active buff ran out.
    BuffExpired { kind: BulletKind },

    /// A synthesis recipe completed (consumed by the core).
    SynthesisTriggered { recipe_id: String },
}

impl CombatEvent {
    pub fn kind(&self) -> CombatEventKind {
        CombatEventKind::from(self)
    }
}

/// Destination for combat events.
///
/// `delay` asks the sink to hold the event until at least that much game time
/// has passed. Consumers must tolerate receiving a notification more than once.
pub trait EventSink {
    fn publish(&mut self, event: CombatEvent, delay: Option<Duration>);
}

/// An event together with the delay it was published with.
#[derive(Clone, Debug, PartialEq)]
pub struct PublishedEvent {
    pub event: CombatEvent,
    pub delay: Option<Duration>,
}

/// Sink that simply records everything, in publish order.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    entries: Vec<PublishedEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[PublishedEvent] {
        &self.entries
    }

    pub fn events(&self) -> impl Iterator<Item = &CombatEvent> {
        self.entries.iter().map(|entry| &entry.event)
    }

    pub fn count(&self, kind: CombatEventKind) -> usize {
        self.events().filter(|event| event.kind() == kind).count()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl EventSink for EventLog {
    fn publish(&mut self, event: CombatEvent, delay: Option<Duration>) {
        self.entries.push(PublishedEvent { event, delay });
    }
}
