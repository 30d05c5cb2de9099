use glam::Vec2;

use crate::api::backend::PhysicsEvent;
use crate::api::types::BallId;

/// Everything the rules react to, from players and from the simulation alike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TableEvent {
    /// Cue released. `power` is clamped to `0.0..=1.0`.
    ShotFired { direction: Vec2, power: f32 },
    /// The player to move wants to use their ability.
    AbilityRequested,
    /// Ball in hand: put the cue ball at `pos`.
    PlaceCueBall { pos: Vec2 },
    BallEnteredPocket(BallId),
    CueStruckBall(BallId),
}

impl From<PhysicsEvent> for TableEvent {
    fn from(event: PhysicsEvent) -> Self {
        match event {
            PhysicsEvent::BallEnteredPocket(ball) => TableEvent::BallEnteredPocket(ball),
            PhysicsEvent::CueStruckBall(ball) => TableEvent::CueStruckBall(ball),
        }
    }
}

/// Events waiting for the next tick. Drained once per tick, in arrival order.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<TableEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: TableEvent) {
        self.events.push(event);
    }

    /// Take every pending event, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<TableEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableEvent> {
        self.events.iter()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
