//! Scripted physics double used by the unit tests.

use std::collections::{HashMap, HashSet};

use glam::Vec2;

use crate::api::backend::{PhysicsBackend, PhysicsEvent};
use crate::api::types::{BallId, Damping};
use crate::core::registry::BallRegistry;
use crate::table::rack::standard_set;

fn pair(a: BallId, b: BallId) -> (BallId, BallId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// A physics backend whose speeds and events are set by the test.
#[derive(Debug, Default)]
pub struct ScriptedTable {
    pub speeds: HashMap<BallId, f32>,
    pub positions: HashMap<BallId, Vec2>,
    pub damping: HashMap<BallId, Damping>,
    pub ignored: HashSet<(BallId, BallId)>,
    /// Every impulse applied, in order.
    pub impulses: Vec<(BallId, Vec2)>,
    pub removed: HashSet<BallId>,
    /// Number of `set_collision_ignored` calls, whatever the flag.
    pub ignore_calls: usize,
    /// Number of `set_damping` calls.
    pub damping_calls: usize,
    pub reracks: usize,
    pending: Vec<PhysicsEvent>,
    start: HashMap<BallId, Vec2>,
}

impl ScriptedTable {
    /// All sixteen balls at their rack spots, at rest.
    pub fn racked() -> Self {
        let mut table = Self::default();
        for (ball, pos) in standard_set() {
            table.speeds.insert(ball.id, 0.0);
            table.positions.insert(ball.id, pos);
            table.start.insert(ball.id, pos);
            table.damping.insert(ball.id, ball.default_damping);
        }
        table
    }

    pub fn set_speed(&mut self, ball: BallId, speed: f32) {
        self.speeds.insert(ball, speed);
    }

    pub fn set_position(&mut self, ball: BallId, pos: Vec2) {
        self.positions.insert(ball, pos);
    }

    pub fn set_all_speeds(&mut self, speed: f32) {
        for s in self.speeds.values_mut() {
            *s = speed;
        }
    }

    /// Deliver `event` on the next `step`.
    pub fn queue_event(&mut self, event: PhysicsEvent) {
        self.pending.push(event);
    }
}

impl PhysicsBackend for ScriptedTable {
    fn step(&mut self, _dt: f32, events: &mut Vec<PhysicsEvent>) {
        events.append(&mut self.pending);
    }

    fn linear_speed(&self, ball: BallId) -> Option<f32> {
        self.speeds.get(&ball).copied()
    }

    fn position(&self, ball: BallId) -> Option<Vec2> {
        self.positions.get(&ball).copied()
    }

    fn apply_impulse(&mut self, ball: BallId, impulse: Vec2) {
        self.impulses.push((ball, impulse));
    }

    fn set_collision_ignored(&mut self, a: BallId, b: BallId, ignored: bool) {
        self.ignore_calls += 1;
        if ignored {
            self.ignored.insert(pair(a, b));
        } else {
            self.ignored.remove(&pair(a, b));
        }
    }

    fn is_collision_ignored(&self, a: BallId, b: BallId) -> bool {
        self.ignored.contains(&pair(a, b))
    }

    fn damping(&self, ball: BallId) -> Option<Damping> {
        self.damping.get(&ball).copied()
    }

    fn set_damping(&mut self, ball: BallId, damping: Damping) {
        self.damping_calls += 1;
        self.damping.insert(ball, damping);
    }

    fn remove_from_play(&mut self, ball: BallId) {
        self.removed.insert(ball);
        self.speeds.insert(ball, 0.0);
    }

    fn place(&mut self, ball: BallId, pos: Vec2) {
        self.removed.remove(&ball);
        self.speeds.insert(ball, 0.0);
        self.positions.insert(ball, pos);
    }

    fn rerack(&mut self) {
        self.reracks += 1;
        self.removed.clear();
        self.pending.clear();
        for (id, pos) in &self.start {
            self.positions.insert(*id, *pos);
            self.speeds.insert(*id, 0.0);
        }
    }
}

/// Registry holding the standard sixteen-ball set, all active.
pub fn standard_registry() -> BallRegistry {
    let mut registry = BallRegistry::new();
    for (ball, _) in standard_set() {
        registry.register(ball);
    }
    registry
}
