use crate::api::backend::PhysicsBackend;
use crate::api::types::BallId;
use crate::core::registry::BallRegistry;

/// Answers "has this ball stopped" by polling the physics backend.
///
/// Rest is a level, not an edge: callers poll every tick because balls
/// settle at different times and can be set moving again.
#[derive(Debug, Clone, Copy)]
pub struct MotionOracle {
    stop_speed: f32,
}

impl MotionOracle {
    pub fn new(stop_speed: f32) -> Self {
        Self { stop_speed }
    }

    pub fn stop_speed(&self) -> f32 {
        self.stop_speed
    }

    /// A ball without a body reads as at rest.
    pub fn is_at_rest(&self, physics: &impl PhysicsBackend, ball: BallId) -> bool {
        physics
            .linear_speed(ball)
            .map_or(true, |speed| speed < self.stop_speed)
    }

    /// Whether every active ball is at rest. Pocketed balls never block.
    pub fn all_at_rest(&self, physics: &impl PhysicsBackend, registry: &BallRegistry) -> bool {
        registry
            .all_active()
            .all(|ball| self.is_at_rest(physics, ball.id))
    }
}
