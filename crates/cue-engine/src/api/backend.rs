use glam::Vec2;

use crate::api::types::{BallId, Damping};

/// Something the physics simulation reports back to the rules core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicsEvent {
    /// A ball body entered a pocket trigger.
    BallEnteredPocket(BallId),
    /// The cue ball started touching another ball.
    CueStruckBall(BallId),
}

/// The contract between the rules core and whatever integrates the balls.
///
/// The core never integrates motion itself. It reads speeds, pushes impulses,
/// toggles pairwise collision filtering and swaps drag values, and receives
/// pocket/contact events from [`PhysicsBackend::step`].
pub trait PhysicsBackend {
    /// Advance the simulation by `dt` seconds, appending any events it produced.
    fn step(&mut self, dt: f32, events: &mut Vec<PhysicsEvent>);

    /// Magnitude of the ball's linear velocity. `None` when the body does not exist.
    fn linear_speed(&self, ball: BallId) -> Option<f32>;

    /// Current world position of the ball.
    fn position(&self, ball: BallId) -> Option<Vec2>;

    /// Apply an instantaneous impulse.
    fn apply_impulse(&mut self, ball: BallId, impulse: Vec2);

    /// Make the two balls pass through each other (or stop doing so).
    fn set_collision_ignored(&mut self, a: BallId, b: BallId, ignored: bool);

    /// Whether contacts between the two balls are currently filtered out.
    fn is_collision_ignored(&self, a: BallId, b: BallId) -> bool;

    /// Current drag values of the ball.
    fn damping(&self, ball: BallId) -> Option<Damping>;

    /// Overwrite the drag values of the ball.
    fn set_damping(&mut self, ball: BallId, damping: Damping);

    /// Take a pocketed ball out of the simulation.
    fn remove_from_play(&mut self, ball: BallId);

    /// Put a ball back on the cloth at `pos` with zero linear and angular velocity.
    fn place(&mut self, ball: BallId, pos: Vec2);

    /// Return every ball to its starting spot, at rest and in play.
    fn rerack(&mut self);
}
