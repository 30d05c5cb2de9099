pub mod abilities;
pub mod api;
pub mod config;
pub mod core;
pub mod input;
pub mod rules;
pub mod session;
pub mod table;

#[cfg(test)]
mod testing;

// Re-export key types at crate root for convenience
pub use abilities::AbilityEngine;
pub use api::backend::{PhysicsBackend, PhysicsEvent};
pub use api::sink::{LogSink, PresentationEvent, PresentationSink, RecordingSink};
pub use api::types::{AbilityKind, BallCategory, BallId, Damping, PlayerId};
pub use config::{AbilityTuning, MatchConfig};
pub use core::motion::MotionOracle;
pub use core::registry::{Ball, BallRegistry, BallStatus};
pub use core::time::{FixedTimestep, Timer};
pub use input::queue::{EventQueue, TableEvent};
pub use rules::players::{Character, Player, Roster};
pub use rules::shot::{evaluate_shot, Foul, ShotRecord, ShotVerdict};
pub use rules::turn::{Backdrop, GamePhase, GameState, Outcome, TableContext, TurnEngine};
pub use session::Match;
pub use table::rack::{standard_set, BALL_RADIUS, CUE_START, RACK_APEX};

#[cfg(feature = "physics")]
pub use core::physics::{
    BodyDesc, BodyTag, BodyType, ColliderDesc, ColliderMaterial, CollisionPair, PhysicsBody,
    PhysicsWorld,
};
#[cfg(feature = "physics")]
pub use table::felt::RapierTable;

/// A match on the rapier table.
#[cfg(feature = "physics")]
pub type TableMatch<S> = Match<RapierTable, S>;
