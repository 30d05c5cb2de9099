//! The per-shot record and the end-of-shot foul rules.

use crate::api::types::{BallCategory, BallId};
use crate::core::registry::BallRegistry;

/// What happened between the cue impulse and the table settling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShotRecord {
    /// Object balls pocketed this shot. Never holds the cue ball or the 8-ball.
    pub pocketed: Vec<BallId>,
    pub cue_pocketed: bool,
    /// First ball the cue ball touched. First writer wins.
    pub first_hit: Option<BallId>,
}

impl ShotRecord {
    pub fn clear(&mut self) {
        self.pocketed.clear();
        self.cue_pocketed = false;
        self.first_hit = None;
    }

    /// Record a cue-ball contact. Returns `true` if it became the first hit.
    pub fn record_hit(&mut self, target: BallId) -> bool {
        if self.first_hit.is_some() {
            return false;
        }
        self.first_hit = Some(target);
        true
    }

    pub fn struck_any(&self) -> bool {
        self.first_hit.is_some()
    }
}

/// Why a shot was a foul.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Foul {
    /// Cue ball went down.
    Scratch,
    /// The cue ball's first contact was an opponent ball.
    WrongBallFirst,
    /// The cue ball touched nothing.
    NoContact,
}

/// Result of scoring a settled shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotVerdict {
    pub foul: Option<Foul>,
    /// Shooter goes again.
    pub keep_turn: bool,
}

/// Score a settled shot for a shooter assigned to `shooter`.
///
/// Fouls are checked in order (scratch, wrong first contact, no contact).
/// Without a foul the shooter keeps the table only if one of their own balls dropped.
pub fn evaluate_shot(shot: &ShotRecord, shooter: BallCategory, registry: &BallRegistry) -> ShotVerdict {
    let foul = if shot.cue_pocketed {
        Some(Foul::Scratch)
    } else if let Some(first) = shot.first_hit {
        match registry.category_of(first) {
            Some(c) if c != shooter && c != BallCategory::Eight => Some(Foul::WrongBallFirst),
            _ => None,
        }
    } else if registry.active_count() > 1 {
        Some(Foul::NoContact)
    } else {
        None
    };

    let keep_turn = foul.is_none()
        && shot
            .pocketed
            .iter()
            .any(|id| registry.category_of(*id) == Some(shooter));

    ShotVerdict { foul, keep_turn }
}
