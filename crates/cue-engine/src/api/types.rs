use serde::{Deserialize, Serialize};

/// Unique identifier for a ball on the table. Ball 0 is always the cue ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BallId(pub u32);

impl BallId {
    pub const CUE: BallId = BallId(0);

    pub fn is_cue(self) -> bool {
        self == Self::CUE
    }
}

/// Ball group. `Solid` and `Stripe` are player categories; `Cue` and `Eight` belong to nobody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BallCategory {
    Cue,
    Solid,
    Stripe,
    Eight,
}

impl BallCategory {
    /// The other player category. `Cue` and `Eight` have no opposite and map to themselves.
    pub fn opponent(self) -> Self {
        match self {
            BallCategory::Solid => BallCategory::Stripe,
            BallCategory::Stripe => BallCategory::Solid,
            other => other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BallCategory::Cue => "cue",
            BallCategory::Solid => "solids",
            BallCategory::Stripe => "stripes",
            BallCategory::Eight => "8-ball",
        }
    }
}

/// One of the two seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub fn opponent(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// Seat number as shown to players (1 or 2).
    pub fn number(self) -> u8 {
        match self {
            PlayerId::One => 1,
            PlayerId::Two => 2,
        }
    }

    /// Color word used in status lines.
    pub fn color_name(self) -> &'static str {
        match self {
            PlayerId::One => "blue",
            PlayerId::Two => "red",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }
}

/// The three special abilities a character can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityKind {
    /// Cue ball passes through opponent balls for one shot.
    Phantom,
    /// Every ball on the table rolls with almost no drag until the table settles.
    LowFriction,
    /// Radial impulse out of the cue ball's position.
    Boom,
}

/// Linear and angular drag of a ball body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Damping {
    pub linear: f32,
    pub angular: f32,
}

impl Damping {
    pub fn uniform(value: f32) -> Self {
        Self {
            linear: value,
            angular: value,
        }
    }
}
