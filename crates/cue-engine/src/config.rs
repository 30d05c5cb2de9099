use serde::{Deserialize, Serialize};

/// Tuning for the three abilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityTuning {
    /// Seconds a Phantom waits before it starts watching the cue ball.
    pub phantom_latency: f32,
    /// Seconds a Phantom lingers after the cue ball stopped.
    pub phantom_settle: f32,
    /// Seconds LowFriction waits before it starts watching the table.
    pub low_friction_latency: f32,
    /// Drag applied to every ball while LowFriction is active.
    pub low_friction_damping: f32,
    /// Impulse at the center of a Boom.
    pub boom_force: f32,
    /// Distance at which a Boom no longer pushes.
    pub boom_radius: f32,
    pub phantom_banner: String,
    pub phantom_banner_secs: f32,
    pub low_friction_banner: String,
    pub low_friction_banner_secs: f32,
    pub boom_banner: String,
    pub boom_banner_secs: f32,
}

impl Default for AbilityTuning {
    fn default() -> Self {
        Self {
            phantom_latency: 0.5,
            phantom_settle: 0.2,
            low_friction_latency: 1.0,
            low_friction_damping: 0.05,
            boom_force: 9.0,
            boom_radius: 4.0,
            phantom_banner: "PHANTOM ACTIVE".to_string(),
            phantom_banner_secs: 2.0,
            low_friction_banner: "SLICK SHOT ACTIVE".to_string(),
            low_friction_banner_secs: 2.0,
            boom_banner: "BOOM!".to_string(),
            boom_banner_secs: 1.5,
        }
    }
}

/// Match-wide configuration. Every field has a default, so a partial JSON
/// document only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Fixed simulation timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Linear speed under which a ball counts as at rest.
    pub stop_speed: f32,
    /// How long the table must stay at rest before the shot is scored.
    pub settle_delay: f32,
    /// Half extents of the rectangle where a cue ball may be placed, centered on the origin.
    pub placement_half_width: f32,
    pub placement_half_height: f32,
    /// Impulse applied to the cue ball at full power.
    pub max_shot_impulse: f32,
    /// Ability charges each player starts a game with.
    pub starting_charges: u32,
    /// Rate at which the backdrop eases toward the current player's color.
    pub backdrop_speed: f32,
    /// Backdrop colors for player 1 and player 2 (linear RGB).
    pub player_colors: [[f32; 3]; 2],
    pub abilities: AbilityTuning,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            stop_speed: 0.04,
            settle_delay: 0.35,
            placement_half_width: 4.6,
            placement_half_height: 2.1,
            max_shot_impulse: 12.0,
            starting_charges: 3,
            backdrop_speed: 2.0,
            player_colors: [[0.05, 0.10, 0.25], [0.25, 0.05, 0.05]],
            abilities: AbilityTuning::default(),
        }
    }
}

impl MatchConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Whether `(x, y)` lies inside the cue-ball placement rectangle (edges included).
    pub fn placement_allows(&self, x: f32, y: f32) -> bool {
        x.abs() <= self.placement_half_width && y.abs() <= self.placement_half_height
    }
}
