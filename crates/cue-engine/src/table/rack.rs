//! Ball set and the starting triangle.

use glam::Vec2;

use crate::api::types::{BallCategory, BallId, Damping};
use crate::core::registry::Ball;

/// Ball radius in table units.
pub const BALL_RADIUS: f32 = 0.15;

/// Felt drag every ball is spawned with.
pub const DEFAULT_DAMPING: Damping = Damping {
    linear: 0.9,
    angular: 0.9,
};

/// Where the cue ball starts (and respawns on a rerack).
pub const CUE_START: Vec2 = Vec2::new(-2.5, 0.0);

/// Front ball of the triangle.
pub const RACK_APEX: Vec2 = Vec2::new(2.5, 0.0);
/// Distance between rows, along the table's long axis.
pub const ROW_SPACING: f32 = 0.312;
/// Distance between balls within a row.
pub const COLUMN_SPACING: f32 = 0.37;

/// Rack order, front to back. The 8-ball sits at the apex and the
/// remaining rows alternate solids and stripes.
pub const RACK_ORDER: [(u32, BallCategory); 15] = [
    (8, BallCategory::Eight),
    (1, BallCategory::Solid),
    (9, BallCategory::Stripe),
    (2, BallCategory::Solid),
    (10, BallCategory::Stripe),
    (3, BallCategory::Solid),
    (11, BallCategory::Stripe),
    (4, BallCategory::Solid),
    (12, BallCategory::Stripe),
    (5, BallCategory::Solid),
    (13, BallCategory::Stripe),
    (6, BallCategory::Solid),
    (14, BallCategory::Stripe),
    (7, BallCategory::Solid),
    (15, BallCategory::Stripe),
];

const ROW_COUNTS: [usize; 5] = [1, 2, 3, 4, 5];

/// Positions for [`RACK_ORDER`], in the same order.
/// Rows grow away from the cue ball (+X), each row centered on the apex's Y.
pub fn rack_positions(apex: Vec2) -> [Vec2; 15] {
    let mut positions = [Vec2::ZERO; 15];
    let mut index = 0;
    for (row, &count) in ROW_COUNTS.iter().enumerate() {
        let start_y = -((count - 1) as f32) * COLUMN_SPACING / 2.0;
        for col in 0..count {
            positions[index] = Vec2::new(
                apex.x + row as f32 * ROW_SPACING,
                apex.y + start_y + col as f32 * COLUMN_SPACING,
            );
            index += 1;
        }
    }
    positions
}

/// Every ball of a fresh game (cue first), with its starting position.
pub fn standard_set() -> Vec<(Ball, Vec2)> {
    let mut set = Vec::with_capacity(16);
    set.push((
        Ball::new(BallId::CUE, BallCategory::Cue, DEFAULT_DAMPING),
        CUE_START,
    ));
    let positions = rack_positions(RACK_APEX);
    for (&(number, category), pos) in RACK_ORDER.iter().zip(positions) {
        set.push((Ball::new(BallId(number), category, DEFAULT_DAMPING), pos));
    }
    set
}
