//! Rapier-backed table: cushions with pocket openings, six pocket sensors and the ball set.

use std::collections::{HashMap, HashSet};

use glam::Vec2;

use crate::api::backend::{PhysicsBackend, PhysicsEvent};
use crate::api::types::{BallId, Damping};
use crate::core::physics::{
    BodyDesc, BodyTag, ColliderDesc, ColliderMaterial, CollisionPair, PhysicsBody, PhysicsWorld,
};
use crate::core::registry::Ball;
use crate::table::rack::{standard_set, BALL_RADIUS};

/// Inner cushion faces sit at `x = ±HALF_LENGTH`, `y = ±HALF_WIDTH`.
pub const HALF_LENGTH: f32 = 4.75;
pub const HALF_WIDTH: f32 = 2.25;
pub const CUSHION_THICKNESS: f32 = 0.3;
/// Length of cushion left open at each pocket.
pub const POCKET_GAP: f32 = 0.4;
pub const POCKET_RADIUS: f32 = 0.22;

/// Catches anything that jumps a pocket so it can't leave the world.
const BACKSTOP_MARGIN: f32 = 0.7;

const CUSHION_MATERIAL: ColliderMaterial = ColliderMaterial {
    restitution: 0.95,
    friction: 0.2,
    density: 1.0,
};

/// Unit mass for every ball.
fn ball_material() -> ColliderMaterial {
    ColliderMaterial {
        restitution: 0.95,
        friction: 0.2,
        density: 1.0 / (std::f32::consts::PI * BALL_RADIUS * BALL_RADIUS),
    }
}

/// Centers of the six pocket sensors: four corners then the two side pockets.
pub fn pocket_positions() -> [Vec2; 6] {
    let cx = HALF_LENGTH + 0.1;
    let cy = HALF_WIDTH + 0.1;
    let sy = HALF_WIDTH + 0.15;
    [
        Vec2::new(-cx, -cy),
        Vec2::new(cx, -cy),
        Vec2::new(-cx, cy),
        Vec2::new(cx, cy),
        Vec2::new(0.0, -sy),
        Vec2::new(0.0, sy),
    ]
}

/// The physical table. Implements [`PhysicsBackend`] on top of [`PhysicsWorld`].
pub struct RapierTable {
    world: PhysicsWorld,
    balls: HashMap<BallId, PhysicsBody>,
    /// Starting spot and spawn drag, for reracks.
    spawn: HashMap<BallId, (Vec2, Damping)>,
    /// Balls already reported as pocketed since they were last put in play.
    reported: HashSet<BallId>,
    contacts: Vec<CollisionPair>,
}

impl RapierTable {
    /// A table with the standard sixteen balls racked.
    pub fn new() -> Self {
        Self::with_balls(&standard_set())
    }

    pub fn with_balls(set: &[(Ball, Vec2)]) -> Self {
        let mut table = Self {
            world: PhysicsWorld::new(Vec2::ZERO),
            balls: HashMap::with_capacity(set.len()),
            spawn: HashMap::with_capacity(set.len()),
            reported: HashSet::new(),
            contacts: Vec::with_capacity(64),
        };
        table.build_cushions();
        table.build_pockets();
        for (ball, pos) in set {
            table.spawn_ball(ball, *pos);
        }
        log::info!(
            "table built: {} balls, {} bodies",
            table.balls.len(),
            table.world.body_count()
        );
        table
    }

    fn spawn_ball(&mut self, ball: &Ball, pos: Vec2) {
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: BALL_RADIUS })
            .with_position(pos)
            .with_ccd(true)
            .with_linear_damping(ball.default_damping.linear)
            .with_angular_damping(ball.default_damping.angular);
        let body = self.world.create_body(BodyTag::Ball(ball.id), &desc, ball_material());
        self.balls.insert(ball.id, body);
        self.spawn.insert(ball.id, (pos, ball.default_damping));
    }

    fn cushion(&mut self, center: Vec2, half_width: f32, half_height: f32) {
        if half_width <= 0.0 || half_height <= 0.0 {
            return;
        }
        let desc = BodyDesc::fixed(ColliderDesc::Cuboid { half_width, half_height }).with_position(center);
        self.world.create_body(BodyTag::Cushion, &desc, CUSHION_MATERIAL);
    }

    /// Long rails split at the side pockets; every rail stops short of the corners.
    fn build_cushions(&mut self) {
        let t = CUSHION_THICKNESS;
        let rail_y = HALF_WIDTH + t / 2.0;
        let rail_x = HALF_LENGTH + t / 2.0;

        let seg_len = HALF_LENGTH - POCKET_GAP - POCKET_GAP / 2.0;
        let seg_x = POCKET_GAP / 2.0 + seg_len / 2.0;
        for y in [-rail_y, rail_y] {
            self.cushion(Vec2::new(-seg_x, y), seg_len / 2.0, t / 2.0);
            self.cushion(Vec2::new(seg_x, y), seg_len / 2.0, t / 2.0);
        }

        let side_len = 2.0 * (HALF_WIDTH - POCKET_GAP);
        for x in [-rail_x, rail_x] {
            self.cushion(Vec2::new(x, 0.0), t / 2.0, side_len / 2.0);
        }

        let outer_x = HALF_LENGTH + BACKSTOP_MARGIN;
        let outer_y = HALF_WIDTH + BACKSTOP_MARGIN;
        for y in [-(outer_y + t / 2.0), outer_y + t / 2.0] {
            self.cushion(Vec2::new(0.0, y), outer_x + t, t / 2.0);
        }
        for x in [-(outer_x + t / 2.0), outer_x + t / 2.0] {
            self.cushion(Vec2::new(x, 0.0), t / 2.0, outer_y + t);
        }
    }

    fn build_pockets(&mut self) {
        for (index, pos) in pocket_positions().into_iter().enumerate() {
            let desc = BodyDesc::fixed(ColliderDesc::Ball { radius: POCKET_RADIUS })
                .with_position(pos)
                .with_sensor(true);
            self.world
                .create_body(BodyTag::Pocket(index as u8), &desc, ColliderMaterial::default());
        }
    }

    fn translate(&mut self, pair: CollisionPair, events: &mut Vec<PhysicsEvent>) {
        if !pair.started {
            return;
        }
        if pair.sensor {
            let ball = match (pair.a, pair.b) {
                (BodyTag::Pocket(_), BodyTag::Ball(id)) | (BodyTag::Ball(id), BodyTag::Pocket(_)) => id,
                _ => return,
            };
            if self.reported.insert(ball) {
                events.push(PhysicsEvent::BallEnteredPocket(ball));
            }
            return;
        }
        if let Some(BodyTag::Ball(other)) = pair.other(BodyTag::Ball(BallId::CUE)) {
            events.push(PhysicsEvent::CueStruckBall(other));
        }
    }

    pub fn ball_count(&self) -> usize {
        self.balls.len()
    }

    /// Whether the ball's body currently takes part in the simulation.
    pub fn in_play(&self, ball: BallId) -> bool {
        self.balls
            .get(&ball)
            .map_or(false, |body| self.world.is_enabled(body))
    }
}

impl Default for RapierTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsBackend for RapierTable {
    fn step(&mut self, dt: f32, events: &mut Vec<PhysicsEvent>) {
        self.world.set_dt(dt);
        let mut contacts = std::mem::take(&mut self.contacts);
        contacts.clear();
        self.world.step_into(&mut contacts);
        for pair in contacts.iter().copied() {
            self.translate(pair, events);
        }
        self.contacts = contacts;
    }

    fn linear_speed(&self, ball: BallId) -> Option<f32> {
        self.balls
            .get(&ball)
            .map(|body| self.world.velocity(body).length())
    }

    fn position(&self, ball: BallId) -> Option<Vec2> {
        self.balls.get(&ball).map(|body| self.world.body_position(body))
    }

    fn apply_impulse(&mut self, ball: BallId, impulse: Vec2) {
        if let Some(body) = self.balls.get(&ball) {
            self.world.apply_impulse(body, impulse);
        }
    }

    fn set_collision_ignored(&mut self, a: BallId, b: BallId, ignored: bool) {
        self.world.set_pair_ignored(a, b, ignored);
    }

    fn is_collision_ignored(&self, a: BallId, b: BallId) -> bool {
        self.world.is_pair_ignored(a, b)
    }

    fn damping(&self, ball: BallId) -> Option<Damping> {
        let body = self.balls.get(&ball)?;
        self.world
            .damping(body)
            .map(|(linear, angular)| Damping { linear, angular })
    }

    fn set_damping(&mut self, ball: BallId, damping: Damping) {
        if let Some(body) = self.balls.get(&ball) {
            self.world.set_damping(body, damping.linear, damping.angular);
        }
    }

    fn remove_from_play(&mut self, ball: BallId) {
        if let Some(body) = self.balls.get(&ball) {
            self.world.set_velocity(body, Vec2::ZERO);
            self.world.set_enabled(body, false);
            self.reported.insert(ball);
        }
    }

    fn place(&mut self, ball: BallId, pos: Vec2) {
        if let Some(body) = self.balls.get(&ball) {
            self.world.set_enabled(body, true);
            self.world.teleport(body, pos);
            self.reported.remove(&ball);
        }
    }

    fn rerack(&mut self) {
        for (id, body) in &self.balls {
            if let Some((pos, damping)) = self.spawn.get(id) {
                self.world.set_enabled(body, true);
                self.world.teleport(body, *pos);
                self.world.set_damping(body, damping.linear, damping.angular);
            }
        }
        self.world.clear_ignored_pairs();
        self.reported.clear();
        log::debug!("table reracked");
    }
}
