use std::collections::HashSet;
use std::sync::Mutex;

use glam::Vec2;
use rapier2d::prelude::*;

use crate::api::types::BallId;

// ---------------------------------------------------------------------------
// Conversion helpers: glam to nalgebra and back
// ---------------------------------------------------------------------------

fn vec2_to_na(v: Vec2) -> nalgebra::Vector2<f32> {
    nalgebra::Vector2::new(v.x, v.y)
}

fn na_to_vec2(v: &nalgebra::Vector2<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// What a rigid body stands for on the table. Stored in the body's `user_data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyTag {
    Ball(BallId),
    Pocket(u8),
    Cushion,
}

const TAG_BALL: u128 = 1;
const TAG_POCKET: u128 = 2;
const TAG_CUSHION: u128 = 3;

impl BodyTag {
    fn to_user_data(self) -> u128 {
        match self {
            BodyTag::Ball(id) => (TAG_BALL << 32) | id.0 as u128,
            BodyTag::Pocket(n) => (TAG_POCKET << 32) | n as u128,
            BodyTag::Cushion => TAG_CUSHION << 32,
        }
    }

    fn from_user_data(data: u128) -> Option<Self> {
        let low = (data & 0xFFFF_FFFF) as u32;
        match data >> 32 {
            TAG_BALL => Some(BodyTag::Ball(BallId(low))),
            TAG_POCKET => Some(BodyTag::Pocket(low as u8)),
            TAG_CUSHION => Some(BodyTag::Cushion),
            _ => None,
        }
    }
}

/// The kind of rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Dynamic,
    Fixed,
}

impl BodyType {
    fn to_rapier(self) -> RigidBodyType {
        match self {
            BodyType::Dynamic => RigidBodyType::Dynamic,
            BodyType::Fixed => RigidBodyType::Fixed,
        }
    }
}

/// Shape description for a collider.
#[derive(Debug, Clone, Copy)]
pub enum ColliderDesc {
    Ball { radius: f32 },
    Cuboid { half_width: f32, half_height: f32 },
}

impl ColliderDesc {
    fn build_collider(&self) -> ColliderBuilder {
        match *self {
            ColliderDesc::Ball { radius } => ColliderBuilder::ball(radius),
            ColliderDesc::Cuboid { half_width, half_height } => {
                ColliderBuilder::cuboid(half_width, half_height)
            }
        }
    }
}

/// Physical material properties for a collider.
#[derive(Debug, Clone, Copy)]
pub struct ColliderMaterial {
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
}

impl Default for ColliderMaterial {
    fn default() -> Self {
        Self {
            restitution: 0.3,
            friction: 0.5,
            density: 1.0,
        }
    }
}

/// Builder for describing a rigid body before creation.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub body_type: BodyType,
    pub position: Vec2,
    pub ccd: bool,
    /// Sensors report overlaps and never push back.
    pub sensor: bool,
    pub collider: ColliderDesc,
    pub linear_damping: f32,
    pub angular_damping: f32,
}

impl BodyDesc {
    /// Create a dynamic body description with the given collider shape.
    pub fn dynamic(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Dynamic,
            position: Vec2::ZERO,
            ccd: false,
            sensor: false,
            collider,
            linear_damping: 0.0,
            angular_damping: 0.0,
        }
    }

    /// Create a fixed (static) body description with the given collider shape.
    pub fn fixed(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Fixed,
            position: Vec2::ZERO,
            ccd: false,
            sensor: false,
            collider,
            linear_damping: 0.0,
            angular_damping: 0.0,
        }
    }

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self
    }

    pub fn with_ccd(mut self, enabled: bool) -> Self {
        self.ccd = enabled;
        self
    }

    pub fn with_sensor(mut self, sensor: bool) -> Self {
        self.sensor = sensor;
        self
    }

    /// Set the linear damping (velocity decay). Higher values slow the body faster.
    /// This is what stands in for cloth friction on the table.
    pub fn with_linear_damping(mut self, damping: f32) -> Self {
        self.linear_damping = damping;
        self
    }

    /// Set the angular damping (rotation decay). Higher values slow rotation faster.
    pub fn with_angular_damping(mut self, damping: f32) -> Self {
        self.angular_damping = damping;
        self
    }
}

/// Handle pair referencing Rapier internals.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

/// A collision event between two tagged bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionPair {
    pub a: BodyTag,
    pub b: BodyTag,
    /// `true` when the collision just started, `false` when it ended.
    pub started: bool,
    /// At least one side is a sensor.
    pub sensor: bool,
}

impl CollisionPair {
    /// The other side of the pair, if `tag` is one of its sides.
    pub fn other(&self, tag: BodyTag) -> Option<BodyTag> {
        if self.a == tag {
            Some(self.b)
        } else if self.b == tag {
            Some(self.a)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Event collector (plain Mutex, no channel)
// ---------------------------------------------------------------------------

struct DirectEventCollector {
    collisions: Mutex<Vec<CollisionEvent>>,
}

impl DirectEventCollector {
    fn new() -> Self {
        Self {
            collisions: Mutex::new(Vec::new()),
        }
    }

    fn drain_collisions(&self) -> Vec<CollisionEvent> {
        match self.collisions.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl EventHandler for DirectEventCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        match self.collisions.lock() {
            Ok(mut guard) => guard.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: f32,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: f32,
    ) {
    }
}

// ---------------------------------------------------------------------------
// Contact filter
// ---------------------------------------------------------------------------

fn ordered(a: BallId, b: BallId) -> (BallId, BallId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Ball pairs whose contacts are dropped before the solver sees them.
#[derive(Debug, Default)]
struct ContactFilter {
    ignored: HashSet<(BallId, BallId)>,
}

impl ContactFilter {
    fn ball_of(bodies: &RigidBodySet, handle: Option<RigidBodyHandle>) -> Option<BallId> {
        let body = bodies.get(handle?)?;
        match BodyTag::from_user_data(body.user_data)? {
            BodyTag::Ball(id) => Some(id),
            _ => None,
        }
    }
}

impl PhysicsHooks for ContactFilter {
    fn filter_contact_pair(&self, context: &PairFilterContext) -> Option<SolverFlags> {
        let a = Self::ball_of(context.bodies, context.rigid_body1);
        let b = Self::ball_of(context.bodies, context.rigid_body2);
        if let (Some(a), Some(b)) = (a, b) {
            if self.ignored.contains(&ordered(a, b)) {
                return None;
            }
        }
        Some(SolverFlags::COMPUTE_IMPULSES)
    }
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Wraps all Rapier2D boilerplate into a single struct.
pub struct PhysicsWorld {
    gravity: nalgebra::Vector2<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    pub(crate) bodies: RigidBodySet,
    pub(crate) colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    event_collector: DirectEventCollector,
    contact_filter: ContactFilter,
}

impl PhysicsWorld {
    /// Create a new physics world with the given gravity vector.
    /// A table seen from above uses `Vec2::ZERO`.
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: vec2_to_na(gravity),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            event_collector: DirectEventCollector::new(),
            contact_filter: ContactFilter::default(),
        }
    }

    /// Set the integration timestep.
    pub fn set_dt(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
    }

    /// Create a rigid body + collider and return handles.
    /// The tag is stored in the body's `user_data` for collision lookups.
    pub fn create_body(&mut self, tag: BodyTag, desc: &BodyDesc, material: ColliderMaterial) -> PhysicsBody {
        let rb = RigidBodyBuilder::new(desc.body_type.to_rapier())
            .translation(vec2_to_na(desc.position))
            .ccd_enabled(desc.ccd)
            .linear_damping(desc.linear_damping)
            .angular_damping(desc.angular_damping)
            .user_data(tag.to_user_data())
            .build();

        let body_handle = self.bodies.insert(rb);

        let collider = desc
            .collider
            .build_collider()
            .restitution(material.restitution)
            .friction(material.friction)
            .density(material.density)
            .sensor(desc.sensor)
            .active_hooks(ActiveHooks::FILTER_CONTACT_PAIRS)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();

        let collider_handle = self
            .colliders
            .insert_with_parent(collider, body_handle, &mut self.bodies);

        PhysicsBody {
            body_handle,
            collider_handle,
        }
    }

    /// Step the simulation and collect collision events into the provided Vec.
    pub fn step_into(&mut self, collision_events: &mut Vec<CollisionPair>) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &self.contact_filter,
            &self.event_collector,
        );

        for event in self.event_collector.drain_collisions() {
            let (h1, h2, started) = match event {
                CollisionEvent::Started(h1, h2, _) => (h1, h2, true),
                CollisionEvent::Stopped(h1, h2, _) => (h1, h2, false),
            };

            if let (Some(a), Some(b)) = (self.collider_to_tag(h1), self.collider_to_tag(h2)) {
                collision_events.push(CollisionPair {
                    a,
                    b,
                    started,
                    sensor: event.sensor(),
                });
            }
        }
    }

    /// Apply an instantaneous impulse to a body.
    pub fn apply_impulse(&mut self, body: &PhysicsBody, impulse: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.apply_impulse(vec2_to_na(impulse), true);
        }
    }

    /// Set the linear velocity of a body directly.
    pub fn set_velocity(&mut self, body: &PhysicsBody, vel: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_linvel(vec2_to_na(vel), true);
        }
    }

    /// Get the current linear velocity of a body.
    pub fn velocity(&self, body: &PhysicsBody) -> Vec2 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_to_vec2(rb.linvel()))
            .unwrap_or(Vec2::ZERO)
    }

    /// Get the current position of a body.
    pub fn body_position(&self, body: &PhysicsBody) -> Vec2 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_to_vec2(rb.translation()))
            .unwrap_or(Vec2::ZERO)
    }

    /// Move a body to `pos` and stop it dead.
    pub fn teleport(&mut self, body: &PhysicsBody, pos: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_translation(vec2_to_na(pos), true);
            rb.set_linvel(nalgebra::Vector2::zeros(), true);
            rb.set_angvel(0.0, true);
        }
    }

    /// Disabled bodies keep their state but take no part in the simulation.
    pub fn set_enabled(&mut self, body: &PhysicsBody, enabled: bool) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_enabled(enabled);
        }
    }

    pub fn is_enabled(&self, body: &PhysicsBody) -> bool {
        self.bodies
            .get(body.body_handle)
            .map(|rb| rb.is_enabled())
            .unwrap_or(false)
    }

    /// Linear and angular damping of a body.
    pub fn damping(&self, body: &PhysicsBody) -> Option<(f32, f32)> {
        self.bodies
            .get(body.body_handle)
            .map(|rb| (rb.linear_damping(), rb.angular_damping()))
    }

    pub fn set_damping(&mut self, body: &PhysicsBody, linear: f32, angular: f32) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_linear_damping(linear);
            rb.set_angular_damping(angular);
        }
    }

    /// Drop (or restore) contacts between two balls. Order does not matter.
    pub fn set_pair_ignored(&mut self, a: BallId, b: BallId, ignored: bool) {
        let pair = ordered(a, b);
        if ignored {
            self.contact_filter.ignored.insert(pair);
        } else {
            self.contact_filter.ignored.remove(&pair);
        }
    }

    pub fn is_pair_ignored(&self, a: BallId, b: BallId) -> bool {
        self.contact_filter.ignored.contains(&ordered(a, b))
    }

    pub fn clear_ignored_pairs(&mut self) {
        self.contact_filter.ignored.clear();
    }

    /// Number of rigid bodies in the simulation.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    // -- private helpers --

    fn collider_to_tag(&self, collider_handle: ColliderHandle) -> Option<BodyTag> {
        let collider = self.colliders.get(collider_handle)?;
        let body_handle = collider.parent()?;
        let body = self.bodies.get(body_handle)?;
        BodyTag::from_user_data(body.user_data)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
