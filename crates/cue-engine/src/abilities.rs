//! Ability effects.
//!
//! Charges are spent by the caller before [`AbilityEngine::invoke`]; this module
//! only runs effects. Timed effects are small state machines advanced by
//! [`AbilityEngine::tick`] on the same fixed tick as the rules, so their
//! cleanup always runs before or after turn scoring, never during it.

use glam::Vec2;

use crate::api::backend::PhysicsBackend;
use crate::api::sink::PresentationSink;
use crate::api::types::{AbilityKind, BallCategory, BallId, Damping};
use crate::config::AbilityTuning;
use crate::core::motion::MotionOracle;
use crate::core::registry::BallRegistry;
use crate::core::time::Timer;

#[derive(Debug, Clone, PartialEq)]
enum PhantomStage {
    /// Give the shot time to start.
    Latency(Timer),
    /// Wait for the cue ball to stop (or leave the table).
    AwaitRest,
    /// Short grace period before contacts come back.
    Settle(Timer),
}

/// Cue ball ignores a fixed set of balls until it has come to rest.
#[derive(Debug, Clone, PartialEq)]
struct PhantomEffect {
    cue: BallId,
    /// Exactly the pairs this invocation installed.
    ignored: Vec<BallId>,
    stage: PhantomStage,
}

impl PhantomEffect {
    fn advance(
        &mut self,
        dt: f32,
        tuning: &AbilityTuning,
        registry: &BallRegistry,
        oracle: &MotionOracle,
        physics: &impl PhysicsBackend,
    ) -> bool {
        match &mut self.stage {
            PhantomStage::Latency(timer) => {
                if timer.tick(dt) {
                    self.stage = PhantomStage::AwaitRest;
                }
                false
            }
            PhantomStage::AwaitRest => {
                let cue_gone = !registry.is_active(self.cue);
                if cue_gone || oracle.is_at_rest(physics, self.cue) {
                    self.stage = PhantomStage::Settle(Timer::new(tuning.phantom_settle));
                }
                false
            }
            PhantomStage::Settle(timer) => timer.tick(dt),
        }
    }

    fn revert(&self, physics: &mut impl PhysicsBackend) {
        for ball in &self.ignored {
            physics.set_collision_ignored(self.cue, *ball, false);
        }
        log::debug!("phantom released {} balls", self.ignored.len());
    }
}

#[derive(Debug, Clone, PartialEq)]
enum SlickStage {
    Latency(Timer),
    AwaitRest,
}

/// Every ball rolls with reduced drag until the whole table is still.
#[derive(Debug, Clone, PartialEq)]
struct LowFrictionEffect {
    affected: Vec<BallId>,
    stage: SlickStage,
}

impl LowFrictionEffect {
    fn advance(
        &mut self,
        dt: f32,
        registry: &BallRegistry,
        oracle: &MotionOracle,
        physics: &impl PhysicsBackend,
    ) -> bool {
        match &mut self.stage {
            SlickStage::Latency(timer) => {
                if timer.tick(dt) {
                    self.stage = SlickStage::AwaitRest;
                }
                false
            }
            SlickStage::AwaitRest => oracle.all_at_rest(physics, registry),
        }
    }

    /// Each ball gets back its own spawn drag, pocketed or not.
    fn revert(&self, registry: &BallRegistry, physics: &mut impl PhysicsBackend) {
        for id in &self.affected {
            if let Some(ball) = registry.get(*id) {
                physics.set_damping(*id, ball.default_damping);
            }
        }
        log::debug!("low friction restored drag on {} balls", self.affected.len());
    }
}

#[derive(Debug, Clone, PartialEq)]
enum ActiveEffect {
    Phantom(PhantomEffect),
    LowFriction(LowFrictionEffect),
}

/// Runs ability effects and owns their timers.
#[derive(Debug, Clone)]
pub struct AbilityEngine {
    tuning: AbilityTuning,
    active: Vec<ActiveEffect>,
}

impl AbilityEngine {
    pub fn new(tuning: AbilityTuning) -> Self {
        Self {
            tuning,
            active: Vec::new(),
        }
    }

    pub fn tuning(&self) -> &AbilityTuning {
        &self.tuning
    }

    /// Start `kind` on behalf of a player shooting `owner`.
    ///
    /// The caller must already have spent a charge.
    pub fn invoke(
        &mut self,
        kind: AbilityKind,
        owner: BallCategory,
        registry: &BallRegistry,
        physics: &mut impl PhysicsBackend,
        sink: &mut impl PresentationSink,
    ) {
        log::info!("{:?} activated for {}", kind, owner.label());
        match kind {
            AbilityKind::Phantom => {
                self.start_phantom(owner, registry, physics);
                sink.show_banner(&self.tuning.phantom_banner, self.tuning.phantom_banner_secs);
            }
            AbilityKind::LowFriction => {
                self.start_low_friction(registry, physics);
                sink.show_banner(
                    &self.tuning.low_friction_banner,
                    self.tuning.low_friction_banner_secs,
                );
            }
            AbilityKind::Boom => {
                self.boom(registry, physics);
                sink.show_banner(&self.tuning.boom_banner, self.tuning.boom_banner_secs);
            }
        }
    }

    fn start_phantom(
        &mut self,
        owner: BallCategory,
        registry: &BallRegistry,
        physics: &mut impl PhysicsBackend,
    ) {
        // One phantom window at a time: release the old one before installing.
        let mut still_running = Vec::with_capacity(self.active.len());
        for effect in self.active.drain(..) {
            match effect {
                ActiveEffect::Phantom(old) => old.revert(physics),
                other => still_running.push(other),
            }
        }
        self.active = still_running;

        let cue = BallId::CUE;
        let opponent = owner.opponent();
        let ignored: Vec<BallId> = registry
            .all_active()
            .filter(|b| b.category == opponent)
            .filter(|b| !matches!(b.category, BallCategory::Cue | BallCategory::Eight))
            .map(|b| b.id)
            .collect();
        for ball in &ignored {
            physics.set_collision_ignored(cue, *ball, true);
        }
        self.active.push(ActiveEffect::Phantom(PhantomEffect {
            cue,
            ignored,
            stage: PhantomStage::Latency(Timer::new(self.tuning.phantom_latency)),
        }));
    }

    fn start_low_friction(&mut self, registry: &BallRegistry, physics: &mut impl PhysicsBackend) {
        let slick = Damping::uniform(self.tuning.low_friction_damping);
        let affected: Vec<BallId> = registry.all_active().map(|b| b.id).collect();
        for id in &affected {
            physics.set_damping(*id, slick);
        }
        self.active.push(ActiveEffect::LowFriction(LowFrictionEffect {
            affected,
            stage: SlickStage::Latency(Timer::new(self.tuning.low_friction_latency)),
        }));
    }

    /// Radial push out of the cue ball, falling off linearly to zero at the radius.
    fn boom(&self, registry: &BallRegistry, physics: &mut impl PhysicsBackend) {
        let cue = BallId::CUE;
        let origin = match physics.position(cue) {
            Some(pos) if registry.is_active(cue) => pos,
            _ => {
                log::warn!("boom fizzled: cue ball is not on the table");
                return;
            }
        };
        let radius = self.tuning.boom_radius;

        let targets: Vec<(BallId, Vec2)> = registry
            .all_active()
            .filter(|b| b.id != cue)
            .filter_map(|b| physics.position(b.id).map(|pos| (b.id, pos)))
            .collect();

        for (id, pos) in targets {
            let offset = pos - origin;
            let dist = offset.length();
            if dist > radius {
                continue;
            }
            let strength = self.tuning.boom_force * (1.0 - dist / radius);
            physics.apply_impulse(id, offset.normalize_or_zero() * strength);
        }
    }

    /// Advance every in-flight effect by one tick, running cleanup for the ones that finish.
    pub fn tick(
        &mut self,
        dt: f32,
        registry: &BallRegistry,
        oracle: &MotionOracle,
        physics: &mut impl PhysicsBackend,
    ) {
        let tuning = &self.tuning;
        let mut finished = Vec::new();
        self.active.retain_mut(|effect| {
            let done = match effect {
                ActiveEffect::Phantom(p) => p.advance(dt, tuning, registry, oracle, &*physics),
                ActiveEffect::LowFriction(l) => l.advance(dt, registry, oracle, &*physics),
            };
            if done {
                finished.push(effect.clone());
            }
            !done
        });
        for effect in finished {
            Self::revert(&effect, registry, physics);
        }
    }

    /// Undo every in-flight effect immediately.
    pub fn cancel_all(&mut self, registry: &BallRegistry, physics: &mut impl PhysicsBackend) {
        for effect in self.active.drain(..) {
            Self::revert(&effect, registry, physics);
        }
    }

    fn revert(effect: &ActiveEffect, registry: &BallRegistry, physics: &mut impl PhysicsBackend) {
        match effect {
            ActiveEffect::Phantom(p) => p.revert(physics),
            ActiveEffect::LowFriction(l) => l.revert(registry, physics),
        }
    }

    /// Number of effects still waiting on their resume condition.
    pub fn in_flight(&self) -> usize {
        self.active.len()
    }

    pub fn phantom_active(&self) -> bool {
        self.active
            .iter()
            .any(|e| matches!(e, ActiveEffect::Phantom(_)))
    }
}
