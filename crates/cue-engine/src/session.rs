use glam::Vec2;

use crate::abilities::AbilityEngine;
use crate::api::backend::{PhysicsBackend, PhysicsEvent};
use crate::api::sink::PresentationSink;
use crate::api::types::{BallId, PlayerId};
use crate::config::MatchConfig;
use crate::core::motion::MotionOracle;
use crate::core::registry::BallRegistry;
use crate::core::time::FixedTimestep;
use crate::input::queue::{EventQueue, TableEvent};
use crate::rules::players::{Character, Roster};
use crate::rules::turn::{GameState, TableContext, TurnEngine};
use crate::table::rack::standard_set;

/// One match at one table. Owns every piece of game state and drives it on a fixed tick.
///
/// Input and physics callbacks only enqueue; everything is applied inside
/// [`Match::tick`], in arrival order, before abilities and rest checks run.
pub struct Match<P: PhysicsBackend, S: PresentationSink> {
    config: MatchConfig,
    registry: BallRegistry,
    roster: Roster,
    turn: TurnEngine,
    abilities: AbilityEngine,
    oracle: MotionOracle,
    queue: EventQueue,
    timestep: FixedTimestep,
    physics: P,
    sink: S,
    /// Aim power shown on the meter, `0.0..=1.0`.
    aim_power: f32,
    physics_events: Vec<PhysicsEvent>,
}

impl<P: PhysicsBackend, S: PresentationSink> Match<P, S> {
    /// Start a match with the standard ball set. `physics` must already hold those balls at their rack spots.
    pub fn new(config: MatchConfig, p1: Character, p2: Character, physics: P, sink: S) -> Self {
        let mut registry = BallRegistry::new();
        for (ball, _) in standard_set() {
            registry.register(ball);
        }

        let mut game = Self {
            roster: Roster::new(p1, p2, config.starting_charges),
            turn: TurnEngine::new(config.clone()),
            abilities: AbilityEngine::new(config.abilities.clone()),
            oracle: MotionOracle::new(config.stop_speed),
            queue: EventQueue::new(),
            timestep: FixedTimestep::new(config.fixed_dt),
            registry,
            physics,
            sink,
            aim_power: 0.0,
            physics_events: Vec::with_capacity(32),
            config,
        };
        log::info!(
            "match started: {} vs {}",
            game.roster.player(PlayerId::One).character.name,
            game.roster.player(PlayerId::Two).character.name
        );
        game.with_context(|turn, ctx| turn.announce_start(ctx));
        game
    }

    fn with_context<R>(
        &mut self,
        f: impl FnOnce(&mut TurnEngine, &mut TableContext<'_, P, S>) -> R,
    ) -> R {
        let mut ctx = TableContext {
            registry: &mut self.registry,
            roster: &mut self.roster,
            abilities: &mut self.abilities,
            oracle: &self.oracle,
            physics: &mut self.physics,
            sink: &mut self.sink,
        };
        f(&mut self.turn, &mut ctx)
    }

    // ---- Inputs (queued, applied on the next tick) ----

    /// Release the cue. `power` is clamped to `0.0..=1.0`.
    pub fn shoot(&mut self, direction: Vec2, power: f32) {
        self.queue.push(TableEvent::ShotFired {
            direction,
            power: power.clamp(0.0, 1.0),
        });
    }

    pub fn request_ability(&mut self) {
        self.queue.push(TableEvent::AbilityRequested);
    }

    pub fn request_cue_placement(&mut self, pos: Vec2) {
        self.queue.push(TableEvent::PlaceCueBall { pos });
    }

    /// Pocket trigger callback for backends that report outside [`PhysicsBackend::step`].
    pub fn on_ball_entered_pocket(&mut self, ball: BallId) {
        self.queue.push(TableEvent::BallEnteredPocket(ball));
    }

    pub fn on_cue_struck_ball(&mut self, target: BallId) {
        self.queue.push(TableEvent::CueStruckBall(target));
    }

    /// Aim power for the meter. Does not affect play until [`Match::shoot`].
    pub fn set_aim_power(&mut self, power: f32) {
        self.aim_power = power.clamp(0.0, 1.0);
    }

    // ---- Loop ----

    /// Feed variable frame time. Runs as many fixed ticks as it covers.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let steps = self.timestep.accumulate(frame_dt);
        for _ in 0..steps {
            self.tick();
        }
        steps
    }

    /// One fixed tick: events, effects, rest check, presentation, then physics.
    pub fn tick(&mut self) {
        let dt = self.timestep.dt();

        for event in self.queue.drain() {
            self.with_context(|turn, ctx| turn.handle(event, ctx));
        }

        self.abilities
            .tick(dt, &self.registry, &self.oracle, &mut self.physics);
        self.with_context(|turn, ctx| turn.poll(dt, ctx));
        self.turn.tick_backdrop(dt);
        self.sink.set_power_meter(self.aim_power);

        self.physics_events.clear();
        self.physics.step(dt, &mut self.physics_events);
        for event in self.physics_events.drain(..) {
            self.queue.push(event.into());
        }
    }

    /// Rerack and reset charges, turn and effects. Characters are kept.
    pub fn new_game(&mut self) {
        self.abilities.cancel_all(&self.registry, &mut self.physics);
        self.queue.clear();
        self.registry.reactivate_all();
        self.physics.rerack();
        self.roster.reset_charges();
        self.turn.reset();
        self.aim_power = 0.0;
        log::info!("new game");
        self.with_context(|turn, ctx| turn.announce_start(ctx));
    }

    /// Swap a player's character. Takes effect on their next ability use.
    pub fn set_character(&mut self, player: PlayerId, character: Character) {
        self.roster.set_character(player, character);
    }

    // ---- Accessors ----

    pub fn state(&self) -> &GameState {
        self.turn.state()
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn registry(&self) -> &BallRegistry {
        &self.registry
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn abilities(&self) -> &AbilityEngine {
        &self.abilities
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut P {
        &mut self.physics
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }
}
