//! Shot lifecycle, fouls, turn passing and the 8-ball.

use glam::{Vec2, Vec3};

use crate::abilities::AbilityEngine;
use crate::api::backend::PhysicsBackend;
use crate::api::sink::PresentationSink;
use crate::api::types::{BallCategory, BallId, PlayerId};
use crate::config::MatchConfig;
use crate::core::motion::MotionOracle;
use crate::core::registry::BallRegistry;
use crate::core::time::Timer;
use crate::input::queue::TableEvent;
use crate::rules::players::Roster;
use crate::rules::shot::{evaluate_shot, Foul, ShotRecord};

/// Where the match is in the shot cycle. Exactly one phase is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    WaitingToShoot,
    BallsMoving,
    PlacingCueBall,
    GameOver,
}

/// How the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub winner: PlayerId,
    /// Who pocketed the 8-ball.
    pub shooter: PlayerId,
    /// `false` when the 8-ball went down before the shooter's group was cleared.
    pub cleared_first: bool,
}

/// Background tint that follows the player to move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backdrop {
    pub current: Vec3,
    pub target: Vec3,
}

impl Backdrop {
    fn new(color: Vec3) -> Self {
        Self {
            current: color,
            target: color,
        }
    }

    /// Ease `current` toward `target`.
    pub fn tick(&mut self, dt: f32, speed: f32) {
        self.current = self.current.lerp(self.target, (dt * speed).clamp(0.0, 1.0));
    }
}

/// Observable match state.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub current: PlayerId,
    pub phase: GamePhase,
    pub outcome: Option<Outcome>,
    pub backdrop: Backdrop,
}

impl GameState {
    pub fn can_shoot(&self) -> bool {
        self.phase == GamePhase::WaitingToShoot
    }
}

/// Mutable access to everything the turn engine coordinates.
pub struct TableContext<'a, P, S> {
    pub registry: &'a mut BallRegistry,
    pub roster: &'a mut Roster,
    pub abilities: &'a mut AbilityEngine,
    pub oracle: &'a MotionOracle,
    pub physics: &'a mut P,
    pub sink: &'a mut S,
}

/// The shot/turn state machine.
#[derive(Debug, Clone)]
pub struct TurnEngine {
    config: MatchConfig,
    state: GameState,
    shot: ShotRecord,
    /// Running while every active ball reads at rest; dropped as soon as one moves.
    settle: Option<Timer>,
    ability_used: bool,
}

impl TurnEngine {
    pub fn new(config: MatchConfig) -> Self {
        let backdrop = Backdrop::new(Vec3::from_array(config.player_colors[0]));
        Self {
            config,
            state: GameState {
                current: PlayerId::One,
                phase: GamePhase::WaitingToShoot,
                outcome: None,
                backdrop,
            },
            shot: ShotRecord::default(),
            settle: None,
            ability_used: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn current_player(&self) -> PlayerId {
        self.state.current
    }

    pub fn shot(&self) -> &ShotRecord {
        &self.shot
    }

    pub fn tick_backdrop(&mut self, dt: f32) {
        self.state.backdrop.tick(dt, self.config.backdrop_speed);
    }

    /// Opening announcements for a fresh game.
    pub fn announce_start<P, S>(&self, ctx: &mut TableContext<'_, P, S>)
    where
        P: PhysicsBackend,
        S: PresentationSink,
    {
        Self::refresh_indicator(self.state.current, ctx);
        ctx.sink.refresh_charges(
            ctx.roster.charges(PlayerId::One),
            ctx.roster.charges(PlayerId::Two),
        );
        ctx.sink.set_status(&your_turn(self.state.current));
    }

    /// Back to the opening state. Balls, charges and abilities are the caller's business.
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }

    /// Route one queued event.
    pub fn handle<P, S>(&mut self, event: TableEvent, ctx: &mut TableContext<'_, P, S>)
    where
        P: PhysicsBackend,
        S: PresentationSink,
    {
        match event {
            TableEvent::ShotFired { direction, power } => {
                self.fire_shot(direction, power, ctx);
            }
            TableEvent::AbilityRequested => {
                self.request_ability(ctx);
            }
            TableEvent::PlaceCueBall { pos } => {
                self.place_cue_ball(pos, ctx);
            }
            TableEvent::BallEnteredPocket(ball) => self.ball_pocketed(ball, ctx),
            TableEvent::CueStruckBall(target) => self.cue_struck(target),
        }
    }

    /// Strike the cue ball. Only legal while waiting to shoot.
    pub fn fire_shot<P, S>(&mut self, direction: Vec2, power: f32, ctx: &mut TableContext<'_, P, S>) -> bool
    where
        P: PhysicsBackend,
        S: PresentationSink,
    {
        if self.state.phase != GamePhase::WaitingToShoot {
            log::debug!("shot ignored in {:?}", self.state.phase);
            return false;
        }
        if !ctx.registry.is_active(BallId::CUE) {
            log::warn!("shot ignored: cue ball is not on the table");
            return false;
        }

        self.shot.clear();
        self.settle = None;
        self.ability_used = false;
        self.state.phase = GamePhase::BallsMoving;

        let impulse = direction.normalize_or_zero() * power.clamp(0.0, 1.0) * self.config.max_shot_impulse;
        ctx.physics.apply_impulse(BallId::CUE, impulse);
        log::debug!("player {} shoots, impulse {:?}", self.state.current.number(), impulse);
        true
    }

    /// First contact of the cue ball this shot. Later contacts are ignored.
    pub fn cue_struck(&mut self, target: BallId) {
        if self.state.phase != GamePhase::BallsMoving || target.is_cue() {
            return;
        }
        if self.shot.record_hit(target) {
            log::debug!("first contact: ball {}", target.0);
        }
    }

    /// A ball dropped. Stale and duplicate reports are no-ops.
    pub fn ball_pocketed<P, S>(&mut self, ball: BallId, ctx: &mut TableContext<'_, P, S>)
    where
        P: PhysicsBackend,
        S: PresentationSink,
    {
        if self.state.phase == GamePhase::GameOver {
            return;
        }
        if !ctx.registry.deactivate(ball) {
            log::debug!("pocket report for inactive ball {} ignored", ball.0);
            return;
        }
        ctx.physics.remove_from_play(ball);
        let moving = self.state.phase == GamePhase::BallsMoving;

        match ctx.registry.category_of(ball) {
            Some(BallCategory::Cue) => {
                if moving {
                    self.shot.cue_pocketed = true;
                } else {
                    self.scratch_between_shots(ctx);
                }
            }
            Some(BallCategory::Eight) => self.eight_ball_down(ctx),
            _ => {
                if moving {
                    self.shot.pocketed.push(ball);
                }
                log::info!("ball {} pocketed", ball.0);
            }
        }
    }

    /// Cue ball knocked in while nobody was shooting (e.g. by a Boom): scratch on the player to move.
    fn scratch_between_shots<P, S>(&mut self, ctx: &mut TableContext<'_, P, S>)
    where
        P: PhysicsBackend,
        S: PresentationSink,
    {
        self.settle = None;
        self.switch_player();
        self.state.phase = GamePhase::PlacingCueBall;
        log::info!("scratch between shots; player {} has ball in hand", self.state.current.number());
        ctx.sink.set_status(&format!(
            "Scratch! Player {} places the cue ball.",
            self.state.current.number()
        ));
        Self::refresh_indicator(self.state.current, ctx);
        Self::hint_if_cleared(self.state.current, ctx);
        ctx.sink.set_status(&placement_prompt(self.state.current));
    }

    /// The shooter wins only if their group was already gone.
    fn eight_ball_down<P, S>(&mut self, ctx: &mut TableContext<'_, P, S>)
    where
        P: PhysicsBackend,
        S: PresentationSink,
    {
        let shooter = self.state.current;
        let cleared_first = ctx.registry.remaining(ctx.roster.category(shooter)) == 0;
        let winner = if cleared_first { shooter } else { shooter.opponent() };
        let text = if cleared_first {
            format!("Player {} wins!", shooter.number())
        } else {
            format!(
                "Player {} pots the 8-ball early. Player {} wins!",
                shooter.number(),
                winner.number()
            )
        };

        self.settle = None;
        self.state.phase = GamePhase::GameOver;
        self.state.outcome = Some(Outcome {
            winner,
            shooter,
            cleared_first,
        });
        log::info!("{}", text);
        ctx.sink.show_game_over(&text);
    }

    /// Watch for the table to settle. Called once per tick.
    ///
    /// Scoring waits until every active ball has read at rest for
    /// `settle_delay` seconds without interruption.
    pub fn poll<P, S>(&mut self, dt: f32, ctx: &mut TableContext<'_, P, S>)
    where
        P: PhysicsBackend,
        S: PresentationSink,
    {
        if self.state.phase != GamePhase::BallsMoving {
            self.settle = None;
            return;
        }
        if !ctx.oracle.all_at_rest(&*ctx.physics, ctx.registry) {
            self.settle = None;
            return;
        }
        let delay = self.config.settle_delay;
        let timer = self.settle.get_or_insert_with(|| Timer::new(delay));
        if timer.tick(dt) {
            self.settle = None;
            self.end_shot(ctx);
        }
    }

    fn end_shot<P, S>(&mut self, ctx: &mut TableContext<'_, P, S>)
    where
        P: PhysicsBackend,
        S: PresentationSink,
    {
        let shooter = self.state.current;
        let verdict = evaluate_shot(&self.shot, ctx.roster.category(shooter), ctx.registry);
        let opponent = shooter.opponent();

        match verdict.foul {
            Some(Foul::Scratch) => ctx.sink.set_status(&format!(
                "Scratch! Player {} places the cue ball.",
                opponent.number()
            )),
            Some(Foul::WrongBallFirst) => ctx.sink.set_status(&format!(
                "Foul: wrong ball hit! Player {}'s turn.",
                opponent.number()
            )),
            Some(Foul::NoContact) => ctx.sink.set_status(&format!(
                "Foul: no ball hit! Player {}'s turn.",
                opponent.number()
            )),
            None => {}
        }

        if !verdict.keep_turn {
            self.switch_player();
        }
        self.state.phase = if self.shot.cue_pocketed {
            GamePhase::PlacingCueBall
        } else {
            GamePhase::WaitingToShoot
        };

        let current = self.state.current;
        log::info!(
            "shot by player {} scored: foul {:?}, pocketed {}, player {} to move",
            shooter.number(),
            verdict.foul,
            self.shot.pocketed.len(),
            current.number()
        );

        if verdict.foul.is_none() {
            let text = if verdict.keep_turn {
                format!("Player {} pots one. Shoot again! [Q] ability", current.number())
            } else {
                your_turn(current)
            };
            ctx.sink.set_status(&text);
        }

        Self::refresh_indicator(current, ctx);
        Self::hint_if_cleared(current, ctx);
        if self.state.phase == GamePhase::PlacingCueBall {
            ctx.sink.set_status(&placement_prompt(current));
        }
    }

    /// Ball in hand. Positions outside the placement rectangle are dropped without a state change.
    pub fn place_cue_ball<P, S>(&mut self, pos: Vec2, ctx: &mut TableContext<'_, P, S>) -> bool
    where
        P: PhysicsBackend,
        S: PresentationSink,
    {
        if self.state.phase != GamePhase::PlacingCueBall {
            log::debug!("placement ignored in {:?}", self.state.phase);
            return false;
        }
        if !self.config.placement_allows(pos.x, pos.y) {
            log::debug!("placement at {:?} is off the cloth", pos);
            return false;
        }

        ctx.physics.place(BallId::CUE, pos);
        ctx.registry.reactivate(BallId::CUE);
        self.state.phase = GamePhase::WaitingToShoot;
        ctx.sink.set_status(&your_turn(self.state.current));
        true
    }

    /// Spend a charge and fire the current player's ability.
    pub fn request_ability<P, S>(&mut self, ctx: &mut TableContext<'_, P, S>) -> bool
    where
        P: PhysicsBackend,
        S: PresentationSink,
    {
        if self.state.phase != GamePhase::WaitingToShoot {
            log::debug!("ability request ignored in {:?}", self.state.phase);
            return false;
        }
        let current = self.state.current;
        if self.ability_used {
            ctx.sink.set_status("One ability per shot!");
            return false;
        }
        if !ctx.roster.use_charge(current) {
            ctx.sink.set_status("No ability charges remaining!");
            return false;
        }

        self.ability_used = true;
        let player = ctx.roster.player(current);
        let (kind, category) = (player.character.ability, player.category);
        ctx.abilities.invoke(kind, category, ctx.registry, ctx.physics, ctx.sink);
        ctx.sink.refresh_charges(
            ctx.roster.charges(PlayerId::One),
            ctx.roster.charges(PlayerId::Two),
        );
        true
    }

    /// Hand the table over. The ability gate belongs to the player to move.
    fn switch_player(&mut self) {
        self.state.current = self.state.current.opponent();
        self.ability_used = false;
        let color = self.config.player_colors[self.state.current.index()];
        self.state.backdrop.target = Vec3::from_array(color);
    }

    /// Point the player to move at the 8-ball once their group is gone.
    fn hint_if_cleared<P, S>(current: PlayerId, ctx: &mut TableContext<'_, P, S>)
    where
        S: PresentationSink,
    {
        if ctx.registry.remaining(ctx.roster.category(current)) == 0 {
            ctx.sink.set_status(&format!(
                "Player {}: pot the 8-ball to win! [Q] ability",
                current.number()
            ));
        }
    }

    fn refresh_indicator<P, S>(current: PlayerId, ctx: &mut TableContext<'_, P, S>)
    where
        S: PresentationSink,
    {
        ctx.sink.refresh_turn_indicator(
            current,
            ctx.roster.category(PlayerId::One),
            ctx.roster.category(PlayerId::Two),
        );
    }
}

fn your_turn(player: PlayerId) -> String {
    format!(
        "Player {} ({}): your turn. [Q] ability",
        player.number(),
        player.color_name()
    )
}

fn placement_prompt(player: PlayerId) -> String {
    format!("Player {}: click to place the cue ball.", player.number())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::sink::{PresentationEvent, RecordingSink};
    use crate::api::types::AbilityKind;
    use crate::rules::players::Character;
    use crate::testing::{standard_registry, ScriptedTable};

    const DT: f32 = 1.0 / 60.0;

    struct Parts {
        registry: BallRegistry,
        roster: Roster,
        abilities: AbilityEngine,
        oracle: MotionOracle,
        physics: ScriptedTable,
        sink: RecordingSink,
    }

    impl Parts {
        fn new(p1: Character) -> Self {
            let config = MatchConfig::default();
            Self {
                registry: standard_registry(),
                roster: Roster::new(p1, Character::skater(), config.starting_charges),
                abilities: AbilityEngine::new(config.abilities.clone()),
                oracle: MotionOracle::new(config.stop_speed),
                physics: ScriptedTable::racked(),
                sink: RecordingSink::new(),
            }
        }

        fn ctx(&mut self) -> TableContext<'_, ScriptedTable, RecordingSink> {
            TableContext {
                registry: &mut self.registry,
                roster: &mut self.roster,
                abilities: &mut self.abilities,
                oracle: &self.oracle,
                physics: &mut self.physics,
                sink: &mut self.sink,
            }
        }
    }

    fn setup() -> (TurnEngine, Parts) {
        (TurnEngine::new(MatchConfig::default()), Parts::new(Character::wraith()))
    }

    /// Poll at rest until the settle window closes.
    fn settle(turn: &mut TurnEngine, parts: &mut Parts) {
        parts.physics.set_all_speeds(0.0);
        for _ in 0..30 {
            turn.poll(DT, &mut parts.ctx());
        }
    }

    fn shoot(turn: &mut TurnEngine, parts: &mut Parts) {
        assert!(turn.fire_shot(Vec2::X, 1.0, &mut parts.ctx()));
        parts.physics.set_speed(BallId::CUE, 4.0);
    }

    #[test]
    fn shot_applies_scaled_impulse_and_starts_motion() {
        let (mut turn, mut parts) = setup();
        assert!(turn.state().can_shoot());
        turn.fire_shot(Vec2::new(0.0, 2.0), 0.5, &mut parts.ctx());
        assert_eq!(turn.phase(), GamePhase::BallsMoving);
        assert!(!turn.state().can_shoot());
        assert_eq!(parts.physics.impulses, vec![(BallId::CUE, Vec2::new(0.0, 6.0))]);
    }

    #[test]
    fn shot_while_moving_is_ignored() {
        let (mut turn, mut parts) = setup();
        shoot(&mut turn, &mut parts);
        assert!(!turn.fire_shot(Vec2::X, 1.0, &mut parts.ctx()));
        assert_eq!(parts.physics.impulses.len(), 1);
    }

    #[test]
    fn wrong_ball_first_passes_turn() {
        let (mut turn, mut parts) = setup();
        shoot(&mut turn, &mut parts);
        turn.cue_struck(BallId(9));
        turn.cue_struck(BallId(1));
        settle(&mut turn, &mut parts);

        assert_eq!(turn.phase(), GamePhase::WaitingToShoot);
        assert_eq!(turn.current_player(), PlayerId::Two);
        assert!(parts.sink.events.iter().any(|e| matches!(
            e,
            crate::api::sink::PresentationEvent::Status(s) if s.contains("wrong ball")
        )));
    }

    #[test]
    fn own_pots_keep_the_table() {
        let (mut turn, mut parts) = setup();
        shoot(&mut turn, &mut parts);
        turn.cue_struck(BallId(1));
        turn.ball_pocketed(BallId(1), &mut parts.ctx());
        turn.ball_pocketed(BallId(2), &mut parts.ctx());
        settle(&mut turn, &mut parts);

        assert_eq!(turn.phase(), GamePhase::WaitingToShoot);
        assert_eq!(turn.current_player(), PlayerId::One);
        assert_eq!(parts.sink.last_status(), Some("Player 1 pots one. Shoot again! [Q] ability"));
    }

    #[test]
    fn opponent_pot_alone_ends_the_turn() {
        let (mut turn, mut parts) = setup();
        shoot(&mut turn, &mut parts);
        turn.cue_struck(BallId(1));
        turn.ball_pocketed(BallId(10), &mut parts.ctx());
        settle(&mut turn, &mut parts);
        assert_eq!(turn.current_player(), PlayerId::Two);
        assert!(!parts.registry.is_active(BallId(10)));
    }

    #[test]
    fn scratch_hands_ball_in_hand_to_opponent() {
        let (mut turn, mut parts) = setup();
        shoot(&mut turn, &mut parts);
        turn.cue_struck(BallId(2));
        turn.ball_pocketed(BallId(2), &mut parts.ctx());
        turn.ball_pocketed(BallId::CUE, &mut parts.ctx());
        settle(&mut turn, &mut parts);

        assert_eq!(turn.phase(), GamePhase::PlacingCueBall);
        assert_eq!(turn.current_player(), PlayerId::Two);
        assert!(parts.physics.removed.contains(&BallId::CUE));
        assert!(!parts.registry.is_active(BallId::CUE));
        // The cue ball never counts as an object ball.
        assert_eq!(turn.shot().pocketed, vec![BallId(2)]);
    }

    #[test]
    fn placement_respects_bounds_and_resets_the_cue() {
        let (mut turn, mut parts) = setup();
        shoot(&mut turn, &mut parts);
        turn.cue_struck(BallId(3));
        turn.ball_pocketed(BallId::CUE, &mut parts.ctx());
        settle(&mut turn, &mut parts);

        assert!(!turn.place_cue_ball(Vec2::new(5.0, 0.0), &mut parts.ctx()));
        assert_eq!(turn.phase(), GamePhase::PlacingCueBall);
        assert!(!parts.registry.is_active(BallId::CUE));

        assert!(turn.place_cue_ball(Vec2::new(-1.0, 0.5), &mut parts.ctx()));
        assert_eq!(turn.phase(), GamePhase::WaitingToShoot);
        assert!(parts.registry.is_active(BallId::CUE));
        assert_eq!(parts.physics.position(BallId::CUE), Some(Vec2::new(-1.0, 0.5)));
        assert_eq!(parts.physics.linear_speed(BallId::CUE), Some(0.0));
    }

    #[test]
    fn placement_outside_ball_in_hand_is_a_no_op() {
        let (mut turn, mut parts) = setup();
        assert!(!turn.place_cue_ball(Vec2::ZERO, &mut parts.ctx()));
        assert_eq!(turn.phase(), GamePhase::WaitingToShoot);
    }

    #[test]
    fn early_eight_loses() {
        let (mut turn, mut parts) = setup();
        shoot(&mut turn, &mut parts);
        turn.cue_struck(BallId(8));
        turn.ball_pocketed(BallId(8), &mut parts.ctx());

        assert_eq!(turn.phase(), GamePhase::GameOver);
        let outcome = turn.state().outcome.unwrap();
        assert_eq!(outcome.winner, PlayerId::Two);
        assert!(!outcome.cleared_first);
        assert_eq!(
            parts.sink.game_over_text(),
            Some("Player 1 pots the 8-ball early. Player 2 wins!")
        );
    }

    #[test]
    fn eight_after_clearing_group_wins() {
        let (mut turn, mut parts) = setup();
        for n in 1..=7 {
            parts.registry.deactivate(BallId(n));
        }
        shoot(&mut turn, &mut parts);
        turn.cue_struck(BallId(8));
        turn.ball_pocketed(BallId(8), &mut parts.ctx());

        let outcome = turn.state().outcome.unwrap();
        assert_eq!(outcome.winner, PlayerId::One);
        assert!(outcome.cleared_first);
        assert_eq!(parts.sink.game_over_text(), Some("Player 1 wins!"));
    }

    #[test]
    fn game_over_ignores_everything() {
        let (mut turn, mut parts) = setup();
        shoot(&mut turn, &mut parts);
        turn.ball_pocketed(BallId(8), &mut parts.ctx());
        assert!(!turn.fire_shot(Vec2::X, 1.0, &mut parts.ctx()));
        turn.ball_pocketed(BallId(3), &mut parts.ctx());
        assert!(parts.registry.is_active(BallId(3)));
        settle(&mut turn, &mut parts);
        assert_eq!(turn.phase(), GamePhase::GameOver);
    }

    #[test]
    fn duplicate_pocket_reports_are_ignored() {
        let (mut turn, mut parts) = setup();
        shoot(&mut turn, &mut parts);
        turn.cue_struck(BallId(4));
        turn.ball_pocketed(BallId(4), &mut parts.ctx());
        turn.ball_pocketed(BallId(4), &mut parts.ctx());
        assert_eq!(turn.shot().pocketed, vec![BallId(4)]);
    }

    #[test]
    fn settle_waits_for_a_stable_rest() {
        let (mut turn, mut parts) = setup();
        shoot(&mut turn, &mut parts);
        turn.cue_struck(BallId(1));
        parts.physics.set_speed(BallId::CUE, 0.0);

        // Rest for a moment, then a ball gets moving again.
        for _ in 0..15 {
            turn.poll(DT, &mut parts.ctx());
        }
        parts.physics.set_speed(BallId(1), 1.0);
        turn.poll(DT, &mut parts.ctx());
        parts.physics.set_speed(BallId(1), 0.0);
        for _ in 0..15 {
            turn.poll(DT, &mut parts.ctx());
        }
        assert_eq!(turn.phase(), GamePhase::BallsMoving, "debounce restarted");

        for _ in 0..10 {
            turn.poll(DT, &mut parts.ctx());
        }
        assert_eq!(turn.phase(), GamePhase::WaitingToShoot);
    }

    #[test]
    fn no_contact_foul_passes_turn() {
        let (mut turn, mut parts) = setup();
        shoot(&mut turn, &mut parts);
        settle(&mut turn, &mut parts);
        assert_eq!(turn.current_player(), PlayerId::Two);
        assert_eq!(parts.sink.last_status(), Some("Foul: no ball hit! Player 2's turn."));
    }

    #[test]
    fn hint_fires_when_group_is_cleared() {
        let (mut turn, mut parts) = setup();
        for n in 9..=15 {
            parts.registry.deactivate(BallId(n));
        }
        shoot(&mut turn, &mut parts);
        turn.cue_struck(BallId(1));
        settle(&mut turn, &mut parts);
        assert_eq!(turn.current_player(), PlayerId::Two);
        assert_eq!(
            parts.sink.last_status(),
            Some("Player 2: pot the 8-ball to win! [Q] ability")
        );
    }

    #[test]
    fn ability_spends_one_charge_per_shot() {
        let (mut turn, mut parts) = setup();
        assert!(turn.request_ability(&mut parts.ctx()));
        assert_eq!(parts.roster.charges(PlayerId::One), 2);
        assert!(parts.abilities.phantom_active());
        assert!(!turn.request_ability(&mut parts.ctx()));
        assert_eq!(parts.roster.charges(PlayerId::One), 2);
        assert_eq!(parts.sink.last_status(), Some("One ability per shot!"));
    }

    #[test]
    fn ability_without_charges_changes_nothing() {
        let (mut turn, mut parts) = (TurnEngine::new(MatchConfig::default()), Parts::new(Character::demolisher()));
        for _ in 0..3 {
            parts.roster.use_charge(PlayerId::One);
        }
        assert!(!turn.request_ability(&mut parts.ctx()));
        assert!(parts.physics.impulses.is_empty());
        assert_eq!(parts.physics.ignore_calls, 0);
        assert_eq!(parts.physics.damping_calls, 0);
        assert_eq!(parts.roster.charges(PlayerId::One), 0);
        assert_eq!(parts.sink.last_status(), Some("No ability charges remaining!"));
    }

    #[test]
    fn ability_only_while_waiting() {
        let (mut turn, mut parts) = setup();
        shoot(&mut turn, &mut parts);
        assert!(!turn.request_ability(&mut parts.ctx()));
        assert_eq!(parts.roster.charges(PlayerId::One), 3);
    }

    #[test]
    fn cue_pocketed_between_shots_is_a_scratch() {
        let (mut turn, mut parts) = setup();
        turn.ball_pocketed(BallId::CUE, &mut parts.ctx());
        assert_eq!(turn.phase(), GamePhase::PlacingCueBall);
        assert_eq!(turn.current_player(), PlayerId::Two);
    }

    #[test]
    fn scratch_between_shots_hints_the_eight_ball() {
        let (mut turn, mut parts) = setup();
        for n in 9..=15 {
            parts.registry.deactivate(BallId(n));
        }
        turn.ball_pocketed(BallId::CUE, &mut parts.ctx());
        assert_eq!(turn.current_player(), PlayerId::Two);
        assert!(parts.sink.events.iter().any(|e| matches!(
            e,
            PresentationEvent::Status(text) if text == "Player 2: pot the 8-ball to win! [Q] ability"
        )));
        assert_eq!(parts.sink.last_status(), Some("Player 2: click to place the cue ball."));
    }

    #[test]
    fn backdrop_follows_the_player_to_move() {
        let (mut turn, mut parts) = setup();
        shoot(&mut turn, &mut parts);
        settle(&mut turn, &mut parts);
        let p2 = Vec3::from_array(MatchConfig::default().player_colors[1]);
        assert_eq!(turn.state().backdrop.target, p2);
        for _ in 0..600 {
            turn.tick_backdrop(DT);
        }
        assert!(turn.state().backdrop.current.distance(p2) < 1e-3);
    }

    #[test]
    fn character_ability_drives_invocation() {
        let (mut turn, mut parts) = (TurnEngine::new(MatchConfig::default()), Parts::new(Character::skater()));
        assert_eq!(parts.roster.player(PlayerId::One).character.ability, AbilityKind::LowFriction);
        turn.request_ability(&mut parts.ctx());
        assert_eq!(parts.abilities.in_flight(), 1);
        assert!(!parts.abilities.phantom_active());
        assert_eq!(parts.sink.banners().collect::<Vec<_>>(), vec!["SLICK SHOT ACTIVE"]);
    }
}
