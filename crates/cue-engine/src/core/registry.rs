use serde::{Deserialize, Serialize};

use crate::api::types::{BallCategory, BallId, Damping};

/// Whether a ball is still on the cloth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallStatus {
    Active,
    Pocketed,
}

/// A ball the rules know about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: BallId,
    /// Fixed at creation; the 8-ball marker is never reassigned.
    pub category: BallCategory,
    pub status: BallStatus,
    /// Drag the ball was spawned with. Abilities restore this after changing it.
    pub default_damping: Damping,
}

impl Ball {
    pub fn new(id: BallId, category: BallCategory, default_damping: Damping) -> Self {
        Self {
            id,
            category,
            status: BallStatus::Active,
            default_damping,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == BallStatus::Active
    }
}

/// Every ball of the current rack, keyed by id. Balls are never removed, only deactivated.
#[derive(Debug, Clone, Default)]
pub struct BallRegistry {
    balls: Vec<Ball>,
}

impl BallRegistry {
    pub fn new() -> Self {
        Self {
            balls: Vec::with_capacity(16),
        }
    }

    /// Add a ball. Registering an id that already exists replaces the old record.
    pub fn register(&mut self, ball: Ball) {
        match self.balls.iter_mut().find(|b| b.id == ball.id) {
            Some(existing) => *existing = ball,
            None => self.balls.push(ball),
        }
    }

    /// Mark a ball pocketed. Returns `true` only if it was active before;
    /// deactivating an inactive or unknown ball is a no-op.
    pub fn deactivate(&mut self, id: BallId) -> bool {
        match self.balls.iter_mut().find(|b| b.id == id) {
            Some(ball) if ball.is_active() => {
                ball.status = BallStatus::Pocketed;
                true
            }
            _ => false,
        }
    }

    /// Put a pocketed ball back in play (cue ball after a scratch).
    pub fn reactivate(&mut self, id: BallId) -> bool {
        match self.balls.iter_mut().find(|b| b.id == id) {
            Some(ball) => {
                ball.status = BallStatus::Active;
                true
            }
            None => false,
        }
    }

    /// Put every ball back in play.
    pub fn reactivate_all(&mut self) {
        for ball in &mut self.balls {
            ball.status = BallStatus::Active;
        }
    }

    pub fn get(&self, id: BallId) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    pub fn is_active(&self, id: BallId) -> bool {
        self.get(id).is_some_and(Ball::is_active)
    }

    pub fn category_of(&self, id: BallId) -> Option<BallCategory> {
        self.get(id).map(|b| b.category)
    }

    /// Active balls of one category.
    pub fn balls_of_category(&self, category: BallCategory) -> impl Iterator<Item = &Ball> {
        self.balls
            .iter()
            .filter(move |b| b.is_active() && b.category == category)
    }

    pub fn remaining(&self, category: BallCategory) -> usize {
        self.balls_of_category(category).count()
    }

    pub fn all_active(&self) -> impl Iterator<Item = &Ball> {
        self.balls.iter().filter(|b| b.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.all_active().count()
    }

    /// Every ball regardless of status.
    pub fn iter(&self) -> impl Iterator<Item = &Ball> {
        self.balls.iter()
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> BallRegistry {
        let drag = Damping::uniform(0.9);
        let mut reg = BallRegistry::new();
        reg.register(Ball::new(BallId::CUE, BallCategory::Cue, drag));
        reg.register(Ball::new(BallId(1), BallCategory::Solid, drag));
        reg.register(Ball::new(BallId(2), BallCategory::Solid, drag));
        reg.register(Ball::new(BallId(8), BallCategory::Eight, drag));
        reg.register(Ball::new(BallId(9), BallCategory::Stripe, drag));
        reg
    }

    #[test]
    fn deactivate_is_idempotent() {
        let mut reg = registry();
        assert!(reg.deactivate(BallId(1)));
        assert!(!reg.deactivate(BallId(1)));
        assert!(!reg.is_active(BallId(1)));
        assert_eq!(reg.active_count(), 4);
    }

    #[test]
    fn unknown_ball_is_never_active() {
        let mut reg = registry();
        assert!(!reg.is_active(BallId(42)));
        assert!(!reg.deactivate(BallId(42)));
        assert!(!reg.reactivate(BallId(42)));
    }

    #[test]
    fn category_queries_only_see_active_balls() {
        let mut reg = registry();
        assert_eq!(reg.remaining(BallCategory::Solid), 2);
        reg.deactivate(BallId(2));
        let solids: Vec<_> = reg.balls_of_category(BallCategory::Solid).map(|b| b.id).collect();
        assert_eq!(solids, vec![BallId(1)]);
        assert_eq!(reg.category_of(BallId(2)), Some(BallCategory::Solid));
    }

    #[test]
    fn cue_ball_can_come_back() {
        let mut reg = registry();
        reg.deactivate(BallId::CUE);
        assert!(!reg.is_active(BallId::CUE));
        reg.reactivate(BallId::CUE);
        assert!(reg.is_active(BallId::CUE));
    }

    #[test]
    fn re_registering_replaces_record() {
        let mut reg = registry();
        reg.register(Ball::new(BallId(9), BallCategory::Stripe, Damping::uniform(0.4)));
        assert_eq!(reg.len(), 5);
        assert_eq!(reg.get(BallId(9)).unwrap().default_damping, Damping::uniform(0.4));
    }
}
