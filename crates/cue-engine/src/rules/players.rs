use serde::{Deserialize, Serialize};

use crate::api::types::{AbilityKind, BallCategory, PlayerId};

/// A playable character. The ability is what matters to the rules; the rest is flavor for the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub ability_name: String,
    #[serde(default)]
    pub ability_description: String,
    /// Linear RGB.
    #[serde(default = "default_color")]
    pub primary_color: [f32; 3],
    pub ability: AbilityKind,
}

fn default_color() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl Character {
    pub fn wraith() -> Self {
        Self {
            name: "Wraith".to_string(),
            description: "Drifts through anything that isn't hers.".to_string(),
            ability_name: "Phantom".to_string(),
            ability_description: "The cue ball passes through opponent balls for one shot."
                .to_string(),
            primary_color: [0.55, 0.75, 1.0],
            ability: AbilityKind::Phantom,
        }
    }

    pub fn skater() -> Self {
        Self {
            name: "Skater".to_string(),
            description: "Likes the table fast and the cloth slick.".to_string(),
            ability_name: "Slick Shot".to_string(),
            ability_description: "Every ball rolls with almost no friction until the table settles."
                .to_string(),
            primary_color: [0.6, 1.0, 0.95],
            ability: AbilityKind::LowFriction,
        }
    }

    pub fn demolisher() -> Self {
        Self {
            name: "Demolisher".to_string(),
            description: "Solves every layout the same way.".to_string(),
            ability_name: "Boom".to_string(),
            ability_description: "Blasts nearby balls away from the cue ball.".to_string(),
            primary_color: [1.0, 0.6, 0.1],
            ability: AbilityKind::Boom,
        }
    }

    /// The three stock characters, one per ability.
    pub fn roster() -> [Character; 3] {
        [Self::wraith(), Self::skater(), Self::demolisher()]
    }

    /// Parse a list of characters from a JSON array.
    pub fn list_from_json(json: &str) -> Result<Vec<Character>, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// A seat at the table.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    /// Assigned when the game starts and kept for the whole game.
    pub category: BallCategory,
    pub character: Character,
    pub charges: u32,
}

/// Both players plus their remaining ability charges.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    players: [Player; 2],
    starting_charges: u32,
}

impl Roster {
    /// Player 1 shoots solids, player 2 stripes.
    pub fn new(p1: Character, p2: Character, starting_charges: u32) -> Self {
        Self {
            players: [
                Player {
                    id: PlayerId::One,
                    category: BallCategory::Solid,
                    character: p1,
                    charges: starting_charges,
                },
                Player {
                    id: PlayerId::Two,
                    category: BallCategory::Stripe,
                    character: p2,
                    charges: starting_charges,
                },
            ],
            starting_charges,
        }
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn category(&self, id: PlayerId) -> BallCategory {
        self.player(id).category
    }

    pub fn charges(&self, id: PlayerId) -> u32 {
        self.player(id).charges
    }

    /// Spend one charge. Returns `false`, changing nothing, when none are left.
    pub fn use_charge(&mut self, id: PlayerId) -> bool {
        let player = &mut self.players[id.index()];
        if player.charges == 0 {
            return false;
        }
        player.charges -= 1;
        true
    }

    /// Back to the starting count. Only a new game does this.
    pub fn reset_charges(&mut self) {
        for player in &mut self.players {
            player.charges = self.starting_charges;
        }
    }

    /// Swap a player's character (character select between games).
    pub fn set_character(&mut self, id: PlayerId, character: Character) {
        self.players[id.index()].character = character;
    }
}
