use serde::Serialize;

use crate::api::types::{BallCategory, PlayerId};

/// Receives everything the core wants shown to players.
///
/// Calls are fire-and-forget notifications. An implementation that drops
/// them must not change anything about how the match plays out.
pub trait PresentationSink {
    fn set_status(&mut self, text: &str);
    fn show_banner(&mut self, text: &str, duration_secs: f32);
    fn refresh_turn_indicator(&mut self, current: PlayerId, p1: BallCategory, p2: BallCategory);
    fn refresh_charges(&mut self, p1: u32, p2: u32);
    fn show_game_over(&mut self, text: &str);
    /// Shot power as a fraction in `0.0..=1.0`.
    fn set_power_meter(&mut self, fraction: f32);
}

/// Discards everything.
impl PresentationSink for () {
    fn set_status(&mut self, _text: &str) {}
    fn show_banner(&mut self, _text: &str, _duration_secs: f32) {}
    fn refresh_turn_indicator(&mut self, _current: PlayerId, _p1: BallCategory, _p2: BallCategory) {}
    fn refresh_charges(&mut self, _p1: u32, _p2: u32) {}
    fn show_game_over(&mut self, _text: &str) {}
    fn set_power_meter(&mut self, _fraction: f32) {}
}

/// Forwards presentation calls to the `log` facade.
/// The power meter is skipped; it changes every tick.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl PresentationSink for LogSink {
    fn set_status(&mut self, text: &str) {
        log::info!("status: {}", text);
    }

    fn show_banner(&mut self, text: &str, duration_secs: f32) {
        log::info!("banner ({:.1}s): {}", duration_secs, text);
    }

    fn refresh_turn_indicator(&mut self, current: PlayerId, p1: BallCategory, p2: BallCategory) {
        log::debug!(
            "turn indicator: player {} to move (P1 {}, P2 {})",
            current.number(),
            p1.label(),
            p2.label()
        );
    }

    fn refresh_charges(&mut self, p1: u32, p2: u32) {
        log::debug!("charges: P1 {} / P2 {}", p1, p2);
    }

    fn show_game_over(&mut self, text: &str) {
        log::info!("game over: {}", text);
    }

    fn set_power_meter(&mut self, _fraction: f32) {}
}

/// A single recorded presentation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PresentationEvent {
    Status(String),
    Banner { text: String, duration_secs: f32 },
    TurnIndicator { current: PlayerId, p1: BallCategory, p2: BallCategory },
    Charges { p1: u32, p2: u32 },
    GameOver(String),
}

/// Keeps every presentation call in order. Useful for tests and replays in tooling.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub events: Vec<PresentationEvent>,
    /// Last value passed to `set_power_meter`; not recorded as an event.
    pub power: f32,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent status line, if any.
    pub fn last_status(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|e| match e {
            PresentationEvent::Status(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn banners(&self) -> impl Iterator<Item = &str> {
        self.events.iter().filter_map(|e| match e {
            PresentationEvent::Banner { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn game_over_text(&self) -> Option<&str> {
        self.events.iter().find_map(|e| match e {
            PresentationEvent::GameOver(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Serialize the recorded calls as a JSON array.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl PresentationSink for RecordingSink {
    fn set_status(&mut self, text: &str) {
        self.events.push(PresentationEvent::Status(text.to_string()));
    }

    fn show_banner(&mut self, text: &str, duration_secs: f32) {
        self.events.push(PresentationEvent::Banner {
            text: text.to_string(),
            duration_secs,
        });
    }

    fn refresh_turn_indicator(&mut self, current: PlayerId, p1: BallCategory, p2: BallCategory) {
        self.events.push(PresentationEvent::TurnIndicator { current, p1, p2 });
    }

    fn refresh_charges(&mut self, p1: u32, p2: u32) {
        self.events.push(PresentationEvent::Charges { p1, p2 });
    }

    fn show_game_over(&mut self, text: &str) {
        self.events.push(PresentationEvent::GameOver(text.to_string()));
    }

    fn set_power_meter(&mut self, fraction: f32) {
        self.power = fraction;
    }
}
