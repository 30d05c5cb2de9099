pub mod motion;
#[cfg(feature = "physics")]
pub mod physics;
pub mod registry;
pub mod time;
