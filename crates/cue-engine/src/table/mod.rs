#[cfg(feature = "physics")]
pub mod felt;
pub mod rack;
