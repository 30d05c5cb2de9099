pub mod players;
pub mod shot;
pub mod turn;
