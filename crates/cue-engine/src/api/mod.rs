pub mod backend;
pub mod sink;
pub mod types;
