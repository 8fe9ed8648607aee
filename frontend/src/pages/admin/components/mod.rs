pub mod pending;
pub mod stats;
