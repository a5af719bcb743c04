pub mod ai;
pub mod combat;
pub mod errors;
pub mod spatial;
pub mod spawning;
pub mod steering;
pub mod targeting;
