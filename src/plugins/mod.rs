pub mod ai;
pub mod combat;
pub mod commands;
pub mod locomotion;
pub mod spawning;

use bevy::prelude::*;

/// Ordering of the per-tick decision pipeline on the `Update` schedule:
/// external orders land first, perception rebuilds, then states decide.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecisionSet {
    Commands,
    Perception,
    Decision,
}
