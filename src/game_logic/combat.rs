//! Shell collision and damage math.

use crate::components::{Shell, Unit};
use bevy::prelude::*;

/// Shells are treated as small spheres for impact tests
pub const SHELL_RADIUS: f32 = 0.3;

/// Whether a shell at `shell_pos` touches a unit body
pub fn check_collision(shell_pos: Vec3, body_pos: Vec3, body_radius: f32) -> bool {
    let combined = body_radius + SHELL_RADIUS;
    shell_pos.distance_squared(body_pos) <= combined * combined
}

/// A shell never harms its own team
pub fn shell_harms(shell: &Shell, target: &Unit) -> bool {
    shell.team != target.team
}
