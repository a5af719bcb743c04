//! Pure decision helpers for the unit command state machine.
//!
//! The per-tick ECS wiring lives in `plugins::ai`; the rules that decide
//! transitions and fire gating live here so they can be tested without a
//! world.

use crate::components::{AiUnit, CommandState, Locomotion, Turret, UnitOrder, Weapon};
use crate::game_logic::spatial::BodySnapshot;
use crate::game_logic::targeting::{can_see, flat_distance};
use crate::pathfinding::NavGrid;
use bevy::prelude::*;

/// Move completes when the unit is within the error margin of its final
/// ordered destination
pub fn should_exit_move(loco: &Locomotion, current_pos: Vec3, error_margin: f32) -> bool {
    flat_distance(current_pos, loco.final_target_location(current_pos)) < error_margin
}

/// While following a target, re-order movement only when the target has
/// drifted beyond the error margin from the last ordered location.
pub fn follow_needs_reorder(ai: &AiUnit, target_pos: Vec3) -> bool {
    flat_distance(target_pos, ai.move_location) > ai.position_error_margin
}

/// Attack-state fire gate: range only. The turret fires through occluders
/// because a deliberate attack order commits the unit.
pub fn attack_should_fire(self_pos: Vec3, target_pos: Vec3, attack_range: f32) -> bool {
    flat_distance(self_pos, target_pos) < attack_range
}

/// Attack-move completes on arrival within the error margin of the goal
pub fn attack_move_arrived(self_pos: Vec3, goal: Vec3, error_margin: f32) -> bool {
    flat_distance(self_pos, goal) <= error_margin
}

/// One attack-move engagement step, taken while the unit is short of its
/// goal.
///
/// With an enemy in the detection set the advance halts and the trigger is
/// gated on sight of the nearest one (the turret slews either way). With an
/// empty set the trigger is released and the advance is re-ordered toward
/// the goal whenever the current plan no longer ends there. Returns true
/// when movement was re-ordered.
pub fn attack_move_engage(
    ai: &mut AiUnit,
    loco: &mut Locomotion,
    turret: &mut Turret,
    weapon: &mut Weapon,
    self_entity: Entity,
    pos: Vec3,
    nearest: Option<(Entity, Vec3)>,
    bodies: &[BodySnapshot],
    grid: &NavGrid,
    deadband: f32,
) -> bool {
    match nearest {
        Some((enemy, enemy_pos)) => {
            loco.stop();
            let visible = can_see(
                pos,
                enemy,
                enemy_pos,
                ai.attack_range,
                bodies,
                self_entity,
                turret,
                deadband,
            );
            if visible {
                weapon.begin_trigger_pull();
            } else {
                weapon.cease_trigger_pull();
            }
            false
        }
        None => {
            weapon.cease_trigger_pull();
            let goal = ai.attack_move_goal;
            if flat_distance(loco.final_target_location(pos), goal) > ai.position_error_margin {
                ai.move_location = goal;
                loco.move_to(goal, false, pos, grid);
                true
            } else {
                false
            }
        }
    }
}

/// Apply an order to a unit's controller state.
///
/// Returns false when the order was accepted but its movement leg degraded
/// to a direct waypoint after a pathfinding failure.
pub fn apply_order(
    ai: &mut AiUnit,
    loco: &mut Locomotion,
    current_pos: Vec3,
    grid: &NavGrid,
    order: UnitOrder,
) -> bool {
    match order {
        UnitOrder::MoveTo { position, queue } => {
            ai.state = CommandState::Move;
            ai.target = None;
            ai.move_location = position;
            loco.move_to(position, queue, current_pos, grid)
        }
        UnitOrder::Attack { target } => {
            ai.state = CommandState::Attack;
            ai.target = Some(target);
            // Follow movement is issued by the decision tick once the
            // target's position is known; seeding the last ordered location
            // here guarantees the first tick orders it
            ai.move_location = current_pos;
            true
        }
        UnitOrder::AttackMove { location } => {
            ai.state = CommandState::AttackMove;
            ai.target = None;
            ai.attack_move_goal = location;
            ai.move_location = location;
            loco.move_to(location, false, current_pos, grid)
        }
        UnitOrder::Stop => {
            // Halts movement only. The state machine keeps its state and
            // target and self-transitions on its next arrival check
            loco.stop();
            true
        }
    }
}
