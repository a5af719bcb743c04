//! Decision-tick systems: perception and the command state machine.

use crate::components::{
    AiUnit, CommandState, DetectedEnemies, Locomotion, Turret, Unit, Weapon,
};
use crate::game_logic::ai::{
    attack_move_arrived, attack_move_engage, attack_should_fire, follow_needs_reorder,
    should_exit_move,
};
use crate::game_logic::spatial::{self, BodySnapshot};
use crate::game_logic::targeting::{can_see, flat_distance, los_verdict};
use crate::pathfinding::NavGrid;
use crate::plugins::DecisionSet;
use crate::resources::GameConfig;
use bevy::prelude::*;

pub struct AiPlugin;

impl Plugin for AiPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                DecisionSet::Commands,
                DecisionSet::Perception,
                DecisionSet::Decision,
            )
                .chain(),
        )
        .add_systems(Update, perceive_enemies.in_set(DecisionSet::Perception))
        .add_systems(Update, ai_decision.in_set(DecisionSet::Decision));
    }
}

fn snapshot_bodies(bodies: &Query<(Entity, &Unit, &Transform)>) -> Vec<BodySnapshot> {
    bodies
        .iter()
        .map(|(entity, unit, transform)| BodySnapshot {
            entity,
            position: transform.translation,
            radius: unit.radius,
            team: unit.team,
        })
        .collect()
}

/// Rebuild every unit's detected-enemy list from scratch: opposing team,
/// within detection range, line of sight clear.
fn perceive_enemies(
    bodies: Query<(Entity, &Unit, &Transform)>,
    mut units: Query<(Entity, &Unit, &Transform, &AiUnit, &mut DetectedEnemies)>,
) {
    let snapshot = snapshot_bodies(&bodies);

    for (entity, unit, transform, ai, mut detected) in &mut units {
        detected.0.clear();
        let origin = transform.translation;

        for body in spatial::overlap_range(origin, ai.detection_range, &snapshot, entity) {
            if body.team == unit.team {
                continue;
            }
            let hits = spatial::raycast_all(
                origin,
                body.position - origin,
                ai.detection_range,
                &snapshot,
                entity,
            );
            if los_verdict(&hits, body.entity) {
                detected.0.push(body.entity);
            }
        }
    }
}

/// One state-machine step for every unit.
fn ai_decision(
    grid: Res<NavGrid>,
    config: Res<GameConfig>,
    bodies: Query<(Entity, &Unit, &Transform)>,
    target_positions: Query<&Transform, With<Unit>>,
    mut units: Query<(
        Entity,
        &Transform,
        &DetectedEnemies,
        &mut AiUnit,
        &mut Locomotion,
        &mut Turret,
        &mut Weapon,
    )>,
) {
    let snapshot = snapshot_bodies(&bodies);
    let deadband = config.settings.turret_deadband.get();

    for (entity, transform, detected, mut ai, mut loco, mut turret, mut weapon) in &mut units {
        let pos = transform.translation;

        match ai.state {
            CommandState::Idle => {
                weapon.cease_trigger_pull();
            }

            // Reserved hold: touches nothing
            CommandState::Defend => {}

            CommandState::Move => {
                weapon.cease_trigger_pull();
                if should_exit_move(&loco, pos, ai.position_error_margin) {
                    // Any remaining sub-margin travel finishes on its own
                    debug!("{entity:?} arrived; Move -> Idle");
                    ai.state = CommandState::Idle;
                }
            }

            CommandState::Attack => {
                let target_pos = ai
                    .target
                    .and_then(|target| target_positions.get(target).ok())
                    .map(|t| t.translation);

                let (Some(target), Some(target_pos)) = (ai.target, target_pos) else {
                    // Target despawned or never set: disengage
                    debug!("{entity:?} lost target; Attack -> Idle");
                    ai.target = None;
                    ai.state = CommandState::Idle;
                    weapon.cease_trigger_pull();
                    continue;
                };

                // Slew the turret toward the target whatever the verdict
                can_see(
                    pos,
                    target,
                    target_pos,
                    ai.attack_range,
                    &snapshot,
                    entity,
                    &mut turret,
                    deadband,
                );

                // Follow, re-ordering only when the target drifted
                if follow_needs_reorder(&ai, target_pos) {
                    ai.move_location = target_pos;
                    loco.move_to(target_pos, false, pos, &grid);
                }

                // Deliberate attacks fire on range alone
                if attack_should_fire(pos, target_pos, ai.attack_range) {
                    weapon.begin_trigger_pull();
                } else {
                    weapon.cease_trigger_pull();
                }
            }

            CommandState::AttackMove => {
                if attack_move_arrived(pos, ai.attack_move_goal, ai.position_error_margin) {
                    debug!("{entity:?} reached attack-move goal; -> Idle");
                    ai.state = CommandState::Idle;
                    weapon.cease_trigger_pull();
                    loco.stop();
                    continue;
                }

                let nearest = detected
                    .0
                    .iter()
                    .filter_map(|&enemy| {
                        target_positions
                            .get(enemy)
                            .ok()
                            .map(|t| (enemy, t.translation))
                    })
                    .min_by(|a, b| {
                        flat_distance(pos, a.1).total_cmp(&flat_distance(pos, b.1))
                    });

                attack_move_engage(
                    &mut ai,
                    &mut loco,
                    &mut turret,
                    &mut weapon,
                    entity,
                    pos,
                    nearest,
                    &snapshot,
                    &grid,
                    deadband,
                );
            }
        }
    }
}
