//! Weapon fire, shell flight and impact resolution.

use crate::components::{Shell, Turret, Unit, UnitName, Weapon};
use crate::game_logic::combat::{check_collision, shell_harms};
use crate::plugins::DecisionSet;
use bevy::prelude::*;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (fire_weapons, update_shells, shell_impacts)
                .chain()
                .after(DecisionSet::Decision),
        );
    }
}

/// Spawn a shell from the turret muzzle while the trigger is held and the
/// cooldown has elapsed.
fn fire_weapons(
    time: Res<Time>,
    mut commands: Commands,
    mut launchers: Query<(&Unit, &Transform, &Turret, &mut Weapon)>,
) {
    let dt = time.delta_secs();
    for (unit, transform, turret, mut weapon) in &mut launchers {
        weapon.cooldown = (weapon.cooldown - dt).max(0.0);
        if !weapon.trigger_held || weapon.cooldown > 0.0 {
            continue;
        }
        weapon.cooldown = weapon.fire_interval;

        let direction = turret.forward();
        let muzzle = transform.translation + direction * (unit.radius + 0.5);
        commands.spawn((
            Shell {
                direction,
                speed: weapon.shell_speed,
                damage: weapon.shell_damage,
                lifetime: weapon.shell_lifetime,
                team: unit.team,
            },
            Transform::from_translation(muzzle),
        ));
    }
}

/// Advance shells along their flight line and expire the spent ones
fn update_shells(
    time: Res<Time>,
    mut commands: Commands,
    mut shells: Query<(Entity, &mut Shell, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (entity, mut shell, mut transform) in &mut shells {
        shell.lifetime -= dt;
        if shell.lifetime <= 0.0 {
            commands.entity(entity).despawn();
            continue;
        }
        transform.translation += shell.direction * shell.speed * dt;
    }
}

/// Resolve shell hits against enemy hulls; a hull at zero health despawns
fn shell_impacts(
    mut commands: Commands,
    shells: Query<(Entity, &Shell, &Transform)>,
    mut hulls: Query<(Entity, &mut Unit, &UnitName, &Transform)>,
) {
    for (shell_entity, shell, shell_transform) in &shells {
        for (hull_entity, mut unit, name, hull_transform) in &mut hulls {
            if !shell_harms(shell, &unit) {
                continue;
            }
            if !check_collision(
                shell_transform.translation,
                hull_transform.translation,
                unit.radius,
            ) {
                continue;
            }

            unit.health.take_damage(shell.damage);
            commands.entity(shell_entity).despawn();

            if unit.health.is_dead() {
                info!("{} destroyed", name.0);
                commands.entity(hull_entity).despawn();
            }
            break;
        }
    }
}
