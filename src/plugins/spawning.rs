//! Unit factory: assembles the full tank bundle with its physics body.

use crate::components::{
    AiUnit, AttackMovable, Attackable, DetectedEnemies, Locomotion, Movable, Team, Turret, Unit,
    UnitName, Weapon,
};
use crate::game_logic::spawning::unit_designation;
use crate::resources::{GameSettings, SpawnCounter};
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// Spawn a fully equipped tank on the ground plane.
///
/// The designation is drawn from the shared spawn counter; units never
/// number themselves.
pub fn spawn_tank(
    commands: &mut Commands,
    settings: &GameSettings,
    counter: &mut SpawnCounter,
    team: Team,
    position: Vec3,
) -> Entity {
    let designation = unit_designation(team, counter.next());
    let radius = settings.unit_radius.get();
    debug!("Spawning {designation} at ({:.1}, {:.1})", position.x, position.z);

    commands
        .spawn((
            Unit::new(team, settings.unit_max_health.get(), radius),
            UnitName(designation),
            AiUnit::from_settings(settings),
            DetectedEnemies::default(),
            Locomotion::from_settings(settings),
            Turret::new(0.0, settings.turret_max_rate.get()),
            Weapon::from_settings(settings),
            (Movable, Attackable, AttackMovable),
            Transform::from_translation(Vec3::new(position.x, 0.0, position.z)),
            (
                RigidBody::Dynamic,
                Collider::ball(radius),
                Velocity::zero(),
                LockedAxes::ROTATION_LOCKED | LockedAxes::TRANSLATION_LOCKED_Y,
                GravityScale(0.0),
                Damping {
                    linear_damping: 0.0,
                    angular_damping: 1.0,
                },
            ),
        ))
        .id()
}
