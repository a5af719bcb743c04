//! Physics-tick systems: hull driving, turret slewing and the ground-plane
//! invariant.

use crate::components::{Locomotion, Turret, Unit};
use crate::game_logic::steering;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule())
            .add_systems(
                FixedUpdate,
                (drive_hulls, rotate_turrets).before(PhysicsSet::SyncBackend),
            )
            .add_systems(
                FixedUpdate,
                enforce_ground_plane.after(PhysicsSet::Writeback),
            );
    }
}

/// Evaluate the waypoint queue and write velocity plus hull yaw for this
/// physics tick.
fn drive_hulls(
    time: Res<Time>,
    mut hulls: Query<(&mut Locomotion, &mut Transform, &mut Velocity), With<Unit>>,
) {
    let dt = time.delta_secs();
    for (mut loco, mut transform, mut velocity) in &mut hulls {
        let yaw = transform.rotation.to_euler(EulerRot::YXZ).0;
        let out = steering::steer(&mut loco, transform.translation, yaw, dt);

        transform.rotation = Quat::from_rotation_y(out.yaw);
        velocity.linvel = steering::apply_drive(
            out.drive,
            steering::yaw_to_forward(out.yaw),
            velocity.linvel,
            &loco,
            dt,
        );
    }
}

/// Integrate the commanded turret rate. Positive rate is clockwise from
/// above, which decreases world yaw.
fn rotate_turrets(time: Res<Time>, mut turrets: Query<&mut Turret>) {
    let dt = time.delta_secs();
    for mut turret in &mut turrets {
        let rate = turret.angular_velocity;
        turret.yaw -= rate.to_radians() * dt;
    }
}

/// Keep every unit flat on the battlefield after the physics writeback:
/// no height, no pitch or roll, no vertical velocity.
fn enforce_ground_plane(
    mut hulls: Query<(&mut Transform, &mut Velocity), With<Unit>>,
) {
    for (mut transform, mut velocity) in &mut hulls {
        transform.translation.y = 0.0;
        let yaw = transform.rotation.to_euler(EulerRot::YXZ).0;
        transform.rotation = Quat::from_rotation_y(yaw);
        velocity.linvel.y = 0.0;
    }
}
