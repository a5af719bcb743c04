//! Turret aiming and line-of-sight verdicts.

use crate::components::Turret;
use crate::game_logic::spatial::{self, BodySnapshot, RayHit};
use crate::game_logic::steering::signed_yaw_angle;
use bevy::prelude::*;

/// Commanded turret angular velocity for a signed aim offset in degrees.
///
/// Inside the deadband the turret tracks the offset directly; outside it the
/// turret slews at full rate toward the target.
pub fn aim_command(offset_degrees: f32, deadband: f32, max_rate: f32) -> f32 {
    if offset_degrees.abs() < deadband {
        offset_degrees
    } else {
        max_rate.copysign(offset_degrees)
    }
}

/// Line-of-sight verdict from a sorted hit list.
///
/// Visible only when the nearest hit is the target itself; any closer body,
/// friend or foe, occludes. An empty hit list means the ray expired short of
/// the target.
pub fn los_verdict(hits: &[RayHit], target: Entity) -> bool {
    hits.first().is_some_and(|hit| hit.entity == target)
}

/// Check whether `target` is visible from `origin`, slewing the turret
/// toward it as a side effect.
///
/// The turret aim command is issued on every call, whatever the verdict, so
/// the barrel keeps converging while the target is still occluded.
pub fn can_see(
    origin: Vec3,
    target: Entity,
    target_pos: Vec3,
    range: f32,
    bodies: &[BodySnapshot],
    observer: Entity,
    turret: &mut Turret,
    deadband: f32,
) -> bool {
    let offset = signed_yaw_angle(turret.forward(), target_pos - origin);
    turret.set_desired_angular_velocity(aim_command(offset, deadband, turret.max_rate));

    let to_target = target_pos - origin;
    if to_target.length_squared() < 1e-8 {
        return true;
    }

    let hits = spatial::raycast_all(origin, to_target, range, bodies, observer);
    los_verdict(&hits, target)
}

/// Distance on the ground plane, ignoring height
pub fn flat_distance(a: Vec3, b: Vec3) -> f32 {
    Vec2::new(a.x, a.z).distance(Vec2::new(b.x, b.z))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aim_command_tracks_inside_deadband() {
        assert_eq!(aim_command(5.0, 10.0, 600.0), 5.0);
        assert_eq!(aim_command(-7.5, 10.0, 600.0), -7.5);
        assert_eq!(aim_command(0.0, 10.0, 600.0), 0.0);
    }

    #[test]
    fn test_aim_command_slews_outside_deadband() {
        assert_eq!(aim_command(45.0, 10.0, 600.0), 600.0);
        assert_eq!(aim_command(-45.0, 10.0, 600.0), -600.0);
        assert_eq!(aim_command(10.0, 10.0, 600.0), 600.0);
    }

    use crate::components::Team;

    fn body(index: u32, position: Vec3) -> BodySnapshot {
        BodySnapshot {
            entity: Entity::from_raw(index),
            position,
            radius: 2.0,
            team: Team::Blue,
        }
    }

    #[test]
    fn test_los_verdict_nearest_must_be_target() {
        let target = Entity::from_raw(9);
        let hits = vec![
            RayHit { entity: target, toi: 5.0 },
            RayHit {
                entity: Entity::from_raw(3),
                toi: 12.0,
            },
        ];
        assert!(los_verdict(&hits, target));

        let blocked = vec![
            RayHit {
                entity: Entity::from_raw(3),
                toi: 2.0,
            },
            RayHit { entity: target, toi: 5.0 },
        ];
        assert!(!los_verdict(&blocked, target));

        assert!(!los_verdict(&[], target));
    }

    #[test]
    fn test_can_see_clear_line() {
        let observer = Entity::from_raw(0);
        let target = Entity::from_raw(1);
        let target_pos = Vec3::new(30.0, 0.0, 0.0);
        let bodies = vec![body(1, target_pos)];
        let mut turret = Turret::new(0.0, 600.0);

        assert!(can_see(
            Vec3::ZERO,
            target,
            target_pos,
            80.0,
            &bodies,
            observer,
            &mut turret,
            10.0,
        ));
    }

    #[test]
    fn test_can_see_occluded_by_interposed_body() {
        let observer = Entity::from_raw(0);
        let target = Entity::from_raw(1);
        let target_pos = Vec3::new(30.0, 0.0, 0.0);
        let bodies = vec![body(1, target_pos), body(2, Vec3::new(15.0, 0.0, 0.0))];
        let mut turret = Turret::new(0.0, 600.0);

        assert!(!can_see(
            Vec3::ZERO,
            target,
            target_pos,
            80.0,
            &bodies,
            observer,
            &mut turret,
            10.0,
        ));
    }

    #[test]
    fn test_turret_slews_even_when_occluded() {
        let observer = Entity::from_raw(0);
        let target = Entity::from_raw(1);
        // Target 90 degrees clockwise of the turret's -Z facing, occluded
        let target_pos = Vec3::new(30.0, 0.0, 0.0);
        let bodies = vec![body(1, target_pos), body(2, Vec3::new(15.0, 0.0, 0.0))];
        let mut turret = Turret::new(0.0, 600.0);

        let visible = can_see(
            Vec3::ZERO,
            target,
            target_pos,
            80.0,
            &bodies,
            observer,
            &mut turret,
            10.0,
        );
        assert!(!visible);
        // Aim actuation happened regardless of the verdict
        assert_eq!(turret.angular_velocity, 600.0);
    }

    #[test]
    fn test_out_of_range_target_not_seen() {
        let observer = Entity::from_raw(0);
        let target = Entity::from_raw(1);
        let target_pos = Vec3::new(300.0, 0.0, 0.0);
        let bodies = vec![body(1, target_pos)];
        let mut turret = Turret::new(0.0, 600.0);

        assert!(!can_see(
            Vec3::ZERO,
            target,
            target_pos,
            80.0,
            &bodies,
            observer,
            &mut turret,
            10.0,
        ));
    }

    #[test]
    fn test_flat_distance_ignores_height() {
        let a = Vec3::new(0.0, 5.0, 0.0);
        let b = Vec3::new(3.0, -2.0, 4.0);
        assert!((flat_distance(a, b) - 5.0).abs() < 1e-6);
    }
}
