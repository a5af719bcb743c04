//! Pure hull-steering math for the locomotion controller.
//!
//! Everything here is free of ECS types so the waypoint-following behaviour
//! can be unit tested by integrating these functions in a plain loop.

use crate::components::Locomotion;
use bevy::prelude::*;

/// Drive decision for one physics tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DriveCommand {
    Accelerate,
    Brake,
}

/// Output of one steering evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringOutput {
    pub drive: DriveCommand,
    /// New hull yaw in radians after the bounded turn
    pub yaw: f32,
}

/// Signed yaw angle from `from` to `to` on the ground plane, in degrees.
/// Positive means `to` lies clockwise of `from` when viewed from above.
pub fn signed_yaw_angle(from: Vec3, to: Vec3) -> f32 {
    let from = Vec3::new(from.x, 0.0, from.z);
    let to = Vec3::new(to.x, 0.0, to.z);
    if from.length_squared() < 1e-8 || to.length_squared() < 1e-8 {
        return 0.0;
    }
    (-from.cross(to).y).atan2(from.dot(to)).to_degrees()
}

/// World forward vector for a hull yaw (radians)
pub fn yaw_to_forward(yaw: f32) -> Vec3 {
    Quat::from_rotation_y(yaw) * Vec3::NEG_Z
}

/// Evaluate one steering tick against the waypoint queue.
///
/// At most one waypoint is consumed per call. On the tick a waypoint is
/// reached the hull brakes, even if another waypoint is already queued, so
/// dense corners do not get cut at full speed.
pub fn steer(loco: &mut Locomotion, position: Vec3, yaw: f32, dt: f32) -> SteeringOutput {
    let position = Vec3::new(position.x, 0.0, position.z);

    let target = loco.current_target(position);
    if loco.waypoint_count() == 0 {
        return SteeringOutput {
            drive: DriveCommand::Brake,
            yaw,
        };
    }

    if position.distance_squared(target) < loco.position_tolerance * loco.position_tolerance {
        loco.advance_waypoint();
        // Reached-waypoint tick: settle before chasing the next corner
        return SteeringOutput {
            drive: DriveCommand::Brake,
            yaw,
        };
    }

    let to_target = target - position;
    let heading_error = signed_yaw_angle(yaw_to_forward(yaw), to_target);

    // Bounded turn toward the target this tick
    let max_step = loco.rotation_rate * dt;
    let step = heading_error.clamp(-max_step, max_step);
    // Positive (clockwise) error decreases world yaw
    let new_yaw = yaw - step.to_radians();

    let drive = if heading_error.abs() > loco.angle_tolerance {
        DriveCommand::Brake
    } else {
        DriveCommand::Accelerate
    };

    SteeringOutput {
        drive,
        yaw: new_yaw,
    }
}

/// Integrate the drive command into a new planar velocity.
///
/// Acceleration is applied along the hull forward vector; braking opposes
/// the current velocity and never overshoots past zero. Speed is clamped to
/// `speed_max` and the vertical component is always zero.
pub fn apply_drive(
    drive: DriveCommand,
    forward: Vec3,
    velocity: Vec3,
    loco: &Locomotion,
    dt: f32,
) -> Vec3 {
    let planar = Vec3::new(velocity.x, 0.0, velocity.z);

    let mut next = match drive {
        DriveCommand::Accelerate => planar + forward * loco.acceleration * dt,
        DriveCommand::Brake => {
            let speed = planar.length();
            let drop = loco.braking_acceleration * dt;
            if speed <= drop {
                Vec3::ZERO
            } else {
                planar - planar.normalize() * drop
            }
        }
    };

    let speed = next.length();
    if speed > loco.speed_max {
        next = next / speed * loco.speed_max;
    }
    next.y = 0.0;
    next
}

/// Planar speed of a hull
pub fn hull_speed(velocity: Vec3) -> f32 {
    Vec3::new(velocity.x, 0.0, velocity.z).length()
}

/// A hull counts as stopped below 1 unit/s
pub fn is_stopped(velocity: Vec3) -> bool {
    Vec3::new(velocity.x, 0.0, velocity.z).length_squared() < 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::GameSettings;

    fn default_loco() -> Locomotion {
        Locomotion::from_settings(&GameSettings::default())
    }

    #[test]
    fn test_signed_yaw_angle_right_is_positive() {
        // Facing -Z (world forward), a point at +X is 90 degrees clockwise
        let angle = signed_yaw_angle(Vec3::NEG_Z, Vec3::X);
        assert!((angle - 90.0).abs() < 1e-3, "got {angle}");

        let angle = signed_yaw_angle(Vec3::NEG_Z, Vec3::NEG_X);
        assert!((angle + 90.0).abs() < 1e-3, "got {angle}");
    }

    #[test]
    fn test_signed_yaw_angle_straight_ahead_is_zero() {
        let angle = signed_yaw_angle(Vec3::NEG_Z, Vec3::NEG_Z * 15.0);
        assert!(angle.abs() < 1e-3);
    }

    #[test]
    fn test_signed_yaw_angle_ignores_height() {
        let flat = signed_yaw_angle(Vec3::NEG_Z, Vec3::new(1.0, 0.0, -1.0));
        let raised = signed_yaw_angle(Vec3::NEG_Z, Vec3::new(1.0, 30.0, -1.0));
        assert!((flat - raised).abs() < 1e-3);
    }

    #[test]
    fn test_yaw_to_forward_round_trip() {
        // Positive bevy yaw is counterclockwise from above, so the signed
        // (clockwise-positive) angle back from -Z is the negation
        for yaw_deg in [-135.0f32, -45.0, 0.0, 30.0, 90.0, 170.0] {
            let yaw = yaw_deg.to_radians();
            let fwd = yaw_to_forward(yaw);
            let angle = signed_yaw_angle(Vec3::NEG_Z, fwd);
            assert!((angle + yaw_deg).abs() < 1e-2, "yaw {yaw_deg} gave {angle}");
            assert!(fwd.y.abs() < 1e-6);
        }
    }

    #[test]
    fn test_steer_empty_queue_brakes() {
        let mut loco = default_loco();
        let out = steer(&mut loco, Vec3::new(3.0, 0.0, 3.0), 0.5, 1.0 / 60.0);
        assert_eq!(out.drive, DriveCommand::Brake);
        assert_eq!(out.yaw, 0.5);
    }

    #[test]
    fn test_steer_consumes_at_most_one_waypoint() {
        let mut loco = default_loco();
        // Both waypoints within tolerance of the hull
        loco.add_waypoint(Vec3::new(1.0, 0.0, 0.0));
        loco.add_waypoint(Vec3::new(2.0, 0.0, 0.0));

        let out = steer(&mut loco, Vec3::ZERO, 0.0, 1.0 / 60.0);
        assert_eq!(loco.waypoint_count(), 1);
        // Reached-waypoint tick always brakes
        assert_eq!(out.drive, DriveCommand::Brake);

        steer(&mut loco, Vec3::ZERO, 0.0, 1.0 / 60.0);
        assert_eq!(loco.waypoint_count(), 0);
    }

    #[test]
    fn test_arrival_bound_is_exclusive() {
        let mut loco = default_loco();
        // Exactly at the tolerance: not arrived
        loco.add_waypoint(Vec3::new(loco.position_tolerance, 0.0, 0.0));
        steer(&mut loco, Vec3::ZERO, 0.0, 1.0 / 60.0);
        assert_eq!(loco.waypoint_count(), 1);

        // A hair inside it: dequeued
        steer(&mut loco, Vec3::new(0.1, 0.0, 0.0), 0.0, 1.0 / 60.0);
        assert_eq!(loco.waypoint_count(), 0);
    }

    #[test]
    fn test_steer_brakes_while_misaligned() {
        let mut loco = default_loco();
        // Target directly behind the hull
        loco.add_waypoint(Vec3::new(0.0, 0.0, 100.0));

        let out = steer(&mut loco, Vec3::ZERO, 0.0, 1.0 / 60.0);
        assert_eq!(out.drive, DriveCommand::Brake);
        // Yaw moved toward the target
        assert!(out.yaw != 0.0);
    }

    #[test]
    fn test_steer_accelerates_when_aligned() {
        let mut loco = default_loco();
        // Target straight ahead of a hull facing -Z
        loco.add_waypoint(Vec3::new(0.0, 0.0, -100.0));

        let out = steer(&mut loco, Vec3::ZERO, 0.0, 1.0 / 60.0);
        assert_eq!(out.drive, DriveCommand::Accelerate);
    }

    #[test]
    fn test_steer_rotation_is_rate_bounded() {
        let mut loco = default_loco();
        loco.rotation_rate = 60.0; // 1 degree per tick at 60 Hz
        loco.add_waypoint(Vec3::new(100.0, 0.0, 0.0));

        let out = steer(&mut loco, Vec3::ZERO, 0.0, 1.0 / 60.0);
        let turned = (out.yaw - 0.0).abs().to_degrees();
        assert!((turned - 1.0).abs() < 1e-3, "turned {turned} degrees");
    }

    #[test]
    fn test_apply_drive_clamps_to_speed_max() {
        let loco = default_loco();
        let mut velocity = Vec3::ZERO;
        let forward = Vec3::NEG_Z;
        for _ in 0..120 {
            velocity = apply_drive(DriveCommand::Accelerate, forward, velocity, &loco, 1.0 / 60.0);
        }
        assert!((velocity.length() - loco.speed_max).abs() < 1e-3);
        assert_eq!(velocity.y, 0.0);
    }

    #[test]
    fn test_apply_drive_brake_never_reverses() {
        let loco = default_loco();
        let mut velocity = Vec3::new(0.0, 0.0, -1.0);
        for _ in 0..120 {
            velocity = apply_drive(DriveCommand::Brake, Vec3::NEG_Z, velocity, &loco, 1.0 / 60.0);
        }
        assert_eq!(velocity, Vec3::ZERO);
    }

    #[test]
    fn test_stopped_threshold_ignores_vertical_velocity() {
        assert!(is_stopped(Vec3::new(0.5, 10.0, 0.5)));
        assert!(!is_stopped(Vec3::new(2.0, 0.0, 0.0)));
        assert!((hull_speed(Vec3::new(3.0, 7.0, 4.0)) - 5.0).abs() < 1e-6);
    }

    /// Integrate the full steering loop across a two-waypoint queue and check
    /// the hull arrives within tolerance of the final destination.
    #[test]
    fn test_waypoint_following_converges() {
        let mut loco = default_loco();
        loco.set_waypoints([Vec3::new(50.0, 0.0, 0.0), Vec3::new(100.0, 0.0, 0.0)]);

        let dt = 1.0 / 60.0;
        let mut position = Vec3::ZERO;
        let mut yaw = 0.0f32; // facing -Z, must turn 90 degrees first
        let mut velocity = Vec3::ZERO;

        let mut ticks = 0;
        while loco.waypoint_count() > 0 && ticks < 3600 {
            let out = steer(&mut loco, position, yaw, dt);
            yaw = out.yaw;
            velocity = apply_drive(out.drive, yaw_to_forward(yaw), velocity, &loco, dt);
            position += velocity * dt;
            ticks += 1;
        }

        assert!(ticks < 3600, "did not drain the queue in 60 seconds");
        assert!(
            position.distance(Vec3::new(100.0, 0.0, 0.0)) <= loco.position_tolerance + 1.0,
            "stopped at {position:?}"
        );
    }
}
