//! Ray queries over a snapshot of the battlefield bodies.
//!
//! Perception systems collect `BodySnapshot`s from the ECS each decision
//! tick and run the line-of-sight math here, keeping the geometry pure and
//! testable.

use crate::components::Team;
use bevy::prelude::*;

/// One collidable body as seen by a ray query
#[derive(Debug, Clone, Copy)]
pub struct BodySnapshot {
    pub entity: Entity,
    pub position: Vec3,
    pub radius: f32,
    pub team: Team,
}

/// A ray intersection, ordered by time of impact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub toi: f32,
}

/// Time of impact of a ray against a sphere, if any, within `max_toi`.
///
/// A ray starting inside the sphere reports a hit at zero rather than the
/// exit point.
pub fn ray_sphere_toi(origin: Vec3, direction: Vec3, center: Vec3, radius: f32, max_toi: f32) -> Option<f32> {
    let direction = direction.normalize_or_zero();
    if direction == Vec3::ZERO {
        return None;
    }

    let to_center = center - origin;
    if to_center.length_squared() <= radius * radius {
        return Some(0.0);
    }

    let projection = to_center.dot(direction);
    if projection < 0.0 {
        return None;
    }

    let closest_sq = to_center.length_squared() - projection * projection;
    let radius_sq = radius * radius;
    if closest_sq > radius_sq {
        return None;
    }

    let toi = projection - (radius_sq - closest_sq).sqrt();
    (toi <= max_toi).then_some(toi.max(0.0))
}

/// All bodies the segment from `origin` toward `direction` touches within
/// `max_toi`, nearest first. The caller excludes its own body by entity id.
pub fn raycast_all(
    origin: Vec3,
    direction: Vec3,
    max_toi: f32,
    bodies: &[BodySnapshot],
    exclude: Entity,
) -> Vec<RayHit> {
    let mut hits: Vec<RayHit> = bodies
        .iter()
        .filter(|body| body.entity != exclude)
        .filter_map(|body| {
            ray_sphere_toi(origin, direction, body.position, body.radius, max_toi)
                .map(|toi| RayHit {
                    entity: body.entity,
                    toi,
                })
        })
        .collect();

    hits.sort_by(|a, b| a.toi.total_cmp(&b.toi));
    hits
}

/// Bodies whose center lies within `range` of `center` on the ground plane
pub fn overlap_range<'a>(
    center: Vec3,
    range: f32,
    bodies: &'a [BodySnapshot],
    exclude: Entity,
) -> impl Iterator<Item = &'a BodySnapshot> {
    let center = Vec2::new(center.x, center.z);
    bodies.iter().filter(move |body| {
        body.entity != exclude
            && Vec2::new(body.position.x, body.position.z).distance(center) <= range
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(index: u32, position: Vec3, radius: f32, team: Team) -> BodySnapshot {
        BodySnapshot {
            entity: Entity::from_raw(index),
            position,
            radius,
            team,
        }
    }

    #[test]
    fn test_ray_hits_sphere_ahead() {
        let toi = ray_sphere_toi(Vec3::ZERO, Vec3::X, Vec3::new(10.0, 0.0, 0.0), 2.0, 100.0);
        assert_eq!(toi, Some(8.0));
    }

    #[test]
    fn test_ray_misses_sphere_behind() {
        let toi = ray_sphere_toi(Vec3::ZERO, Vec3::X, Vec3::new(-10.0, 0.0, 0.0), 2.0, 100.0);
        assert_eq!(toi, None);
    }

    #[test]
    fn test_ray_misses_offset_sphere() {
        let toi = ray_sphere_toi(Vec3::ZERO, Vec3::X, Vec3::new(10.0, 5.0, 0.0), 2.0, 100.0);
        assert_eq!(toi, None);
    }

    #[test]
    fn test_ray_respects_max_toi() {
        let toi = ray_sphere_toi(Vec3::ZERO, Vec3::X, Vec3::new(10.0, 0.0, 0.0), 2.0, 5.0);
        assert_eq!(toi, None);
    }

    #[test]
    fn test_ray_inside_sphere_hits_at_zero() {
        let toi = ray_sphere_toi(Vec3::ZERO, Vec3::X, Vec3::new(0.5, 0.0, 0.0), 2.0, 100.0);
        assert_eq!(toi, Some(0.0));
    }

    #[test]
    fn test_overlap_range_planar_and_excludes_self() {
        let me = Entity::from_raw(0);
        let bodies = vec![
            body(0, Vec3::ZERO, 2.0, Team::Red),
            body(1, Vec3::new(30.0, 50.0, 0.0), 2.0, Team::Blue),
            body(2, Vec3::new(90.0, 0.0, 0.0), 2.0, Team::Blue),
        ];

        let found: Vec<Entity> = overlap_range(Vec3::ZERO, 80.0, &bodies, me)
            .map(|b| b.entity)
            .collect();
        // Height is ignored; the far body is out of range; self is skipped
        assert_eq!(found, vec![Entity::from_raw(1)]);
    }

    #[test]
    fn test_raycast_all_sorted_and_excludes_self() {
        let me = Entity::from_raw(0);
        let bodies = vec![
            body(0, Vec3::ZERO, 2.0, Team::Red),
            body(1, Vec3::new(20.0, 0.0, 0.0), 2.0, Team::Blue),
            body(2, Vec3::new(10.0, 0.0, 0.0), 2.0, Team::Red),
        ];

        let hits = raycast_all(Vec3::ZERO, Vec3::X, 100.0, &bodies, me);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].entity, Entity::from_raw(2));
        assert_eq!(hits[1].entity, Entity::from_raw(1));
        assert!(hits[0].toi < hits[1].toi);
    }
}
