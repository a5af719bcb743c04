//! Unit naming and formation placement for the spawner.

use crate::components::Team;
use bevy::prelude::*;

/// Callsigns cycled by the spawner. Names repeat with a numeric suffix once
/// the list is exhausted.
const CALLSIGNS: &[&str] = &[
    "Anvil", "Bastion", "Cascade", "Dagger", "Ember", "Falchion", "Granite", "Halberd", "Ironside",
    "Javelin", "Keystone", "Longbow", "Mallet", "Nomad", "Onager", "Palisade", "Quarrel",
    "Rampart", "Saber", "Talon", "Umber", "Vigil", "Warden", "Yeoman", "Zenith",
];

/// Deterministic unit designation from the spawner's counter
pub fn unit_designation(team: Team, index: u32) -> String {
    let name = CALLSIGNS[(index as usize) % CALLSIGNS.len()];
    let cycle = (index as usize) / CALLSIGNS.len();
    if cycle == 0 {
        format!("{} {}", team.tag(), name)
    } else {
        format!("{} {}-{}", team.tag(), name, cycle + 1)
    }
}

/// Line-abreast formation slot around an anchor position.
///
/// Slots alternate left and right of the anchor along world X so a squad
/// spreads out rather than stacking.
pub fn formation_position(anchor: Vec3, slot: u32, spacing: f32) -> Vec3 {
    let step = slot.div_ceil(2) as f32 * spacing;
    let side = if slot % 2 == 0 { 1.0 } else { -1.0 };
    Vec3::new(anchor.x + side * step, 0.0, anchor.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_designations_are_deterministic_and_distinct() {
        assert_eq!(unit_designation(Team::Red, 0), unit_designation(Team::Red, 0));
        assert_ne!(unit_designation(Team::Red, 0), unit_designation(Team::Red, 1));
        assert_ne!(unit_designation(Team::Red, 0), unit_designation(Team::Blue, 0));
    }

    #[test]
    fn test_designations_wrap_with_suffix() {
        let wrapped = unit_designation(Team::Blue, CALLSIGNS.len() as u32);
        assert!(wrapped.ends_with("-2"), "got {wrapped}");
        assert!(wrapped.contains("Anvil"));
    }

    #[test]
    fn test_formation_spreads_both_sides() {
        let anchor = Vec3::new(0.0, 0.0, 40.0);
        assert_eq!(formation_position(anchor, 0, 6.0), anchor);
        assert_eq!(
            formation_position(anchor, 1, 6.0),
            Vec3::new(-6.0, 0.0, 40.0)
        );
        assert_eq!(formation_position(anchor, 2, 6.0), Vec3::new(6.0, 0.0, 40.0));
        assert_eq!(
            formation_position(anchor, 3, 6.0),
            Vec3::new(-12.0, 0.0, 40.0)
        );
    }
}
