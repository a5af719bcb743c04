use crate::config::range_types::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Monotonic counter for spawner-issued unit numbering.
///
/// Units never name themselves; the spawning factory draws the next number
/// from this resource.
#[derive(Resource, Default)]
pub struct SpawnCounter {
    pub count: u32,
}

impl SpawnCounter {
    pub fn next(&mut self) -> u32 {
        let issued = self.count;
        self.count += 1;
        issued
    }
}

#[derive(Resource, Serialize, Deserialize, Clone, Debug, Default)]
pub struct GameConfig {
    pub settings: GameSettings,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
// NOTE: When adding new fields, update the default config.toml example in the project root
pub struct GameSettings {
    // Hull locomotion settings
    pub speed_max: MovementSpeed,
    pub acceleration: AccelerationValue,
    pub braking_acceleration: AccelerationValue,
    pub rotation_rate: RotationRate,
    pub position_tolerance: ToleranceValue,
    pub angle_tolerance: AngleValue,

    // AI settings
    pub detection_range: RangeValue,
    pub attack_range: RangeValue,
    pub position_error_margin: ToleranceValue,

    // Turret settings
    pub turret_max_rate: RotationRate,
    pub turret_deadband: AngleValue,

    // Weapon settings
    pub fire_interval: DurationValue,
    pub shell_speed: MovementSpeed,
    pub shell_damage: DamageValue,
    pub shell_lifetime: DurationValue,

    // Unit settings
    pub unit_max_health: HealthValue,
    pub unit_radius: RadiusValue,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            // Hull locomotion settings
            speed_max: MovementSpeed::new(25.0),
            acceleration: AccelerationValue::new(70.0),
            braking_acceleration: AccelerationValue::new(100.0),
            rotation_rate: RotationRate::new(500.0),
            position_tolerance: ToleranceValue::new(10.0),
            angle_tolerance: AngleValue::new(20.0),

            // AI settings
            detection_range: RangeValue::new(80.0),
            attack_range: RangeValue::new(60.0),
            position_error_margin: ToleranceValue::new(10.0),

            // Turret settings
            turret_max_rate: RotationRate::new(600.0),
            turret_deadband: AngleValue::new(10.0),

            // Weapon settings
            fire_interval: DurationValue::new(0.8),
            shell_speed: MovementSpeed::new(60.0),
            shell_damage: DamageValue::new(10.0),
            shell_lifetime: DurationValue::new(3.0),

            // Unit settings
            unit_max_health: HealthValue::new(100.0),
            unit_radius: RadiusValue::new(2.0),
        }
    }
}
