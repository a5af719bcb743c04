use derive_more::Display;
use serde::{Deserialize, Serialize};

/// A movement speed value constrained to [0.1, 200.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Serialize, Deserialize)]
#[serde(from = "f32")]
pub struct MovementSpeed(f32);

impl MovementSpeed {
    const MIN: f32 = 0.1;
    const MAX: f32 = 200.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self::new(25.0)
    }
}

impl From<f32> for MovementSpeed {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

/// An acceleration value constrained to [1.0, 500.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Serialize, Deserialize)]
#[serde(from = "f32")]
pub struct AccelerationValue(f32);

impl AccelerationValue {
    const MIN: f32 = 1.0;
    const MAX: f32 = 500.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for AccelerationValue {
    fn default() -> Self {
        Self::new(70.0)
    }
}

impl From<f32> for AccelerationValue {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

/// A rotation rate in degrees per second constrained to [10.0, 2000.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Serialize, Deserialize)]
#[serde(from = "f32")]
pub struct RotationRate(f32);

impl RotationRate {
    const MIN: f32 = 10.0;
    const MAX: f32 = 2000.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for RotationRate {
    fn default() -> Self {
        Self::new(500.0)
    }
}

impl From<f32> for RotationRate {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

/// An angular threshold in degrees constrained to [1.0, 90.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Serialize, Deserialize)]
#[serde(from = "f32")]
pub struct AngleValue(f32);

impl AngleValue {
    const MIN: f32 = 1.0;
    const MAX: f32 = 90.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for AngleValue {
    fn default() -> Self {
        Self::new(20.0)
    }
}

impl From<f32> for AngleValue {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

/// A positional tolerance value constrained to [0.1, 50.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Serialize, Deserialize)]
#[serde(from = "f32")]
pub struct ToleranceValue(f32);

impl ToleranceValue {
    const MIN: f32 = 0.1;
    const MAX: f32 = 50.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for ToleranceValue {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl From<f32> for ToleranceValue {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

/// A sensing or weapon range constrained to [1.0, 500.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Serialize, Deserialize)]
#[serde(from = "f32")]
pub struct RangeValue(f32);

impl RangeValue {
    const MIN: f32 = 1.0;
    const MAX: f32 = 500.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for RangeValue {
    fn default() -> Self {
        Self::new(80.0)
    }
}

impl From<f32> for RangeValue {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

/// A duration in seconds constrained to [0.05, 30.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Serialize, Deserialize)]
#[serde(from = "f32")]
pub struct DurationValue(f32);

impl DurationValue {
    const MIN: f32 = 0.05;
    const MAX: f32 = 30.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for DurationValue {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl From<f32> for DurationValue {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

/// A damage value constrained to [0.1, 200.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Serialize, Deserialize)]
#[serde(from = "f32")]
pub struct DamageValue(f32);

impl DamageValue {
    const MIN: f32 = 0.1;
    const MAX: f32 = 200.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for DamageValue {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl From<f32> for DamageValue {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

/// A health value constrained to [1.0, 1000.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Serialize, Deserialize)]
#[serde(from = "f32")]
pub struct HealthValue(f32);

impl HealthValue {
    const MIN: f32 = 1.0;
    const MAX: f32 = 1000.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for HealthValue {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl From<f32> for HealthValue {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

/// A collider radius constrained to [0.1, 10.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Serialize, Deserialize)]
#[serde(from = "f32")]
pub struct RadiusValue(f32);

impl RadiusValue {
    const MIN: f32 = 0.1;
    const MAX: f32 = 10.0;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for RadiusValue {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl From<f32> for RadiusValue {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_speed_clamping() {
        assert_eq!(MovementSpeed::new(-1.0).get(), 0.1);
        assert_eq!(MovementSpeed::new(25.0).get(), 25.0);
        assert_eq!(MovementSpeed::new(1000.0).get(), 200.0);
    }

    #[test]
    fn test_angle_value_clamping() {
        assert_eq!(AngleValue::new(0.0).get(), 1.0);
        assert_eq!(AngleValue::new(20.0).get(), 20.0);
        assert_eq!(AngleValue::new(180.0).get(), 90.0);
    }

    #[test]
    fn test_display() {
        let rate = RotationRate::new(500.0);
        assert_eq!(format!("{rate}"), "500");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(MovementSpeed::default().get(), 25.0);
        assert_eq!(AccelerationValue::default().get(), 70.0);
        assert_eq!(RotationRate::default().get(), 500.0);
        assert_eq!(ToleranceValue::default().get(), 10.0);
        assert_eq!(HealthValue::default().get(), 100.0);
    }
}
