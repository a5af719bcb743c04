use crate::game_logic::errors::PathfindError;
use crate::pathfinding::{self, NavGrid};
use crate::resources::GameSettings;
use bevy::prelude::*;
use derive_more::{Add, Display, From, Mul};
use std::collections::VecDeque;
use std::ops::Sub;

// Generic resource pool; only health is instantiated in this simulation
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Component)]
pub struct ResourcePool<T> {
    pub current: f32,
    pub max: f32,
    _marker: std::marker::PhantomData<T>,
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Health;

pub type HealthPool = ResourcePool<Health>;

impl<T> ResourcePool<T> {
    pub fn new(current: f32, max: f32) -> Self {
        Self {
            current: current.max(0.0).min(max),
            max: max.max(0.0),
            _marker: std::marker::PhantomData,
        }
    }

    pub fn new_full(max: f32) -> Self {
        Self::new(max, max)
    }

    pub fn is_empty(self) -> bool {
        self.current <= 0.0
    }

    pub fn is_full(self) -> bool {
        self.current >= self.max
    }

    pub fn percentage(self) -> f32 {
        if self.max > 0.0 { self.current / self.max } else { 0.0 }
    }

    pub fn restore(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.max);
    }
}

impl ResourcePool<Health> {
    pub fn is_dead(self) -> bool {
        self.current <= 0.0
    }

    pub fn take_damage(&mut self, damage: Damage) {
        self.current = (self.current - damage.0).max(0.0);
    }

    pub fn heal(&mut self, amount: f32) {
        self.restore(amount);
    }
}

impl<T> std::fmt::Display for ResourcePool<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}/{:.0}", self.current, self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Mul, Display, From)]
pub struct Speed(pub f32);

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Add, Mul, Display, From)]
pub struct Distance(pub f32);

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Add, Mul, Display, From)]
pub struct Damage(pub f32);

impl Speed {
    pub fn new(value: f32) -> Self {
        Self(value.max(0.0))
    }
    pub const ZERO: Speed = Speed(0.0);
}

impl Distance {
    pub fn new(value: f32) -> Self {
        Self(value.max(0.0))
    }
    pub const ZERO: Distance = Distance(0.0);
}

impl Damage {
    pub fn new(value: f32) -> Self {
        Self(value.max(0.0))
    }
    pub const ZERO: Damage = Damage(0.0);
}

impl Sub for Distance {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self((self.0 - rhs.0).max(0.0))
    }
}

// Custom math operations for Vec3 * Speed
impl std::ops::Mul<Speed> for Vec3 {
    type Output = Vec3;
    fn mul(self, rhs: Speed) -> Self::Output {
        self * rhs.0
    }
}

impl PartialOrd<f32> for Distance {
    fn partial_cmp(&self, other: &f32) -> Option<std::cmp::Ordering> {
        self.0.partial_cmp(other)
    }
}

impl PartialEq<f32> for Distance {
    fn eq(&self, other: &f32) -> bool {
        self.0 == *other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    pub fn tag(self) -> &'static str {
        match self {
            Team::Red => "RED",
            Team::Blue => "BLUE",
        }
    }

    pub fn opponent(self) -> Team {
        match self {
            Team::Red => Team::Blue,
            Team::Blue => Team::Red,
        }
    }
}

/// Identity, team and hit points. The AI core reads this; damage resolution
/// writes it.
#[derive(Component)]
pub struct Unit {
    pub team: Team,
    pub health: HealthPool,
    /// Collider radius used by the spatial-query snapshot
    pub radius: f32,
}

impl Unit {
    pub fn new(team: Team, max_health: f32, radius: f32) -> Self {
        Self {
            team,
            health: HealthPool::new_full(max_health),
            radius,
        }
    }

    pub fn health_fraction(&self) -> f32 {
        self.health.percentage()
    }
}

/// Spawner-issued unit designation
#[derive(Component, Debug, Clone)]
pub struct UnitName(pub String);

// Capability markers. The command layer applies an order only when the
// matching capability is present on the entity.
#[derive(Component)]
pub struct Movable;

#[derive(Component)]
pub struct Attackable;

#[derive(Component)]
pub struct AttackMovable;

/// The five command states of the unit AI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandState {
    #[default]
    Idle,
    Defend,
    Move,
    Attack,
    AttackMove,
}

/// Orders the external input layer can issue to a unit
#[derive(Debug, Clone, Copy)]
pub enum UnitOrder {
    MoveTo { position: Vec3, queue: bool },
    Attack { target: Entity },
    AttackMove { location: Vec3 },
    Stop,
}

/// Command-state controller data for one unit.
///
/// Owns the target reference and the ordered locations; the decision systems
/// in `plugins::ai` drive the per-tick behaviour.
#[derive(Component, Debug)]
pub struct AiUnit {
    pub state: CommandState,
    /// Current enemy target; None whenever invalidated
    pub target: Option<Entity>,
    /// Last location a move order was issued toward (follow re-order check)
    pub move_location: Vec3,
    /// Attack-move goal location
    pub attack_move_goal: Vec3,
    pub detection_range: f32,
    pub attack_range: f32,
    pub position_error_margin: f32,
}

impl AiUnit {
    pub fn from_settings(settings: &GameSettings) -> Self {
        Self {
            state: CommandState::Idle,
            target: None,
            move_location: Vec3::ZERO,
            attack_move_goal: Vec3::ZERO,
            detection_range: settings.detection_range.get(),
            attack_range: settings.attack_range.get(),
            position_error_margin: settings.position_error_margin.get(),
        }
    }
}

/// Enemies visible this decision tick. Rebuilt from scratch every tick;
/// never persisted.
#[derive(Component, Debug, Default)]
pub struct DetectedEnemies(pub Vec<Entity>);

/// Waypoint-queue steering controller for one hull.
///
/// The queue is owned exclusively by this component: callers go through
/// `add_waypoint` / `set_waypoints` / `stop` and the read-only accessors,
/// never through a queue alias. Every stored point lies on the ground plane.
#[derive(Component, Debug, Clone)]
pub struct Locomotion {
    waypoints: VecDeque<Vec3>,
    pub position_tolerance: f32,
    /// Degrees; heading misalignment above this brakes instead of accelerating
    pub angle_tolerance: f32,
    pub speed_max: f32,
    pub acceleration: f32,
    pub braking_acceleration: f32,
    /// Degrees per second
    pub rotation_rate: f32,
}

impl Locomotion {
    pub fn from_settings(settings: &GameSettings) -> Self {
        Self {
            waypoints: VecDeque::new(),
            position_tolerance: settings.position_tolerance.get(),
            angle_tolerance: settings.angle_tolerance.get(),
            speed_max: settings.speed_max.get(),
            acceleration: settings.acceleration.get(),
            braking_acceleration: settings.braking_acceleration.get(),
            rotation_rate: settings.rotation_rate.get(),
        }
    }

    /// Normalize to the ground plane and append to the queue
    pub fn add_waypoint(&mut self, mut waypoint: Vec3) -> bool {
        waypoint.y = 0.0;
        self.waypoints.push_back(waypoint);
        true
    }

    /// Replace the whole queue
    pub fn set_waypoints<I: IntoIterator<Item = Vec3>>(&mut self, waypoints: I) -> bool {
        self.waypoints.clear();
        let mut success = true;
        for waypoint in waypoints {
            success &= self.add_waypoint(waypoint);
        }
        success
    }

    /// Clear the queue; the hull brakes on the next physics tick
    pub fn stop(&mut self) {
        self.waypoints.clear();
    }

    /// Drop the front waypoint
    pub fn advance_waypoint(&mut self) {
        self.waypoints.pop_front();
    }

    pub fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }

    pub fn waypoints(&self) -> impl Iterator<Item = &Vec3> {
        self.waypoints.iter()
    }

    /// The immediate steering target: front of the queue, or the current
    /// position when the queue is empty
    pub fn current_target(&self, current_pos: Vec3) -> Vec3 {
        self.waypoints.front().copied().unwrap_or(current_pos)
    }

    /// The ultimate destination: the last queued waypoint when more than one
    /// remains, else the current steering target
    pub fn final_target_location(&self, current_pos: Vec3) -> Vec3 {
        if self.waypoints.len() > 1 {
            self.waypoints
                .back()
                .copied()
                .unwrap_or_else(|| self.current_target(current_pos))
        } else {
            self.current_target(current_pos)
        }
    }

    /// Request a path toward `position` and enqueue its corners.
    ///
    /// Pathfinding failure does not block the order: the destination is
    /// queued as a single direct waypoint (best effort toward an
    /// unreachable goal) and `false` is returned.
    pub fn move_to(
        &mut self,
        position: Vec3,
        should_queue: bool,
        current_pos: Vec3,
        grid: &NavGrid,
    ) -> bool {
        let start = if should_queue {
            self.final_target_location(current_pos)
        } else {
            current_pos
        };

        match pathfinding::find_path(grid, start, position) {
            Ok(corners) => {
                let mut success = true;
                if should_queue {
                    for corner in corners {
                        success &= self.add_waypoint(corner);
                    }
                } else {
                    success &= self.set_waypoints(corners);
                }
                success
            }
            Err(err) => {
                log_pathfind_failure(&err);
                if !should_queue {
                    self.waypoints.clear();
                }
                self.add_waypoint(position);
                false
            }
        }
    }
}

fn log_pathfind_failure(err: &PathfindError) {
    warn!("Pathfinding failed: {err} - queueing direct waypoint");
}

/// Turret aim state. Yaw is world-space; the commanded angular velocity is
/// in degrees per second, positive clockwise when viewed from above.
#[derive(Component, Debug, Clone, Copy)]
pub struct Turret {
    pub yaw: f32,
    pub angular_velocity: f32,
    pub max_rate: f32,
}

impl Turret {
    pub fn new(yaw: f32, max_rate: f32) -> Self {
        Self {
            yaw,
            angular_velocity: 0.0,
            max_rate,
        }
    }

    /// Aim heading on the ground plane
    pub fn forward(&self) -> Vec3 {
        Quat::from_rotation_y(self.yaw) * Vec3::NEG_Z
    }

    pub fn set_desired_angular_velocity(&mut self, rate: f32) {
        self.angular_velocity = rate.clamp(-self.max_rate, self.max_rate);
    }
}

/// Launcher trigger state plus shell parameters
#[derive(Component, Debug, Clone, Copy)]
pub struct Weapon {
    pub trigger_held: bool,
    pub fire_interval: f32,
    pub cooldown: f32,
    pub shell_speed: Speed,
    pub shell_damage: Damage,
    pub shell_lifetime: f32,
}

impl Weapon {
    pub fn from_settings(settings: &GameSettings) -> Self {
        Self {
            trigger_held: false,
            fire_interval: settings.fire_interval.get(),
            cooldown: 0.0,
            shell_speed: Speed::new(settings.shell_speed.get()),
            shell_damage: Damage::new(settings.shell_damage.get()),
            shell_lifetime: settings.shell_lifetime.get(),
        }
    }

    pub fn begin_trigger_pull(&mut self) {
        self.trigger_held = true;
    }

    pub fn cease_trigger_pull(&mut self) {
        self.trigger_held = false;
    }
}

/// A fired projectile
#[derive(Component)]
pub struct Shell {
    pub direction: Vec3,
    pub speed: Speed,
    pub damage: Damage,
    pub lifetime: f32,
    pub team: Team,
}
