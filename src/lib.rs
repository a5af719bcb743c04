pub mod components;
pub mod config;
pub mod game_logic;
pub mod pathfinding;
pub mod plugins;
pub mod resources;

pub use components::{CommandState, Team, UnitOrder};
pub use game_logic::errors::{VanguardError, VanguardResult};
pub use pathfinding::NavGrid;
pub use plugins::commands::UnitCommand;
pub use resources::{GameConfig, GameSettings, SpawnCounter};
