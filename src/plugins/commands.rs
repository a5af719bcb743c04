//! External order intake.

use crate::components::{AiUnit, AttackMovable, Attackable, Locomotion, Movable, UnitOrder};
use crate::game_logic::ai::apply_order;
use crate::pathfinding::NavGrid;
use crate::plugins::DecisionSet;
use bevy::prelude::*;

/// An order issued to one unit by the input layer
#[derive(Event, Debug, Clone, Copy)]
pub struct UnitCommand {
    pub unit: Entity,
    pub order: UnitOrder,
}

pub struct CommandPlugin;

impl Plugin for CommandPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<UnitCommand>()
            .add_systems(Update, apply_unit_commands.in_set(DecisionSet::Commands));
    }
}

/// Drain pending orders into unit controller state. Orders for despawned
/// units or units lacking the matching capability are dropped.
fn apply_unit_commands(
    mut events: EventReader<UnitCommand>,
    grid: Res<NavGrid>,
    mut units: Query<(
        &Transform,
        &mut AiUnit,
        &mut Locomotion,
        Has<Movable>,
        Has<Attackable>,
        Has<AttackMovable>,
    )>,
) {
    for command in events.read() {
        let Ok((transform, mut ai, mut loco, movable, attackable, attack_movable)) =
            units.get_mut(command.unit)
        else {
            debug!("Dropping order for missing unit {:?}", command.unit);
            continue;
        };

        let permitted = match command.order {
            UnitOrder::MoveTo { .. } => movable,
            UnitOrder::Attack { .. } => attackable,
            UnitOrder::AttackMove { .. } => attack_movable,
            UnitOrder::Stop => true,
        };
        if !permitted {
            debug!(
                "Dropping {:?} for {:?}: capability missing",
                command.order, command.unit
            );
            continue;
        }

        let clean = apply_order(
            &mut ai,
            &mut loco,
            transform.translation,
            &grid,
            command.order,
        );
        if !clean {
            debug!(
                "{:?} accepted {:?} with degraded movement",
                command.unit, command.order
            );
        }
    }
}
