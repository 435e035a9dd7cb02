//! Helm system: applies the player's queued commands to the player ship.
//!
//! Human input goes through the same `Helm` surface the broadside AI uses.

use hecs::World;

use broadside_core::commands::PlayerCommand;
use broadside_core::enums::Team;
use broadside_core::events::GameEvent;
use broadside_core::helm::{Helm, HelmOrder, OrderSource};
use broadside_core::types::ShipId;

use crate::firing_arc::FiringArcs;
use crate::ship::ShipState;

/// Apply `commands` in order. Pause and Resume are handled by the engine
/// and ignored here.
pub fn run(world: &mut World, commands: &[PlayerCommand], dt: f64, events: &mut Vec<GameEvent>) {
    if commands.is_empty() {
        return;
    }

    for (_entity, (id, ship, mut arcs)) in
        world.query_mut::<(&ShipId, &mut ShipState, Option<&mut FiringArcs>)>()
    {
        if ship.team() != Team::Player {
            continue;
        }

        for command in commands {
            let (order, source) = match *command {
                PlayerCommand::OpenSail => (HelmOrder::OpenSail, OrderSource::Helmsman { key_down: false }),
                PlayerCommand::CloseSail => (HelmOrder::CloseSail, OrderSource::Helmsman { key_down: false }),
                PlayerCommand::SteerRight { key_down } => {
                    (HelmOrder::SteerRight, OrderSource::Helmsman { key_down })
                }
                PlayerCommand::SteerLeft { key_down } => {
                    (HelmOrder::SteerLeft, OrderSource::Helmsman { key_down })
                }
                PlayerCommand::FireBroadside { side } => {
                    let fired = arcs.as_deref_mut().and_then(|arcs| arcs.get_mut(side).fire());
                    match fired {
                        Some(cannons) => events.push(GameEvent::BroadsideFired {
                            ship: *id,
                            side,
                            cannons,
                        }),
                        None => log::trace!("{side:?} broadside of ship {} not ready", id.0),
                    }
                    continue;
                }
                PlayerCommand::Pause | PlayerCommand::Resume => continue,
            };

            if !ship.execute(order, source, dt) {
                log::trace!("{order:?} rejected at the limit");
            }
        }
    }
}
