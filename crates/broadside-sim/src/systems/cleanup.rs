//! Cleanup system: removes sunk ships and decides the end of the battle.

use hecs::{Entity, World};

use broadside_core::enums::{DeathOutcome, GamePhase, Team};
use broadside_core::events::GameEvent;
use broadside_core::types::ShipId;

use crate::ship::ShipState;

/// Despawn destroyed ships. Returns the new phase when the player was
/// defeated or no enemy remains afloat. Defeat wins a tie.
pub fn run(
    world: &mut World,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<GameEvent>,
) -> Option<GamePhase> {
    despawn_buffer.clear();

    let mut defeated = None;
    let mut enemies_afloat = 0usize;

    for (entity, (id, ship)) in world.query_mut::<(&ShipId, &ShipState)>() {
        match ship.death() {
            Some(DeathOutcome::Destroyed) => {
                log::info!("ship {} sunk", id.0);
                despawn_buffer.push(entity);
                events.push(GameEvent::ShipDestroyed { ship: *id });
            }
            Some(DeathOutcome::Defeated) => defeated = Some(*id),
            _ if ship.team() == Team::Enemy => enemies_afloat += 1,
            _ => {}
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    if let Some(ship) = defeated {
        log::info!("player ship {} lost, battle over", ship.0);
        events.push(GameEvent::PlayerDefeated { ship });
        return Some(GamePhase::Defeat);
    }
    if enemies_afloat == 0 {
        log::info!("all enemy ships sunk");
        events.push(GameEvent::AllEnemiesSunk);
        return Some(GamePhase::Victory);
    }
    None
}
