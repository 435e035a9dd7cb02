//! Audio system: collects the cues ships raised this tick.

use hecs::World;

use broadside_core::events::AudioEvent;

use crate::ship::ShipState;

pub fn run(world: &mut World, audio_events: &mut Vec<AudioEvent>) {
    for (_entity, ship) in world.query_mut::<&mut ShipState>() {
        audio_events.extend(ship.take_audio_events());
    }
}
