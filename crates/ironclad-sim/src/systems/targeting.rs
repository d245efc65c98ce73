//! Targeting system — runs each tank's lock tracker on this tick's contacts.
//!
//! The tracker is pure; this system is the glue that feeds it perception
//! output and turns its transitions into game events.

use hecs::World;

use ironclad_core::constants::DT;
use ironclad_core::events::GameEvent;
use ironclad_core::types::Position;

use ironclad_targeting::{LockTransition, TargetLockTracker};

use super::perception::TankContacts;

/// Evaluate every living tank's tracker once.
pub fn run(world: &mut World, contact_lists: &[TankContacts], events: &mut Vec<GameEvent>) {
    for list in contact_lists {
        let own_position = match world.get::<&Position>(list.entity) {
            Ok(pos) => *pos,
            Err(_) => continue,
        };

        let update = match world.get::<&mut TargetLockTracker>(list.entity) {
            Ok(mut tracker) => tracker.evaluate(&own_position, &list.contacts, DT),
            Err(_) => continue,
        };

        for transition in update.transitions {
            events.push(match transition {
                LockTransition::Locked(target) => GameEvent::TargetLocked {
                    player_id: list.player_id,
                    target_id: target.0 as u32,
                },
                LockTransition::Lost(target) => GameEvent::TargetLost {
                    player_id: list.player_id,
                    target_id: target.0 as u32,
                },
            });
        }
    }
}
