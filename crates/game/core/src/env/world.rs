//! World-facing hooks: tile occupancy and tile events.
//!
//! The map itself lives outside the engine. The engine only asks whether a
//! tile is free (to relocate a fleeing player) and resolves the effect of
//! stepping onto an event tile.

use crate::state::{BuffType, Player, Position};

use super::GameEnv;
use super::events::EventCategory;

/// Occupancy query implemented by the host's map.
pub trait TileOracle {
    fn is_free(&self, pos: Position) -> bool;
}

/// Special tiles a player can step on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum TileEvent {
    Treasure,
    Trap,
    RandomBuff,
}

/// First free orthogonal neighbour of `from`, in up/down/left/right order.
pub fn adjacent_free_tile(map: &dyn TileOracle, from: Position) -> Option<Position> {
    from.neighbours().into_iter().find(|pos| map.is_free(*pos))
}

/// Tier used for loot and buffs found on stage `stage`.
fn stage_tier(stage: u32) -> u32 {
    stage.clamp(1, 3)
}

/// Applies a tile event to the player and returns the message describing it.
pub fn on_tile_event(
    player: &mut Player,
    event: TileEvent,
    stage: u32,
    env: &mut GameEnv<'_>,
) -> String {
    let message = match event {
        TileEvent::Treasure => open_treasure(player, stage, env),
        TileEvent::Trap => spring_trap(player, env),
        TileEvent::RandomBuff => {
            let buff = env.buffs.random_buff(env.rng, stage_tier(stage));
            let name = buff.name.clone();
            let turns = buff.duration();
            player.unit.add_buff(buff);
            format!("{} is affected by {name} for {turns} turns", player.name())
        }
    };
    env.log(EventCategory::World, &message);
    message
}

fn open_treasure(player: &mut Player, stage: u32, env: &mut GameEnv<'_>) -> String {
    let tier = stage_tier(stage);
    match env.rng.index(3) {
        0 => {
            let amount = env.rng.range_i32(20, 50).max(0) as u32 * stage.max(1);
            player.inventory.add_money(amount);
            format!("{} found {amount} gold", player.name())
        }
        1 => match env.items.random_potion(env.rng, tier) {
            Some(potion) => {
                let msg = format!("{} found a {}", player.name(), potion.name);
                player.inventory.add(potion);
                msg
            }
            None => format!("{} found an empty chest", player.name()),
        },
        _ => match env.items.random_equipment(env.rng, tier) {
            Some(equipment) => {
                let msg = format!("{} found a {}", player.name(), equipment.name);
                player.inventory.add(equipment);
                msg
            }
            None => format!("{} found an empty chest", player.name()),
        },
    }
}

fn spring_trap(player: &mut Player, env: &mut GameEnv<'_>) -> String {
    let max_hp = f64::from(player.stats().max_hp);
    let damage = ((max_hp * env.config.trap_damage_fraction) as i32).max(1);
    player.unit.take_damage(damage);

    let mut message = format!("{} triggered a trap and took {damage} damage", player.name());
    if env.rng.chance(env.config.trap_slow_chance) {
        let debuff = env.buffs.debuff(BuffType::Speed, 1);
        message.push_str(&format!(" and is slowed ({})", debuff.name));
        player.unit.add_buff(debuff);
    }
    message
}
