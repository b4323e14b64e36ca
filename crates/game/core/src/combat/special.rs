//! Monster special actions.
//!
//! Each kind has one signature move rolled before its main action. Chances
//! grow 5% (relative) per monster level and are deliberately left unclamped:
//! a high-level goblin facing a low-level player can exceed 100%.

use crate::config::GameConfig;
use crate::env::{GameEnv, RngOracle, pick};
use crate::state::{Buff, Monster, Player, Polarity};
use crate::stats::{MonsterKind, StatDelta};

fn level_scale(level: u32) -> f64 {
    1.0 + 0.05 * f64::from(level)
}

pub fn steal_chance(level: u32, target_level: u32) -> f64 {
    0.25 * level_scale(level) - 0.01 * f64::from(target_level)
}

pub fn corrode_chance(level: u32, target_defense: f64) -> f64 {
    0.30 * level_scale(level) - 0.005 * target_defense
}

/// Rolled once, on a skeleton's first death.
pub fn revive_chance(level: u32) -> f64 {
    0.40 * level_scale(level)
}

pub fn empower_chance(level: u32) -> f64 {
    0.35 * level_scale(level)
}

/// What a special action did.
#[derive(Clone, Debug, PartialEq)]
pub enum SpecialAction {
    Stole { amount: u32 },
    StealFailed,
    Corroded {
        item: String,
        amount: i32,
        succeeded: bool,
        broken: Vec<String>,
    },
    Empowered { delta: StatDelta },
}

impl SpecialAction {
    pub fn describe(&self, monster: &str, player: &str) -> String {
        match self {
            SpecialAction::Stole { amount } => {
                format!("{monster} stole {amount} gold from {player}")
            }
            SpecialAction::StealFailed => format!("{monster} tried to steal from {player} but failed"),
            SpecialAction::Corroded {
                item,
                amount,
                succeeded,
                broken,
            } => {
                let verb = if *succeeded { "corroded" } else { "splashed" };
                let mut msg = format!("{monster} {verb} {player}'s {item} (-{amount} durability)");
                for name in broken {
                    msg.push_str(&format!("; {name} broke"));
                }
                msg
            }
            SpecialAction::Empowered { delta } => format!(
                "{monster} is empowered (+{:.1} atk, +{:.1} def, +{:.1} spd)",
                delta.attack, delta.defense, delta.speed
            ),
        }
    }
}

/// Rolls the monster's special action against the player.
///
/// Returns `None` when the kind has no per-turn action (skeletons revive on
/// death instead) or when nothing happened.
pub fn try_action(
    monster: &mut Monster,
    player: &mut Player,
    env: &mut GameEnv<'_>,
) -> Option<SpecialAction> {
    match monster.kind {
        MonsterKind::Goblin => Some(steal(monster, player, env.rng)),
        MonsterKind::Slime => corrode(monster, player, env.config, env.rng),
        MonsterKind::Skeleton => None,
        MonsterKind::Boss => empower(monster, env.rng),
    }
}

fn steal(monster: &mut Monster, player: &mut Player, rng: &mut dyn RngOracle) -> SpecialAction {
    if !rng.chance(steal_chance(monster.level(), player.level())) {
        return SpecialAction::StealFailed;
    }
    let fraction = rng.range_f64(0.10, 0.25);
    let amount = (f64::from(player.inventory.money()) * fraction) as u32;
    let taken = player.inventory.lose_money(amount);
    monster.money_reward += taken;
    SpecialAction::Stole { amount: taken }
}

fn corrode(
    monster: &Monster,
    player: &mut Player,
    config: &GameConfig,
    rng: &mut dyn RngOracle,
) -> Option<SpecialAction> {
    let slots = player.inventory.occupied_slots();
    let slot = *pick(rng, &slots)?;
    let item = player.inventory.equipped_in(slot)?.name.clone();

    let succeeded = rng.chance(corrode_chance(monster.level(), player.stats().defense));
    let amount = if succeeded {
        config.durability_loss + rng.range_i32(10, 25)
    } else {
        config.durability_loss
    };
    player.inventory.damage_slot(slot, amount);

    let mut broken = Vec::new();
    player.remove_broken(|piece| broken.push(piece.name.clone()));
    Some(SpecialAction::Corroded {
        item,
        amount,
        succeeded,
        broken,
    })
}

fn empower(monster: &mut Monster, rng: &mut dyn RngOracle) -> Option<SpecialAction> {
    if !rng.chance(empower_chance(monster.level())) {
        return None;
    }
    let stats = monster.stats();
    let delta = StatDelta::new(
        stats.damage * rng.range_f64(0.10, 0.40),
        stats.defense * rng.range_f64(0.10, 0.40),
        stats.speed * rng.range_f64(0.10, 0.40),
        0.0,
    );
    monster.unit.add_buff(Buff::new(
        "Dark Empowerment",
        delta,
        GameConfig::DEFAULT_BUFF_DURATION,
        Polarity::Positive,
        1,
    ));
    Some(SpecialAction::Empowered { delta })
}
