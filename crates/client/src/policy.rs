//! Auto-battle policy for the player side.
use game_core::state::PotionType;
use game_core::{Battle, ItemId};

/// Action the policy wants the player to take.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice {
    Attack,
    Skill(usize),
    Item(ItemId),
    Escape,
}

const HEAL_BELOW: f64 = 0.35;
const FLEE_BELOW: f64 = 0.15;
const RESTORE_MANA_BELOW: f64 = 0.2;

/// Picks the player's next action.
///
/// Priorities: drink a healing potion when hurt, flee when nearly dead with
/// nothing to drink, restore mana when a skill is waiting on it, use the
/// strongest ready skill, otherwise attack.
pub fn choose(battle: &Battle) -> Choice {
    let player = &battle.player;
    let potions = Battle::usable_items(player);
    let find = |kind: PotionType| {
        potions
            .iter()
            .find(|potion| potion.potion_type == kind)
            .map(|potion| potion.id)
    };

    let hp = player.unit.hp_ratio();
    if hp < HEAL_BELOW {
        if let Some(id) = find(PotionType::Healing) {
            return Choice::Item(id);
        }
        if hp < FLEE_BELOW {
            return Choice::Escape;
        }
    }

    let usable = player.unit.usable_skills();
    if usable.is_empty() && player.unit.mana_ratio() < RESTORE_MANA_BELOW {
        let waiting_on_mana = player
            .unit
            .skills
            .iter()
            .any(|skill| skill.cooldown == 0 && skill.mana_cost > player.stats().mana);
        if waiting_on_mana {
            if let Some(id) = find(PotionType::Mana) {
                return Choice::Item(id);
            }
        }
    }

    usable
        .into_iter()
        .max_by(|&a, &b| {
            let (a, b) = (&player.unit.skills[a], &player.unit.skills[b]);
            a.damage.total_cmp(&b.damage)
        })
        .map_or(Choice::Attack, Choice::Skill)
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::state::Potion;
    use game_core::{Difficulty, MonsterGenerator, Player, PlayerClass};

    fn battle(class: PlayerClass) -> Battle {
        let monster =
            MonsterGenerator::create_monster("Slime", 1, None, Difficulty::Medium, 0, 0).unwrap();
        Battle::new(Player::new("Hero", class), monster)
    }

    #[test]
    fn fresh_level_one_player_attacks() {
        assert_eq!(choose(&battle(PlayerClass::Knight)), Choice::Attack);
    }

    #[test]
    fn hurt_player_drinks_then_flees() {
        let mut battle = battle(PlayerClass::Archer);
        battle.player.unit.take_damage(80);
        assert_eq!(choose(&battle), Choice::Escape);

        battle
            .player
            .inventory
            .add(Potion::new(ItemId(4), PotionType::Healing, 1, 1));
        assert_eq!(choose(&battle), Choice::Item(ItemId(4)));
    }

    #[test]
    fn prefers_the_strongest_ready_skill() {
        let mut battle = battle(PlayerClass::Knight);
        battle.player.gain_exp(3_000);
        let choice = choose(&battle);
        let Choice::Skill(index) = choice else {
            panic!("expected a skill");
        };
        assert_eq!(battle.player.unit.skills[index].name, "Holy Strike");
    }
}
