//! Player actions.
//!
//! Every action first checks that the player may act. Rejections leave the
//! battle untouched; accepted actions resolve fully and then close the turn
//! gate (or end the battle).

use crate::combat::{AttackResult, AttackerSide, escape_chance, resolve_attack};
use crate::env::{EventCategory, GameEnv, TileOracle, adjacent_free_tile};
use crate::state::{AnimationState, BuffTarget, DamageReaction, ItemId};

use super::turns::{crit_suffix, expiry_messages, skill_animation};
use super::{ActionOutcome, ActionReport, Battle, BattleError, BattleState, Side};

impl Battle {
    fn ensure_player_turn(&self) -> Result<(), BattleError> {
        if self.state.is_over() {
            return Err(BattleError::BattleOver { state: self.state });
        }
        if self.state != BattleState::PlayerTurn {
            return Err(BattleError::NotPlayerTurn { state: self.state });
        }
        if self.turn_in_progress {
            return Err(BattleError::TurnInProgress);
        }
        Ok(())
    }

    /// Basic weapon attack.
    pub fn attack(&mut self, env: &mut GameEnv<'_>) -> Result<ActionReport, BattleError> {
        self.ensure_player_turn()?;
        self.turn += 1;
        let _span = tracing::debug_span!("player_attack", turn = self.turn).entered();

        self.player.unit.animation = AnimationState::Attack;
        let attacker_damage = self.player.stats().damage;
        let (hit, lines) = self.player_hit(attacker_damage, "attacks", env);
        let mut messages = lines.messages;
        self.wear_gear(env, &mut messages);
        Ok(self.finish_player_action(messages, Some(hit), None, env))
    }

    /// Uses the skill at `index` in the player's skill list.
    ///
    /// An unknown, cooling-down or unaffordable skill is rejected with
    /// [`BattleError::Skill`] and the player keeps the turn.
    pub fn use_skill(
        &mut self,
        index: usize,
        env: &mut GameEnv<'_>,
    ) -> Result<ActionReport, BattleError> {
        self.ensure_player_turn()?;
        let skill = self.player.unit.begin_skill(index)?;
        self.turn += 1;
        let _span =
            tracing::debug_span!("player_skill", turn = self.turn, skill = %skill.name).entered();

        self.player.unit.animation = skill_animation(skill.kind);
        let mut hit = None;
        let mut messages = Vec::new();
        let mut phase_changed = false;
        if skill.deals_damage() {
            let attacker_damage = self.player.stats().damage + skill.damage;
            let verb = format!("uses {} on", skill.name);
            let (result, lines) = self.player_hit(attacker_damage, &verb, env);
            phase_changed = lines.reaction == DamageReaction::PhaseChanged;
            hit = Some(result);
            messages.extend(lines.messages);
        } else {
            messages.push(format!("{} uses {}", self.player.name(), skill.name));
        }

        if let Some(template) = &skill.buff {
            let buff = template.instantiate();
            match template.target {
                BuffTarget::Opponent => {
                    if self.monster.is_alive() && !phase_changed {
                        messages.push(format!("{} is afflicted by {}", self.monster.name(), buff.name));
                        self.monster.unit.add_buff(buff);
                    }
                }
                BuffTarget::Caster => {
                    messages.push(format!("{} gains {}", self.player.name(), buff.name));
                    self.player.unit.add_buff(buff);
                }
            }
        }

        self.wear_gear(env, &mut messages);
        Ok(self.finish_player_action(messages, hit, Some(index), env))
    }

    /// Drinks a potion from the inventory.
    ///
    /// Potions that only work outside combat are rejected with
    /// [`BattleError::ItemNotUsable`] and the player keeps the turn.
    pub fn use_item(&mut self, id: ItemId, env: &mut GameEnv<'_>) -> Result<ActionReport, BattleError> {
        self.ensure_player_turn()?;
        let name = self
            .player
            .inventory
            .find(id)
            .map(|item| item.name().to_owned())
            .ok_or(BattleError::ItemNotFound(id))?;
        let effect = self.player.use_potion(id, true)?;
        self.turn += 1;

        let messages = vec![format!("{} drinks {name} and {effect}", self.player.name())];
        Ok(self.finish_player_action(messages, None, None, env))
    }

    /// Tries to flee.
    ///
    /// On success the battle ends as [`BattleState::Escaped`] and the player
    /// steps onto the first free tile next to its position, if any. On
    /// failure the monster gets the turn.
    pub fn attempt_escape(
        &mut self,
        map: &dyn TileOracle,
        env: &mut GameEnv<'_>,
    ) -> Result<ActionReport, BattleError> {
        self.ensure_player_turn()?;
        self.turn += 1;

        let chance = escape_chance(
            self.player.stats().speed,
            self.monster.stats().speed,
            &env.config.escape,
        );
        let name = self.player.name().to_owned();

        if env.rng.chance(chance) {
            let mut messages = vec![format!("{name} escaped from {}", self.monster.name())];
            match adjacent_free_tile(map, self.player.unit.position) {
                Some(tile) => {
                    self.player.unit.position = tile;
                    self.player.unit.animation = AnimationState::Walk;
                    messages.push(format!("{name} retreats to {tile}"));
                }
                None => tracing::debug!(position = %self.player.unit.position, "no free tile to retreat to"),
            }
            self.state = BattleState::Escaped;
            self.pending = None;
            self.turn_in_progress = false;
            return Ok(self.report(
                Side::Player,
                EventCategory::Battle,
                messages,
                None,
                ActionOutcome::Escaped,
                env,
            ));
        }

        let mut messages = vec![format!("{name} failed to escape")];
        let expired = self.player.unit.end_turn(None);
        messages.extend(expiry_messages(&name, &expired));
        self.close_gate(BattleState::MonsterTurn, env);
        Ok(self.report(
            Side::Player,
            EventCategory::Battle,
            messages,
            None,
            ActionOutcome::EscapeFailed,
            env,
        ))
    }

    /// Resolves a player hit on the monster, including its reaction.
    fn player_hit(
        &mut self,
        attacker_damage: f64,
        verb: &str,
        env: &mut GameEnv<'_>,
    ) -> (AttackResult, HitLines) {
        let result = resolve_attack(
            AttackerSide::Player,
            attacker_damage,
            self.player.stats().critical_rate,
            self.monster.stats().defense,
            env.rng,
        );
        let mut messages = vec![format!(
            "{} {verb} {} for {} damage{}",
            self.player.name(),
            self.monster.name(),
            result.damage,
            crit_suffix(result.crit)
        )];

        let reaction = self.monster.take_damage(result.damage, env.config, env.rng);
        let monster = self.monster.name();
        match reaction {
            DamageReaction::Alive => {}
            DamageReaction::Died => messages.push(format!("{monster} is defeated")),
            DamageReaction::Revived { hp } => {
                messages.push(format!("{monster} collapses... and rises again with {hp} HP"))
            }
            DamageReaction::PhaseChanged => messages.push(format!(
                "{monster} transforms! Its power surges ({} HP)",
                self.monster.stats().hp
            )),
        }
        (result, HitLines { messages, reaction })
    }

    /// Wears the player's gear down after an offensive action.
    fn wear_gear(&mut self, env: &GameEnv<'_>, messages: &mut Vec<String>) {
        for name in self.player.degrade_equipment(env.config.durability_loss) {
            messages.push(format!("{}'s {name} broke", self.player.name()));
        }
    }

    /// Ends the player's action: victory check, turn bookkeeping and the gate.
    fn finish_player_action(
        &mut self,
        mut messages: Vec<String>,
        hit: Option<AttackResult>,
        used_skill: Option<usize>,
        env: &mut GameEnv<'_>,
    ) -> ActionReport {
        if !self.monster.is_alive() {
            self.state = BattleState::Victory;
            self.pending = None;
            self.turn_in_progress = false;
            let report = self.report(
                Side::Player,
                EventCategory::Battle,
                messages,
                hit,
                ActionOutcome::Victory,
                env,
            );
            self.grant_rewards(env);
            return report;
        }

        let expired = self.player.unit.end_turn(used_skill);
        messages.extend(expiry_messages(self.player.name(), &expired));
        self.close_gate(BattleState::MonsterTurn, env);
        let category = if hit.is_some() {
            EventCategory::Combat
        } else if used_skill.is_some() {
            EventCategory::Skill
        } else {
            EventCategory::Item
        };
        self.report(Side::Player, category, messages, hit, ActionOutcome::Continue, env)
    }
}

/// Messages for a hit plus the monster's reaction to it.
struct HitLines {
    messages: Vec<String>,
    reaction: DamageReaction,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{BuffTable, ItemCatalog, MemorySink, SequenceRng};
    use crate::generation::MonsterGenerator;
    use crate::state::{
        Equipment, EquipmentKind, Player, Position, Potion, PotionType, SkillError, WeaponKind,
    };
    use crate::stats::{Archetype, Difficulty, PlayerClass};

    struct OpenField;

    impl TileOracle for OpenField {
        fn is_free(&self, _pos: Position) -> bool {
            true
        }
    }

    struct Walled;

    impl TileOracle for Walled {
        fn is_free(&self, _pos: Position) -> bool {
            false
        }
    }

    /// A battle already on the player's turn with the gate open.
    fn ready_battle(class: PlayerClass, monster: &str) -> Battle {
        let player = Player::new("Hero", class);
        let monster =
            MonsterGenerator::create_monster(monster, 1, None, Difficulty::Medium, 0, 1).unwrap();
        let mut battle = Battle::new(player, monster);
        battle.state = BattleState::PlayerTurn;
        battle
    }

    struct Fixture {
        config: GameConfig,
        buffs: BuffTable,
        items: ItemCatalog,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                config: GameConfig::default(),
                buffs: BuffTable::builtin(),
                items: ItemCatalog::builtin(),
            }
        }
    }

    #[test]
    fn attack_hits_and_hands_over_the_turn() {
        let fx = Fixture::new();
        let mut rng = SequenceRng::constant(0.99);
        let mut sink = MemorySink::new();
        let mut env = GameEnv::new(&mut rng, &mut sink, &fx.config, &fx.buffs, &fx.items);

        let mut battle = ready_battle(PlayerClass::Knight, "Slime");
        let hp_before = battle.monster.stats().hp;
        let report = battle.attack(&mut env).unwrap();

        // knight 12 dmg into slime def 7: 12 × 100 / 107 = 11.2 -> 11
        assert_eq!(report.hit.map(|h| h.damage), Some(11));
        assert_eq!(battle.monster.stats().hp, hp_before - 11);
        assert_eq!(report.outcome, ActionOutcome::Continue);
        assert!(battle.turn_in_progress());
        assert_eq!(battle.player.unit.animation, AnimationState::Attack);

        assert_eq!(battle.attack(&mut env), Err(BattleError::TurnInProgress));
    }

    #[test]
    fn actions_are_rejected_outside_the_player_turn() {
        let fx = Fixture::new();
        let mut rng = SequenceRng::constant(0.5);
        let mut sink = MemorySink::new();
        let mut env = GameEnv::new(&mut rng, &mut sink, &fx.config, &fx.buffs, &fx.items);

        let player = Player::new("Hero", PlayerClass::Mage);
        let monster =
            MonsterGenerator::create_monster("Goblin", 1, None, Difficulty::Medium, 0, 1).unwrap();
        let mut battle = Battle::new(player, monster);
        assert_eq!(
            battle.attack(&mut env),
            Err(BattleError::NotPlayerTurn {
                state: BattleState::BattleStart
            })
        );

        battle.state = BattleState::Escaped;
        assert_eq!(
            battle.attempt_escape(&OpenField, &mut env),
            Err(BattleError::BattleOver {
                state: BattleState::Escaped
            })
        );
        assert_eq!(battle.turn(), 0);
    }

    #[test]
    fn skill_without_mana_keeps_the_turn() {
        let fx = Fixture::new();
        let mut rng = SequenceRng::constant(0.99);
        let mut sink = MemorySink::new();
        let mut env = GameEnv::new(&mut rng, &mut sink, &fx.config, &fx.buffs, &fx.items);

        let mut battle = ready_battle(PlayerClass::Mage, "Slime");
        for skill in PlayerClass::Mage.skills_learned_at(3) {
            battle.player.unit.learn_skill(skill);
        }
        battle.player.unit.stats.mana = 0;
        let err = battle.use_skill(0, &mut env).unwrap_err();
        assert!(matches!(err, BattleError::Skill(SkillError::InsufficientMana { .. })));
        assert!(!battle.turn_in_progress());
        assert_eq!(battle.state(), BattleState::PlayerTurn);

        assert!(matches!(
            battle.use_skill(9, &mut env),
            Err(BattleError::Skill(SkillError::UnknownSkill { index: 9 }))
        ));
    }

    #[test]
    fn skill_spends_mana_and_starts_cooldown() {
        let fx = Fixture::new();
        let mut rng = SequenceRng::constant(0.99);
        let mut sink = MemorySink::new();
        let mut env = GameEnv::new(&mut rng, &mut sink, &fx.config, &fx.buffs, &fx.items);

        let mut battle = ready_battle(PlayerClass::Mage, "Slime");
        for skill in PlayerClass::Mage.skills_learned_at(3) {
            battle.player.unit.learn_skill(skill);
        }
        let mana_before = battle.player.stats().mana;
        let skill = battle.player.unit.skills[0].clone();
        let report = battle.use_skill(0, &mut env).unwrap();

        assert_eq!(battle.player.stats().mana, mana_before - skill.mana_cost);
        assert_eq!(battle.player.unit.skills[0].cooldown, skill.duration);
        assert_eq!(report.hit.is_some(), skill.deals_damage());
        assert_eq!(battle.turn(), 1);
    }

    #[test]
    fn killing_blow_wins_and_pays_out_once() {
        let fx = Fixture::new();
        let mut rng = SequenceRng::constant(0.99);
        let mut sink = MemorySink::new();
        let mut env = GameEnv::new(&mut rng, &mut sink, &fx.config, &fx.buffs, &fx.items);

        let mut battle = ready_battle(PlayerClass::Knight, "Slime");
        battle.monster.unit.stats.hp = 1;
        let exp = battle.monster.exp_reward;
        let money = battle.monster.money_reward;

        let report = battle.attack(&mut env).unwrap();
        assert_eq!(report.outcome, ActionOutcome::Victory);
        assert_eq!(battle.state(), BattleState::Victory);
        assert!(battle.rewards_granted());
        assert_eq!(battle.player.inventory.money(), money);
        assert_eq!(battle.player.unit.stats.exp, exp);

        assert!(!battle.grant_rewards(&mut env));
        assert_eq!(battle.player.inventory.money(), money);
    }

    #[test]
    fn attacking_wears_equipped_gear() {
        let fx = Fixture::new();
        let mut rng = SequenceRng::constant(0.99);
        let mut sink = MemorySink::new();
        let mut env = GameEnv::new(&mut rng, &mut sink, &fx.config, &fx.buffs, &fx.items);

        let mut battle = ready_battle(PlayerClass::Knight, "Slime");
        let mut sword = Equipment::new(ItemId(1), EquipmentKind::Weapon(WeaponKind::Sword), 1);
        sword.durability = 5;
        battle.player.inventory.add(sword);
        battle.player.equip(ItemId(1));
        let damage_with_sword = battle.player.stats().damage;

        let report = battle.attack(&mut env).unwrap();
        assert!(report.messages.iter().any(|m| m.contains("broke")));
        assert!(battle.player.inventory.weapon().is_none());
        assert!(battle.player.stats().damage < damage_with_sword);
    }

    #[test]
    fn exp_potions_cannot_be_drunk_in_battle() {
        let fx = Fixture::new();
        let mut rng = SequenceRng::constant(0.99);
        let mut sink = MemorySink::new();
        let mut env = GameEnv::new(&mut rng, &mut sink, &fx.config, &fx.buffs, &fx.items);

        let mut battle = ready_battle(PlayerClass::Archer, "Goblin");
        battle
            .player
            .inventory
            .add(Potion::new(ItemId(5), PotionType::ExpBoost, 1, 1));
        battle
            .player
            .inventory
            .add(Potion::new(ItemId(6), PotionType::Healing, 1, 1));
        battle.player.unit.take_damage(30);

        assert!(matches!(
            battle.use_item(ItemId(5), &mut env),
            Err(BattleError::ItemNotUsable { .. })
        ));
        assert_eq!(
            battle.use_item(ItemId(9), &mut env),
            Err(BattleError::ItemNotFound(ItemId(9)))
        );
        assert_eq!(Battle::usable_items(&battle.player).len(), 1);

        let report = battle.use_item(ItemId(6), &mut env).unwrap();
        assert!(report.message().contains("recovered"));
        assert!(!battle.player.inventory.contains(ItemId(6)));
        assert!(battle.player.inventory.contains(ItemId(5)));
    }

    #[test]
    fn escape_relocates_the_player() {
        let fx = Fixture::new();
        let mut rng = SequenceRng::constant(0.0);
        let mut sink = MemorySink::new();
        let mut env = GameEnv::new(&mut rng, &mut sink, &fx.config, &fx.buffs, &fx.items);

        let mut battle = ready_battle(PlayerClass::Archer, "Slime");
        let start = battle.player.unit.position;
        let report = battle.attempt_escape(&OpenField, &mut env).unwrap();
        assert_eq!(report.outcome, ActionOutcome::Escaped);
        assert_eq!(battle.state(), BattleState::Escaped);
        assert_ne!(battle.player.unit.position, start);
        assert!(start.neighbours().contains(&battle.player.unit.position));
    }

    #[test]
    fn failed_escape_passes_the_turn() {
        let fx = Fixture::new();
        let mut rng = SequenceRng::constant(0.95);
        let mut sink = MemorySink::new();
        let mut env = GameEnv::new(&mut rng, &mut sink, &fx.config, &fx.buffs, &fx.items);

        let mut battle = ready_battle(PlayerClass::Knight, "Goblin");
        let start = battle.player.unit.position;
        let report = battle.attempt_escape(&Walled, &mut env).unwrap();
        assert_eq!(report.outcome, ActionOutcome::EscapeFailed);
        assert!(battle.turn_in_progress());
        assert_eq!(battle.player.unit.position, start);

        // the gate opens on the monster's turn, which runs right away
        let monster_report = battle.update(1.0, &mut env).unwrap();
        assert_eq!(monster_report.actor, Side::Monster);
    }
}
