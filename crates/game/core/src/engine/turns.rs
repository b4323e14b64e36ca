//! Frame-driven turn flow: battle start, the turn gate and monster turns.

use crate::combat::{AttackResult, AttackerSide, CritTier, resolve_attack, try_action};
use crate::env::{EventCategory, GameEnv, pick};
use crate::state::{AnimationState, BossPhase, Buff, BuffTarget, SkillKind};
use crate::stats::MonsterKind;

use super::{ActionOutcome, ActionReport, Battle, BattleState, Side};

/// Animation a unit plays while using a skill of `kind`.
pub(super) fn skill_animation(kind: SkillKind) -> AnimationState {
    match kind {
        SkillKind::Attack => AnimationState::AttackSkill,
        SkillKind::Status => AnimationState::StatusSkill,
        SkillKind::AttackStatus => AnimationState::AttackStatusSkill,
    }
}

/// Suffix appended to a hit message.
pub(super) fn crit_suffix(crit: CritTier) -> &'static str {
    match crit {
        CritTier::Normal => "",
        CritTier::Critical => " (critical hit!)",
        CritTier::Ultimate => " (ULTIMATE hit!)",
    }
}

pub(super) fn expiry_messages(owner: &str, expired: &[Buff]) -> Vec<String> {
    expired
        .iter()
        .map(|buff| format!("{} on {owner} wore off", buff.name))
        .collect()
}

impl Battle {
    /// Advances the battle by `dt` seconds.
    ///
    /// Leaves `BattleStart` on the first call, counts the turn gate down and
    /// runs the monster's turn once the gate is open on `MonsterTurn`.
    /// Returns the monster's report when it acted during this call.
    pub fn update(&mut self, dt: f32, env: &mut GameEnv<'_>) -> Option<ActionReport> {
        if self.state.is_over() {
            return None;
        }

        if self.state == BattleState::BattleStart {
            self.begin(env);
        }

        if self.turn_in_progress {
            self.timer -= dt;
            if self.timer > 0.0 {
                return None;
            }
            self.open_gate();
        }

        if self.state == BattleState::MonsterTurn && !self.turn_in_progress {
            return Some(self.monster_turn(env));
        }
        None
    }

    fn begin(&mut self, env: &mut GameEnv<'_>) {
        let player_first = self.player.stats().speed >= self.monster.stats().speed;
        self.state = if player_first {
            BattleState::PlayerTurn
        } else {
            BattleState::MonsterTurn
        };
        let first = if player_first {
            self.player.name().to_owned()
        } else {
            self.monster.name().to_owned()
        };
        let message = format!(
            "{} engages {}! {first} moves first",
            self.player.name(),
            self.monster.name()
        );
        tracing::debug!(state = %self.state, "battle started");
        self.record(env, EventCategory::Battle, message);
    }

    /// Closes the turn gate; `next` is entered once the delay elapses.
    pub(super) fn close_gate(&mut self, next: BattleState, env: &GameEnv<'_>) {
        self.turn_in_progress = true;
        self.timer = env.config.turn_delay;
        self.pending = Some(next);
    }

    fn open_gate(&mut self) {
        self.turn_in_progress = false;
        self.timer = 0.0;
        if let Some(next) = self.pending.take() {
            self.state = next;
        }
        self.player.unit.animation = idle_unless_dead(self.player.unit.animation);
        self.monster.unit.animation = idle_unless_dead(self.monster.unit.animation);
    }

    /// Logs an action's messages and wraps them into a report.
    pub(super) fn report(
        &mut self,
        actor: Side,
        category: EventCategory,
        messages: Vec<String>,
        hit: Option<AttackResult>,
        outcome: ActionOutcome,
        env: &mut GameEnv<'_>,
    ) -> ActionReport {
        for message in &messages {
            self.record(env, category, message.clone());
        }
        ActionReport {
            actor,
            messages,
            hit,
            outcome,
        }
    }

    fn monster_turn(&mut self, env: &mut GameEnv<'_>) -> ActionReport {
        self.turn += 1;
        let _span = tracing::debug_span!("monster_turn", turn = self.turn).entered();
        let monster_name = self.monster.name().to_owned();
        let player_name = self.player.name().to_owned();
        let mut messages = Vec::new();

        if let Some(action) = try_action(&mut self.monster, &mut self.player, env) {
            messages.push(action.describe(&monster_name, &player_name));
        }

        let skill_chance =
            if self.monster.kind == MonsterKind::Boss && self.monster.phase() == BossPhase::Two {
                env.config.boss_phase_two_skill_chance
            } else {
                env.config.monster_skill_chance
            };
        let usable = self.monster.unit.usable_skills();
        let chosen = if !usable.is_empty() && env.rng.chance(skill_chance) {
            pick(env.rng, &usable).copied()
        } else {
            None
        };

        let mut hit = None;
        let mut used_skill = None;
        if let Some(index) = chosen {
            match self.monster.unit.begin_skill(index) {
                Ok(skill) => {
                    used_skill = Some(index);
                    self.monster.unit.animation = skill_animation(skill.kind);
                    let mut line = format!("{monster_name} uses {}", skill.name);
                    if skill.deals_damage() {
                        let attacker_damage = self.monster.stats().damage + skill.damage;
                        let result = self.monster_hit(attacker_damage, env);
                        line.push_str(&format!(
                            " for {} damage{}",
                            result.damage,
                            crit_suffix(result.crit)
                        ));
                        hit = Some(result);
                    }
                    messages.push(line);

                    if let Some(template) = &skill.buff {
                        let buff = template.instantiate();
                        match template.target {
                            BuffTarget::Opponent if self.player.is_alive() => {
                                messages.push(format!("{player_name} is afflicted by {}", buff.name));
                                self.player.unit.add_buff(buff);
                            }
                            BuffTarget::Opponent => {}
                            BuffTarget::Caster => {
                                messages.push(format!("{monster_name} gains {}", buff.name));
                                self.monster.unit.add_buff(buff);
                            }
                        }
                    }
                }
                Err(err) => tracing::warn!(%err, "monster picked an unusable skill"),
            }
        }

        if used_skill.is_none() {
            self.monster.unit.animation = AnimationState::Attack;
            let attacker_damage = self.monster.stats().damage;
            let result = self.monster_hit(attacker_damage, env);
            messages.push(format!(
                "{monster_name} attacks {player_name} for {} damage{}",
                result.damage,
                crit_suffix(result.crit)
            ));
            hit = Some(result);
        }

        if !self.player.is_alive() {
            messages.push(format!("{player_name} has fallen"));
            self.state = BattleState::Defeat;
            self.pending = None;
            self.turn_in_progress = false;
            return self.report(
                Side::Monster,
                EventCategory::Battle,
                messages,
                hit,
                ActionOutcome::Defeat,
                env,
            );
        }

        let expired = self.monster.unit.end_turn(used_skill);
        messages.extend(expiry_messages(&monster_name, &expired));
        self.close_gate(BattleState::PlayerTurn, env);
        self.report(
            Side::Monster,
            EventCategory::Combat,
            messages,
            hit,
            ActionOutcome::Continue,
            env,
        )
    }

    /// Resolves a monster hit on the player and applies it.
    fn monster_hit(&mut self, attacker_damage: f64, env: &mut GameEnv<'_>) -> AttackResult {
        let result = resolve_attack(
            AttackerSide::Monster,
            attacker_damage,
            self.monster.stats().critical_rate,
            self.player.stats().defense,
            env.rng,
        );
        self.player.unit.take_damage(result.damage);
        result
    }
}

fn idle_unless_dead(animation: AnimationState) -> AnimationState {
    if animation == AnimationState::Death {
        animation
    } else {
        AnimationState::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{BuffTable, ItemCatalog, MemorySink, SequenceRng};
    use crate::generation::MonsterGenerator;
    use crate::state::Player;
    use crate::stats::{Difficulty, PlayerClass};

    fn battle(monster: &str) -> Battle {
        let player = Player::new("Aldric", PlayerClass::Knight);
        let monster =
            MonsterGenerator::create_monster(monster, 1, None, Difficulty::Medium, 0, 1).unwrap();
        Battle::new(player, monster)
    }

    #[test]
    fn faster_monster_opens_and_acts_immediately() {
        let config = GameConfig::default();
        let buffs = BuffTable::builtin();
        let items = ItemCatalog::builtin();
        // steal fails, no skill, no crit, 1.0 variation
        let mut rng = SequenceRng::new([0.99, 0.99, 0.99, 0.5]);
        let mut sink = MemorySink::new();
        let mut env = GameEnv::new(&mut rng, &mut sink, &config, &buffs, &items);

        // goblin speed 11 > knight speed 8
        let mut battle = battle("Goblin");
        let report = battle.update(0.0, &mut env).unwrap();
        assert_eq!(report.actor, Side::Monster);
        assert_eq!(report.outcome, ActionOutcome::Continue);
        assert!(battle.turn_in_progress());
        assert_eq!(battle.state(), BattleState::MonsterTurn);

        assert!(battle.update(0.25, &mut env).is_none());
        assert_eq!(battle.state(), BattleState::MonsterTurn);
        assert!(battle.update(0.4, &mut env).is_none());
        assert_eq!(battle.state(), BattleState::PlayerTurn);
        assert!(!battle.turn_in_progress());
    }

    #[test]
    fn equal_speed_favours_the_player() {
        let config = GameConfig::instant();
        let buffs = BuffTable::builtin();
        let items = ItemCatalog::builtin();
        let mut rng = SequenceRng::constant(0.5);
        let mut sink = MemorySink::new();
        let mut env = GameEnv::new(&mut rng, &mut sink, &config, &buffs, &items);

        let mut battle = battle("Slime");
        battle.monster.unit.stats.speed = battle.player.stats().speed;
        assert!(battle.update(0.016, &mut env).is_none());
        assert_eq!(battle.state(), BattleState::PlayerTurn);
        assert_eq!(battle.log().len(), 1);
        assert!(sink.contains("moves first"));
    }

    #[test]
    fn player_death_ends_the_battle() {
        let config = GameConfig::default();
        let buffs = BuffTable::builtin();
        let items = ItemCatalog::builtin();
        let mut rng = SequenceRng::new([0.99, 0.99, 0.99, 0.5]);
        let mut sink = MemorySink::new();
        let mut env = GameEnv::new(&mut rng, &mut sink, &config, &buffs, &items);

        let mut battle = battle("Goblin");
        battle.player.unit.stats.hp = 1;
        let report = battle.update(0.0, &mut env).unwrap();
        assert_eq!(report.outcome, ActionOutcome::Defeat);
        assert_eq!(battle.state(), BattleState::Defeat);
        assert!(!battle.turn_in_progress());
        assert!(battle.update(1.0, &mut env).is_none());
        assert_eq!(battle.player.unit.animation, AnimationState::Death);
    }
}
