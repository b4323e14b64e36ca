//! State shared by players and monsters.

use crate::stats::{StatDelta, UnitStats};

use super::abilities::{Skill, SkillError};
use super::common::{AnimationState, Facing, Position};
use super::status::{Buff, BuffId};

/// A combatant: stats, buffs, skills and renderer-facing fields.
///
/// HP only changes through [`Unit::take_damage`], [`Unit::heal`] and
/// [`Unit::revive`], which keep `0 ≤ hp ≤ max_hp` and flip the alive flag
/// exactly once per death.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub name: String,
    pub stats: UnitStats,
    pub skills: Vec<Skill>,
    pub animation: AnimationState,
    pub facing: Facing,
    pub position: Position,
    alive: bool,
    buffs: Vec<Buff>,
    next_buff_id: u32,
}

impl Unit {
    pub fn new(name: impl Into<String>, stats: UnitStats) -> Self {
        Self {
            name: name.into(),
            stats,
            skills: Vec::new(),
            animation: AnimationState::Idle,
            facing: Facing::default(),
            position: Position::default(),
            alive: true,
            buffs: Vec::new(),
            next_buff_id: 1,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn level(&self) -> u32 {
        self.stats.level
    }

    pub fn hp_ratio(&self) -> f64 {
        self.stats.hp_ratio()
    }

    pub fn mana_ratio(&self) -> f64 {
        self.stats.mana_ratio()
    }

    // ===== resources =====

    /// Lowers HP, floored at 0. Returns true only for the killing blow.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if !self.alive {
            return false;
        }
        self.stats.hp = (self.stats.hp - amount.max(0)).max(0);
        if self.stats.hp == 0 {
            self.alive = false;
            self.animation = AnimationState::Death;
            true
        } else {
            self.animation = AnimationState::Hurt;
            false
        }
    }

    /// Restores HP up to MaxHP. Returns the amount actually healed.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if !self.alive {
            return 0;
        }
        let before = self.stats.hp;
        self.stats.hp = (self.stats.hp + amount.max(0)).min(self.stats.max_hp);
        self.stats.hp - before
    }

    /// Restores mana up to MaxMana. Returns the amount actually restored.
    pub fn restore_mana(&mut self, amount: i32) -> i32 {
        let before = self.stats.mana;
        self.stats.mana = (self.stats.mana + amount.max(0)).min(self.stats.max_mana);
        self.stats.mana - before
    }

    pub fn spend_mana(&mut self, amount: i32) -> bool {
        if self.stats.mana < amount {
            return false;
        }
        self.stats.mana -= amount;
        true
    }

    /// Brings a dead unit back with `hp` (clamped to `1..=max_hp`).
    pub fn revive(&mut self, hp: i32) {
        self.stats.hp = hp.clamp(1, self.stats.max_hp.max(1));
        self.alive = true;
        self.animation = AnimationState::Idle;
    }

    // ===== buffs =====

    pub fn buffs(&self) -> &[Buff] {
        &self.buffs
    }

    /// Assigns an id, applies the buff to this unit's stats and keeps it.
    pub fn add_buff(&mut self, mut buff: Buff) -> BuffId {
        let id = BuffId(self.next_buff_id);
        self.next_buff_id += 1;
        buff.id = id;
        buff.apply(&mut self.stats);
        self.buffs.push(buff);
        id
    }

    /// Removes one buff early. False if no such buff.
    pub fn remove_buff(&mut self, id: BuffId) -> bool {
        let Some(index) = self.buffs.iter().position(|b| b.id == id) else {
            return false;
        };
        let mut buff = self.buffs.remove(index);
        buff.remove(&mut self.stats);
        true
    }

    /// Advances every buff by one turn and discards the expired ones.
    /// Returns the buffs that just ran out.
    pub fn tick_buffs(&mut self) -> Vec<Buff> {
        for buff in &mut self.buffs {
            buff.update_after_turn();
        }
        let (mut expired, active): (Vec<Buff>, Vec<Buff>) =
            self.buffs.drain(..).partition(Buff::is_expired);
        self.buffs = active;
        for buff in &mut expired {
            buff.remove(&mut self.stats);
        }
        expired
    }

    /// Removes every buff, subtracting its deltas.
    pub fn clear_buffs(&mut self) {
        for mut buff in self.buffs.drain(..) {
            buff.remove(&mut self.stats);
        }
    }

    /// Net delta of all currently applied buffs.
    pub fn buff_totals(&self) -> StatDelta {
        self.buffs
            .iter()
            .filter(|b| b.is_applied())
            .map(|b| b.delta)
            .sum()
    }

    // ===== skills =====

    /// Appends a skill unless one with the same name is already known.
    pub fn learn_skill(&mut self, skill: Skill) -> bool {
        if self.skills.iter().any(|s| s.name == skill.name) {
            return false;
        }
        self.skills.push(skill);
        true
    }

    pub fn check_skill(&self, index: usize) -> Result<&Skill, SkillError> {
        let skill = self
            .skills
            .get(index)
            .ok_or(SkillError::UnknownSkill { index })?;
        skill.check_ready(self.stats.mana)?;
        Ok(skill)
    }

    /// Indices of skills that can be used right now.
    pub fn usable_skills(&self) -> Vec<usize> {
        (0..self.skills.len())
            .filter(|&i| self.check_skill(i).is_ok())
            .collect()
    }

    /// Spends the skill's mana and starts its cooldown.
    ///
    /// Returns a snapshot of the skill as it was cast.
    pub fn begin_skill(&mut self, index: usize) -> Result<Skill, SkillError> {
        let cast = self.check_skill(index)?.clone();
        self.stats.mana -= cast.mana_cost;
        if let Some(skill) = self.skills.get_mut(index) {
            skill.start_cooldown();
        }
        Ok(cast)
    }

    /// Ticks every skill cooldown except `except`.
    pub fn tick_cooldowns(&mut self, except: Option<usize>) {
        for (i, skill) in self.skills.iter_mut().enumerate() {
            if Some(i) != except {
                skill.tick_cooldown();
            }
        }
    }

    pub fn reduce_cooldowns(&mut self, turns: u32) {
        for skill in &mut self.skills {
            skill.reduce_cooldown(turns);
        }
    }

    /// End-of-turn bookkeeping for the unit that just acted.
    ///
    /// Returns buffs that expired this turn.
    pub fn end_turn(&mut self, used_skill: Option<usize>) -> Vec<Buff> {
        self.tick_cooldowns(used_skill);
        self.tick_buffs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::types::status::BuffType;
    use crate::stats::BaseStats;

    fn unit() -> Unit {
        Unit::new(
            "Dummy",
            UnitStats::from_base(&BaseStats::new(50, 10.0, 5.0, 5.0, 0.1, 20), 1),
        )
    }

    #[test]
    fn killing_blow_reported_once() {
        let mut u = unit();
        assert!(!u.take_damage(20));
        assert_eq!(u.animation, AnimationState::Hurt);
        assert!(u.take_damage(100));
        assert_eq!(u.stats.hp, 0);
        assert!(!u.take_damage(5));
        assert!(!u.is_alive());
        assert_eq!(u.heal(10), 0);
    }

    #[test]
    fn heal_and_mana_clamp_to_maximum() {
        let mut u = unit();
        u.take_damage(10);
        assert_eq!(u.heal(25), 10);
        assert!(u.spend_mana(15));
        assert!(!u.spend_mana(15));
        assert_eq!(u.restore_mana(100), 15);
    }

    #[test]
    fn expired_buffs_leave_stats_unchanged() {
        let mut u = unit();
        let before = u.stats.clone();
        u.add_buff(Buff::of_type(BuffType::Defense, 6.0, 2, 1));
        u.add_buff(Buff::of_type(BuffType::Attack, -3.0, 3, 1));
        assert_eq!(u.stats.defense, 11.0);
        assert_eq!(u.buff_totals(), StatDelta::new(-3.0, 6.0, 0.0, 0.0));

        assert!(u.tick_buffs().is_empty());
        assert_eq!(u.tick_buffs().len(), 1);
        assert_eq!(u.tick_buffs().len(), 1);
        assert!(u.buffs().is_empty());
        assert_eq!(u.stats, before);
    }

    #[test]
    fn buff_ids_are_unique_per_unit() {
        let mut u = unit();
        let a = u.add_buff(Buff::of_type(BuffType::Speed, 1.0, 3, 1));
        let b = u.add_buff(Buff::of_type(BuffType::Speed, 1.0, 3, 1));
        assert_ne!(a, b);
        assert!(u.remove_buff(a));
        assert!(!u.remove_buff(a));
        assert_eq!(u.stats.speed, 6.0);
        u.clear_buffs();
        assert_eq!(u.stats.speed, 5.0);
    }

    #[test]
    fn casting_skips_cooldown_tick_on_the_same_turn() {
        let mut u = unit();
        u.learn_skill(Skill::attack("Bone Throw", 8.0, 6, 2));
        u.learn_skill(Skill::attack("Quick Stab", 6.0, 5, 2));

        u.begin_skill(1).ok();
        let cast = u.begin_skill(0).map(|s| s.name);
        assert_eq!(cast.as_deref(), Ok("Bone Throw"));
        assert_eq!(u.stats.mana, 9);

        u.end_turn(Some(0));
        assert_eq!(u.skills[0].cooldown, 2);
        assert_eq!(u.skills[1].cooldown, 1);
        assert!(matches!(
            u.check_skill(0),
            Err(SkillError::OnCooldown { .. })
        ));
        assert!(matches!(
            u.check_skill(7),
            Err(SkillError::UnknownSkill { index: 7 })
        ));
    }

    #[test]
    fn revive_restores_alive_flag() {
        let mut u = unit();
        u.take_damage(999);
        u.revive(25);
        assert!(u.is_alive());
        assert_eq!(u.stats.hp, 25);
    }
}
