//! Procedural monster generation.
//!
//! Stats are built from the kind's table row in a fixed order: level flats,
//! prefix factors, difficulty factor. Skills come from the kind's learning
//! table; drops from the item catalog.

use strum::{EnumCount, IntoEnumIterator};

use crate::env::{EventCategory, GameEnv, pick};
use crate::state::{Item, Monster};
use crate::stats::{
    Archetype, BaseStats, BonusStack, Difficulty, MonsterKind, Prefix, UnitStats,
};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("unknown monster type `{0}`")]
    UnknownMonsterType(String),
}

impl crate::error::GameError for GenerationError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        crate::error::ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownMonsterType(_) => "GENERATION_UNKNOWN_MONSTER_TYPE",
        }
    }
}

/// Chance that a regular monster carries a catalog drop.
pub const DROP_CHANCE: f64 = 0.3;

/// Tier of the equipment a boss always drops.
pub const BOSS_DROP_TIER: u32 = 3;

/// Builds monsters for a stage.
#[derive(Clone, Copy, Debug, Default)]
pub struct MonsterGenerator;

impl MonsterGenerator {
    /// Builds one monster of `type_name` (case-insensitive kind name).
    ///
    /// The monster knows every skill its kind learns at or below `level`
    /// and carries no drops.
    pub fn create_monster(
        type_name: &str,
        level: u32,
        prefix: Option<Prefix>,
        difficulty: Difficulty,
        row: i32,
        col: i32,
    ) -> Result<Monster, GenerationError> {
        let kind = type_name
            .trim()
            .parse::<MonsterKind>()
            .map_err(|_| GenerationError::UnknownMonsterType(type_name.to_owned()))?;
        let level = level.max(1);
        let leveled = kind.base_stats(level);

        let mut hp = BonusStack::new();
        let mut attack = BonusStack::new();
        let mut defense = BonusStack::new();
        let mut critical_rate = BonusStack::new();
        if let Some(prefix) = prefix {
            let effect = prefix.effect();
            hp = hp.scale(effect.hp);
            attack = attack.scale(effect.attack);
            defense = defense.scale(effect.defense);
            critical_rate = critical_rate.flat(effect.critical_rate);
        }
        hp = hp.scale(difficulty.factor());
        attack = attack.scale(difficulty.factor());

        let scaled = BaseStats {
            hp: hp.apply_rounded(leveled.hp).max(1),
            damage: attack.apply(leveled.damage),
            defense: defense.apply(leveled.defense),
            speed: leveled.speed,
            critical_rate: critical_rate.apply(leveled.critical_rate),
            mana: leveled.mana,
        };

        let name = match prefix {
            Some(prefix) => format!("{prefix} {kind}"),
            None => kind.to_string(),
        };
        let mut monster =
            Monster::new(name, kind, UnitStats::from_base(&scaled, level), difficulty).at(row, col);
        monster.prefix = prefix;
        for skill in kind.skills_up_to(level) {
            monster.unit.learn_skill(skill);
        }

        tracing::debug!(
            monster = %monster.name(),
            level,
            hp = scaled.hp,
            damage = scaled.damage,
            "created monster"
        );
        Ok(monster)
    }

    /// Level of a regular monster on `stage`: `stage × 2 + uniform(0..=2)`.
    pub fn regular_level(stage: u32, env: &mut GameEnv<'_>) -> u32 {
        let jitter = env.rng.range_i32(0, 2).max(0) as u32;
        (stage * 2 + jitter).max(1)
    }

    /// Level of the stage boss: `stage × 3 + 2`.
    pub const fn boss_level(stage: u32) -> u32 {
        stage * 3 + 2
    }

    /// Rolls the optional prefix for a regular monster on `stage`.
    pub fn roll_prefix(stage: u32, env: &mut GameEnv<'_>) -> Option<Prefix> {
        if !env.rng.chance(env.config.prefix.chance(stage)) {
            return None;
        }
        Prefix::iter().nth(env.rng.index(Prefix::COUNT))
    }

    /// Populates a stage with `count` regular monsters plus, when
    /// `include_boss` is set, one unprefixed boss.
    ///
    /// Regular monsters are placed at `(0, i)`, the boss after them; hosts
    /// reposition them with [`Monster::at`].
    pub fn generate_stage_monsters(
        stage: u32,
        difficulty: Difficulty,
        count: usize,
        include_boss: bool,
        env: &mut GameEnv<'_>,
    ) -> Result<Vec<Monster>, GenerationError> {
        let _span = tracing::debug_span!("generate_stage", stage, count, include_boss).entered();
        let mut monsters = Vec::with_capacity(count + usize::from(include_boss));

        for i in 0..count {
            let kind = pick(env.rng, &MonsterKind::REGULAR)
                .copied()
                .unwrap_or(MonsterKind::Goblin);
            let level = Self::regular_level(stage, env);
            let prefix = Self::roll_prefix(stage, env);
            let mut monster =
                Self::create_monster(kind.as_ref(), level, prefix, difficulty, 0, i as i32)?;

            if env.rng.chance(DROP_CHANCE) {
                let tier = 1 + level / 5;
                if let Some(item) = env.items.random_drop(env.rng, tier) {
                    monster.drops.push(item);
                }
            }
            env.log(
                EventCategory::Generation,
                &format!("A level {} {} appears", monster.level(), monster.name()),
            );
            monsters.push(monster);
        }

        if include_boss {
            let level = Self::boss_level(stage);
            let mut boss = Self::create_monster(
                MonsterKind::Boss.as_ref(),
                level,
                None,
                difficulty,
                0,
                count as i32,
            )?;
            if let Some(equipment) = env.items.random_equipment(env.rng, BOSS_DROP_TIER) {
                boss.drops.push(Item::Equipment(equipment));
            }
            env.log(
                EventCategory::Generation,
                &format!("The level {level} {} awaits", boss.name()),
            );
            monsters.push(boss);
        }

        Ok(monsters)
    }
}
