//! Turn-based battle state machine.
//!
//! A [`Battle`] owns one player and one monster for the duration of a fight.
//! The host drives it with [`Battle::update`] once per frame and forwards
//! player input to the action methods:
//!
//! ```text
//! BattleStart ─▶ PlayerTurn ⇄ MonsterTurn ─▶ Victory | Defeat | Escaped
//! ```
//!
//! Every resolved action closes the turn gate for `turn_delay` seconds.
//! While the gate is closed player input is rejected; once `update` has
//! counted the delay down, control passes to the other side. Monster turns
//! run inside `update`.

mod actions;
mod errors;
mod turns;

pub use errors::BattleError;

use crate::env::{EventCategory, GameEnv};
use crate::state::{AnimationState, Monster, Player, Potion};

use crate::combat::AttackResult;

/// Battle lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleState {
    BattleStart,
    PlayerTurn,
    MonsterTurn,
    Victory,
    Defeat,
    Escaped,
}

impl BattleState {
    pub const fn is_over(self) -> bool {
        matches!(
            self,
            BattleState::Victory | BattleState::Defeat | BattleState::Escaped
        )
    }
}

/// Who performed an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum Side {
    Player,
    Monster,
}

/// How an action left the battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionOutcome {
    /// The fight goes on; the other side acts next.
    Continue,
    Victory,
    Defeat,
    Escaped,
    /// The player failed to flee and lost the turn.
    EscapeFailed,
}

/// What a resolved action did, for the UI.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionReport {
    pub actor: Side,
    /// Every log line the action produced, in order.
    pub messages: Vec<String>,
    /// The damaging hit, if any.
    pub hit: Option<AttackResult>,
    pub outcome: ActionOutcome,
}

impl ActionReport {
    /// The log lines joined into one message.
    pub fn message(&self) -> String {
        self.messages.join(". ")
    }
}

/// One fight between the player and a monster.
#[derive(Clone, Debug)]
pub struct Battle {
    pub player: Player,
    pub monster: Monster,
    state: BattleState,
    /// State entered once the turn gate reopens.
    pending: Option<BattleState>,
    turn_in_progress: bool,
    timer: f32,
    rewards_granted: bool,
    turn: u32,
    log: Vec<String>,
}

impl Battle {
    pub fn new(mut player: Player, mut monster: Monster) -> Self {
        player.unit.facing = player.unit.position.facing_toward(monster.unit.position);
        monster.unit.facing = monster.unit.position.facing_toward(player.unit.position);
        player.unit.animation = AnimationState::Idle;
        monster.unit.animation = AnimationState::Idle;
        Self {
            player,
            monster,
            state: BattleState::BattleStart,
            pending: None,
            turn_in_progress: false,
            timer: 0.0,
            rewards_granted: false,
            turn: 0,
            log: Vec::new(),
        }
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// True while the turn gate is closed.
    pub fn turn_in_progress(&self) -> bool {
        self.turn_in_progress
    }

    /// Seconds until the gate reopens.
    pub fn remaining_delay(&self) -> f32 {
        self.timer.max(0.0)
    }

    pub fn rewards_granted(&self) -> bool {
        self.rewards_granted
    }

    /// Number of actions resolved so far.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Battle log, oldest first.
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Ends the battle and hands the combatants back.
    pub fn into_parts(self) -> (Player, Monster) {
        (self.player, self.monster)
    }

    /// Potions the player may drink during a fight.
    pub fn usable_items(player: &Player) -> Vec<&Potion> {
        player
            .inventory
            .potions()
            .filter(|potion| potion.potion_type.usable_in_battle())
            .collect()
    }

    /// Gives the monster's exp, money and drops to the player.
    ///
    /// Only acts after a victory and only once; returns whether anything
    /// was granted by this call.
    pub fn grant_rewards(&mut self, env: &mut GameEnv<'_>) -> bool {
        if self.state != BattleState::Victory || self.rewards_granted {
            return false;
        }
        self.rewards_granted = true;

        let exp = self.monster.exp_reward;
        let money = self.monster.money_reward;
        let levels = self.player.gain_exp(exp);
        self.player.inventory.add_money(money);

        let mut messages = vec![format!(
            "{} gains {exp} exp and {money} gold",
            self.player.name()
        )];
        if levels > 0 {
            messages.push(format!(
                "{} reached level {}",
                self.player.name(),
                self.player.level()
            ));
        }
        for item in self.monster.drops.drain(..) {
            messages.push(format!("{} picks up {}", self.player.name(), item.name()));
            self.player.inventory.add(item);
        }
        for message in &messages {
            self.record(env, EventCategory::Loot, message.clone());
        }
        true
    }

    /// Appends a line to the battle log and forwards it to the event sink.
    fn record(&mut self, env: &mut GameEnv<'_>, category: EventCategory, message: String) {
        env.log(category, &message);
        self.log.push(message);
    }
}
