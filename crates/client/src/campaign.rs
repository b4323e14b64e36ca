//! Stage-by-stage auto campaign.
//!
//! Each stage generates its monsters, the hero fights them one after the
//! other, and between fights the hero walks over an event tile, equips
//! better gear and forges duplicates.
use anyhow::{Context, Result, bail};
use game_content::Content;
use game_core::env::on_tile_event;
use game_core::state::Slot;
use game_core::{
    Battle, BattleError, BattleState, EventSink, GameEnv, Item, ItemId, MonsterGenerator, Player,
    Position, RngOracle, TileEvent, can_combine, forge,
};

use crate::config::ArenaSettings;
use crate::map::ArenaMap;
use crate::policy::{Choice, choose};

/// How a run ended.
#[derive(Clone, Debug)]
pub struct CampaignSummary {
    pub player: Player,
    pub stages_cleared: u32,
    pub victories: u32,
    pub escapes: u32,
    pub defeated: bool,
}

/// Plays every stage in `settings` with `content`.
pub fn run(
    settings: &ArenaSettings,
    content: &Content,
    rng: &mut dyn RngOracle,
    sink: &mut dyn EventSink,
) -> Result<CampaignSummary> {
    let mut env = GameEnv::new(rng, sink, &content.config, &content.buffs, &content.items);
    let map = ArenaMap::new(settings.monsters_per_stage as i32 + 2, 4);

    let mut summary = CampaignSummary {
        player: Player::new(settings.hero_name.clone(), settings.class),
        stages_cleared: 0,
        victories: 0,
        escapes: 0,
        defeated: false,
    };

    for stage in 1..=settings.stages {
        let _span = tracing::info_span!("stage", stage).entered();
        let include_boss = stage % 3 == 0;
        let monsters = MonsterGenerator::generate_stage_monsters(
            stage,
            settings.difficulty,
            settings.monsters_per_stage,
            include_boss,
            &mut env,
        )
        .with_context(|| format!("generating stage {stage}"))?;

        for monster in monsters {
            let mut player = summary.player.clone();
            player.unit.position = Position::from_grid(monster.row + 1, monster.col);

            let battle = fight(Battle::new(player, monster), &map, settings, &mut env)?;
            let state = battle.state();
            let (player, _) = battle.into_parts();
            summary.player = player;

            match state {
                BattleState::Victory => summary.victories += 1,
                BattleState::Escaped => summary.escapes += 1,
                BattleState::Defeat => {
                    summary.defeated = true;
                    tracing::info!(stage, "hero defeated");
                    return Ok(summary);
                }
                other => bail!("battle stopped in state {other}"),
            }

            let event = tile_event(summary.victories + summary.escapes);
            on_tile_event(&mut summary.player, event, stage, &mut env);
            if !summary.player.is_alive() {
                summary.defeated = true;
                tracing::info!(stage, %event, "hero fell to a tile event");
                return Ok(summary);
            }
            equip_upgrades(&mut summary.player);
            forge_duplicates(&mut summary.player);
        }

        summary.stages_cleared = stage;
        tracing::info!(
            stage,
            level = summary.player.level(),
            money = summary.player.inventory.money(),
            "stage cleared"
        );
    }

    Ok(summary)
}

/// Runs one battle to completion.
fn fight(
    mut battle: Battle,
    map: &ArenaMap,
    settings: &ArenaSettings,
    env: &mut GameEnv<'_>,
) -> Result<Battle> {
    let _span = tracing::debug_span!("battle", monster = %battle.monster.name()).entered();

    for _ in 0..settings.max_frames {
        if battle.is_over() {
            return Ok(battle);
        }
        if battle.state() != BattleState::PlayerTurn || battle.turn_in_progress() {
            battle.update(settings.frame_dt, env);
            continue;
        }

        let result = match choose(&battle) {
            Choice::Attack => battle.attack(env),
            Choice::Skill(index) => battle.use_skill(index, env),
            Choice::Item(id) => battle.use_item(id, env),
            Choice::Escape => battle.attempt_escape(map, env),
        };
        match result {
            Ok(report) => tracing::trace!(outcome = ?report.outcome, "player acted"),
            Err(BattleError::Skill(err)) => {
                tracing::debug!(%err, "skill rejected, attacking instead");
                battle.attack(env).context("fallback attack")?;
            }
            Err(err) => return Err(err).context("player action rejected"),
        }
    }

    if battle.is_over() {
        return Ok(battle);
    }
    bail!(
        "battle against {} did not finish within {} frames",
        battle.monster.name(),
        settings.max_frames
    )
}

/// Tile stepped on after the `n`-th fight.
fn tile_event(n: u32) -> TileEvent {
    match n % 3 {
        0 => TileEvent::Trap,
        1 => TileEvent::Treasure,
        _ => TileEvent::RandomBuff,
    }
}

/// Equips carried gear that beats what is worn in the same slot.
pub fn equip_upgrades(player: &mut Player) {
    let candidates: Vec<(ItemId, u32, Slot)> = player
        .inventory
        .items()
        .iter()
        .filter_map(Item::as_equipment)
        .map(|e| (e.id, e.tier, e.slot()))
        .collect();

    for (id, tier, slot) in candidates {
        let worn = player.inventory.equipped_in(slot).map(|e| e.tier);
        if worn.is_none_or(|worn| tier > worn) && player.equip(id) {
            tracing::debug!(%id, tier, ?slot, "equipped upgrade");
        }
    }
}

/// Forges every compatible pair the hero can afford.
pub fn forge_duplicates(player: &mut Player) {
    loop {
        let items = player.inventory.items();
        let pair = items.iter().enumerate().find_map(|(i, a)| {
            items[i + 1..]
                .iter()
                .find(|b| can_combine(a, b))
                .map(|b| (a.id(), b.id()))
        });
        let Some((a, b)) = pair else {
            return;
        };
        match forge(&mut player.inventory, a, b) {
            Ok(outcome) => {
                tracing::info!(item = %outcome.item.name(), cost = outcome.cost, "forged")
            }
            Err(err) => {
                tracing::debug!(%err, "forge skipped");
                return;
            }
        }
    }
}
