//! Headless arena runner.
//!
//! Loads content, seeds the RNG and plays a stage campaign with the built-in
//! policy, printing a summary at the end.
//!
//! ```bash
//! RUST_LOG=debug cargo run -p battle-client -- --class mage --seed 7 --stages 6
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use battle_client::{ArenaSettings, CampaignSummary};
use clap::Parser;
use game_content::{BUNDLED_DATA_DIR, ContentFactory};
use game_core::{Difficulty, PcgRng, PlayerClass, TracingSink};

#[derive(Debug, Parser)]
#[command(name = "arena", about = "Play a seeded auto-battle campaign")]
struct Args {
    /// Hero name
    #[arg(long)]
    name: Option<String>,

    /// knight, archer or mage
    #[arg(long)]
    class: Option<String>,

    /// easy, medium or hard
    #[arg(long)]
    difficulty: Option<String>,

    /// Number of stages; every third stage has a boss
    #[arg(long)]
    stages: Option<u32>,

    /// Regular monsters per stage
    #[arg(long)]
    monsters: Option<usize>,

    /// RNG seed (overrides ARENA_SEED)
    #[arg(long)]
    seed: Option<u64>,

    /// Content directory (overrides ARENA_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

impl Args {
    fn into_settings(self, mut settings: ArenaSettings) -> Result<ArenaSettings> {
        if let Some(name) = self.name {
            settings.hero_name = name;
        }
        if let Some(class) = self.class {
            settings.class = class
                .parse::<PlayerClass>()
                .map_err(|_| anyhow!("unknown class '{class}'"))?;
        }
        if let Some(difficulty) = self.difficulty {
            settings.difficulty = difficulty
                .parse::<Difficulty>()
                .map_err(|_| anyhow!("unknown difficulty '{difficulty}'"))?;
        }
        if let Some(stages) = self.stages {
            settings.stages = stages;
        }
        if let Some(monsters) = self.monsters {
            settings.monsters_per_stage = monsters;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        if self.data_dir.is_some() {
            settings.data_dir = self.data_dir;
        }
        Ok(settings)
    }
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = Args::parse().into_settings(ArenaSettings::from_env())?;

    let data_dir = settings
        .data_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(BUNDLED_DATA_DIR));
    let content = ContentFactory::new(&data_dir)
        .load_all()
        .with_context(|| format!("loading content from {}", data_dir.display()))?;

    let mut rng = match settings.seed {
        Some(seed) => PcgRng::seeded(seed),
        None => PcgRng::from_entropy(),
    };
    tracing::info!(
        hero = %settings.hero_name,
        class = %settings.class,
        difficulty = %settings.difficulty,
        seed = ?settings.seed,
        "starting campaign"
    );

    let summary = battle_client::run(&settings, &content, &mut rng, &mut TracingSink)?;
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &CampaignSummary) {
    let player = &summary.player;
    let stats = player.stats();
    let outcome = if summary.defeated { "fallen" } else { "standing" };

    println!(
        "{} the level {} {} is {outcome}",
        player.name(),
        player.level(),
        player.class
    );
    println!(
        "stages cleared: {}  victories: {}  escapes: {}",
        summary.stages_cleared, summary.victories, summary.escapes
    );
    println!(
        "hp {}/{}  mana {}/{}  gold {}",
        stats.hp,
        stats.max_hp,
        stats.mana,
        stats.max_mana,
        player.inventory.money()
    );
    for piece in player.inventory.equipped() {
        println!("  [{}] {} ({}%)", piece.slot(), piece.name, piece.durability);
    }
}
