//! Injected services.
//!
//! Randomness, message logging and reference data reach the engine only
//! through the [`GameEnv`] bundle, so a host can swap in a seeded RNG, a
//! recording sink or its own loot tables without touching engine code.
mod buffs;
mod events;
mod items;
mod rng;
mod world;

pub use buffs::{BuffEntry, BuffTable, BuffTableError};
pub use events::{EventCategory, EventSink, MemorySink, NullSink, TracingSink};
pub use items::{ItemCatalog, ItemTemplate};
pub use rng::{PcgRng, RngOracle, SequenceRng, pick};
pub use world::{TileEvent, TileOracle, adjacent_free_tile, on_tile_event};

use crate::config::GameConfig;

/// Services the engine needs for one call.
///
/// The RNG and sink are borrowed mutably; config and tables are shared.
pub struct GameEnv<'a> {
    pub rng: &'a mut dyn RngOracle,
    pub events: &'a mut dyn EventSink,
    pub config: &'a GameConfig,
    pub buffs: &'a BuffTable,
    pub items: &'a ItemCatalog,
}

impl<'a> GameEnv<'a> {
    pub fn new(
        rng: &'a mut dyn RngOracle,
        events: &'a mut dyn EventSink,
        config: &'a GameConfig,
        buffs: &'a BuffTable,
        items: &'a ItemCatalog,
    ) -> Self {
        Self {
            rng,
            events,
            config,
            buffs,
            items,
        }
    }

    /// Forwards a message to the event sink.
    pub fn log(&mut self, category: EventCategory, message: &str) {
        self.events.log_event(category, message);
    }
}

impl core::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameEnv")
            .field("config", self.config)
            .field("buff_entries", &self.buffs.len())
            .field("item_templates", &self.items.templates().len())
            .finish_non_exhaustive()
    }
}
