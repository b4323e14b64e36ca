//! Headless arena client.
//!
//! Drives `game-core` battles without a renderer: a simple policy picks the
//! player's actions, [`campaign::run`] strings stages of fights together, and
//! the `arena` binary wires in content, logging and CLI flags.

pub mod campaign;
pub mod config;
pub mod map;
pub mod policy;

pub use campaign::{CampaignSummary, run};
pub use config::ArenaSettings;
pub use map::ArenaMap;
pub use policy::{Choice, choose};
