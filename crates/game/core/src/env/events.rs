//! Event sink for human-readable game messages.
//!
//! The engine never prints. Every resolved action, loot drop and forge
//! result is handed to an [`EventSink`]; the host decides where it goes.

/// Coarse grouping of game messages.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EventCategory {
    Battle,
    Combat,
    Skill,
    Item,
    Loot,
    Forge,
    World,
    Generation,
}

/// Receives game messages.
pub trait EventSink {
    fn log_event(&mut self, category: EventCategory, message: &str);
}

/// Forwards every message to `tracing` at info level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn log_event(&mut self, category: EventCategory, message: &str) {
        tracing::info!(target: "game_core::events", category = %category, "{message}");
    }
}

/// Discards every message.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn log_event(&mut self, _category: EventCategory, _message: &str) {}
}

/// Records messages in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemorySink {
    events: Vec<(EventCategory, String)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[(EventCategory, String)] {
        &self.events
    }

    pub fn messages(&self, category: EventCategory) -> impl Iterator<Item = &str> {
        self.events
            .iter()
            .filter(move |(c, _)| *c == category)
            .map(|(_, m)| m.as_str())
    }

    /// True if any recorded message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.events.iter().any(|(_, m)| m.contains(needle))
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for MemorySink {
    fn log_event(&mut self, category: EventCategory, message: &str) {
        self.events.push((category, message.to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_filters_by_category() {
        let mut sink = MemorySink::new();
        sink.log_event(EventCategory::Combat, "Goblin hits for 7");
        sink.log_event(EventCategory::Loot, "Found 30 gold");

        assert_eq!(sink.events().len(), 2);
        assert_eq!(
            sink.messages(EventCategory::Loot).collect::<Vec<_>>(),
            vec!["Found 30 gold"]
        );
        assert!(sink.contains("hits for"));
        sink.clear();
        assert!(sink.events().is_empty());
    }

    #[test]
    fn category_names_are_snake_case() {
        assert_eq!(EventCategory::Generation.to_string(), "generation");
    }
}
