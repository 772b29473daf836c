#[cfg(test)]
#[path = "../../tests/unit/archipelago/history_test.rs"]
mod history_test;

use crate::utils::{Float, GenericResult};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A single migration event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MigrationEntry {
    /// Seconds elapsed since archipelago creation.
    pub timestamp: Float,
    /// Index of the migration round.
    pub round: usize,
    /// Source island index.
    pub source: usize,
    /// Destination island index.
    pub destination: usize,
    /// Amount of individuals inserted into destination.
    pub count: usize,
}

/// An ordered log of migration events.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MigrationHistory {
    entries: Vec<MigrationEntry>,
}

impl MigrationHistory {
    /// Returns entries in insertion order.
    pub fn entries(&self) -> &[MigrationEntry] {
        self.entries.as_slice()
    }

    /// Returns amount of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes history into pretty printed json.
    pub fn to_json(&self) -> GenericResult<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    pub(crate) fn push(&mut self, entry: MigrationEntry) {
        self.entries.push(entry);
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Display for MigrationHistory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.entries.iter().try_for_each(|entry| {
            writeln!(
                f,
                "{:.6} #{}: {} -> {} ({})",
                entry.timestamp, entry.round, entry.source, entry.destination, entry.count
            )
        })
    }
}
