//! Append-only activity log.
//!
//! Every mutating operation on the inventory records what happened here.
//! Entries are created by the retrieval engine, the simulation clock, and
//! waste operations; they are never mutated or deleted.

use chrono::NaiveDateTime;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Kind of event an activity log entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EventType {
    /// One unit of use was retrieved from an item.
    Retrieval,
    /// An item was moved between containers.
    Transfer,
    /// An item's expiry date passed during a simulation advance.
    Expiry,
    /// An item was classified or scheduled as waste.
    Waste,
    /// An item was added to or removed from the inventory.
    Inventory,
}

/// A single append-only activity record.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActivityLogEntry {
    /// Monotonically increasing entry id.
    pub id: u64,
    /// Id of the item the event concerns.
    pub item_id: String,
    /// Who performed the action ("system" for simulation events).
    pub actor: String,
    /// Container the item was in when the event occurred.
    pub from_container: String,
    /// Destination container, for transfers.
    pub to_container: Option<String>,
    /// When the event occurred, in simulated or caller-supplied time.
    pub timestamp: NaiveDateTime,
    /// Kind of event.
    pub event_type: EventType,
    /// Human-readable description.
    pub description: String,
}

/// Append-only sink of [`ActivityLogEntry`] values.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActivityLog {
    entries: Vec<ActivityLogEntry>,
    next_id: u64,
}

impl ActivityLog {
    /// Creates a new empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry, assigning it the next id, and returns a reference
    /// to the stored record.
    #[allow(clippy::too_many_arguments)]
    pub fn record(
        &mut self,
        item_id: impl Into<String>,
        actor: impl Into<String>,
        from_container: impl Into<String>,
        to_container: Option<String>,
        timestamp: NaiveDateTime,
        event_type: EventType,
        description: impl Into<String>,
    ) -> &ActivityLogEntry {
        let entry = ActivityLogEntry {
            id: self.next_id,
            item_id: item_id.into(),
            actor: actor.into(),
            from_container: from_container.into(),
            to_container,
            timestamp,
            event_type,
            description: description.into(),
        };
        self.next_id += 1;
        self.entries.push(entry);
        self.entries.last().expect("entry just pushed")
    }

    /// Returns all entries in append order.
    pub fn entries(&self) -> &[ActivityLogEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns all entries for the given item.
    pub fn for_item(&self, item_id: &str) -> Vec<&ActivityLogEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.item_id == item_id)
            .collect()
    }

    /// Returns all entries of the given event type.
    pub fn of_type(&self, event_type: EventType) -> Vec<&ActivityLogEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.event_type == event_type)
            .collect()
    }

    /// Returns all entries with a timestamp in `[start, end]`.
    pub fn in_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> Vec<&ActivityLogEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.timestamp >= start && entry.timestamp <= end)
            .collect()
    }

    /// Returns the most recent `n` entries, newest first.
    pub fn latest(&self, n: usize) -> Vec<&ActivityLogEntry> {
        self.entries.iter().rev().take(n).collect()
    }
}
