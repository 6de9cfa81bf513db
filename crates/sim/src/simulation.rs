//! Simulation clock.
//!
//! Owns the virtual "current time" as an hour offset from a caller-supplied
//! epoch, advances it in discrete steps, applies per-day item usage, and
//! sweeps for expiries as time passes. All advances are monotonic; the
//! elapsed-hours counter never decreases.

use crate::inventory::Inventory;
use crate::activity::EventType;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use stowage_core::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default speed multiplier applied on construction and reset.
pub const DEFAULT_SPEED: u32 = 10;

/// Simulation bookkeeping: one process-wide instance per clock.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationState {
    /// Whether the simulation is running.
    pub running: bool,
    /// Speed multiplier (informational; advances are explicit).
    pub speed: u32,
    /// Virtual hours elapsed since the epoch.
    pub elapsed_hours: i64,
    /// Whether expiry sweeps run automatically on advance.
    pub auto_expiry: bool,
    /// Cumulative count of items that expired during advances.
    pub expired_items: u64,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            running: false,
            speed: DEFAULT_SPEED,
            elapsed_hours: 0,
            auto_expiry: true,
            expired_items: 0,
        }
    }
}

/// An item that expired during an advance.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExpiredItem {
    /// Item id.
    pub item_id: String,
    /// Display name.
    pub name: String,
    /// The expiry date that was crossed.
    pub expiry_date: NaiveDate,
}

/// Remaining uses of an item consumed during an advance.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ItemUsage {
    /// Item id.
    pub item_id: String,
    /// Display name.
    pub name: String,
    /// Uses remaining after the advance (may be negative).
    pub remaining_uses: i32,
}

/// Change report for a plain time advance.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AdvanceReport {
    /// Simulated time after the advance.
    pub new_time: NaiveDateTime,
    /// Hours advanced.
    pub hours: i64,
    /// Items whose expiry date was crossed by this advance.
    pub items_expired: Vec<ExpiredItem>,
}

/// Change report for an advance with daily item usage.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UsageReport {
    /// Simulated time after the advance.
    pub new_time: NaiveDateTime,
    /// Days advanced.
    pub days: u32,
    /// Remaining uses per consumed item (last day's value).
    pub items_used: Vec<ItemUsage>,
    /// Items whose expiry date was crossed.
    pub items_expired: Vec<ExpiredItem>,
    /// Items whose usage limit crossed from available to depleted.
    pub items_depleted: Vec<ItemUsage>,
}

/// The simulation clock: virtual time as an offset from an external epoch.
///
/// The epoch (day-zero "real now") is supplied by the caller; the clock only
/// ever manipulates the hour offset, so two clocks built from the same epoch
/// replay identically.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationClock {
    state: SimulationState,
    epoch: NaiveDateTime,
}

impl SimulationClock {
    /// Creates a stopped clock at the given epoch.
    pub fn new(epoch: NaiveDateTime) -> Self {
        Self {
            state: SimulationState::default(),
            epoch,
        }
    }

    /// Returns the simulation state.
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Returns the epoch the clock was constructed with.
    pub fn epoch(&self) -> NaiveDateTime {
        self.epoch
    }

    /// Returns the current simulated time.
    pub fn current_time(&self) -> NaiveDateTime {
        self.epoch + Duration::hours(self.state.elapsed_hours)
    }

    /// Returns the current simulated date.
    pub fn current_date(&self) -> NaiveDate {
        self.current_time().date()
    }

    /// Starts (or re-parameterizes) the simulation. Idempotent.
    pub fn start(&mut self, speed: u32, auto_expiry: bool) {
        self.state.running = true;
        self.state.speed = speed;
        self.state.auto_expiry = auto_expiry;
    }

    /// Pauses the simulation. No-op when already stopped.
    pub fn pause(&mut self) {
        self.state.running = false;
    }

    /// Resets the simulation bookkeeping to defaults. Inventory data is
    /// untouched; restoring items and containers is the caller's concern.
    pub fn reset(&mut self) {
        self.state = SimulationState::default();
    }

    /// Advances virtual time by the given number of hours.
    ///
    /// Valid whether or not the simulation is running. When auto-expiry is
    /// enabled, every item whose expiry instant falls strictly inside the
    /// window `(now, now + hours]` is counted once and logged once; because
    /// later advances start where this one ended, monotonic callers never
    /// see an item re-logged.
    pub fn advance(&mut self, inv: &mut Inventory, hours: i64) -> Result<AdvanceReport> {
        if hours <= 0 {
            return Err(Error::InvalidDuration(format!(
                "advance must be positive, got {} hours",
                hours
            )));
        }

        let window_start = self.current_time();
        let window_end = window_start + Duration::hours(hours);
        self.state.elapsed_hours += hours;

        let mut items_expired = Vec::new();
        if self.state.auto_expiry {
            items_expired = self.sweep_expiries(inv, window_start, window_end);
        }

        log::debug!(
            "advanced {}h to {} ({} expirations)",
            hours,
            window_end,
            items_expired.len()
        );

        Ok(AdvanceReport {
            new_time: window_end,
            hours,
            items_expired,
        })
    }

    /// Advances virtual time to a target instant.
    ///
    /// Fails with [`Error::InvalidDuration`] unless the target is strictly
    /// in the future and at least one whole hour ahead.
    pub fn advance_to(&mut self, inv: &mut Inventory, target: NaiveDateTime) -> Result<AdvanceReport> {
        let now = self.current_time();
        if target <= now {
            return Err(Error::InvalidDuration(format!(
                "target {} is not in the future of {}",
                target, now
            )));
        }

        let hours = (target - now).num_hours();
        if hours == 0 {
            return Err(Error::InvalidDuration(
                "target must be at least one hour ahead".into(),
            ));
        }

        self.advance(inv, hours)
    }

    /// Advances day by day, consuming one use per listed item per day and
    /// sweeping expiries after each day.
    ///
    /// Unknown item ids in `items_used_per_day` are skipped. Depletion
    /// crossings (> 0 to <= 0) are reported for the day they happen and
    /// logged as [`EventType::Waste`].
    pub fn advance_with_usage(
        &mut self,
        inv: &mut Inventory,
        days: u32,
        items_used_per_day: &[String],
    ) -> Result<UsageReport> {
        if days == 0 {
            return Err(Error::InvalidDuration("advance must cover at least one day".into()));
        }

        let mut items_expired = Vec::new();
        let mut items_depleted = Vec::new();
        let mut remaining: std::collections::BTreeMap<String, ItemUsage> = Default::default();

        for _ in 0..days {
            for item_id in items_used_per_day {
                let Some(item) = inv.item_mut(item_id) else {
                    log::warn!("daily usage references unknown item '{}'", item_id);
                    continue;
                };

                let was_depleted = item.is_depleted();
                item.consume_use();

                let usage = ItemUsage {
                    item_id: item.id().to_string(),
                    name: item.name().to_string(),
                    remaining_uses: item.remaining_uses().unwrap_or(0),
                };
                let newly_depleted = !was_depleted && item.is_depleted();
                let container_id = item.container_id().to_string();

                if newly_depleted {
                    items_depleted.push(usage.clone());
                    let timestamp = self.current_time() + Duration::hours(24);
                    let description =
                        format!("{} depleted during simulated usage", usage.name);
                    inv.log_mut().record(
                        item_id.clone(),
                        "system",
                        container_id,
                        None,
                        timestamp,
                        EventType::Waste,
                        description,
                    );
                }

                remaining.insert(usage.item_id.clone(), usage);
            }

            let report = self.advance(inv, 24)?;
            items_expired.extend(report.items_expired);
        }

        Ok(UsageReport {
            new_time: self.current_time(),
            days,
            items_used: remaining.into_values().collect(),
            items_expired,
            items_depleted,
        })
    }

    /// Sweeps all items for expiry instants inside `(start, end]`, appending
    /// one [`EventType::Expiry`] entry per newly expired item and bumping
    /// the cumulative counter.
    fn sweep_expiries(
        &mut self,
        inv: &mut Inventory,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Vec<ExpiredItem> {
        let mut expired = Vec::new();

        let crossings: Vec<(String, String, String, NaiveDate)> = inv
            .items()
            .iter()
            .filter_map(|item| {
                let expiry = item.expiry_date()?;
                let expires_at = expiry.and_time(NaiveTime::MIN);
                (start < expires_at && expires_at <= end).then(|| {
                    (
                        item.id().to_string(),
                        item.name().to_string(),
                        item.container_id().to_string(),
                        expiry,
                    )
                })
            })
            .collect();

        for (item_id, name, container_id, expiry) in crossings {
            self.state.expired_items += 1;
            let description = format!("{} expired on {}", name, expiry);
            inv.log_mut().record(
                item_id.clone(),
                "system",
                container_id,
                None,
                end,
                EventType::Expiry,
                description,
            );
            expired.push(ExpiredItem {
                item_id,
                name,
                expiry_date: expiry,
            });
        }

        expired
    }
}
