//! Waste classification and return planning.
//!
//! Classification is pure over `(item, current simulated date)`: expiry
//! status from the calendar, depletion from the usage limit. The two are
//! orthogonal, so an item can be both expired and depleted.

use crate::inventory::Inventory;
use crate::activity::EventType;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use stowage_core::{Error, Item, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Days before expiry at which an item counts as expiring soon.
pub const EXPIRING_SOON_DAYS: i64 = 30;

/// Calendar status of an item relative to the current simulated date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExpiryStatus {
    /// The expiry date has passed.
    Expired,
    /// The expiry date falls within the next 30 days.
    ExpiringSoon,
    /// No expiry concern (including items without an expiry date).
    Active,
}

/// Classifies an item's expiry status as of `today`.
pub fn expiry_status(item: &Item, today: NaiveDate) -> ExpiryStatus {
    let Some(expiry) = item.expiry_date() else {
        return ExpiryStatus::Active;
    };

    if expiry < today {
        ExpiryStatus::Expired
    } else if expiry < today + Duration::days(EXPIRING_SOON_DAYS) {
        ExpiryStatus::ExpiringSoon
    } else {
        ExpiryStatus::Active
    }
}

/// Returns true when the item is waste: expired or depleted.
pub fn is_waste(item: &Item, today: NaiveDate) -> bool {
    expiry_status(item, today) == ExpiryStatus::Expired || item.is_depleted()
}

/// Returns all waste items (expired or depleted), preserving input order.
pub fn identify_waste(items: &[Item], today: NaiveDate) -> Vec<&Item> {
    items.iter().filter(|item| is_waste(item, today)).collect()
}

/// A scheduled return of waste items. Created once and never automatically
/// mutated afterwards.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WasteReturnPlan {
    /// Plan id, unique within the inventory.
    pub id: u64,
    /// Items scheduled for return.
    pub item_ids: Vec<String>,
    /// Scheduled return date.
    pub schedule: NaiveDate,
    /// Optional operator notes.
    pub notes: Option<String>,
    /// When the plan was created.
    pub created_at: NaiveDateTime,
}

/// Schedules waste items for return.
///
/// Every id must exist in the inventory; the first unknown id fails the
/// whole call with [`Error::ItemNotFound`] and nothing is stored. One
/// [`EventType::Waste`] log entry is appended per item.
pub fn schedule_return(
    inv: &mut Inventory,
    item_ids: Vec<String>,
    schedule: NaiveDate,
    notes: Option<String>,
    now: NaiveDateTime,
) -> Result<WasteReturnPlan> {
    for item_id in &item_ids {
        if inv.item(item_id).is_none() {
            return Err(Error::ItemNotFound(item_id.clone()));
        }
    }

    for item_id in &item_ids {
        let item = inv.item(item_id).expect("validated above");
        let container_id = item.container_id().to_string();
        let description = format!("{} scheduled for return on {}", item.name(), schedule);
        inv.log_mut().record(
            item_id.clone(),
            "operator",
            container_id,
            None,
            now,
            EventType::Waste,
            description,
        );
    }

    let plan = WasteReturnPlan {
        id: inv.next_return_plan_id(),
        item_ids,
        schedule,
        notes,
        created_at: now,
    };

    Ok(inv.push_return_plan(plan).clone())
}

/// Aggregated view of a scheduled return: how many items leave each
/// container and the total mass to be moved.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReturnManifest {
    /// Item count per source container, keyed by container id.
    pub container_summary: std::collections::BTreeMap<String, usize>,
    /// Total items in the plan.
    pub total_items: usize,
    /// Total mass in kilograms (items without a mass contribute zero).
    pub total_mass: f64,
    /// Scheduled return date.
    pub schedule: NaiveDate,
}

/// Builds the manifest for a scheduled return plan.
pub fn return_manifest(inv: &Inventory, plan: &WasteReturnPlan) -> Result<ReturnManifest> {
    let mut container_summary = std::collections::BTreeMap::new();
    let mut total_mass = 0.0;

    for item_id in &plan.item_ids {
        let item = inv
            .item(item_id)
            .ok_or_else(|| Error::ItemNotFound(item_id.clone()))?;
        *container_summary
            .entry(item.container_id().to_string())
            .or_insert(0) += 1;
        total_mass += item.mass().unwrap_or(0.0);
    }

    Ok(ReturnManifest {
        total_items: plan.item_ids.len(),
        container_summary,
        total_mass,
        schedule: plan.schedule,
    })
}
