//! Retrieval and transfer engine.
//!
//! Retrieval consumes one unit of use but leaves the item in place;
//! spatial removal is a separate operation ([`crate::Inventory::remove_item`]).
//! Transfer re-places the item in the destination container atomically: a
//! failed placement leaves the inventory exactly as it was.

use crate::inventory::Inventory;
use crate::activity::{ActivityLogEntry, EventType};
use chrono::NaiveDateTime;
use stowage_core::{placement, Error, Item, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Records one retrieval of an item: decrements its usage limit by one (no
/// floor) and appends a [`EventType::Retrieval`] log entry.
///
/// When the decrement crosses from available to depleted, an additional
/// [`EventType::Waste`] entry flags the item for return planning.
pub fn retrieve(
    inv: &mut Inventory,
    item_id: &str,
    actor: &str,
    now: NaiveDateTime,
) -> Result<ActivityLogEntry> {
    let item = inv
        .item_mut(item_id)
        .ok_or_else(|| Error::ItemNotFound(item_id.to_string()))?;

    let was_depleted = item.is_depleted();
    item.consume_use();

    let name = item.name().to_string();
    let container_id = item.container_id().to_string();
    let newly_depleted = !was_depleted && item.is_depleted();

    let description = format!("Retrieved {} from {}", name, container_id);
    let entry = inv
        .log_mut()
        .record(
            item_id,
            actor,
            container_id.clone(),
            None,
            now,
            EventType::Retrieval,
            description,
        )
        .clone();

    if newly_depleted {
        let description = format!("{} has reached its usage limit", name);
        inv.log_mut().record(
            item_id,
            actor,
            container_id,
            None,
            now,
            EventType::Waste,
            description,
        );
    }

    Ok(entry)
}

/// Moves an item to another container, re-placing it spatially.
///
/// The placement engine runs against the destination's current occupants
/// first; only on success are the item's container and position updated, so
/// a failure leaves the inventory untouched. Appends a
/// [`EventType::Transfer`] log entry on success.
pub fn transfer(
    inv: &mut Inventory,
    item_id: &str,
    destination_id: &str,
    actor: &str,
    now: NaiveDateTime,
) -> Result<ActivityLogEntry> {
    let item = inv
        .item(item_id)
        .ok_or_else(|| Error::ItemNotFound(item_id.to_string()))?;
    let from_container = item.container_id().to_string();
    let name = item.name().to_string();
    let dims = *item.dimensions();

    let destination = inv
        .container(destination_id)
        .ok_or_else(|| Error::ContainerNotFound(destination_id.to_string()))?
        .clone();

    // Occupants of the destination, excluding the moving item itself when it
    // already lives there.
    let occupants: Vec<Item> = inv
        .items_in(destination_id)
        .into_iter()
        .filter(|other| other.id() != item_id)
        .cloned()
        .collect();

    let region = placement::place_item(&destination, &occupants, dims)?;

    let item = inv.item_mut(item_id).expect("item looked up above");
    item.set_container_id(destination_id);
    item.set_position(region);

    let description = format!("Moved {} from {} to {}", name, from_container, destination_id);
    let entry = inv
        .log_mut()
        .record(
            item_id,
            actor,
            from_container,
            Some(destination_id.to_string()),
            now,
            EventType::Transfer,
            description,
        )
        .clone();

    Ok(entry)
}

/// One step of a retrieval plan.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RetrievalStep {
    /// 1-based step number.
    pub step: usize,
    /// Operator instruction.
    pub instruction: String,
    /// Items that must be moved aside for this step, if any.
    pub items_to_move: Vec<String>,
}

/// Step-by-step instructions for physically retrieving an item, accounting
/// for items that block frontal access.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RetrievalPlan {
    /// Id of the item to retrieve.
    pub target_item: String,
    /// Container holding the item.
    pub container: String,
    /// Ordered steps.
    pub steps: Vec<RetrievalStep>,
}

/// Builds a retrieval plan for an item. Read-only.
pub fn retrieval_plan(inv: &Inventory, item_id: &str) -> Result<RetrievalPlan> {
    let item = inv
        .item(item_id)
        .ok_or_else(|| Error::ItemNotFound(item_id.to_string()))?;
    let container = inv
        .container(item.container_id())
        .ok_or_else(|| Error::ContainerNotFound(item.container_id().to_string()))?;

    let mut steps = vec![RetrievalStep {
        step: 1,
        instruction: format!(
            "Locate container {} in the {} zone",
            container.id(),
            container.zone()
        ),
        items_to_move: Vec::new(),
    }];

    let target_region = match item.position() {
        Some(region) => *region,
        None => {
            steps.push(RetrievalStep {
                step: 2,
                instruction: format!(
                    "Retrieve item {} ({}) from the container",
                    item.id(),
                    item.name()
                ),
                items_to_move: Vec::new(),
            });
            return Ok(RetrievalPlan {
                target_item: item.id().to_string(),
                container: container.id().to_string(),
                steps,
            });
        }
    };

    steps.push(RetrievalStep {
        step: 2,
        instruction: format!(
            "Locate item at position ({}, {}, {}) within the container",
            target_region.start.x, target_region.start.y, target_region.start.z
        ),
        items_to_move: Vec::new(),
    });

    let blockers: Vec<String> = inv
        .items_in(container.id())
        .into_iter()
        .filter(|other| other.id() != item.id())
        .filter(|other| {
            other
                .position()
                .is_some_and(|region| region.blocks_access_to(&target_region))
        })
        .map(|other| other.id().to_string())
        .collect();

    let mut step = 3;
    if !blockers.is_empty() {
        steps.push(RetrievalStep {
            step,
            instruction: format!(
                "Temporarily move {} item(s) blocking access",
                blockers.len()
            ),
            items_to_move: blockers.clone(),
        });
        step += 1;
    }

    steps.push(RetrievalStep {
        step,
        instruction: format!("Retrieve item {} ({})", item.id(), item.name()),
        items_to_move: Vec::new(),
    });

    if !blockers.is_empty() {
        steps.push(RetrievalStep {
            step: step + 1,
            instruction: "Replace the items that were moved".to_string(),
            items_to_move: blockers,
        });
    }

    Ok(RetrievalPlan {
        target_item: item.id().to_string(),
        container: container.id().to_string(),
        steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use nalgebra::Vector3;
    use stowage_core::{BoxRegion, Container};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn basic_inventory() -> Inventory {
        let mut inv = Inventory::new();
        inv.add_container(Container::new("CONT-A", "Storage Bay", 100.0, 85.0, 200.0))
            .unwrap();
        inv.add_container(Container::new("CONT-B", "Lab", 100.0, 85.0, 200.0))
            .unwrap();
        inv.add_item(
            Item::new("ITM-001", "Water Filter", "CONT-A", 10.0, 10.0, 20.0).with_usage_limit(2),
            now(),
        )
        .unwrap();
        inv
    }

    #[test]
    fn test_retrieve_decrements_and_logs() {
        let mut inv = basic_inventory();

        let entry = retrieve(&mut inv, "ITM-001", "astronaut", now()).unwrap();
        assert_eq!(entry.event_type, EventType::Retrieval);
        assert_eq!(inv.item("ITM-001").unwrap().remaining_uses(), Some(1));

        // The item stays in place: retrieval does not vacate its box.
        assert!(inv.item("ITM-001").unwrap().position().is_some());
    }

    #[test]
    fn test_retrieve_logs_depletion_once() {
        let mut inv = basic_inventory();

        retrieve(&mut inv, "ITM-001", "astronaut", now()).unwrap();
        assert!(inv.log().of_type(EventType::Waste).is_empty());

        retrieve(&mut inv, "ITM-001", "astronaut", now()).unwrap();
        assert_eq!(inv.log().of_type(EventType::Waste).len(), 1);

        // Already depleted: a further retrieval does not re-flag it.
        retrieve(&mut inv, "ITM-001", "astronaut", now()).unwrap();
        assert_eq!(inv.log().of_type(EventType::Waste).len(), 1);
        assert_eq!(inv.item("ITM-001").unwrap().remaining_uses(), Some(-1));
    }

    #[test]
    fn test_retrieve_unknown_item() {
        let mut inv = basic_inventory();
        assert!(matches!(
            retrieve(&mut inv, "ITM-404", "astronaut", now()),
            Err(Error::ItemNotFound(_))
        ));
    }

    #[test]
    fn test_transfer_moves_and_logs() {
        let mut inv = basic_inventory();

        let entry = transfer(&mut inv, "ITM-001", "CONT-B", "astronaut", now()).unwrap();
        assert_eq!(entry.event_type, EventType::Transfer);
        assert_eq!(entry.to_container.as_deref(), Some("CONT-B"));

        let item = inv.item("ITM-001").unwrap();
        assert_eq!(item.container_id(), "CONT-B");
        assert_eq!(
            item.position().unwrap().start,
            Vector3::new(0.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_transfer_failure_leaves_state_unchanged() {
        let mut inv = basic_inventory();
        inv.add_container(Container::new("CONT-TINY", "Airlock", 5.0, 5.0, 5.0))
            .unwrap();

        let before = inv.item("ITM-001").unwrap().clone();
        let result = transfer(&mut inv, "ITM-001", "CONT-TINY", "astronaut", now());
        assert!(matches!(result, Err(Error::NoSpaceAvailable(_))));

        let after = inv.item("ITM-001").unwrap();
        assert_eq!(after.container_id(), before.container_id());
        assert_eq!(after.position(), before.position());
    }

    #[test]
    fn test_transfer_unknown_destination() {
        let mut inv = basic_inventory();
        assert!(matches!(
            transfer(&mut inv, "ITM-001", "CONT-X", "astronaut", now()),
            Err(Error::ContainerNotFound(_))
        ));
    }

    #[test]
    fn test_retrieval_plan_with_blocker() {
        let mut inv = Inventory::new();
        inv.add_container(Container::new("CONT-A", "Storage Bay", 100.0, 85.0, 200.0))
            .unwrap();

        // Target sits deep; the blocker is directly in front of it.
        inv.add_item(
            Item::new("ITM-DEEP", "Spare Part", "CONT-A", 10.0, 10.0, 10.0).with_position(
                BoxRegion::from_origin_and_size(
                    Vector3::new(0.0, 40.0, 0.0),
                    Vector3::new(10.0, 10.0, 10.0),
                ),
            ),
            now(),
        )
        .unwrap();
        inv.add_item(
            Item::new("ITM-FRONT", "Food Pack", "CONT-A", 10.0, 10.0, 10.0).with_position(
                BoxRegion::from_origin_and_size(
                    Vector3::new(0.0, 0.0, 0.0),
                    Vector3::new(10.0, 10.0, 10.0),
                ),
            ),
            now(),
        )
        .unwrap();

        let plan = retrieval_plan(&inv, "ITM-DEEP").unwrap();
        let move_step = plan
            .steps
            .iter()
            .find(|s| !s.items_to_move.is_empty())
            .expect("a move-aside step");
        assert_eq!(move_step.items_to_move, vec!["ITM-FRONT".to_string()]);

        // Last step restores the moved items.
        assert_eq!(plan.steps.last().unwrap().items_to_move.len(), 1);
    }

    #[test]
    fn test_retrieval_plan_without_blockers() {
        let inv = basic_inventory();
        let plan = retrieval_plan(&inv, "ITM-001").unwrap();
        assert!(plan.steps.iter().all(|s| s.items_to_move.is_empty()));
        assert_eq!(plan.steps.len(), 3);
    }
}
