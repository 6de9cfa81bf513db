//! Shared in-memory inventory state.
//!
//! An explicit context object owning containers, items, the activity log,
//! and scheduled waste-return plans. Every engine operation takes the
//! inventory by reference, so independent contexts can coexist (and each
//! test can own its own).
//!
//! Insertion order is preserved everywhere, which keeps iteration, placement
//! candidates, and error reporting deterministic.

use crate::activity::{ActivityLog, EventType};
use crate::waste::WasteReturnPlan;
use chrono::NaiveDateTime;
use stowage_core::{placement, Container, Error, Item, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The shared inventory state mutated by the placement, retrieval, and
/// simulation engines.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Inventory {
    containers: Vec<Container>,
    items: Vec<Item>,
    log: ActivityLog,
    return_plans: Vec<WasteReturnPlan>,
}

impl Inventory {
    /// Creates a new empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new container.
    ///
    /// Fails with [`Error::DuplicateId`] if the id is taken, or
    /// [`Error::InvalidContainer`] if the definition is malformed.
    pub fn add_container(&mut self, container: Container) -> Result<()> {
        container.validate()?;

        if self.container(container.id()).is_some() {
            return Err(Error::DuplicateId(container.id().to_string()));
        }

        self.containers.push(container);
        Ok(())
    }

    /// Removes a container. Refused while the container still holds items.
    pub fn remove_container(&mut self, container_id: &str) -> Result<Container> {
        let index = self
            .containers
            .iter()
            .position(|c| c.id() == container_id)
            .ok_or_else(|| Error::ContainerNotFound(container_id.to_string()))?;

        if self.items.iter().any(|item| item.container_id() == container_id) {
            return Err(Error::ContainerNotEmpty(container_id.to_string()));
        }

        Ok(self.containers.remove(index))
    }

    /// Adds an item to the inventory and places it in its container.
    ///
    /// When the item carries an explicit position that position is validated
    /// against the container's occupants; otherwise the placement engine
    /// assigns one. Appends an [`EventType::Inventory`] log entry.
    pub fn add_item(&mut self, mut item: Item, now: NaiveDateTime) -> Result<()> {
        item.validate()?;

        if self.item(item.id()).is_some() {
            return Err(Error::DuplicateId(item.id().to_string()));
        }

        let container = self
            .container(item.container_id())
            .ok_or_else(|| Error::ContainerNotFound(item.container_id().to_string()))?
            .clone();

        let occupants = self.items_in(container.id());
        let occupants: Vec<Item> = occupants.into_iter().cloned().collect();

        match item.position() {
            Some(region) => {
                placement::validate_placement(&container, &occupants, region)?;
            }
            None => {
                let region = placement::place_item(&container, &occupants, *item.dimensions())?;
                item.set_position(region);
            }
        }

        let description = format!("Added {} to {}", item.name(), container.id());
        self.log.record(
            item.id(),
            "operator",
            container.id(),
            None,
            now,
            EventType::Inventory,
            description,
        );

        self.items.push(item);
        Ok(())
    }

    /// Removes an item, freeing its space. Appends an
    /// [`EventType::Inventory`] log entry.
    pub fn remove_item(&mut self, item_id: &str, now: NaiveDateTime) -> Result<Item> {
        let index = self
            .items
            .iter()
            .position(|item| item.id() == item_id)
            .ok_or_else(|| Error::ItemNotFound(item_id.to_string()))?;

        let item = self.items.remove(index);
        let description = format!("Removed {} from {}", item.name(), item.container_id());
        self.log.record(
            item.id(),
            "operator",
            item.container_id(),
            None,
            now,
            EventType::Inventory,
            description,
        );

        Ok(item)
    }

    /// Looks up a container by id.
    pub fn container(&self, container_id: &str) -> Option<&Container> {
        self.containers.iter().find(|c| c.id() == container_id)
    }

    /// Looks up an item by id.
    pub fn item(&self, item_id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == item_id)
    }

    /// Looks up an item by id, mutably. Crate-internal: engines go through
    /// this to persist position and usage changes.
    pub(crate) fn item_mut(&mut self, item_id: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id() == item_id)
    }

    /// Returns all items stowed in the given container, in insertion order.
    pub fn items_in(&self, container_id: &str) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|item| item.container_id() == container_id)
            .collect()
    }

    /// Returns all containers in insertion order.
    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    /// Returns all items in insertion order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns the activity log.
    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    /// Crate-internal mutable access to the log for the engines.
    pub(crate) fn log_mut(&mut self) -> &mut ActivityLog {
        &mut self.log
    }

    /// Returns all scheduled waste-return plans.
    pub fn return_plans(&self) -> &[WasteReturnPlan] {
        &self.return_plans
    }

    /// Crate-internal storage of a new waste-return plan.
    pub(crate) fn push_return_plan(&mut self, plan: WasteReturnPlan) -> &WasteReturnPlan {
        self.return_plans.push(plan);
        self.return_plans.last().expect("plan just pushed")
    }

    /// Returns the next free waste-return plan id.
    pub(crate) fn next_return_plan_id(&self) -> u64 {
        self.return_plans.len() as u64
    }

    /// Returns the remaining free volume of a container.
    pub fn free_volume(&self, container_id: &str) -> Result<f64> {
        let container = self
            .container(container_id)
            .ok_or_else(|| Error::ContainerNotFound(container_id.to_string()))?;
        let items: Vec<Item> = self.items_in(container_id).into_iter().cloned().collect();
        Ok(placement::free_volume(container, &items))
    }

    /// Returns the utilization ratio (0.0 - 1.0) of a container.
    pub fn utilization(&self, container_id: &str) -> Result<f64> {
        let container = self
            .container(container_id)
            .ok_or_else(|| Error::ContainerNotFound(container_id.to_string()))?;
        let items: Vec<Item> = self.items_in(container_id).into_iter().cloned().collect();
        Ok(placement::utilization(container, &items))
    }
}
