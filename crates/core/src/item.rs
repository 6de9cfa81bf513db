//! Stowed item definition.

use crate::geometry::BoxRegion;
use crate::{Error, Result};
use chrono::NaiveDate;
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A trackable unit of cargo stowed inside exactly one container.
///
/// An item without a position is pending placement; once placed, its
/// [`BoxRegion`] must lie within the owning container and overlap no other
/// item in that container. The placement engine enforces both.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Item {
    /// Unique identifier.
    id: String,

    /// Display name.
    name: String,

    /// Id of the owning container.
    container_id: String,

    /// Dimensions (width, depth, height).
    dimensions: Vector3<f64>,

    /// Calendar date after which the item counts as expired.
    expiry_date: Option<NaiveDate>,

    /// Remaining uses. Decrements on each retrieval and may go negative;
    /// the item is depleted at zero or below.
    usage_limit: Option<i32>,

    /// Mass in kilograms.
    mass: Option<f64>,

    /// Assigned position within the owning container, if placed.
    position: Option<BoxRegion>,
}

impl Item {
    /// Creates a new, unplaced item.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        container_id: impl Into<String>,
        width: f64,
        depth: f64,
        height: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            container_id: container_id.into(),
            dimensions: Vector3::new(width, depth, height),
            expiry_date: None,
            usage_limit: None,
            mass: None,
            position: None,
        }
    }

    /// Sets the expiry date.
    pub fn with_expiry(mut self, date: NaiveDate) -> Self {
        self.expiry_date = Some(date);
        self
    }

    /// Sets the usage limit.
    pub fn with_usage_limit(mut self, limit: i32) -> Self {
        self.usage_limit = Some(limit);
        self
    }

    /// Sets the mass.
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }

    /// Sets an explicit position.
    pub fn with_position(mut self, position: BoxRegion) -> Self {
        self.position = Some(position);
        self
    }

    /// Returns the item id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the owning container id.
    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// Returns the dimensions (width, depth, height).
    pub fn dimensions(&self) -> &Vector3<f64> {
        &self.dimensions
    }

    /// Returns the expiry date.
    pub fn expiry_date(&self) -> Option<NaiveDate> {
        self.expiry_date
    }

    /// Returns the remaining uses.
    pub fn remaining_uses(&self) -> Option<i32> {
        self.usage_limit
    }

    /// Returns the mass.
    pub fn mass(&self) -> Option<f64> {
        self.mass
    }

    /// Returns the assigned position, if placed.
    pub fn position(&self) -> Option<&BoxRegion> {
        self.position.as_ref()
    }

    /// Returns the item volume.
    pub fn volume(&self) -> f64 {
        self.dimensions.x * self.dimensions.y * self.dimensions.z
    }

    /// Returns true when the usage limit has reached zero or below.
    ///
    /// Items without a usage limit never deplete.
    pub fn is_depleted(&self) -> bool {
        matches!(self.usage_limit, Some(limit) if limit <= 0)
    }

    /// Assigns a position within the owning container.
    pub fn set_position(&mut self, position: BoxRegion) {
        self.position = Some(position);
    }

    /// Clears the assigned position, marking the item pending placement.
    pub fn clear_position(&mut self) {
        self.position = None;
    }

    /// Reassigns the owning container.
    pub fn set_container_id(&mut self, container_id: impl Into<String>) {
        self.container_id = container_id.into();
    }

    /// Consumes one use. No floor is applied; the limit may go negative.
    pub fn consume_use(&mut self) {
        if let Some(limit) = self.usage_limit.as_mut() {
            *limit -= 1;
        }
    }

    /// Validates the item definition.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(Error::InvalidGeometry("item id must not be empty".into()));
        }

        if self.dimensions.x <= 0.0 || self.dimensions.y <= 0.0 || self.dimensions.z <= 0.0 {
            return Err(Error::InvalidGeometry(format!(
                "all dimensions for '{}' must be positive",
                self.id
            )));
        }

        if let Some(mass) = self.mass {
            if mass < 0.0 {
                return Err(Error::InvalidGeometry(format!(
                    "mass for '{}' cannot be negative",
                    self.id
                )));
            }
        }

        if let Some(position) = &self.position {
            position.validate()?;
        }

        Ok(())
    }
}
