//! Storage container definition.

use crate::{Error, Result};
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A fixed-volume storage container identified by an id and zone label.
///
/// Dimensions are in centimeters and immutable after creation.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Container {
    /// Unique identifier.
    id: String,

    /// Zone label (e.g. deck or module name).
    zone: String,

    /// Dimensions (width, depth, height).
    dimensions: Vector3<f64>,
}

impl Container {
    /// Creates a new container with the given id, zone, and dimensions.
    pub fn new(
        id: impl Into<String>,
        zone: impl Into<String>,
        width: f64,
        depth: f64,
        height: f64,
    ) -> Self {
        Self {
            id: id.into(),
            zone: zone.into(),
            dimensions: Vector3::new(width, depth, height),
        }
    }

    /// Returns the container id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the zone label.
    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// Returns the dimensions (width, depth, height).
    pub fn dimensions(&self) -> &Vector3<f64> {
        &self.dimensions
    }

    /// Returns the width.
    pub fn width(&self) -> f64 {
        self.dimensions.x
    }

    /// Returns the depth.
    pub fn depth(&self) -> f64 {
        self.dimensions.y
    }

    /// Returns the height.
    pub fn height(&self) -> f64 {
        self.dimensions.z
    }

    /// Returns the total volume.
    pub fn volume(&self) -> f64 {
        self.dimensions.x * self.dimensions.y * self.dimensions.z
    }

    /// Validates the container definition.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(Error::InvalidContainer("id must not be empty".into()));
        }

        if self.dimensions.x <= 0.0 || self.dimensions.y <= 0.0 || self.dimensions.z <= 0.0 {
            return Err(Error::InvalidContainer(format!(
                "all dimensions for '{}' must be positive",
                self.id
            )));
        }

        Ok(())
    }
}
