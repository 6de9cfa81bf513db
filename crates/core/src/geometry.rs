//! Axis-aligned box geometry for stowage placement.
//!
//! All coordinates follow the container convention: `x` is width, `y` is
//! depth (into the container, away from the open face), `z` is height.

use crate::{Error, Result};
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tolerance for floating-point bounds comparisons.
pub(crate) const EPSILON: f64 = 1e-9;

/// An axis-aligned 3D region inside a container, defined by its start
/// (minimum) and end (maximum) corners.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoxRegion {
    /// Start corner (width, depth, height).
    pub start: Vector3<f64>,
    /// End corner (width, depth, height).
    pub end: Vector3<f64>,
}

impl BoxRegion {
    /// Creates a new box region from its corners.
    pub fn new(start: Vector3<f64>, end: Vector3<f64>) -> Self {
        Self { start, end }
    }

    /// Creates a box region from an origin corner and item dimensions.
    pub fn from_origin_and_size(origin: Vector3<f64>, size: Vector3<f64>) -> Self {
        Self {
            start: origin,
            end: origin + size,
        }
    }

    /// Returns the extents (end minus start) per axis.
    pub fn extents(&self) -> Vector3<f64> {
        self.end - self.start
    }

    /// Returns the volume of the region.
    ///
    /// Fails with [`Error::InvalidGeometry`] if any extent is non-positive.
    pub fn volume(&self) -> Result<f64> {
        let extents = self.extents();
        if extents.x <= 0.0 || extents.y <= 0.0 || extents.z <= 0.0 {
            return Err(Error::InvalidGeometry(format!(
                "box has non-positive extent ({:.3} x {:.3} x {:.3})",
                extents.x, extents.y, extents.z
            )));
        }
        Ok(extents.x * extents.y * extents.z)
    }

    /// Validates the region: every start coordinate must be non-negative and
    /// every end coordinate strictly greater than its start.
    pub fn validate(&self) -> Result<()> {
        for axis in 0..3 {
            if self.start[axis] < 0.0 {
                return Err(Error::InvalidGeometry(format!(
                    "box start coordinate on axis {} is negative",
                    axis
                )));
            }
            if self.end[axis] <= self.start[axis] {
                return Err(Error::InvalidGeometry(format!(
                    "box end must exceed start on axis {}",
                    axis
                )));
            }
        }
        Ok(())
    }

    /// Checks whether two regions overlap with positive volume.
    ///
    /// The test is strict on every axis, so regions that merely touch faces
    /// do not overlap.
    pub fn overlaps(&self, other: &BoxRegion) -> bool {
        self.start.x < other.end.x
            && other.start.x < self.end.x
            && self.start.y < other.end.y
            && other.start.y < self.end.y
            && self.start.z < other.end.z
            && other.start.z < self.end.z
    }

    /// Checks whether the region lies entirely within a container of the
    /// given dimensions (container origin is at zero).
    pub fn within_bounds(&self, dims: &Vector3<f64>) -> bool {
        (0..3).all(|axis| self.start[axis] >= -EPSILON && self.end[axis] <= dims[axis] + EPSILON)
    }

    /// Checks whether this region blocks frontal access to `target`.
    ///
    /// A box blocks access when any part of it lies in front of the target
    /// along the depth axis (closer to the container's open face) and its
    /// width/height projection overlaps the target's.
    pub fn blocks_access_to(&self, target: &BoxRegion) -> bool {
        // At the same depth or deeper than the target: not in the way.
        if self.start.y >= target.start.y {
            return false;
        }

        let width_overlap = self.end.x > target.start.x && self.start.x < target.end.x;
        let height_overlap = self.end.z > target.start.z && self.start.z < target.end.z;

        width_overlap && height_overlap
    }
}
