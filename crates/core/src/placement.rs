//! Deterministic first-fit placement engine.
//!
//! Finds a non-overlapping [`BoxRegion`] for an item inside a container, or
//! validates a manually supplied one. All functions here are pure: callers
//! persist the returned box onto the item.
//!
//! # Algorithm
//!
//! Candidate origins per axis are `{0}` plus the end coordinate of every
//! already-placed box, giving a finite axis-aligned grid. The grid is scanned
//! height-major, then depth, with width varying fastest, so the origin is
//! tried first and the bottom layer fills before the search climbs. The first
//! candidate that stays in bounds and overlaps nothing wins.
//!
//! This trades space efficiency for a reproducible, explainable result;
//! continuous bin-packing optimization is deliberately avoided.

use crate::container::Container;
use crate::geometry::{BoxRegion, EPSILON};
use crate::item::Item;
use crate::{Error, Result};
use nalgebra::Vector3;

/// Finds a position for an item of the given dimensions inside a container.
///
/// `existing` holds the container's current occupants; unplaced items among
/// them are ignored. Fails with [`Error::InvalidGeometry`] for non-positive
/// dimensions and [`Error::NoSpaceAvailable`] once every candidate origin
/// has been tried.
pub fn place_item(
    container: &Container,
    existing: &[Item],
    item_dims: Vector3<f64>,
) -> Result<BoxRegion> {
    container.validate()?;

    if item_dims.x <= 0.0 || item_dims.y <= 0.0 || item_dims.z <= 0.0 {
        return Err(Error::InvalidGeometry(
            "item dimensions must be positive".into(),
        ));
    }

    let bounds = container.dimensions();

    // Fast reject: the item alone exceeds the container.
    if item_dims.x > bounds.x + EPSILON
        || item_dims.y > bounds.y + EPSILON
        || item_dims.z > bounds.z + EPSILON
    {
        return Err(Error::NoSpaceAvailable(container.id().to_string()));
    }

    let placed: Vec<&BoxRegion> = existing.iter().filter_map(|item| item.position()).collect();

    let widths = axis_candidates(&placed, 0, bounds.x - item_dims.x);
    let depths = axis_candidates(&placed, 1, bounds.y - item_dims.y);
    let heights = axis_candidates(&placed, 2, bounds.z - item_dims.z);

    let mut tried = 0usize;
    for &z in &heights {
        for &y in &depths {
            for &x in &widths {
                tried += 1;
                let candidate =
                    BoxRegion::from_origin_and_size(Vector3::new(x, y, z), item_dims);

                if !candidate.within_bounds(bounds) {
                    continue;
                }

                if placed.iter().any(|region| region.overlaps(&candidate)) {
                    continue;
                }

                log::debug!(
                    "placed {}x{}x{} item in '{}' at ({}, {}, {}) after {} candidates",
                    item_dims.x,
                    item_dims.y,
                    item_dims.z,
                    container.id(),
                    x,
                    y,
                    z,
                    tried
                );
                return Ok(candidate);
            }
        }
    }

    log::debug!(
        "no position for {}x{}x{} item in '{}' ({} candidates tried)",
        item_dims.x,
        item_dims.y,
        item_dims.z,
        container.id(),
        tried
    );
    Err(Error::NoSpaceAvailable(container.id().to_string()))
}

/// Validates a manually supplied position against a container and its
/// current occupants.
///
/// Returns [`Error::Conflict`] naming the first overlapping item in
/// insertion order, or [`Error::InvalidGeometry`] when the box is malformed
/// or extends outside the container.
pub fn validate_placement(
    container: &Container,
    existing: &[Item],
    candidate: &BoxRegion,
) -> Result<()> {
    container.validate()?;
    candidate.validate()?;

    if !candidate.within_bounds(container.dimensions()) {
        return Err(Error::InvalidGeometry(format!(
            "box extends outside container '{}'",
            container.id()
        )));
    }

    for item in existing {
        if let Some(region) = item.position() {
            if region.overlaps(candidate) {
                return Err(Error::Conflict(item.id().to_string()));
            }
        }
    }

    Ok(())
}

/// Returns the total volume occupied by placed items.
pub fn occupied_volume(items: &[Item]) -> f64 {
    items
        .iter()
        .filter(|item| item.position().is_some())
        .map(|item| item.volume())
        .sum()
}

/// Returns the remaining free volume of a container given its occupants.
pub fn free_volume(container: &Container, items: &[Item]) -> f64 {
    (container.volume() - occupied_volume(items)).max(0.0)
}

/// Returns the utilization ratio (0.0 - 1.0) of a container.
pub fn utilization(container: &Container, items: &[Item]) -> f64 {
    let total = container.volume();
    if total <= 0.0 {
        return 0.0;
    }
    occupied_volume(items) / total
}

/// Collects sorted, deduplicated candidate start coordinates for one axis:
/// the container origin plus the end coordinate of every placed box, bounded
/// so the item extent still fits.
fn axis_candidates(placed: &[&BoxRegion], axis: usize, max_start: f64) -> Vec<f64> {
    let mut coords = vec![0.0];
    for region in placed {
        let coord = region.end[axis];
        if coord <= max_start + EPSILON {
            coords.push(coord);
        }
    }

    coords.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    coords.dedup_by(|a, b| (*a - *b).abs() < EPSILON);
    coords
}
