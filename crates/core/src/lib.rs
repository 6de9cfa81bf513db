//! # Stowage Core
//!
//! Geometry primitives, data model, and placement engine for the Stowage
//! cargo-tracking core.
//!
//! This crate provides the foundational types shared by the simulation
//! layer:
//!
//! - **Geometry**: [`BoxRegion`] - axis-aligned regions with overlap and
//!   containment tests
//! - **Data model**: [`Container`], [`Item`]
//! - **Placement engine**: [`placement::place_item`],
//!   [`placement::validate_placement`] - deterministic first-fit search over
//!   a finite candidate grid
//!
//! All placement functions are pure: they compute a position (or a failure)
//! without touching state, and the caller persists the result.
//!
//! ```rust
//! use nalgebra::Vector3;
//! use stowage_core::{placement, Container};
//!
//! let container = Container::new("CONT-A", "Storage Bay", 100.0, 85.0, 200.0);
//! let region = placement::place_item(&container, &[], Vector3::new(10.0, 10.0, 20.0)).unwrap();
//! assert_eq!(region.start, Vector3::new(0.0, 0.0, 0.0));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod container;
pub mod error;
pub mod geometry;
pub mod item;
pub mod placement;

// Re-exports
pub use container::Container;
pub use error::{Error, Result};
pub use geometry::BoxRegion;
pub use item::Item;
