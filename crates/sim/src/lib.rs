//! # Stowage Sim
//!
//! Inventory context, retrieval/transfer engine, waste classification, and
//! the time-acceleration simulation clock for the Stowage cargo-tracking
//! core.
//!
//! ## Core Components
//!
//! - [`Inventory`] - the shared in-memory state (containers, items, activity
//!   log, return plans); one explicit context per simulation
//! - [`retrieval`] - usage-consuming retrieval, atomic transfer, and
//!   blocked-access retrieval plans
//! - [`waste`] - pure expiry/depletion classification and return scheduling
//! - [`SimulationClock`] - virtual time as an hour offset from a
//!   caller-supplied epoch, with per-day usage and expiry sweeps
//!
//! Everything is single-threaded and synchronous: operations run to
//! completion or fail, and a failed operation leaves the inventory exactly
//! as it was.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use stowage_core::{Container, Item};
//! use stowage_sim::{Inventory, SimulationClock};
//!
//! let epoch = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let mut inv = Inventory::new();
//! inv.add_container(Container::new("CONT-A", "Storage Bay", 100.0, 85.0, 200.0)).unwrap();
//! inv.add_item(
//!     Item::new("ITM-001", "Food Pack", "CONT-A", 10.0, 10.0, 20.0)
//!         .with_expiry(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
//!     epoch,
//! ).unwrap();
//!
//! let mut clock = SimulationClock::new(epoch);
//! let report = clock.advance(&mut inv, 24 * 20).unwrap();
//! assert_eq!(report.items_expired.len(), 1);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod activity;
pub mod inventory;
pub mod retrieval;
pub mod simulation;
pub mod waste;

// Re-exports
pub use inventory::Inventory;
pub use activity::{ActivityLog, ActivityLogEntry, EventType};
pub use retrieval::{retrieve, retrieval_plan, transfer, RetrievalPlan, RetrievalStep};
pub use simulation::{
    AdvanceReport, ExpiredItem, ItemUsage, SimulationClock, SimulationState, UsageReport,
    DEFAULT_SPEED,
};
pub use stowage_core::{placement, BoxRegion, Container, Error, Item, Result};
pub use waste::{
    expiry_status, identify_waste, is_waste, return_manifest, schedule_return, ExpiryStatus,
    ReturnManifest, WasteReturnPlan, EXPIRING_SOON_DAYS,
};
