//! Matcher module - license equivalence between two package revisions.
//!
//! This module provides the policy chain used to decide whether two
//! revisions of the same package carry the same license:
//! - **Engine**: [`LicenseMatcher`] runs policies in order, first match wins
//! - **Definition**: [`DefinitionPolicy`] compares license file hashes and tokens
//! - **Harvest**: [`HarvestPolicy`] compares per-ecosystem harvest license fields
//! - **Values**: [`PropertyPath`] lookup and [`deep_equal`] over snapshots

pub mod definition;
pub mod engine;
pub mod harvest;
pub mod value;

// Re-export commonly used types
pub use definition::{DefinitionPolicy, FileProperty};
pub use engine::LicenseMatcher;
pub use harvest::{HarvestPolicy, CLEARLYDEFINED_TOOL};
pub use value::{deep_equal, PropertyPath};
