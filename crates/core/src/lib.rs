//! Domain types and pure functions for the armory weapon census.
//!
//! Nothing in this crate performs I/O. Fetching, persistence and
//! rendering live in the `armory-gw2`, `armory-store` and
//! `armory-analyzer` crates, which all build on the types here:
//!
//! - [`item`] / [`item_cache`]: item detail records and their memoization.
//! - [`equipment`]: equipment templates and land-weapon extraction.
//! - [`generation`]: legendary generation ranges and the partition table.
//! - [`weapon_filter`]: legendary-armory and generation predicates.
//! - [`aggregation`]: weapon-type histogram and per-character listing.

pub mod aggregation;
pub mod equipment;
pub mod error;
pub mod generation;
pub mod item;
pub mod item_cache;
pub mod types;
pub mod weapon_filter;
