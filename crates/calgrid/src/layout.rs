//! Overlap-packing layout for appointment tracks.
//!
//! This module assigns every appointment of a track a horizontal column so
//! that overlapping appointments are rendered side by side instead of on top
//! of each other.
//!
//! # Pipeline Position
//!
//! ```text
//! Dataset / Schedule
//!     ↓ track::partition
//! Track (one resource, one day)
//!     ↓ layout (this module)
//! TrackLayout (appointments with Column placements)
//!     ↓ presentation
//! Percent geometry / grid rows
//! ```
//!
//! # Submodules
//!
//! - [`engine`] - Greedy column assignment and cluster width resolution
//! - [`track`] - Grouping appointments per resource and day
//!
//! # Re-exports
//!
//! - [`compute_layout`] - The layout entry point for a pre-filtered slice
//! - [`layout_dates`] - Filter, partition, lay out and order tracks in one call
//! - [`ClusterWidth`] - Policy used to resolve column counts

pub mod engine;
pub mod track;

pub use engine::{ClusterWidth, Placement, compute_layout};
pub use track::{Track, TrackKey, TrackLayout, layout_dates, partition, sort_tracks};
