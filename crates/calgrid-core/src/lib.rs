//! Calgrid Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Calgrid layout
//! engine and its command-line front end. It includes:
//!
//! - **Identifiers**: Interned record keys ([`identifier::Id`])
//! - **Time**: Validated wall-clock ranges ([`time::TimeRange`])
//! - **Appointments**: Appointments, professionals and clients ([`appointment`] module)
//! - **Geometry**: Column percentages and slot rows ([`geometry`] module)

pub mod appointment;
pub mod geometry;
pub mod identifier;
pub mod time;
