//! Configuration types for Calgrid layouts.
//!
//! This module provides configuration structures that control how tracks are
//! laid out and how the time grid and calendar behave. All types implement
//! [`serde::Deserialize`] for loading from external sources; every section and
//! field is optional.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`LayoutConfig`] - Selects the [`ClusterWidth`] policy.
//! - [`GridConfig`] - Slot length and row height of the time grid.
//! - [`CalendarConfig`] - Initial view and new-appointment defaults.
//!
//! # Example
//!
//! ```
//! # use calgrid::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [layout]
//!     cluster_width = "neighbors"
//!
//!     [grid]
//!     slot_minutes = 30
//!     "#,
//! ).unwrap();
//! assert_eq!(config.grid().slot_grid().rows(), 48);
//! assert!(config.validate().is_ok());
//! ```

use serde::Deserialize;

use calgrid_core::geometry::SlotGrid;

use crate::{calendar::ViewKind, layout::ClusterWidth};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Time grid configuration section.
    #[serde(default)]
    grid: GridConfig,

    /// Calendar behavior section.
    #[serde(default)]
    calendar: CalendarConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(layout: LayoutConfig, grid: GridConfig, calendar: CalendarConfig) -> Self {
        Self {
            layout,
            grid,
            calendar,
        }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    pub fn calendar(&self) -> &CalendarConfig {
        &self.calendar
    }

    /// Checks value ranges that the type system does not.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.grid.slot_minutes == 0 || self.grid.slot_minutes > 24 * 60 {
            return Err(format!(
                "grid.slot_minutes must be between 1 and 1440, got {}",
                self.grid.slot_minutes
            ));
        }
        if self.grid.row_height.is_nan() || self.grid.row_height <= 0.0 {
            return Err(format!(
                "grid.row_height must be positive, got {}",
                self.grid.row_height
            ));
        }
        if self.calendar.default_duration <= 0 {
            return Err(format!(
                "calendar.default_duration must be positive, got {}",
                self.calendar.default_duration
            ));
        }
        Ok(())
    }
}

/// Layout engine configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    /// How column counts are resolved across overlap clusters.
    #[serde(default)]
    cluster_width: ClusterWidth,
}

impl LayoutConfig {
    pub fn new(cluster_width: ClusterWidth) -> Self {
        Self { cluster_width }
    }

    pub fn cluster_width(&self) -> ClusterWidth {
        self.cluster_width
    }
}

/// Time grid configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridConfig {
    /// Length of one grid row in minutes.
    #[serde(default = "default_slot_minutes")]
    slot_minutes: u32,

    /// Height of one grid row in `rem`.
    #[serde(default = "default_row_height")]
    row_height: f32,
}

impl GridConfig {
    pub fn new(slot_minutes: u32, row_height: f32) -> Self {
        Self {
            slot_minutes,
            row_height,
        }
    }

    /// Builds the [`SlotGrid`] described by this section.
    pub fn slot_grid(&self) -> SlotGrid {
        SlotGrid::new(self.slot_minutes, self.row_height)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new(default_slot_minutes(), default_row_height())
    }
}

/// Calendar behavior configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalendarConfig {
    /// View shown on startup.
    #[serde(default)]
    default_view: ViewKind,

    /// Duration in minutes prefilled for new appointments.
    #[serde(default = "default_duration")]
    default_duration: i64,

    /// Appointments listed per month cell before "+N more".
    #[serde(default = "default_month_preview_limit")]
    month_preview_limit: usize,
}

impl CalendarConfig {
    pub fn new(default_view: ViewKind, default_duration: i64, month_preview_limit: usize) -> Self {
        Self {
            default_view,
            default_duration,
            month_preview_limit,
        }
    }

    pub fn default_view(&self) -> ViewKind {
        self.default_view
    }

    pub fn default_duration(&self) -> i64 {
        self.default_duration
    }

    pub fn month_preview_limit(&self) -> usize {
        self.month_preview_limit
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self::new(
            ViewKind::default(),
            default_duration(),
            default_month_preview_limit(),
        )
    }
}

fn default_slot_minutes() -> u32 {
    SlotGrid::DEFAULT_SLOT_MINUTES
}

fn default_row_height() -> f32 {
    SlotGrid::DEFAULT_ROW_HEIGHT
}

fn default_duration() -> i64 {
    60
}

fn default_month_preview_limit() -> usize {
    3
}
