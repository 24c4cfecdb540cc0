//! Calgrid - overlap-packing layout for appointment calendars.
//!
//! Loading, navigation and layout for a multi-professional appointment
//! calendar. Appointments that overlap within one professional's day are
//! packed into side-by-side columns.

pub mod calendar;
pub mod config;
pub mod dataset;
pub mod layout;
pub mod schedule;

mod error;

pub use calgrid_core::{appointment, geometry, identifier, time};

pub use error::CalgridError;

use chrono::NaiveDate;
use log::{debug, info, trace};

use calendar::ViewKind;
use config::AppConfig;
use dataset::Dataset;
use layout::TrackLayout;

/// Builder for loading datasets and laying out calendar tracks.
///
/// # Examples
///
/// ```rust
/// use calgrid::{CalendarBuilder, config::AppConfig};
/// use chrono::NaiveDate;
///
/// let source = r#"
///     [[professionals]]
///     id = "prof_1"
///     name = "Dr. Evelyn Reed"
///
///     [[clients]]
///     id = "client_1"
///     name = "John Smith"
///
///     [[appointments]]
///     id = "appt_1"
///     staff_id = "prof_1"
///     client_id = "client_1"
///     start = "2025-03-14T09:00:00"
///     end = "2025-03-14T10:00:00"
/// "#;
///
/// let builder = CalendarBuilder::new(AppConfig::default());
/// let dataset = builder.parse(source).expect("Failed to parse");
///
/// let day = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
/// let tracks = builder.layout_date(&dataset, day);
/// assert_eq!(tracks.len(), 1);
/// assert_eq!(tracks[0].max_columns(), 1);
/// ```
#[derive(Default)]
pub struct CalendarBuilder {
    config: AppConfig,
}

impl CalendarBuilder {
    /// Create a new calendar builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including layout and grid settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a TOML dataset.
    ///
    /// # Errors
    ///
    /// Returns `CalgridError::Dataset` with every syntax and validation
    /// issue found in `source`.
    pub fn parse(&self, source: &str) -> Result<Dataset, CalgridError> {
        info!("Parsing dataset");

        let dataset =
            Dataset::parse(source).map_err(|err| CalgridError::new_dataset_error(err, source))?;

        debug!("Dataset parsed successfully");
        trace!(dataset:?; "Parsed dataset");

        Ok(dataset)
    }

    /// Lay out every track of a single day.
    pub fn layout_date<'a>(&self, dataset: &'a Dataset, date: NaiveDate) -> Vec<TrackLayout<'a>> {
        self.layout_view(dataset, ViewKind::Day, date)
    }

    /// Lay out every track of the dates `view` covers around `date`.
    ///
    /// Tracks are ordered by date, then by the professional's position in
    /// the dataset.
    pub fn layout_view<'a>(
        &self,
        dataset: &'a Dataset,
        view: ViewKind,
        date: NaiveDate,
    ) -> Vec<TrackLayout<'a>> {
        let dates = calendar::visible_dates(view, date);
        let policy = self.config.layout().cluster_width();
        info!(view:% = view, date:% = date, policy:% = policy; "Laying out tracks");

        let tracks = layout::layout_dates(
            dataset.appointments(),
            &dates,
            policy,
            dataset.professionals(),
        );

        info!(tracks_count = tracks.len(); "Layout calculated");
        tracks
    }
}
