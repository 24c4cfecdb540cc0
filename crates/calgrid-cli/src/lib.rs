//! CLI logic for the Calgrid layout tool.
//!
//! This module contains the core CLI logic: load a dataset, lay out the
//! requested span of the calendar and write the text report.

pub mod error_adapter;

mod args;
mod config;
mod report;

pub use args::Args;

use std::fs;

use chrono::{Local, NaiveDate};
use log::{debug, info};

use calgrid::{
    CalendarBuilder, CalgridError, dataset::Dataset, identifier::Id, schedule::ScheduleError,
};

/// Run the Calgrid CLI application
///
/// This function loads the dataset, lays out every track in the requested
/// view and writes the report to the output file, or to stdout.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CalgridError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Dataset syntax and validation errors
/// - An unknown `--resource`
pub fn run(args: &Args) -> Result<(), CalgridError> {
    info!(dataset_path = args.dataset; "Processing dataset");

    let app_config = config::load_config(args.config.as_ref())?;
    let grid = app_config.grid().slot_grid();
    let view = args
        .view
        .unwrap_or_else(|| app_config.calendar().default_view());

    let source = fs::read_to_string(&args.dataset)?;

    let builder = CalendarBuilder::new(app_config);
    let dataset = builder.parse(&source)?;

    let date = args.date.unwrap_or_else(|| default_date(&dataset));
    let mut tracks = builder.layout_view(&dataset, view, date);

    if let Some(resource) = &args.resource {
        let resource = Id::new(resource);
        if dataset.professional(resource).is_none() {
            return Err(ScheduleError::UnknownProfessional(resource).into());
        }
        tracks.retain(|track| track.key().resource() == resource);
        debug!(resource:% = resource, tracks_count = tracks.len(); "Filtered tracks");
    }

    let text = report::render(&tracks, &grid);

    match &args.output {
        Some(output) => {
            fs::write(output, text)?;
            info!(output_file = output; "Report written successfully");
        }
        None => print!("{text}"),
    }

    Ok(())
}

/// Date of the earliest appointment, or today when there are none.
fn default_date(dataset: &Dataset) -> NaiveDate {
    dataset
        .appointments()
        .iter()
        .map(|appt| appt.time().date())
        .min()
        .unwrap_or_else(|| Local::now().date_naive())
}
