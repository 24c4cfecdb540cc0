//! Plain-text rendering of laid-out tracks.
//!
//! Each track prints a `<resource> <date>` header followed by one line per
//! appointment:
//!
//! ```text
//! prof_1 2025-03-14
//!   09:00 - 10:00  appt_1  Routine Check-up  [Approved]  col 1/2  rows 37-41  width 50.00%  left 0.00%
//! ```

use std::fmt::Write;

use calgrid::layout::TrackLayout;
use calgrid_core::geometry::SlotGrid;

/// Renders `tracks` as text. Columns are printed 1-based.
pub fn render(tracks: &[TrackLayout<'_>], grid: &SlotGrid) -> String {
    let mut out = String::new();

    for (i, track) in tracks.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let key = track.key();
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{} {}", key.resource(), key.date());

        for placement in track.placements() {
            let appt = placement.item();
            let column = placement.column();
            let (row_start, row_end) = grid.row_span(appt.time());
            let _ = writeln!(
                out,
                "  {}  {}  {}  [{}]  col {}/{}  rows {}-{}  width {:.2}%  left {:.2}%",
                appt.time(),
                appt.id(),
                appt.service_name(),
                appt.status(),
                column.index() + 1,
                column.count(),
                row_start,
                row_end,
                column.width_percent(),
                column.left_percent(),
            );
        }
    }

    if tracks.is_empty() {
        out.push_str("No appointments\n");
    }

    out
}
