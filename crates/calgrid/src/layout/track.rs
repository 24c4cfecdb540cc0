//! Per-resource, per-day appointment tracks.
//!
//! The layout engine never filters; it expects the appointments of exactly
//! one professional on exactly one date. [`partition`] produces those groups.

use chrono::NaiveDate;
use indexmap::IndexMap;
use log::debug;

use calgrid_core::{
    appointment::{Appointment, Professional},
    identifier::Id,
};

use super::engine::{ClusterWidth, Placement, compute_layout};

/// Identity of a track: one resource on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackKey {
    resource: Id,
    date: NaiveDate,
}

impl TrackKey {
    pub fn new(resource: Id, date: NaiveDate) -> Self {
        Self { resource, date }
    }

    /// The professional owning the track.
    pub fn resource(&self) -> Id {
        self.resource
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    fn of(appointment: &Appointment) -> Self {
        Self::new(appointment.staff_id(), appointment.time().date())
    }
}

/// Appointments of one resource on one date, before layout.
#[derive(Debug, Clone)]
pub struct Track<'a> {
    key: TrackKey,
    appointments: Vec<&'a Appointment>,
}

impl<'a> Track<'a> {
    pub fn key(&self) -> TrackKey {
        self.key
    }

    pub fn appointments(&self) -> &[&'a Appointment] {
        &self.appointments
    }

    /// Runs the layout engine over this track.
    pub fn layout(&self, policy: ClusterWidth) -> TrackLayout<'a> {
        let placements = compute_layout(self.appointments.iter().copied(), policy);
        TrackLayout {
            key: self.key,
            placements,
        }
    }
}

/// A laid-out track, ready for presentation.
#[derive(Debug, Clone)]
pub struct TrackLayout<'a> {
    key: TrackKey,
    placements: Vec<Placement<'a, Appointment>>,
}

impl<'a> TrackLayout<'a> {
    pub fn key(&self) -> TrackKey {
        self.key
    }

    /// Placements in chronological order.
    pub fn placements(&self) -> &[Placement<'a, Appointment>] {
        &self.placements
    }

    /// Widest cluster in the track.
    pub fn max_columns(&self) -> usize {
        self.placements
            .iter()
            .map(Placement::column_count)
            .max()
            .unwrap_or(0)
    }

    /// Finds the placement of an appointment by id.
    pub fn placement_of(&self, id: Id) -> Option<&Placement<'a, Appointment>> {
        self.placements.iter().find(|p| p.item().id() == id)
    }
}

/// Groups appointments by resource and start date.
///
/// Tracks come out in the order their first appointment was seen, and keep
/// the input order of their appointments.
pub fn partition<'a, I>(appointments: I) -> Vec<Track<'a>>
where
    I: IntoIterator<Item = &'a Appointment>,
{
    let mut groups: IndexMap<TrackKey, Vec<&'a Appointment>> = IndexMap::new();
    for appointment in appointments {
        groups
            .entry(TrackKey::of(appointment))
            .or_default()
            .push(appointment);
    }

    debug!(tracks = groups.len(); "Partitioned appointments");

    groups
        .into_iter()
        .map(|(key, appointments)| Track { key, appointments })
        .collect()
}

/// Orders tracks by date, then by the position of their professional in
/// `professionals`. Unknown professionals sort last.
pub fn sort_tracks(tracks: &mut [TrackLayout<'_>], professionals: &[Professional]) {
    let position = |id: Id| {
        professionals
            .iter()
            .position(|p| p.id() == id)
            .unwrap_or(professionals.len())
    };
    tracks.sort_by_key(|track| (track.key.date, position(track.key.resource)));
}

/// Lays out every track of `appointments` that starts on one of `dates`.
///
/// Tracks come back sorted by [`sort_tracks`].
pub fn layout_dates<'a>(
    appointments: &'a [Appointment],
    dates: &[NaiveDate],
    policy: ClusterWidth,
    professionals: &[Professional],
) -> Vec<TrackLayout<'a>> {
    let visible = appointments
        .iter()
        .filter(|appt| dates.contains(&appt.time().date()));

    let mut tracks: Vec<TrackLayout<'a>> = partition(visible)
        .iter()
        .map(|track| track.layout(policy))
        .collect();
    sort_tracks(&mut tracks, professionals);
    tracks
}
