//! Calendar records: appointments, professionals and clients.
//!
//! These are plain value types. Where they come from (a dataset file, a
//! test fixture, a form) is not their concern.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{identifier::Id, time::TimeRange};

/// Lifecycle state of an appointment.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentStatus {
    #[default]
    Requested,
    Approved,
    Completed,
    Cancelled,
    Missing,
    Rescheduled,
}

impl AppointmentStatus {
    /// All statuses in display order.
    pub const ALL: [AppointmentStatus; 6] = [
        Self::Requested,
        Self::Approved,
        Self::Completed,
        Self::Cancelled,
        Self::Missing,
        Self::Rescheduled,
    ];
}

impl From<AppointmentStatus> for &'static str {
    fn from(val: AppointmentStatus) -> Self {
        match val {
            AppointmentStatus::Requested => "Requested",
            AppointmentStatus::Approved => "Approved",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::Missing => "Missing",
            AppointmentStatus::Rescheduled => "Rescheduled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

impl FromStr for AppointmentStatus {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| {
                let name: &'static str = (*status).into();
                name.eq_ignore_ascii_case(s)
            })
            .ok_or("Unsupported appointment status")
    }
}

/// Anything that occupies a span of wall-clock time.
///
/// The layout engine only needs this much of an item.
pub trait Scheduled {
    fn time_range(&self) -> TimeRange;
}

impl Scheduled for TimeRange {
    fn time_range(&self) -> TimeRange {
        *self
    }
}

/// Appointment fields without an identity.
///
/// This is what an edit form produces; the schedule assigns the id on save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentDraft {
    pub staff_id: Id,
    pub client_id: Id,
    pub service_name: String,
    pub time: TimeRange,
    pub status: AppointmentStatus,
}

/// A booked appointment for one professional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    id: Id,
    staff_id: Id,
    client_id: Id,
    service_name: String,
    time: TimeRange,
    status: AppointmentStatus,
}

impl Appointment {
    /// Gives a draft its identity.
    pub fn from_draft(id: Id, draft: AppointmentDraft) -> Self {
        let AppointmentDraft {
            staff_id,
            client_id,
            service_name,
            time,
            status,
        } = draft;
        Self {
            id,
            staff_id,
            client_id,
            service_name,
            time,
            status,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    /// The professional (resource) this appointment is booked with.
    pub fn staff_id(&self) -> Id {
        self.staff_id
    }

    pub fn client_id(&self) -> Id {
        self.client_id
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn time(&self) -> TimeRange {
        self.time
    }

    pub fn status(&self) -> AppointmentStatus {
        self.status
    }

    /// Converts back into editable fields, keeping the id aside.
    pub fn to_draft(&self) -> AppointmentDraft {
        AppointmentDraft {
            staff_id: self.staff_id,
            client_id: self.client_id,
            service_name: self.service_name.clone(),
            time: self.time,
            status: self.status,
        }
    }
}

impl Scheduled for Appointment {
    fn time_range(&self) -> TimeRange {
        self.time
    }
}

/// A staff member whose appointments form one column of the calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Professional {
    id: Id,
    name: String,
    specialty: String,
    image: Option<String>,
}

impl Professional {
    pub fn new(id: Id, name: impl Into<String>, specialty: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            specialty: specialty.into(),
            image: None,
        }
    }

    /// Sets the avatar URL (builder style).
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn specialty(&self) -> &str {
        &self.specialty
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

/// A client who books appointments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    id: Id,
    name: String,
}

impl Client {
    pub fn new(id: Id, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn draft() -> AppointmentDraft {
        let day = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        AppointmentDraft {
            staff_id: Id::new("prof_1"),
            client_id: Id::new("client_1"),
            service_name: "Routine Check-up".to_string(),
            time: TimeRange::new(
                day.and_hms_opt(9, 15, 0).unwrap(),
                day.and_hms_opt(9, 45, 0).unwrap(),
            )
            .unwrap(),
            status: AppointmentStatus::Approved,
        }
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in AppointmentStatus::ALL {
            let parsed: AppointmentStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert_eq!(
            "cancelled".parse::<AppointmentStatus>(),
            Ok(AppointmentStatus::Cancelled)
        );
        assert!("Pending".parse::<AppointmentStatus>().is_err());
    }

    #[test]
    fn test_status_default_is_requested() {
        assert_eq!(AppointmentStatus::default(), AppointmentStatus::Requested);
    }

    #[test]
    fn test_from_draft_keeps_fields() {
        let appt = Appointment::from_draft(Id::new("appt_1"), draft());

        assert_eq!(appt.id(), "appt_1");
        assert_eq!(appt.staff_id(), "prof_1");
        assert_eq!(appt.client_id(), "client_1");
        assert_eq!(appt.service_name(), "Routine Check-up");
        assert_eq!(appt.time().duration_minutes(), 30);
        assert_eq!(appt.to_draft(), draft());
        assert_eq!(appt.time_range(), appt.time());
    }

    #[test]
    fn test_professional_builder() {
        let prof = Professional::new(Id::new("prof_2"), "Alex Chen", "Therapist")
            .with_image("https://example.com/alex.png");

        assert_eq!(prof.name(), "Alex Chen");
        assert_eq!(prof.specialty(), "Therapist");
        assert_eq!(prof.image(), Some("https://example.com/alex.png"));
    }
}
