//! Loading calendar data from TOML.
//!
//! A dataset holds the professionals, clients and appointments a calendar
//! starts from:
//!
//! ```toml
//! [[professionals]]
//! id = "prof_1"
//! name = "Dr. Evelyn Reed"
//! specialty = "Dentist"
//!
//! [[clients]]
//! id = "client_1"
//! name = "John Smith"
//!
//! [[appointments]]
//! id = "appt_1"
//! staff_id = "prof_1"
//! client_id = "client_1"
//! service_name = "Routine Check-up"
//! start = "2025-03-14T09:15:00"
//! end = "2025-03-14T09:45:00"
//! status = "Approved"
//! ```
//!
//! Times are quoted local date-times. Validation runs over the whole document
//! and reports every [`Issue`] it finds, not just the first.

use std::{collections::HashSet, fmt, ops::Range};

use chrono::NaiveDateTime;
use log::{debug, warn};
use serde::Deserialize;
use toml::Spanned;

use calgrid_core::{
    appointment::{Appointment, AppointmentDraft, AppointmentStatus, Client, Professional},
    identifier::Id,
    time::{TimeRange, TimeRangeError},
};

/// Professionals, clients and appointments loaded from one document.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    professionals: Vec<Professional>,
    clients: Vec<Client>,
    appointments: Vec<Appointment>,
}

impl Dataset {
    /// Parses and validates a TOML dataset.
    ///
    /// # Errors
    ///
    /// Returns a [`DatasetError`] listing every syntax or validation issue.
    pub fn parse(source: &str) -> Result<Self, DatasetError> {
        let raw: RawDataset = toml::from_str(source).map_err(|err| {
            DatasetError::from(Issue::Syntax {
                message: err.message().to_string(),
                span: err.span(),
            })
        })?;

        let dataset = raw.validate()?;
        debug!(
            professionals = dataset.professionals.len(),
            clients = dataset.clients.len(),
            appointments = dataset.appointments.len();
            "Dataset loaded"
        );
        Ok(dataset)
    }

    pub fn professionals(&self) -> &[Professional] {
        &self.professionals
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn professional(&self, id: Id) -> Option<&Professional> {
        self.professionals.iter().find(|p| p.id() == id)
    }

    pub fn client(&self, id: Id) -> Option<&Client> {
        self.clients.iter().find(|c| c.id() == id)
    }

    /// Splits the dataset into its collections.
    pub fn into_parts(self) -> (Vec<Professional>, Vec<Client>, Vec<Appointment>) {
        (self.professionals, self.clients, self.appointments)
    }
}

/// Kind of record an id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Professional,
    Client,
    Appointment,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Professional => "professional",
            Self::Client => "client",
            Self::Appointment => "appointment",
        };
        write!(f, "{s}")
    }
}

/// A single problem found in a dataset.
///
/// Every issue carries the byte range in the source it is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    /// The document is not valid TOML or does not match the schema.
    Syntax {
        message: String,
        span: Option<Range<usize>>,
    },
    /// An appointment ends at or before it starts. Points at `end`.
    InvalidTime {
        id: Id,
        source: TimeRangeError,
        span: Range<usize>,
    },
    /// Two records of the same kind share an id. Points at the later one.
    DuplicateId {
        kind: RecordKind,
        id: Id,
        span: Range<usize>,
    },
    /// An appointment points at a professional or client that does not exist.
    UnknownReference {
        appointment: Id,
        kind: RecordKind,
        id: Id,
        span: Range<usize>,
    },
}

impl Issue {
    /// Stable code shown next to the message.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Syntax { .. } => "D001",
            Self::InvalidTime { .. } => "D002",
            Self::DuplicateId { .. } => "D003",
            Self::UnknownReference { .. } => "D004",
        }
    }

    pub fn help(&self) -> Option<String> {
        match self {
            Self::Syntax { .. } => Some(
                "times are quoted local date-times, e.g. \"2025-03-14T09:15:00\"".to_string(),
            ),
            Self::InvalidTime { .. } => Some("`end` must be later than `start`".to_string()),
            Self::DuplicateId { kind, .. } => Some(format!("give each {kind} a unique `id`")),
            Self::UnknownReference { kind, .. } => {
                Some(format!("add the {kind} to the dataset or fix the reference"))
            }
        }
    }

    /// Byte range in the source the issue points at.
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            Self::Syntax { span, .. } => span.clone(),
            Self::InvalidTime { span, .. }
            | Self::DuplicateId { span, .. }
            | Self::UnknownReference { span, .. } => Some(span.clone()),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax { message, .. } => write!(f, "invalid dataset: {message}"),
            Self::InvalidTime { id, source, .. } => {
                write!(f, "appointment `{id}` has an invalid time range: {source}")
            }
            Self::DuplicateId { kind, id, .. } => write!(f, "duplicate {kind} id `{id}`"),
            Self::UnknownReference {
                appointment,
                kind,
                id,
                ..
            } => write!(f, "appointment `{appointment}` references unknown {kind} `{id}`"),
        }
    }
}

/// Error type for dataset loading.
///
/// Wraps one or more [`Issue`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetError {
    issues: Vec<Issue>,
}

impl DatasetError {
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    /// All issues, in document order of detection.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.issues.first() {
            write!(f, "{first}")?;
            if self.issues.len() > 1 {
                write!(f, " (+{} more)", self.issues.len() - 1)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for DatasetError {}

impl From<Issue> for DatasetError {
    fn from(issue: Issue) -> Self {
        Self::new(vec![issue])
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDataset {
    #[serde(default)]
    professionals: Vec<RawProfessional>,
    #[serde(default)]
    clients: Vec<RawClient>,
    #[serde(default)]
    appointments: Vec<RawAppointment>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawProfessional {
    id: Spanned<Id>,
    name: String,
    #[serde(default)]
    specialty: String,
    #[serde(default)]
    image: Option<String>,
}

impl RawProfessional {
    fn into_professional(self) -> Professional {
        let professional = Professional::new(self.id.into_inner(), self.name, self.specialty);
        match self.image {
            Some(image) => professional.with_image(image),
            None => professional,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawClient {
    id: Spanned<Id>,
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAppointment {
    id: Spanned<Id>,
    staff_id: Spanned<Id>,
    client_id: Spanned<Id>,
    #[serde(default)]
    service_name: String,
    start: NaiveDateTime,
    end: Spanned<NaiveDateTime>,
    #[serde(default)]
    status: AppointmentStatus,
}

impl RawDataset {
    fn validate(self) -> Result<Dataset, DatasetError> {
        let mut issues = Vec::new();

        let professional_ids = unique_ids(
            self.professionals.iter().map(|p| &p.id),
            RecordKind::Professional,
            &mut issues,
        );
        let client_ids = unique_ids(
            self.clients.iter().map(|c| &c.id),
            RecordKind::Client,
            &mut issues,
        );
        unique_ids(
            self.appointments.iter().map(|a| &a.id),
            RecordKind::Appointment,
            &mut issues,
        );

        let mut appointments = Vec::with_capacity(self.appointments.len());
        for raw in self.appointments {
            let id = *raw.id.get_ref();
            let references = [
                (&raw.staff_id, RecordKind::Professional, &professional_ids),
                (&raw.client_id, RecordKind::Client, &client_ids),
            ];
            for (reference, kind, known) in references {
                if !known.contains(reference.get_ref()) {
                    issues.push(Issue::UnknownReference {
                        appointment: id,
                        kind,
                        id: *reference.get_ref(),
                        span: reference.span(),
                    });
                }
            }

            match TimeRange::new(raw.start, *raw.end.get_ref()) {
                Ok(time) => appointments.push(Appointment::from_draft(
                    id,
                    AppointmentDraft {
                        staff_id: raw.staff_id.into_inner(),
                        client_id: raw.client_id.into_inner(),
                        service_name: raw.service_name,
                        time,
                        status: raw.status,
                    },
                )),
                Err(source) => issues.push(Issue::InvalidTime {
                    id,
                    source,
                    span: raw.end.span(),
                }),
            }
        }

        if !issues.is_empty() {
            warn!(issues = issues.len(); "Dataset failed validation");
            return Err(DatasetError::new(issues));
        }

        Ok(Dataset {
            professionals: self
                .professionals
                .into_iter()
                .map(RawProfessional::into_professional)
                .collect(),
            clients: self
                .clients
                .into_iter()
                .map(|raw| Client::new(raw.id.into_inner(), raw.name))
                .collect(),
            appointments,
        })
    }
}

/// Collects ids into a set, recording an issue at each repeat.
fn unique_ids<'a>(
    ids: impl Iterator<Item = &'a Spanned<Id>>,
    kind: RecordKind,
    issues: &mut Vec<Issue>,
) -> HashSet<Id> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(*id.get_ref()) {
            issues.push(Issue::DuplicateId {
                kind,
                id: *id.get_ref(),
                span: id.span(),
            });
        }
    }
    seen
}
