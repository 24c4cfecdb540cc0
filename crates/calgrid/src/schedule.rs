//! Calendar application state.
//!
//! [`Schedule`] is the single owner of everything the calendar shows: the
//! professionals, clients and appointments, the current view and date, and
//! what the user has selected. It changes only through [`Schedule::apply`],
//! one [`Action`] at a time.
//!
//! Layouts are never stored here. [`Schedule::tracks_for_view`] recomputes
//! them from the current appointments every time it is called.

use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, info};
use thiserror::Error;

use calgrid_core::{
    appointment::{Appointment, AppointmentDraft, AppointmentStatus, Client, Professional},
    identifier::Id,
    time::{TimeRange, TimeRangeError},
};

use crate::{
    calendar::{self, DayPreview, Direction, ViewKind},
    config::AppConfig,
    dataset::Dataset,
    layout::{self, TrackLayout},
};

const GENERATED_ID_PREFIX: &str = "appt";

/// Errors raised while applying an [`Action`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("unknown appointment `{0}`")]
    UnknownAppointment(Id),

    #[error("unknown professional `{0}`")]
    UnknownProfessional(Id),

    #[error("unknown client `{0}`")]
    UnknownClient(Id),

    #[error("invalid appointment time: {0}")]
    InvalidTime(#[from] TimeRangeError),
}

/// What the edit panel is currently showing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    /// An existing appointment, opened for editing.
    Appointment(Id),
    /// An empty slot of a professional's track, opened to book it.
    Slot { at: NaiveDateTime, staff_id: Id },
}

/// A discrete change to the schedule.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Stores a draft. With `id`, replaces that appointment; without, books a
    /// new one under a generated id.
    Save {
        draft: AppointmentDraft,
        id: Option<Id>,
    },
    /// Opens an existing appointment.
    Select(Id),
    /// Opens an empty slot for booking.
    SelectSlot { at: NaiveDateTime, staff_id: Id },
    ClearSelection,
    SetView(ViewKind),
    Navigate(Direction),
    /// Jumps to the date containing `today`.
    Today(NaiveDate),
    /// Switches view and date together, as when a month cell is clicked.
    Jump { view: ViewKind, date: NaiveDate },
}

/// The calendar's state container.
#[derive(Debug, Clone)]
pub struct Schedule {
    config: AppConfig,
    professionals: Vec<Professional>,
    clients: Vec<Client>,
    appointments: Vec<Appointment>,
    view: ViewKind,
    date: NaiveDate,
    selection: Selection,
}

impl Schedule {
    /// Creates a schedule over `dataset`, opened on `date` in the configured
    /// default view.
    pub fn new(config: AppConfig, dataset: Dataset, date: NaiveDate) -> Self {
        let view = config.calendar().default_view();
        let (professionals, clients, appointments) = dataset.into_parts();
        Self {
            config,
            professionals,
            clients,
            appointments,
            view,
            date,
            selection: Selection::None,
        }
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

    pub fn view(&self) -> ViewKind {
        self.view
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn appointment(&self, id: Id) -> Option<&Appointment> {
        self.appointments.iter().find(|appt| appt.id() == id)
    }

    /// Applies one action.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError`] when the action refers to records that do not
    /// exist. A failed action leaves the schedule unchanged.
    pub fn apply(&mut self, action: Action) -> Result<(), ScheduleError> {
        debug!(action:?; "Applying action");

        match action {
            Action::Save { draft, id } => {
                let id = self.save(draft, id)?;
                info!(appointment:% = id; "Appointment saved");
                self.selection = Selection::None;
            }
            Action::Select(id) => {
                if self.appointment(id).is_none() {
                    return Err(ScheduleError::UnknownAppointment(id));
                }
                self.selection = Selection::Appointment(id);
            }
            Action::SelectSlot { at, staff_id } => {
                self.check_professional(staff_id)?;
                self.selection = Selection::Slot { at, staff_id };
            }
            Action::ClearSelection => self.selection = Selection::None,
            Action::SetView(view) => self.view = view,
            Action::Navigate(direction) => {
                self.date = calendar::step(self.view, self.date, direction);
            }
            Action::Today(today) => self.date = today,
            Action::Jump { view, date } => {
                self.view = view;
                self.date = date;
            }
        }

        Ok(())
    }

    /// Prefilled form fields for the current selection.
    ///
    /// An open appointment yields its own fields. An open slot yields a
    /// `Requested` booking of the configured default duration with the first
    /// client. Returns `None` with nothing selected or no clients to book for.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidTime`] if the default duration cannot
    /// produce a valid range.
    pub fn draft_for_selection(&self) -> Result<Option<AppointmentDraft>, ScheduleError> {
        match self.selection {
            Selection::None => Ok(None),
            Selection::Appointment(id) => Ok(self.appointment(id).map(Appointment::to_draft)),
            Selection::Slot { at, staff_id } => {
                let Some(client) = self.clients.first() else {
                    return Ok(None);
                };
                let time = TimeRange::starting_at(at, self.config.calendar().default_duration())?;
                Ok(Some(AppointmentDraft {
                    staff_id,
                    client_id: client.id(),
                    service_name: String::new(),
                    time,
                    status: AppointmentStatus::Requested,
                }))
            }
        }
    }

    /// Whether the current view contains `today`.
    pub fn shows_today(&self, today: NaiveDate) -> bool {
        calendar::contains_today(self.view, self.date, today)
    }

    /// Laid-out tracks for every date the current view covers, ordered by
    /// date and then by professional.
    pub fn tracks_for_view(&self) -> Vec<TrackLayout<'_>> {
        let dates = calendar::visible_dates(self.view, self.date);
        layout::layout_dates(
            &self.appointments,
            &dates,
            self.config.layout().cluster_width(),
            &self.professionals,
        )
    }

    /// Month-cell previews for the current month.
    pub fn month_previews(&self) -> Vec<(calendar::MonthCell, DayPreview<'_>)> {
        let limit = self.config.calendar().month_preview_limit();
        calendar::month_grid(self.date)
            .into_iter()
            .map(|cell| {
                let preview = DayPreview::new(&self.appointments, cell.date(), limit);
                (cell, preview)
            })
            .collect()
    }

    fn save(&mut self, draft: AppointmentDraft, id: Option<Id>) -> Result<Id, ScheduleError> {
        self.check_professional(draft.staff_id)?;
        if !self.clients.iter().any(|c| c.id() == draft.client_id) {
            return Err(ScheduleError::UnknownClient(draft.client_id));
        }

        match id {
            Some(id) => {
                let slot = self
                    .appointments
                    .iter_mut()
                    .find(|appt| appt.id() == id)
                    .ok_or(ScheduleError::UnknownAppointment(id))?;
                *slot = Appointment::from_draft(id, draft);
                Ok(id)
            }
            None => {
                let id = self.next_id();
                self.appointments.push(Appointment::from_draft(id, draft));
                Ok(id)
            }
        }
    }

    fn check_professional(&self, id: Id) -> Result<(), ScheduleError> {
        if self.professionals.iter().any(|p| p.id() == id) {
            Ok(())
        } else {
            Err(ScheduleError::UnknownProfessional(id))
        }
    }

    /// First `appt_<n>` not already taken, counting up from the number of
    /// stored appointments.
    fn next_id(&self) -> Id {
        (self.appointments.len() + 1..)
            .map(|seq| Id::with_sequence(GENERATED_ID_PREFIX, seq))
            .find(|id| self.appointment(*id).is_none())
            .unwrap_or_else(|| Id::with_sequence(GENERATED_ID_PREFIX, 0))
    }
}
