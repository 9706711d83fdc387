//! Appointment booking and the appointment -> session transition.

use shared::{
    appointment_status, is_terminal_session_status, session_status, Appointment, AppointmentPatch,
    NewAppointment, Session,
};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::storage::{next_id, Store};
use crate::util::{millis_to_iso, now_iso, parse_millis};

/// Result of starting an appointment: the live session, and whether it was
/// created by this call or reused from an earlier start.
#[derive(Debug, Clone)]
pub struct StartedSession {
    pub session: Session,
    pub created: bool,
}

#[derive(Clone)]
pub struct AppointmentService {
    store: Store,
}

impl AppointmentService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// All appointments, earliest start first. Records whose start time does
    /// not parse sort to the front.
    pub fn list(&self) -> Vec<Appointment> {
        let mut list = self.store.appointments.read();
        list.sort_by_key(|a| parse_millis(&a.start_at).unwrap_or(0));
        list
    }

    pub fn create(&self, req: NewAppointment) -> AppResult<Appointment> {
        let now = now_iso();
        let start_at = req
            .start_at
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| now.clone());
        let room = req.room.unwrap_or_default();
        let area = req.area.unwrap_or_default();
        let mode = match req.mode.filter(|m| !m.is_empty()) {
            Some(m) => m,
            None => infer_mode(&room, &area),
        };

        let appt = self.store.appointments.update(|list| {
            let appt = Appointment {
                id: next_id(list),
                start_at,
                customer_id: req.customer_id,
                customer_name: req.customer_name.unwrap_or_default(),
                therapist_id: req.therapist_id,
                therapist: req.therapist.unwrap_or_default(),
                service_id: req.service_id,
                service_name: req.service_name.unwrap_or_default(),
                room,
                area,
                mode,
                status: req
                    .status
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| appointment_status::BOOKED.to_string()),
                notes: req.notes.unwrap_or_default(),
                end_at: None,
                invoice_id: None,
                created_at: now.clone(),
                updated_at: now,
            };
            list.push(appt.clone());
            Ok::<_, AppError>(appt)
        })?;

        info!("created appointment {}", appt.id);
        Ok(appt)
    }

    pub fn update(&self, id: u64, patch: AppointmentPatch) -> AppResult<Appointment> {
        self.store.appointments.update(|list| {
            let appt = list
                .iter_mut()
                .find(|a| a.id == id)
                .ok_or(AppError::NotFound("appointment_not_found"))?;
            if let Some(v) = patch.start_at {
                appt.start_at = v;
            }
            if let Some(v) = patch.customer_id {
                appt.customer_id = Some(v);
            }
            if let Some(v) = patch.customer_name {
                appt.customer_name = v;
            }
            if let Some(v) = patch.therapist_id {
                appt.therapist_id = Some(v);
            }
            if let Some(v) = patch.therapist {
                appt.therapist = v;
            }
            if let Some(v) = patch.service_id {
                appt.service_id = Some(v);
            }
            if let Some(v) = patch.service_name {
                appt.service_name = v;
            }
            if let Some(v) = patch.room {
                appt.room = v;
            }
            if let Some(v) = patch.area {
                appt.area = v;
            }
            if let Some(v) = patch.mode {
                appt.mode = v;
            }
            if let Some(v) = patch.status {
                appt.status = v;
            }
            if let Some(v) = patch.notes {
                appt.notes = v;
            }
            if let Some(v) = patch.end_at {
                appt.end_at = Some(v);
            }
            appt.updated_at = now_iso();
            Ok(appt.clone())
        })
    }

    pub fn delete(&self, id: u64) -> AppResult<Appointment> {
        self.store.appointments.update(|list| {
            let i = list
                .iter()
                .position(|a| a.id == id)
                .ok_or(AppError::NotFound("appointment_not_found"))?;
            Ok(list.remove(i))
        })
    }

    /// Start an appointment. Idempotent: a non-terminal session already tied
    /// to this appointment is returned as-is instead of creating a duplicate.
    /// Either way the appointment ends up In-Progress.
    pub fn start(&self, id: u64) -> AppResult<StartedSession> {
        let appt = self
            .store
            .appointments
            .read()
            .into_iter()
            .find(|a| a.id == id)
            .ok_or(AppError::NotFound("appointment_not_found"))?;

        let duration = self.service_duration(appt.service_id);

        let started = self.store.sessions.update(|sessions| {
            if let Some(existing) = sessions
                .iter()
                .find(|s| s.appointment_id == Some(appt.id) && !is_terminal_session_status(&s.status))
            {
                info!("appointment {} already has session {}", appt.id, existing.id);
                return Ok::<_, AppError>(StartedSession {
                    session: existing.clone(),
                    created: false,
                });
            }

            let start_at = now_iso();
            let end_at = parse_millis(&start_at)
                .map(|ms| millis_to_iso(ms + i64::from(duration) * 60_000));
            let now = now_iso();
            let session = Session {
                id: next_id(sessions),
                appointment_id: Some(appt.id),
                customer_id: appt.customer_id,
                customer_name: appt.customer_name.clone(),
                therapist_id: appt.therapist_id,
                therapist: appt.therapist.clone(),
                service_id: appt.service_id,
                service_name: appt.service_name.clone(),
                room: appt.room.clone(),
                area: appt.area.clone(),
                mode: if appt.mode.is_empty() {
                    infer_mode(&appt.room, &appt.area)
                } else {
                    appt.mode.clone()
                },
                status: session_status::RUNNING.to_string(),
                start_at,
                end_at,
                duration_minutes: Some(duration),
                created_at: now.clone(),
                updated_at: now,
            };
            sessions.push(session.clone());
            Ok(StartedSession { session, created: true })
        })?;

        if started.created || !appt.status.eq_ignore_ascii_case(appointment_status::IN_PROGRESS) {
            self.store.appointments.update(|list| {
                if let Some(a) = list.iter_mut().find(|a| a.id == id) {
                    a.status = appointment_status::IN_PROGRESS.to_string();
                    a.updated_at = now_iso();
                }
                Ok::<_, AppError>(())
            })?;
        }

        info!(
            "started appointment {} (session {}, created: {})",
            id, started.session.id, started.created
        );
        Ok(started)
    }

    fn service_duration(&self, service_id: Option<i64>) -> u32 {
        let Some(sid) = service_id else { return 60 };
        self.store
            .services
            .read()
            .iter()
            .find(|s| i64::try_from(s.id) == Ok(sid))
            .and_then(|s| s.duration_minutes)
            .filter(|m| *m > 0)
            .unwrap_or(60)
    }
}

fn infer_mode(room: &str, area: &str) -> String {
    if !room.is_empty() {
        "in".to_string()
    } else if !area.is_empty() {
        "out".to_string()
    } else {
        String::new()
    }
}
