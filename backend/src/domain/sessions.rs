//! Live treatment sessions: pause, complete, extend.

use shared::{
    session_status, CompleteSessionRequest, CompletedSession, ExtendSessionRequest, Session,
    SessionPatch,
};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::storage::Store;
use crate::util::{millis_to_iso, now_iso, opt_millis, parse_millis};

#[derive(Clone)]
pub struct SessionService {
    store: Store,
}

impl SessionService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// All sessions, newest start first.
    pub fn list(&self) -> Vec<Session> {
        let mut list = self.store.sessions.read();
        list.sort_by_key(|s| std::cmp::Reverse(parse_millis(&s.start_at).unwrap_or(0)));
        list
    }

    pub fn get(&self, id: u64) -> AppResult<Session> {
        self.store
            .sessions
            .read()
            .into_iter()
            .find(|s| s.id == id)
            .ok_or(AppError::NotFound("session_not_found"))
    }

    pub fn update(&self, id: u64, patch: SessionPatch) -> AppResult<Session> {
        self.store.sessions.update(|list| {
            let s = find_mut(list, id)?;
            if let Some(v) = patch.status {
                s.status = v;
            }
            if let Some(v) = patch.start_at {
                s.start_at = v;
            }
            if let Some(v) = patch.end_at {
                s.end_at = Some(v);
            }
            if let Some(v) = patch.duration_minutes {
                s.duration_minutes = Some(v);
            }
            if let Some(v) = patch.room {
                s.room = v;
            }
            if let Some(v) = patch.area {
                s.area = v;
            }
            if let Some(v) = patch.mode {
                s.mode = v;
            }
            if let Some(v) = patch.therapist_id {
                s.therapist_id = Some(v);
            }
            if let Some(v) = patch.therapist {
                s.therapist = v;
            }
            s.updated_at = now_iso();
            Ok(s.clone())
        })
    }

    pub fn pause(&self, id: u64) -> AppResult<Session> {
        self.store.sessions.update(|list| {
            let s = find_mut(list, id)?;
            s.status = session_status::PAUSED.to_string();
            s.updated_at = now_iso();
            Ok(s.clone())
        })
    }

    /// Mark the session completed. The response carries a rating link built
    /// from the request's Origin header so the desk can hand it straight to
    /// the customer.
    pub fn complete(
        &self,
        id: u64,
        req: CompleteSessionRequest,
        origin: Option<&str>,
    ) -> AppResult<CompletedSession> {
        let session = self.store.sessions.update(|list| {
            let s = find_mut(list, id)?;
            s.status = session_status::COMPLETED.to_string();
            s.end_at = Some(
                req.end_at
                    .filter(|v| !v.is_empty())
                    .unwrap_or_else(now_iso),
            );
            s.updated_at = now_iso();
            Ok::<_, AppError>(s.clone())
        })?;

        let base = match origin.filter(|o| !o.is_empty()) {
            Some(o) => o.to_string(),
            None => format!(
                "http://localhost:{}",
                std::env::var("PORT").unwrap_or_else(|_| "5000".to_string())
            ),
        };
        let rate_link = format!(
            "{base}/rate?appointmentId={}&customerId={}&therapistId={}",
            session.appointment_id.unwrap_or(session.id),
            session.customer_id.map(|v| v.to_string()).unwrap_or_default(),
            session.therapist_id.map(|v| v.to_string()).unwrap_or_default(),
        );

        info!("completed session {id}");
        Ok(CompletedSession { session, rate_link })
    }

    /// Push the scheduled end out by `minutes` (default 10 when the request
    /// carries nothing usable). With no parseable end time the new end is
    /// start (or now) plus the session duration (or 60) plus the extension.
    pub fn extend(&self, id: u64, req: ExtendSessionRequest) -> AppResult<Session> {
        let minutes = match req.minutes {
            Some(m) if m.is_finite() && m != 0.0 => m,
            _ => 10.0,
        };

        self.store.sessions.update(|list| {
            let s = find_mut(list, id)?;
            let extension = (minutes * 60_000.0) as i64;
            let end_ms = match opt_millis(s.end_at.as_deref()) {
                Some(cur) => cur + extension,
                None => {
                    let start = parse_millis(&s.start_at)
                        .unwrap_or_else(|| chrono::Utc::now().timestamp_millis());
                    let base = i64::from(s.duration_minutes.filter(|m| *m > 0).unwrap_or(60));
                    start + base * 60_000 + extension
                }
            };
            s.end_at = Some(millis_to_iso(end_ms));
            s.updated_at = now_iso();
            Ok(s.clone())
        })
    }

    pub fn delete(&self, id: u64) -> AppResult<Session> {
        self.store.sessions.update(|list| {
            let i = list
                .iter()
                .position(|s| s.id == id)
                .ok_or(AppError::NotFound("session_not_found"))?;
            Ok(list.remove(i))
        })
    }
}

fn find_mut(list: &mut [Session], id: u64) -> Result<&mut Session, AppError> {
    list.iter_mut()
        .find(|s| s.id == id)
        .ok_or(AppError::NotFound("session_not_found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::temp_store;

    fn seed_session(store: &Store, id: u64, start_at: &str, end_at: Option<&str>) -> Session {
        store
            .sessions
            .update(|list| {
                let s = Session {
                    id,
                    appointment_id: Some(id + 100),
                    customer_id: Some(7),
                    customer_name: "Sara".to_string(),
                    therapist_id: Some(3),
                    therapist: "Lina".to_string(),
                    service_id: Some(1),
                    service_name: "Facial".to_string(),
                    room: "R1".to_string(),
                    area: String::new(),
                    mode: "in".to_string(),
                    status: "running".to_string(),
                    start_at: start_at.to_string(),
                    end_at: end_at.map(str::to_string),
                    duration_minutes: Some(60),
                    created_at: now_iso(),
                    updated_at: now_iso(),
                };
                list.push(s.clone());
                Ok::<_, AppError>(s)
            })
            .unwrap()
    }

    #[test]
    fn list_returns_newest_first() {
        let (store, _dir) = temp_store();
        let svc = SessionService::new(store.clone());
        seed_session(&store, 1, "2025-03-01T10:00:00Z", None);
        seed_session(&store, 2, "2025-03-02T10:00:00Z", None);

        let list = svc.list();
        assert_eq!(list[0].id, 2);
        assert_eq!(list[1].id, 1);
    }

    #[test]
    fn pause_sets_status_unconditionally() {
        let (store, _dir) = temp_store();
        let svc = SessionService::new(store.clone());
        seed_session(&store, 1, "2025-03-01T10:00:00Z", None);

        assert_eq!(svc.pause(1).unwrap().status, "paused");
        assert_eq!(svc.pause(1).unwrap().status, "paused");
    }

    #[test]
    fn complete_builds_a_rate_link_from_the_origin() {
        let (store, _dir) = temp_store();
        let svc = SessionService::new(store.clone());
        seed_session(&store, 1, "2025-03-01T10:00:00Z", None);

        let done = svc
            .complete(1, CompleteSessionRequest::default(), Some("https://spa.example"))
            .unwrap();
        assert_eq!(done.session.status, "completed");
        assert!(done.session.end_at.is_some());
        assert_eq!(
            done.rate_link,
            "https://spa.example/rate?appointmentId=101&customerId=7&therapistId=3"
        );
    }

    #[test]
    fn complete_without_origin_falls_back_to_localhost() {
        let (store, _dir) = temp_store();
        let svc = SessionService::new(store.clone());
        seed_session(&store, 1, "2025-03-01T10:00:00Z", None);

        let done = svc.complete(1, CompleteSessionRequest::default(), None).unwrap();
        assert!(done.rate_link.starts_with("http://localhost:"));
    }

    #[test]
    fn extend_adds_to_a_parseable_end_time() {
        let (store, _dir) = temp_store();
        let svc = SessionService::new(store.clone());
        seed_session(&store, 1, "2025-03-01T10:00:00Z", Some("2025-03-01T11:00:00Z"));

        let s = svc.extend(1, ExtendSessionRequest { minutes: Some(15.0) }).unwrap();
        assert_eq!(s.end_at.as_deref(), Some("2025-03-01T11:15:00.000Z"));
    }

    #[test]
    fn extend_without_end_time_uses_start_plus_duration() {
        let (store, _dir) = temp_store();
        let svc = SessionService::new(store.clone());
        seed_session(&store, 1, "2025-03-01T10:00:00Z", None);

        // start + 60 (duration) + 10 (default extension)
        let s = svc.extend(1, ExtendSessionRequest { minutes: None }).unwrap();
        assert_eq!(s.end_at.as_deref(), Some("2025-03-01T11:10:00.000Z"));

        // second extend now has an end time to build on
        let s = svc.extend(1, ExtendSessionRequest { minutes: None }).unwrap();
        assert_eq!(s.end_at.as_deref(), Some("2025-03-01T11:20:00.000Z"));
    }

    #[test]
    fn update_merges_provided_fields() {
        let (store, _dir) = temp_store();
        let svc = SessionService::new(store.clone());
        seed_session(&store, 1, "2025-03-01T10:00:00Z", None);

        let s = svc
            .update(
                1,
                SessionPatch {
                    room: Some("R2".to_string()),
                    duration_minutes: Some(45),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(s.room, "R2");
        assert_eq!(s.duration_minutes, Some(45));
        assert_eq!(s.customer_name, "Sara");
    }

    #[test]
    fn delete_returns_the_removed_session() {
        let (store, _dir) = temp_store();
        let svc = SessionService::new(store.clone());
        seed_session(&store, 1, "2025-03-01T10:00:00Z", None);

        let removed = svc.delete(1).unwrap();
        assert_eq!(removed.id, 1);
        assert!(store.sessions.read().is_empty());
        assert!(matches!(
            svc.get(1),
            Err(AppError::NotFound("session_not_found"))
        ));
    }
}
