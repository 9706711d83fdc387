//! Customer feedback, general or tied to a session. Ratings arrive from the
//! kiosk as loose numbers and are clamped to whole stars.

use shared::{Feedback, FeedbackRequest};

use crate::error::{AppError, AppResult};
use crate::storage::{next_id, Store};
use crate::util::{clamp_stars, now_iso};

fn clamp_source(v: Option<&str>) -> String {
    match v.map(str::to_ascii_lowercase).as_deref() {
        Some("kiosk") => "kiosk".to_string(),
        Some("link") => "link".to_string(),
        _ => "desk".to_string(),
    }
}

#[derive(Clone)]
pub struct FeedbackService {
    store: Store,
}

impl FeedbackService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<Feedback> {
        self.store.feedback.read()
    }

    pub fn submit_general(&self, req: FeedbackRequest) -> AppResult<Feedback> {
        self.push(build("general", &req, false))
    }

    pub fn submit_session(&self, req: FeedbackRequest) -> AppResult<Feedback> {
        self.push(build("session", &req, true))
    }

    fn push(&self, mut fb: Feedback) -> AppResult<Feedback> {
        self.store.feedback.update(|list| {
            fb.id = next_id(list);
            list.push(fb.clone());
            Ok::<_, AppError>(fb)
        })
    }
}

fn build(kind: &str, req: &FeedbackRequest, with_links: bool) -> Feedback {
    let overall = clamp_stars(req.rating);
    Feedback {
        id: 0, // assigned on insert
        r#type: kind.to_string(),
        session_id: if with_links { req.session_id } else { None },
        appointment_id: if with_links { req.appointment_id } else { None },
        customer_id: if with_links { req.customer_id } else { None },
        therapist_id: if with_links { req.therapist_id } else { None },
        service_id: if with_links { req.service_id } else { None },
        // old readers look at `rating`, new ones at `overallRating`
        rating: overall,
        overall_rating: overall,
        service_rating: clamp_stars(req.service_rating),
        room_rating: clamp_stars(req.room_rating),
        reception_rating: clamp_stars(req.reception_rating),
        comment: req.comment.clone().unwrap_or_default(),
        source: clamp_source(req.source.as_deref()),
        created_at: now_iso(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::temp_store;

    #[test]
    fn stars_are_clamped_to_whole_numbers() {
        let (store, _dir) = temp_store();
        let svc = FeedbackService::new(store);
        let fb = svc
            .submit_general(FeedbackRequest {
                rating: Some(4.6),
                service_rating: Some(0.2),
                room_rating: Some(9.0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(fb.rating, Some(5));
        assert_eq!(fb.overall_rating, Some(5));
        assert_eq!(fb.service_rating, Some(1));
        assert_eq!(fb.room_rating, Some(5));
        assert_eq!(fb.reception_rating, None);
    }

    #[test]
    fn general_feedback_carries_no_session_links() {
        let (store, _dir) = temp_store();
        let svc = FeedbackService::new(store);
        let fb = svc
            .submit_general(FeedbackRequest {
                session_id: Some(3),
                customer_id: Some(7),
                rating: Some(4.0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(fb.r#type, "general");
        assert_eq!(fb.session_id, None);
        assert_eq!(fb.customer_id, None);
    }

    #[test]
    fn session_feedback_keeps_its_links() {
        let (store, _dir) = temp_store();
        let svc = FeedbackService::new(store);
        let fb = svc
            .submit_session(FeedbackRequest {
                session_id: Some(3),
                appointment_id: Some(12),
                therapist_id: Some(5),
                rating: Some(3.0),
                source: Some("KIOSK".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(fb.r#type, "session");
        assert_eq!(fb.session_id, Some(3));
        assert_eq!(fb.appointment_id, Some(12));
        assert_eq!(fb.source, "kiosk");
    }

    #[test]
    fn unknown_sources_default_to_desk() {
        let (store, _dir) = temp_store();
        let svc = FeedbackService::new(store);
        let fb = svc
            .submit_general(FeedbackRequest {
                source: Some("carrier-pigeon".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(fb.source, "desk");
    }

    #[test]
    fn ids_increment_across_both_kinds() {
        let (store, _dir) = temp_store();
        let svc = FeedbackService::new(store);
        let a = svc.submit_general(FeedbackRequest::default()).unwrap();
        let b = svc.submit_session(FeedbackRequest::default()).unwrap();
        assert_eq!(b.id, a.id + 1);
        assert_eq!(svc.list().len(), 2);
    }
}
