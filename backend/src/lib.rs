//! Bluewater backend: an axum REST API over JSON-file storage for a spa
//! front desk. Appointments, live sessions, invoicing, customers, staff,
//! expenses, feedback, reports, settings, and JWT-authenticated users.

pub mod auth;
pub mod domain;
pub mod error;
pub mod rest;
pub mod storage;
pub mod util;
