//! HTTP surface. Handlers stay thin: decode the request, call the matching
//! domain service, shape the response.

pub mod appointments;
pub mod auth;
pub mod catalog;
pub mod customers;
pub mod expenses;
pub mod feedback;
pub mod invoices;
pub mod reports;
pub mod sessions;
pub mod settings;
pub mod staff;

use axum::extract::FromRef;
use axum::http::StatusCode;
use axum::routing::{get, patch, post, put};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::auth::JwtService;
use crate::domain::{
    AccountService, AppointmentService, CatalogService, CustomerService, ExpenseService,
    FeedbackService, InvoiceService, ReportService, SessionService, SettingsService, StaffService,
};
use crate::storage::Store;

/// Shared application state: one service per resource plus the token
/// service the auth extractor pulls out via `FromRef`.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub appointments: AppointmentService,
    pub sessions: SessionService,
    pub invoices: InvoiceService,
    pub customers: CustomerService,
    pub catalog: CatalogService,
    pub staff: StaffService,
    pub expenses: ExpenseService,
    pub feedback: FeedbackService,
    pub reports: ReportService,
    pub accounts: AccountService,
    pub settings: SettingsService,
    pub jwt: JwtService,
}

impl AppState {
    pub fn new(store: Store, jwt: JwtService) -> Self {
        Self {
            appointments: AppointmentService::new(store.clone()),
            sessions: SessionService::new(store.clone()),
            invoices: InvoiceService::new(store.clone()),
            customers: CustomerService::new(store.clone()),
            catalog: CatalogService::new(store.clone()),
            staff: StaffService::new(store.clone()),
            expenses: ExpenseService::new(store.clone()),
            feedback: FeedbackService::new(store.clone()),
            reports: ReportService::new(store.clone()),
            accounts: AccountService::new(store.clone(), jwt.clone()),
            settings: SettingsService::new(store),
            jwt,
        }
    }
}

/// The full application router: everything under `/api`, permissive CORS,
/// JSON 404 for unknown API paths.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/appointments", get(appointments::list).post(appointments::create))
        .route(
            "/appointments/:id",
            patch(appointments::update).delete(appointments::remove),
        )
        .route("/appointments/:id/start", post(appointments::start))
        .route("/sessions", get(sessions::list))
        .route(
            "/sessions/:id",
            get(sessions::get_one)
                .patch(sessions::update)
                .delete(sessions::remove),
        )
        .route("/sessions/:id/pause", post(sessions::pause))
        .route("/sessions/:id/complete", post(sessions::complete))
        .route("/sessions/:id/extend", post(sessions::extend))
        .route("/invoices", get(invoices::list).post(invoices::create))
        .route("/invoices/from-appointment", post(invoices::from_appointment))
        .route(
            "/invoices/:id",
            get(invoices::get_one)
                .patch(invoices::update)
                .delete(invoices::remove),
        )
        .route("/customers", get(customers::list).post(customers::create))
        .route("/customers/stats/kpis", get(customers::kpis))
        .route("/customers/top", get(customers::top))
        .route(
            "/customers/:id",
            get(customers::get_one)
                .put(customers::update)
                .delete(customers::remove),
        )
        .route("/services", get(catalog::list).post(catalog::create))
        .route("/services/:id", put(catalog::update).delete(catalog::remove))
        .route("/staff", get(staff::list).post(staff::create))
        .route("/staff/:id", put(staff::update).delete(staff::remove))
        .route("/expenses", get(expenses::list).post(expenses::create))
        .route("/expenses/bulk", post(expenses::bulk))
        .route("/expenses/:id", patch(expenses::update).delete(expenses::remove))
        .route("/feedback", get(feedback::list))
        .route("/feedback/general", post(feedback::general))
        .route("/feedback/session", post(feedback::session))
        .route("/reports/customers", get(reports::customers))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        .route("/auth/users", get(auth::list_users).post(auth::create_user))
        .route(
            "/auth/users/:id",
            patch(auth::update_user).delete(auth::delete_user),
        )
        .route(
            "/settings",
            get(settings::get_settings)
                .put(settings::update_settings)
                .patch(settings::update_settings),
        )
        .fallback(not_found);

    Router::new()
        .nest("/api", api)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not Found" })))
}
