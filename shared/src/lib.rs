//! Shared wire types for the Bluewater spa management API.
//!
//! Every record is stored and transmitted as camelCase JSON, matching the
//! files a running installation already has on disk. Request types accept the
//! legacy field aliases at the API boundary only; everything past
//! deserialization works with the canonical field names.

use serde::{Deserialize, Serialize};

/// Appointment statuses used by the booking flow.
pub mod appointment_status {
    pub const BOOKED: &str = "Booked";
    pub const IN_PROGRESS: &str = "In-Progress";
    pub const COMPLETED: &str = "Completed";
    pub const CANCELLED: &str = "Cancelled";
}

/// Session statuses. Historical data also contains spelling variants
/// ("complete", "canceled"), so terminal checks must go through
/// [`is_terminal_session_status`].
pub mod session_status {
    pub const RUNNING: &str = "running";
    pub const PAUSED: &str = "paused";
    pub const COMPLETED: &str = "completed";
    pub const CANCELLED: &str = "cancelled";
}

/// True when a session can no longer be resumed. Case-insensitive and
/// tolerant of the spelling variants found in existing data files.
pub fn is_terminal_session_status(status: &str) -> bool {
    matches!(
        status.to_ascii_lowercase().as_str(),
        "completed" | "complete" | "cancelled" | "canceled" | "deleted"
    )
}

/// A scheduled booking of a customer with a therapist for a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: u64,
    /// Scheduled start time (RFC 3339).
    pub start_at: String,
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub therapist_id: Option<i64>,
    #[serde(default)]
    pub therapist: String,
    #[serde(default)]
    pub service_id: Option<i64>,
    #[serde(default)]
    pub service_name: String,
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub area: String,
    /// "in" for in-center, "out" for out-call, empty when unknown.
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub notes: String,
    /// Populated by the scheduled end time patch, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_at: Option<String>,
    /// Back-link written when an invoice is created from this appointment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<u64>,
    pub created_at: String,
    pub updated_at: String,
}

/// The running realization of an appointment. Customer/therapist/service
/// fields are snapshots copied at creation and never re-joined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: u64,
    #[serde(default)]
    pub appointment_id: Option<u64>,
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub therapist_id: Option<i64>,
    #[serde(default)]
    pub therapist: String,
    #[serde(default)]
    pub service_id: Option<i64>,
    #[serde(default)]
    pub service_name: String,
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub status: String,
    /// Inherited files may still use the old `startedAt`/`endsAt` spellings.
    #[serde(default, alias = "startedAt")]
    pub start_at: String,
    #[serde(default, alias = "endsAt")]
    pub end_at: Option<String>,
    #[serde(default, alias = "duration", alias = "minutes")]
    pub duration_minutes: Option<u32>,
    pub created_at: String,
    pub updated_at: String,
}

/// One service entry on an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default)]
    pub service_id: Option<i64>,
    #[serde(default)]
    pub service_name: String,
    pub qty: f64,
    pub price: f64,
    pub total: f64,
    #[serde(default)]
    pub therapist_id: Option<i64>,
}

/// A billable document with computed totals, optionally linked to an
/// appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: u64,
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub therapist_id: Option<i64>,
    #[serde(default)]
    pub therapist: String,
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub room_number: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub items: Vec<LineItem>,
    pub discount: f64,
    pub tax_rate: f64,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub appointment_id: Option<u64>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub notes: String,
    /// Clamped to [0, 5] at one decimal place on every write.
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub visit_count: u32,
    #[serde(default)]
    pub last_visit_at: Option<String>,
    #[serde(default)]
    pub total_paid: f64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItem {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    /// Treatment length used to compute a session's end time.
    #[serde(default, alias = "duration", alias = "minutes")]
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub notes: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// A business expense row. Optional text fields are dropped from the file
/// when empty, so they deserialize with defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Free-text invoice/receipt reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// A rating record, either general or tied to a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: u64,
    /// "general" or "session".
    pub r#type: String,
    #[serde(default)]
    pub session_id: Option<u64>,
    #[serde(default)]
    pub appointment_id: Option<u64>,
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub therapist_id: Option<i64>,
    #[serde(default)]
    pub service_id: Option<i64>,
    /// Legacy overall rating, kept alongside `overallRating` for older
    /// readers of the file.
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub overall_rating: Option<u8>,
    #[serde(default)]
    pub service_rating: Option<u8>,
    #[serde(default)]
    pub room_rating: Option<u8>,
    #[serde(default)]
    pub reception_rating: Option<u8>,
    #[serde(default)]
    pub comment: String,
    /// "desk", "kiosk" or "link".
    pub source: String,
    pub created_at: String,
}

/// Stored account record. The password hash never leaves the backend;
/// responses use [`UserPublic`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPublic {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<&User> for UserPublic {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
            role: u.role.clone(),
        }
    }
}

/// Business-wide settings, persisted as a single JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub business_name: String,
    pub logo_url: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub website: String,
    pub whatsapp: String,
    pub instagram: String,
    pub facebook: String,
    pub default_currency: String,
    pub default_tax_rate: f64,
    /// "thermal" or "a4".
    pub default_print_mode: String,
    pub invoice_footer: String,
    pub payment_methods: Vec<String>,
    pub updated_at: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            business_name: String::new(),
            logo_url: String::new(),
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            website: String::new(),
            whatsapp: String::new(),
            instagram: String::new(),
            facebook: String::new(),
            default_currency: "AED".to_string(),
            default_tax_rate: 0.0,
            default_print_mode: "thermal".to_string(),
            invoice_footer: String::new(),
            payment_methods: vec![
                "Cash".to_string(),
                "Card".to_string(),
                "Transfer".to_string(),
            ],
            updated_at: String::new(),
        }
    }
}

/* ---------------- request / response DTOs ---------------- */

/// For patch fields where an explicit `null` clears the value: absent maps to
/// the outer `None`, `null` to `Some(None)`, a value to `Some(Some(v))`.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

/// Booking request. The start time historically arrived under several names,
/// all accepted here and nowhere else.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    #[serde(default, alias = "datetime", alias = "date", alias = "time")]
    pub start_at: Option<String>,
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub therapist_id: Option<i64>,
    #[serde(default)]
    pub therapist: Option<String>,
    #[serde(default)]
    pub service_id: Option<i64>,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Whitelisted mutable appointment fields.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPatch {
    #[serde(default)]
    pub start_at: Option<String>,
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub therapist_id: Option<i64>,
    #[serde(default)]
    pub therapist: Option<String>,
    #[serde(default)]
    pub service_id: Option<i64>,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub end_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPatch {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub start_at: Option<String>,
    #[serde(default)]
    pub end_at: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub therapist_id: Option<i64>,
    #[serde(default)]
    pub therapist: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteSessionRequest {
    #[serde(default)]
    pub end_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendSessionRequest {
    #[serde(default)]
    pub minutes: Option<f64>,
}

/// Completed session plus the feedback-collection link for the customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedSession {
    #[serde(flatten)]
    pub session: Session,
    pub rate_link: String,
}

/// Raw invoice line as submitted by clients, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLineItem {
    #[serde(default, alias = "id", alias = "code")]
    pub service_id: Option<i64>,
    #[serde(default, alias = "service")]
    pub service_name: Option<String>,
    #[serde(default)]
    pub qty: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default, alias = "staffId", alias = "staff_id")]
    pub therapist_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoice {
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default, alias = "room")]
    pub room_number: Option<String>,
    #[serde(default, alias = "locationArea")]
    pub area: Option<String>,
    #[serde(default)]
    pub items: Vec<RawLineItem>,
    #[serde(default)]
    pub discount: Option<f64>,
    #[serde(default)]
    pub tax_rate: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub appointment_id: Option<u64>,
    #[serde(default)]
    pub therapist_id: Option<i64>,
    #[serde(default)]
    pub therapist: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePatch {
    #[serde(default, deserialize_with = "double_option")]
    pub customer_id: Option<Option<i64>>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default, alias = "room")]
    pub room_number: Option<String>,
    #[serde(default, alias = "locationArea")]
    pub area: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub therapist_id: Option<Option<i64>>,
    #[serde(default)]
    pub therapist: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub appointment_id: Option<Option<u64>>,
    #[serde(default)]
    pub items: Option<Vec<RawLineItem>>,
    #[serde(default)]
    pub discount: Option<f64>,
    #[serde(default)]
    pub tax_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FromAppointmentRequest {
    #[serde(default)]
    pub appointment_id: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub total_paid: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub visit_count: Option<f64>,
    #[serde(default)]
    pub last_visit_at: Option<String>,
    #[serde(default)]
    pub total_paid: Option<f64>,
}

/// Customer KPI block for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerKpis {
    pub total: usize,
    pub with_phone: usize,
    pub avg_rating: f64,
    pub repeat_count: usize,
    pub recent_last_visit30d: usize,
}

/// Slim customer row for the top-customers board.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopCustomer {
    pub id: u64,
    pub name: String,
    pub phone: String,
    pub notes: String,
    pub rating: f64,
    pub visit_count: u32,
    pub last_visit_at: Option<String>,
    pub total_paid: f64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewService {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default, alias = "duration", alias = "minutes")]
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default, alias = "duration", alias = "minutes")]
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStaff {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Expense as submitted, carrying the CSV-mapper aliases.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    #[serde(default, alias = "txnDate", alias = "transactionDate")]
    pub date: Option<String>,
    #[serde(default, alias = "payee", alias = "supplier")]
    pub vendor: Option<String>,
    #[serde(default, alias = "memo")]
    pub description: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default, alias = "paymentMethod")]
    pub method: Option<String>,
    #[serde(default, alias = "reference")]
    pub invoice: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkExpenses {
    #[serde(default)]
    pub items: Vec<NewExpense>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkExpensesResult {
    pub ok: bool,
    pub added: usize,
    pub total: usize,
}

/// Body for both general and session feedback submissions.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    #[serde(default)]
    pub session_id: Option<u64>,
    #[serde(default)]
    pub appointment_id: Option<u64>,
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub therapist_id: Option<i64>,
    #[serde(default)]
    pub service_id: Option<i64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub service_rating: Option<f64>,
    #[serde(default)]
    pub room_rating: Option<f64>,
    #[serde(default)]
    pub reception_rating: Option<f64>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Per-customer revenue aggregation row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerReportRow {
    pub id: u64,
    pub name: String,
    pub visits: u32,
    pub total: f64,
    pub last_visit: Option<String>,
    pub avg: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Login/registration response: the public user plus a bearer token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Partial settings update; omitted fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub default_currency: Option<String>,
    #[serde(default)]
    pub default_tax_rate: Option<f64>,
    #[serde(default)]
    pub default_print_mode: Option<String>,
    #[serde(default)]
    pub invoice_footer: Option<String>,
    #[serde(default)]
    pub payment_methods: Option<Vec<String>>,
}
