//! Domain services. Each service owns the business rules for one resource
//! and talks to the JSON store; HTTP concerns stay in the rest layer.

pub mod accounts;
pub mod appointments;
pub mod catalog;
pub mod customers;
pub mod expenses;
pub mod feedback;
pub mod invoices;
pub mod reports;
pub mod sessions;
pub mod settings;
pub mod staff;

pub use accounts::AccountService;
pub use appointments::AppointmentService;
pub use catalog::CatalogService;
pub use customers::CustomerService;
pub use expenses::ExpenseService;
pub use feedback::FeedbackService;
pub use invoices::InvoiceService;
pub use reports::ReportService;
pub use sessions::SessionService;
pub use settings::SettingsService;
pub use staff::StaffService;
