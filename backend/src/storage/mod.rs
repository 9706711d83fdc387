//! # Storage
//!
//! One JSON file per resource type, each wrapped in a [`JsonCollection`]
//! that owns serialization and serializes writers. [`Store`] bundles the
//! per-resource collections so the domain services share a single lock per
//! file. Identifier allocation happens inside the write lock, which is what
//! makes `max(id) + 1` safe here.

use std::sync::Arc;

use anyhow::Result;
use shared::{
    Appointment, Customer, Expense, Feedback, Invoice, ServiceItem, Session, Settings, Staff,
    User,
};

pub mod json;

pub use json::{JsonCollection, JsonConnection, JsonDocument};

/// Records with an integer primary id.
pub trait Record {
    fn record_id(&self) -> u64;
}

macro_rules! impl_record {
    ($($ty:ty),+ $(,)?) => {
        $(impl Record for $ty {
            fn record_id(&self) -> u64 {
                self.id
            }
        })+
    };
}

impl_record!(
    Appointment,
    Session,
    Invoice,
    Customer,
    ServiceItem,
    Staff,
    Expense,
    Feedback,
    User,
);

/// Next id for a collection: `max(existing) + 1`, 1 for an empty file.
/// Only meaningful when called inside `JsonCollection::update`.
pub fn next_id<T: Record>(list: &[T]) -> u64 {
    list.iter().map(Record::record_id).max().unwrap_or(0) + 1
}

/// All collections of one data directory, shared across services.
#[derive(Clone)]
pub struct Store {
    pub appointments: Arc<JsonCollection<Appointment>>,
    pub sessions: Arc<JsonCollection<Session>>,
    pub invoices: Arc<JsonCollection<Invoice>>,
    pub customers: Arc<JsonCollection<Customer>>,
    pub services: Arc<JsonCollection<ServiceItem>>,
    pub staff: Arc<JsonCollection<Staff>>,
    pub expenses: Arc<JsonCollection<Expense>>,
    pub feedback: Arc<JsonCollection<Feedback>>,
    pub users: Arc<JsonCollection<User>>,
    pub settings: Arc<JsonDocument<Settings>>,
}

impl Store {
    pub fn open(conn: &JsonConnection) -> Result<Self> {
        Ok(Self {
            appointments: conn.collection("appointments.json"),
            sessions: conn.collection("sessions.json"),
            invoices: conn.collection("invoices.json"),
            customers: conn.collection("customers.json"),
            services: conn.collection("services.json"),
            staff: conn.collection("staff.json"),
            expenses: conn.collection("expenses.json"),
            feedback: conn.collection("feedback.json"),
            users: conn.collection("users.json"),
            settings: conn.document("settings.json"),
        })
    }
}

#[cfg(test)]
pub mod test_utils {
    use super::*;
    use tempfile::TempDir;

    /// Fresh store over a temporary data directory.
    pub fn temp_store() -> (Store, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let conn = JsonConnection::new(dir.path()).expect("connection");
        let store = Store::open(&conn).expect("store");
        (store, dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_id_starts_at_one_and_skips_gaps() {
        let empty: Vec<Customer> = Vec::new();
        assert_eq!(next_id(&empty), 1);

        let customers = vec![
            customer(3, "a"),
            customer(7, "b"),
            customer(5, "c"),
        ];
        assert_eq!(next_id(&customers), 8);
    }

    fn customer(id: u64, name: &str) -> Customer {
        Customer {
            id,
            name: name.to_string(),
            phone: String::new(),
            email: String::new(),
            gender: String::new(),
            notes: String::new(),
            rating: 0.0,
            visit_count: 0,
            last_visit_at: None,
            total_paid: 0.0,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }
}
