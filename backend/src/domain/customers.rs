//! Customer records plus the dashboard KPI and top-customer boards.

use std::cmp::Reverse;

use chrono::Utc;
use shared::{Customer, CustomerKpis, CustomerPatch, NewCustomer, TopCustomer};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::storage::{next_id, Store};
use crate::util::{clamp_rating, now_iso, opt_millis, parse_millis, round2, to_money};

#[derive(Clone)]
pub struct CustomerService {
    store: Store,
}

impl CustomerService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Most recently touched first, with optional substring search and limit.
    pub fn list(&self, q: Option<&str>, limit: Option<usize>) -> Vec<Customer> {
        let mut list = self.store.customers.read();
        list.sort_by_key(|c| {
            Reverse(
                parse_millis(&c.updated_at)
                    .or_else(|| parse_millis(&c.created_at))
                    .unwrap_or(0),
            )
        });

        if let Some(q) = q.filter(|q| !q.is_empty()) {
            let s = q.to_ascii_lowercase();
            list.retain(|c| {
                c.name.to_ascii_lowercase().contains(&s)
                    || c.phone.to_ascii_lowercase().contains(&s)
                    || c.email.to_ascii_lowercase().contains(&s)
                    || c.notes.to_ascii_lowercase().contains(&s)
            });
        }
        if let Some(n) = limit.filter(|n| *n > 0) {
            list.truncate(n);
        }
        list
    }

    pub fn get(&self, id: u64) -> AppResult<Customer> {
        self.store
            .customers
            .read()
            .into_iter()
            .find(|c| c.id == id)
            .ok_or(AppError::NotFound("not found"))
    }

    pub fn create(&self, req: NewCustomer) -> AppResult<Customer> {
        let name = req.name.unwrap_or_default().trim().to_string();
        if name.is_empty() {
            return Err(AppError::bad_request("name is required"));
        }

        let record = self.store.customers.update(|list| {
            let now = now_iso();
            let record = Customer {
                id: next_id(list),
                name,
                phone: trimmed(req.phone),
                email: trimmed(req.email),
                gender: trimmed(req.gender),
                notes: trimmed(req.notes),
                rating: clamp_rating(req.rating.unwrap_or(0.0)),
                visit_count: 0,
                last_visit_at: None,
                total_paid: to_money(req.total_paid.unwrap_or(0.0)),
                created_at: now.clone(),
                updated_at: now,
            };
            list.push(record.clone());
            Ok::<_, AppError>(record)
        })?;

        info!("created customer {}", record.id);
        Ok(record)
    }

    pub fn update(&self, id: u64, patch: CustomerPatch) -> AppResult<Customer> {
        self.store.customers.update(|list| {
            let c = list
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or(AppError::NotFound("not found"))?;
            if let Some(v) = patch.name {
                c.name = v.trim().to_string();
            }
            if let Some(v) = patch.phone {
                c.phone = v.trim().to_string();
            }
            if let Some(v) = patch.email {
                c.email = v.trim().to_string();
            }
            if let Some(v) = patch.gender {
                c.gender = v.trim().to_string();
            }
            if let Some(v) = patch.notes {
                c.notes = v.trim().to_string();
            }
            if let Some(v) = patch.rating {
                c.rating = clamp_rating(v);
            }
            if let Some(v) = patch.visit_count {
                c.visit_count = if v.is_finite() { v.max(0.0) as u32 } else { 0 };
            }
            if let Some(v) = patch.last_visit_at {
                c.last_visit_at = if v.is_empty() { None } else { Some(v) };
            }
            if let Some(v) = patch.total_paid {
                c.total_paid = to_money(v);
            }
            c.updated_at = now_iso();
            Ok(c.clone())
        })
    }

    /// Deleting an unknown id fails without rewriting the file.
    pub fn delete(&self, id: u64) -> AppResult<()> {
        self.store.customers.update(|list| {
            let before = list.len();
            list.retain(|c| c.id != id);
            if list.len() == before {
                return Err(AppError::NotFound("not found"));
            }
            Ok(())
        })
    }

    pub fn kpis(&self) -> CustomerKpis {
        let all = self.store.customers.read();
        let total = all.len();
        let with_phone = all.iter().filter(|c| !c.phone.trim().is_empty()).count();

        let ratings: Vec<f64> = all
            .iter()
            .map(|c| c.rating)
            .filter(|r| r.is_finite() && *r > 0.0)
            .collect();
        let avg_rating = if ratings.is_empty() {
            0.0
        } else {
            round2(ratings.iter().sum::<f64>() / ratings.len() as f64)
        };

        let repeat_count = all.iter().filter(|c| c.visit_count >= 2).count();

        let now = Utc::now().timestamp_millis();
        let days30 = 30 * 24 * 60 * 60 * 1000;
        let recent_last_visit30d = all
            .iter()
            .filter(|c| {
                opt_millis(c.last_visit_at.as_deref())
                    .map(|t| now - t <= days30)
                    .unwrap_or(false)
            })
            .count();

        CustomerKpis {
            total,
            with_phone,
            avg_rating,
            repeat_count,
            recent_last_visit30d,
        }
    }

    /// Leaderboard rows. `by` is visits (default), recent, or payments;
    /// `limit` is clamped to [1, 100] with a default of 10.
    pub fn top(&self, by: Option<&str>, limit: Option<i64>) -> Vec<TopCustomer> {
        let limit = limit.unwrap_or(10).clamp(1, 100) as usize;
        let mut rows: Vec<TopCustomer> = self
            .store
            .customers
            .read()
            .into_iter()
            .map(|c| TopCustomer {
                id: c.id,
                name: c.name,
                phone: c.phone,
                notes: c.notes,
                rating: c.rating,
                visit_count: c.visit_count,
                last_visit_at: c.last_visit_at,
                total_paid: to_money(c.total_paid),
                created_at: c.created_at,
                updated_at: c.updated_at,
            })
            .collect();

        let last_visit = |r: &TopCustomer| opt_millis(r.last_visit_at.as_deref()).unwrap_or(0);
        match by.unwrap_or("visits").to_ascii_lowercase().as_str() {
            "recent" => rows.sort_by_key(|r| Reverse(last_visit(r))),
            "payments" => rows.sort_by(|a, b| {
                b.total_paid
                    .partial_cmp(&a.total_paid)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(b.visit_count.cmp(&a.visit_count))
            }),
            _ => rows.sort_by(|a, b| {
                b.visit_count
                    .cmp(&a.visit_count)
                    .then(last_visit(b).cmp(&last_visit(a)))
            }),
        }

        rows.truncate(limit);
        rows
    }
}

fn trimmed(v: Option<String>) -> String {
    v.unwrap_or_default().trim().to_string()
}
