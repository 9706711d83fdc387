//! Business expenses, including the bulk JSON import used by the CSV mapper
//! on the front desk.

use std::cmp::Reverse;

use shared::{BulkExpensesResult, Expense, NewExpense};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::storage::{next_id, Store};
use crate::util::{now_iso, opt_millis, parse_millis};

/// Normalized expense fields before an id and timestamps are attached.
struct Draft {
    date: Option<String>,
    vendor: Option<String>,
    description: Option<String>,
    method: Option<String>,
    invoice: Option<String>,
    amount: f64,
}

/// None when the amount is missing or not a finite number. Blank optional
/// strings become None so they stay out of the file.
fn normalize(input: &NewExpense) -> Option<Draft> {
    let amount = input.amount.filter(|a| a.is_finite())?;
    Some(Draft {
        date: non_blank(&input.date),
        vendor: non_blank(&input.vendor),
        description: non_blank(&input.description),
        method: non_blank(&input.method),
        invoice: non_blank(&input.invoice),
        amount,
    })
}

fn non_blank(v: &Option<String>) -> Option<String> {
    v.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[derive(Clone)]
pub struct ExpenseService {
    store: Store,
}

impl ExpenseService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Newest first, by transaction date with createdAt as fallback.
    pub fn list(&self) -> Vec<Expense> {
        let mut list = self.store.expenses.read();
        list.sort_by_key(|e| {
            Reverse(
                opt_millis(e.date.as_deref())
                    .or_else(|| parse_millis(&e.created_at))
                    .unwrap_or(0),
            )
        });
        list
    }

    pub fn create(&self, req: NewExpense) -> AppResult<Expense> {
        let draft = normalize(&req).ok_or(AppError::BadRequest("invalid_amount".to_string()))?;
        self.store.expenses.update(|list| {
            let item = materialize(draft, next_id(list));
            list.push(item.clone());
            Ok(item)
        })
    }

    /// Import many rows at once. Rows without a usable amount are skipped;
    /// the whole request fails only when nothing survives.
    pub fn bulk(&self, rows: Vec<NewExpense>) -> AppResult<BulkExpensesResult> {
        self.store.expenses.update(|list| {
            let mut added = 0usize;
            for raw in &rows {
                let Some(draft) = normalize(raw) else { continue };
                let item = materialize(draft, next_id(list));
                list.push(item);
                added += 1;
            }
            if added == 0 {
                return Err(AppError::BadRequest("no_valid_rows".to_string()));
            }
            info!("bulk-imported {added} of {} expense rows", rows.len());
            Ok(BulkExpensesResult {
                ok: true,
                added,
                total: list.len(),
            })
        })
    }

    pub fn update(&self, id: u64, patch: NewExpense) -> AppResult<Expense> {
        if patch.amount.is_some_and(|a| !a.is_finite()) {
            return Err(AppError::BadRequest("invalid_amount".to_string()));
        }
        self.store.expenses.update(|list| {
            let e = list
                .iter_mut()
                .find(|e| e.id == id)
                .ok_or(AppError::NotFound("expense_not_found"))?;
            if patch.date.is_some() {
                e.date = non_blank(&patch.date);
            }
            if patch.vendor.is_some() {
                e.vendor = non_blank(&patch.vendor);
            }
            if patch.description.is_some() {
                e.description = non_blank(&patch.description);
            }
            if patch.method.is_some() {
                e.method = non_blank(&patch.method);
            }
            if patch.invoice.is_some() {
                e.invoice = non_blank(&patch.invoice);
            }
            if let Some(a) = patch.amount {
                e.amount = a;
            }
            e.updated_at = now_iso();
            Ok(e.clone())
        })
    }

    pub fn delete(&self, id: u64) -> AppResult<Expense> {
        self.store.expenses.update(|list| {
            let i = list
                .iter()
                .position(|e| e.id == id)
                .ok_or(AppError::NotFound("expense_not_found"))?;
            Ok(list.remove(i))
        })
    }
}

fn materialize(draft: Draft, id: u64) -> Expense {
    let now = now_iso();
    Expense {
        id,
        date: draft.date,
        vendor: draft.vendor,
        description: draft.description,
        amount: draft.amount,
        method: draft.method,
        invoice: draft.invoice,
        created_at: now.clone(),
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::temp_store;

    fn expense(amount: Option<f64>, vendor: &str) -> NewExpense {
        NewExpense {
            amount,
            vendor: Some(vendor.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn create_rejects_a_missing_amount() {
        let (store, _dir) = temp_store();
        let svc = ExpenseService::new(store);
        let err = svc.create(expense(None, "Acme")).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(m) if m == "invalid_amount"));
    }

    #[test]
    fn blank_optional_fields_are_dropped() {
        let (store, _dir) = temp_store();
        let svc = ExpenseService::new(store);
        let e = svc
            .create(NewExpense {
                amount: Some(12.5),
                vendor: Some("  ".to_string()),
                description: Some("towels".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(e.vendor, None);
        assert_eq!(e.description.as_deref(), Some("towels"));
    }

    #[test]
    fn bulk_skips_invalid_rows_and_reports_counts() {
        let (store, _dir) = temp_store();
        let svc = ExpenseService::new(store);
        svc.create(expense(Some(1.0), "seed")).unwrap();

        let result = svc
            .bulk(vec![
                expense(Some(10.0), "a"),
                expense(None, "broken"),
                expense(Some(20.0), "b"),
            ])
            .unwrap();
        assert_eq!(result.added, 2);
        assert_eq!(result.total, 3);

        // ids keep incrementing across the batch
        let ids: Vec<u64> = svc.list().iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(ids.iter().max(), Some(&3));
    }

    #[test]
    fn bulk_with_no_valid_rows_fails_and_writes_nothing() {
        let (store, _dir) = temp_store();
        let svc = ExpenseService::new(store.clone());
        let err = svc.bulk(vec![expense(None, "x")]).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(m) if m == "no_valid_rows"));
        assert!(store.expenses.read().is_empty());
    }

    #[test]
    fn list_sorts_newest_first_by_date() {
        let (store, _dir) = temp_store();
        let svc = ExpenseService::new(store);
        svc.create(NewExpense {
            amount: Some(1.0),
            date: Some("2025-01-01".to_string()),
            ..Default::default()
        })
        .unwrap();
        svc.create(NewExpense {
            amount: Some(2.0),
            date: Some("2025-02-01".to_string()),
            ..Default::default()
        })
        .unwrap();

        let list = svc.list();
        assert_eq!(list[0].amount, 2.0);
    }

    #[test]
    fn update_normalizes_fields_and_validates_amount() {
        let (store, _dir) = temp_store();
        let svc = ExpenseService::new(store);
        let e = svc.create(expense(Some(5.0), "Acme")).unwrap();

        let e = svc
            .update(
                e.id,
                NewExpense {
                    vendor: Some("   ".to_string()),
                    amount: Some(7.5),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(e.vendor, None);
        assert_eq!(e.amount, 7.5);

        assert!(matches!(
            svc.update(99, NewExpense::default()),
            Err(AppError::NotFound("expense_not_found"))
        ));
    }
}
