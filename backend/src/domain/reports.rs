//! Revenue reporting, aggregated from invoices.

use chrono::Utc;
use shared::CustomerReportRow;

use crate::storage::Store;
use crate::util::{millis_to_iso, parse_millis};

#[derive(Clone)]
pub struct ReportService {
    store: Store,
}

impl ReportService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// One row per customer: visit count, revenue, last visit and average
    /// ticket. Customers without invoices appear with zeros.
    pub fn customers(&self) -> Vec<CustomerReportRow> {
        let invoices = self.store.invoices.read();
        let customers = self.store.customers.read();

        use std::collections::HashMap;
        struct Acc {
            visits: u32,
            total: f64,
            last_visit: Option<i64>,
        }
        let mut stats: HashMap<i64, Acc> = HashMap::new();

        for inv in &invoices {
            let Some(cid) = inv.customer_id.filter(|v| *v != 0) else {
                continue;
            };
            let acc = stats.entry(cid).or_insert(Acc {
                visits: 0,
                total: 0.0,
                last_visit: None,
            });
            acc.visits += 1;
            acc.total += if inv.total.is_finite() { inv.total } else { 0.0 };
            let when = parse_millis(&inv.created_at)
                .unwrap_or_else(|| Utc::now().timestamp_millis());
            if acc.last_visit.map(|prev| prev < when).unwrap_or(true) {
                acc.last_visit = Some(when);
            }
        }

        customers
            .into_iter()
            .map(|c| {
                let acc = i64::try_from(c.id).ok().and_then(|cid| stats.get(&cid));
                let visits = acc.map(|a| a.visits).unwrap_or(0);
                let total = acc.map(|a| a.total).unwrap_or(0.0);
                CustomerReportRow {
                    id: c.id,
                    name: c.name,
                    visits,
                    total,
                    last_visit: acc.and_then(|a| a.last_visit).map(millis_to_iso),
                    avg: if visits > 0 { total / f64::from(visits) } else { 0.0 },
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CustomerService, InvoiceService};
    use crate::storage::test_utils::temp_store;
    use shared::{NewCustomer, NewInvoice, RawLineItem};

    fn invoice_for(svc: &InvoiceService, customer_id: i64, amount: f64) {
        svc.create(NewInvoice {
            customer_id: Some(customer_id),
            customer_name: Some("x".to_string()),
            items: vec![RawLineItem {
                qty: Some(1.0),
                price: Some(amount),
                ..Default::default()
            }],
            ..Default::default()
        })
        .unwrap();
    }

    #[test]
    fn aggregates_visits_revenue_and_average() {
        let (store, _dir) = temp_store();
        let customers = CustomerService::new(store.clone());
        let invoices = InvoiceService::new(store.clone());
        let sara = customers
            .create(NewCustomer {
                name: Some("Sara".to_string()),
                ..Default::default()
            })
            .unwrap();
        let noor = customers
            .create(NewCustomer {
                name: Some("Noor".to_string()),
                ..Default::default()
            })
            .unwrap();

        invoice_for(&invoices, sara.id as i64, 100.0);
        invoice_for(&invoices, sara.id as i64, 50.0);

        let report = ReportService::new(store).customers();
        let row = report.iter().find(|r| r.id == sara.id).unwrap();
        assert_eq!(row.visits, 2);
        assert_eq!(row.total, 150.0);
        assert_eq!(row.avg, 75.0);
        assert!(row.last_visit.is_some());

        let row = report.iter().find(|r| r.id == noor.id).unwrap();
        assert_eq!(row.visits, 0);
        assert_eq!(row.total, 0.0);
        assert_eq!(row.avg, 0.0);
        assert!(row.last_visit.is_none());
    }
}
