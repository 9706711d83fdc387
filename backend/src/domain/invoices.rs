//! Invoices: normalization, totals, filtered listing, and the
//! appointment link.

use shared::{FromAppointmentRequest, Invoice, InvoicePatch, LineItem, NewInvoice, RawLineItem};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::storage::{next_id, Store};
use crate::util::{now_iso, parse_millis, round2};

const CURRENCY_DEFAULT: &str = "AED";

/// Query-string filters for the invoice list.
#[derive(Debug, Clone, Default)]
pub struct InvoiceFilter {
    pub from: Option<String>,
    pub to: Option<String>,
    pub customer_id: Option<i64>,
    pub therapist_id: Option<i64>,
    pub mode: Option<String>,
    pub payment: Option<String>,
    pub appointment_id: Option<u64>,
    pub q: Option<String>,
}

/// Computed money block of an invoice.
#[derive(Debug, Clone, PartialEq)]
pub struct Totals {
    pub subtotal: f64,
    pub discount: f64,
    pub tax_rate: f64,
    pub tax: f64,
    pub total: f64,
}

/// Totals over normalized items. The discount comes off the subtotal before
/// tax; a discount larger than the subtotal taxes a base of zero. Each
/// published figure is rounded to cents.
pub fn compute_totals(items: &[LineItem], discount: f64, tax_rate: f64) -> Totals {
    let subtotal: f64 = items
        .iter()
        .map(|it| {
            if it.total.is_finite() {
                it.total
            } else {
                num_or(it.qty, 1.0) * num_or(it.price, 0.0)
            }
        })
        .sum();
    let discount = num_or(discount, 0.0).max(0.0);
    let tax_rate = num_or(tax_rate, 0.0).max(0.0);
    let taxed_base = (subtotal - discount).max(0.0);
    let tax = round2(taxed_base * (tax_rate / 100.0));
    let total = round2(taxed_base + tax);
    Totals {
        subtotal: round2(subtotal),
        discount: round2(discount),
        tax_rate: round2(tax_rate),
        tax,
        total,
    }
}

/// Quantity at least 1, price at least 0, total defaulting to qty x price.
pub fn normalize_item(raw: &RawLineItem) -> LineItem {
    let qty = raw.qty.filter(|v| v.is_finite()).unwrap_or(1.0).max(1.0);
    let price = raw.price.filter(|v| v.is_finite()).unwrap_or(0.0).max(0.0);
    LineItem {
        service_id: raw.service_id,
        service_name: raw.service_name.clone().unwrap_or_default(),
        qty,
        price,
        total: raw.total.filter(|v| v.is_finite()).unwrap_or(qty * price),
        therapist_id: raw.therapist_id,
    }
}

fn num_or(v: f64, d: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        d
    }
}

fn clamp_mode(s: &str) -> String {
    let v = s.to_ascii_lowercase();
    if v == "in" || v == "out" {
        v
    } else {
        String::new()
    }
}

/// Common payment names are canonicalized to lowercase; anything else is
/// stored as sent.
fn clamp_payment(s: &str) -> String {
    let v = s.to_ascii_lowercase();
    if v.is_empty() {
        return String::new();
    }
    if ["cash", "card", "transfer", "credit", "debit"].contains(&v.as_str()) {
        v
    } else {
        s.to_string()
    }
}

#[derive(Clone)]
pub struct InvoiceService {
    store: Store,
}

impl InvoiceService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Filtered invoice list, newest first.
    pub fn list(&self, filter: &InvoiceFilter) -> Vec<Invoice> {
        let mut list = self.store.invoices.read();

        if let Some(t) = filter.from.as_deref().and_then(parse_millis) {
            list.retain(|x| parse_millis(&x.created_at).unwrap_or(0) >= t);
        }
        if let Some(t) = filter.to.as_deref().and_then(parse_millis) {
            // inclusive through the end of the given day
            let cutoff = t + 24 * 60 * 60 * 1000 - 1;
            list.retain(|x| parse_millis(&x.created_at).unwrap_or(0) <= cutoff);
        }
        if let Some(cid) = filter.customer_id {
            list.retain(|x| x.customer_id == Some(cid));
        }
        if let Some(tid) = filter.therapist_id {
            list.retain(|x| {
                x.therapist_id == Some(tid)
                    || x.items.iter().any(|it| it.therapist_id == Some(tid))
            });
        }
        if let Some(mode) = filter.mode.as_deref() {
            let m = mode.to_ascii_lowercase();
            if m == "in" || m == "out" {
                list.retain(|x| x.mode.eq_ignore_ascii_case(&m));
            }
        }
        if let Some(payment) = filter.payment.as_deref() {
            list.retain(|x| x.payment_method.eq_ignore_ascii_case(payment));
        }
        if let Some(aid) = filter.appointment_id {
            list.retain(|x| x.appointment_id == Some(aid));
        }
        if let Some(q) = filter.q.as_deref() {
            let s = q.to_ascii_lowercase();
            list.retain(|x| {
                x.customer_name.to_ascii_lowercase().contains(&s)
                    || x.id.to_string().contains(&s)
                    || x.notes.to_ascii_lowercase().contains(&s)
                    || x.payment_method.to_ascii_lowercase().contains(&s)
            });
        }

        list.sort_by_key(|x| std::cmp::Reverse(parse_millis(&x.created_at).unwrap_or(0)));
        list
    }

    pub fn get(&self, id: u64) -> AppResult<Invoice> {
        self.store
            .invoices
            .read()
            .into_iter()
            .find(|x| x.id == id)
            .ok_or(AppError::NotFound("not_found"))
    }

    pub fn create(&self, req: NewInvoice) -> AppResult<Invoice> {
        let customer_id = req.customer_id.filter(|v| *v != 0);
        let customer_name = req.customer_name.clone().unwrap_or_default();
        if customer_id.is_none() && customer_name.is_empty() {
            return Err(AppError::bad_request("customerId or customerName is required"));
        }

        let services = self.store.services.read();
        let customers = self.store.customers.read();

        let mut items: Vec<LineItem> = req.items.iter().map(normalize_item).collect();
        for it in &mut items {
            if it.service_name.is_empty() {
                if let Some(sid) = it.service_id {
                    if let Some(svc) = services.iter().find(|s| i64::try_from(s.id) == Ok(sid)) {
                        it.service_name = svc.name.clone();
                    }
                }
            }
        }

        let totals = compute_totals(&items, req.discount.unwrap_or(0.0), req.tax_rate.unwrap_or(0.0));
        let customer_name = if customer_name.is_empty() {
            customer_id
                .and_then(|cid| customers.iter().find(|c| i64::try_from(c.id) == Ok(cid)))
                .map(|c| c.name.clone())
                .unwrap_or_default()
        } else {
            customer_name
        };

        let now = now_iso();
        let record = self.store.invoices.update(|list| {
            let record = Invoice {
                id: next_id(list),
                customer_id,
                customer_name,
                therapist_id: req.therapist_id,
                therapist: req.therapist.clone().unwrap_or_default(),
                mode: clamp_mode(req.mode.as_deref().unwrap_or("")),
                payment_method: clamp_payment(req.payment_method.as_deref().unwrap_or("")),
                room_number: req.room_number.clone().unwrap_or_default(),
                area: req.area.clone().unwrap_or_default(),
                items,
                discount: totals.discount,
                tax_rate: totals.tax_rate,
                subtotal: totals.subtotal,
                tax: totals.tax,
                total: totals.total,
                currency: req
                    .currency
                    .clone()
                    .filter(|c| !c.is_empty())
                    .unwrap_or_else(|| CURRENCY_DEFAULT.to_string()),
                notes: req.notes.clone().unwrap_or_default().trim().to_string(),
                appointment_id: req.appointment_id.filter(|v| *v != 0),
                created_at: now.clone(),
                updated_at: now,
            };
            list.push(record.clone());
            Ok::<_, AppError>(record)
        })?;

        if let Some(aid) = record.appointment_id {
            self.link_appointment(aid, record.id)?;
        }

        info!("created invoice {} (total {})", record.id, record.total);
        Ok(record)
    }

    pub fn update(&self, id: u64, patch: InvoicePatch) -> AppResult<Invoice> {
        self.store.invoices.update(|list| {
            let inv = list
                .iter_mut()
                .find(|x| x.id == id)
                .ok_or(AppError::NotFound("not_found"))?;

            // double options: an explicit null clears the link
            if let Some(v) = patch.customer_id {
                inv.customer_id = v;
            }
            if let Some(v) = patch.customer_name {
                inv.customer_name = v;
            }
            if let Some(v) = patch.mode {
                inv.mode = clamp_mode(&v);
            }
            if let Some(v) = patch.payment_method {
                inv.payment_method = clamp_payment(&v);
            }
            if let Some(v) = patch.room_number {
                inv.room_number = v;
            }
            if let Some(v) = patch.area {
                inv.area = v;
            }
            if let Some(v) = patch.therapist_id {
                inv.therapist_id = v;
            }
            if let Some(v) = patch.therapist {
                inv.therapist = v;
            }
            if let Some(v) = patch.currency {
                inv.currency = if v.is_empty() { CURRENCY_DEFAULT.to_string() } else { v };
            }
            if let Some(v) = patch.notes {
                inv.notes = v;
            }
            if let Some(v) = patch.appointment_id {
                inv.appointment_id = v;
            }

            let mut money_changed = false;
            if let Some(raw_items) = &patch.items {
                inv.items = raw_items.iter().map(normalize_item).collect();
                money_changed = true;
            }
            if let Some(d) = patch.discount {
                inv.discount = d;
                money_changed = true;
            }
            if let Some(t) = patch.tax_rate {
                inv.tax_rate = t;
                money_changed = true;
            }
            if money_changed {
                let totals = compute_totals(&inv.items, inv.discount, inv.tax_rate);
                inv.subtotal = totals.subtotal;
                inv.tax = totals.tax;
                inv.total = totals.total;
                inv.discount = totals.discount;
                inv.tax_rate = totals.tax_rate;
            }

            inv.updated_at = now_iso();
            Ok(inv.clone())
        })
    }

    /// Delete the invoice; an appointment still pointing at it loses the
    /// back-link.
    pub fn delete(&self, id: u64) -> AppResult<Invoice> {
        let deleted = self.store.invoices.update(|list| {
            let i = list
                .iter()
                .position(|x| x.id == id)
                .ok_or(AppError::NotFound("not_found"))?;
            Ok::<_, AppError>(list.remove(i))
        })?;

        if let Some(aid) = deleted.appointment_id {
            self.store.appointments.update(|appts| {
                if let Some(a) = appts
                    .iter_mut()
                    .find(|a| a.id == aid && a.invoice_id == Some(deleted.id))
                {
                    a.invoice_id = None;
                    a.updated_at = now_iso();
                }
                Ok::<_, AppError>(())
            })?;
        }

        Ok(deleted)
    }

    /// Build a one-line draft invoice from an appointment. Idempotent: a
    /// second call returns the invoice already linked to the appointment.
    pub fn from_appointment(&self, req: FromAppointmentRequest) -> AppResult<(Invoice, bool)> {
        let aid = req
            .appointment_id
            .filter(|v| *v != 0)
            .ok_or_else(|| AppError::bad_request("appointmentId is required"))?;

        let appt = self
            .store
            .appointments
            .read()
            .into_iter()
            .find(|a| a.id == aid)
            .ok_or(AppError::NotFound("appointment_not_found"))?;

        let services = self.store.services.read();
        let staff = self.store.staff.read();
        let customers = self.store.customers.read();

        let (record, created) = self.store.invoices.update(|list| {
            if let Some(existing) = list.iter().find(|inv| inv.appointment_id == Some(aid)) {
                return Ok::<_, AppError>((existing.clone(), false));
            }

            let svc = appt
                .service_id
                .and_then(|sid| services.iter().find(|s| i64::try_from(s.id) == Ok(sid)));
            let items: Vec<LineItem> = match svc {
                Some(svc) if !svc.name.is_empty() => vec![LineItem {
                    service_id: appt.service_id,
                    service_name: svc.name.clone(),
                    qty: 1.0,
                    price: num_or(svc.price, 0.0),
                    total: num_or(svc.price, 0.0),
                    therapist_id: appt.therapist_id,
                }],
                _ => Vec::new(),
            };
            let totals = compute_totals(&items, 0.0, 0.0);

            let customer_name = if appt.customer_name.is_empty() {
                appt.customer_id
                    .and_then(|cid| customers.iter().find(|c| i64::try_from(c.id) == Ok(cid)))
                    .map(|c| c.name.clone())
                    .unwrap_or_default()
            } else {
                appt.customer_name.clone()
            };
            let therapist = if appt.therapist.is_empty() {
                appt.therapist_id
                    .and_then(|tid| staff.iter().find(|u| i64::try_from(u.id) == Ok(tid)))
                    .map(|u| u.name.clone())
                    .unwrap_or_default()
            } else {
                appt.therapist.clone()
            };

            let now = now_iso();
            let record = Invoice {
                id: next_id(list),
                customer_id: appt.customer_id,
                customer_name,
                therapist_id: appt.therapist_id,
                therapist,
                mode: "in".to_string(),
                payment_method: String::new(),
                room_number: appt.room.clone(),
                area: String::new(),
                items,
                discount: totals.discount,
                tax_rate: totals.tax_rate,
                subtotal: totals.subtotal,
                tax: totals.tax,
                total: totals.total,
                currency: CURRENCY_DEFAULT.to_string(),
                notes: appt.notes.clone(),
                appointment_id: Some(aid),
                created_at: now.clone(),
                updated_at: now,
            };
            list.push(record.clone());
            Ok((record, true))
        })?;

        if created {
            self.link_appointment(aid, record.id)?;
            info!("drafted invoice {} from appointment {aid}", record.id);
        }
        Ok((record, created))
    }

    fn link_appointment(&self, appointment_id: u64, invoice_id: u64) -> AppResult<()> {
        self.store.appointments.update(|appts| {
            if let Some(a) = appts.iter_mut().find(|a| a.id == appointment_id) {
                a.invoice_id = Some(invoice_id);
                a.updated_at = now_iso();
            }
            Ok(())
        })
    }
}
