//! Business-wide settings. Updates merge over the current document;
//! omitted fields keep their value.

use shared::{Settings, SettingsPatch};

use crate::error::{AppError, AppResult};
use crate::storage::Store;
use crate::util::now_iso;

#[derive(Clone)]
pub struct SettingsService {
    store: Store,
}

impl SettingsService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn get(&self) -> Settings {
        self.store.settings.read()
    }

    pub fn update(&self, patch: SettingsPatch) -> AppResult<Settings> {
        if let Some(rate) = patch.default_tax_rate {
            if !rate.is_finite() || rate < 0.0 {
                return Err(AppError::bad_request("defaultTaxRate must be >= 0"));
            }
        }

        self.store.settings.update(|s| {
            if let Some(v) = patch.business_name {
                s.business_name = v;
            }
            if let Some(v) = patch.logo_url {
                s.logo_url = v;
            }
            if let Some(v) = patch.phone {
                s.phone = v;
            }
            if let Some(v) = patch.email {
                s.email = v;
            }
            if let Some(v) = patch.address {
                s.address = v;
            }
            if let Some(v) = patch.website {
                s.website = v;
            }
            if let Some(v) = patch.whatsapp {
                s.whatsapp = v;
            }
            if let Some(v) = patch.instagram {
                s.instagram = v;
            }
            if let Some(v) = patch.facebook {
                s.facebook = v;
            }
            if let Some(v) = patch.default_currency {
                s.default_currency = v;
            }
            if let Some(v) = patch.default_tax_rate {
                s.default_tax_rate = v;
            }
            if let Some(v) = patch.default_print_mode {
                s.default_print_mode = if v.eq_ignore_ascii_case("a4") {
                    "a4".to_string()
                } else {
                    "thermal".to_string()
                };
            }
            if let Some(v) = patch.invoice_footer {
                s.invoice_footer = v;
            }
            if let Some(v) = patch.payment_methods {
                s.payment_methods = v;
            }
            s.updated_at = now_iso();
            Ok(s.clone())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::temp_store;

    #[test]
    fn defaults_apply_until_written() {
        let (store, _dir) = temp_store();
        let svc = SettingsService::new(store);
        let s = svc.get();
        assert_eq!(s.default_currency, "AED");
        assert_eq!(s.default_print_mode, "thermal");
    }

    #[test]
    fn update_merges_over_current_values() {
        let (store, _dir) = temp_store();
        let svc = SettingsService::new(store);
        svc.update(SettingsPatch {
            business_name: Some("Bluewater Spa".to_string()),
            default_tax_rate: Some(5.0),
            ..Default::default()
        })
        .unwrap();

        let s = svc
            .update(SettingsPatch {
                phone: Some("04-1234567".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(s.business_name, "Bluewater Spa");
        assert_eq!(s.default_tax_rate, 5.0);
        assert_eq!(s.phone, "04-1234567");
        assert!(!s.updated_at.is_empty());
    }

    #[test]
    fn negative_tax_rate_is_rejected() {
        let (store, _dir) = temp_store();
        let svc = SettingsService::new(store);
        assert!(svc
            .update(SettingsPatch {
                default_tax_rate: Some(-1.0),
                ..Default::default()
            })
            .is_err());
    }

    #[test]
    fn print_mode_normalizes_to_thermal_or_a4() {
        let (store, _dir) = temp_store();
        let svc = SettingsService::new(store);
        let s = svc
            .update(SettingsPatch {
                default_print_mode: Some("A4".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(s.default_print_mode, "a4");

        let s = svc
            .update(SettingsPatch {
                default_print_mode: Some("dot-matrix".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(s.default_print_mode, "thermal");
    }
}
