//! The service catalog (treatments offered, their prices and durations).

use shared::{NewService, ServiceItem, ServicePatch};

use crate::error::{AppError, AppResult};
use crate::storage::{next_id, Store};

#[derive(Clone)]
pub struct CatalogService {
    store: Store,
}

impl CatalogService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<ServiceItem> {
        self.store.services.read()
    }

    pub fn create(&self, req: NewService) -> AppResult<ServiceItem> {
        let name = req.name.unwrap_or_default();
        if name.is_empty() {
            return Err(AppError::bad_request("name_required"));
        }
        self.store.services.update(|list| {
            let item = ServiceItem {
                id: next_id(list),
                name,
                price: req.price.filter(|p| p.is_finite()).unwrap_or(0.0),
                duration_minutes: req.duration_minutes,
            };
            list.push(item.clone());
            Ok(item)
        })
    }

    pub fn update(&self, id: u64, patch: ServicePatch) -> AppResult<ServiceItem> {
        self.store.services.update(|list| {
            let item = list
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or(AppError::NotFound("not_found"))?;
            if let Some(v) = patch.name {
                item.name = v;
            }
            if let Some(v) = patch.price {
                item.price = if v.is_finite() { v } else { 0.0 };
            }
            if let Some(v) = patch.duration_minutes {
                item.duration_minutes = Some(v);
            }
            Ok(item.clone())
        })
    }

    pub fn delete(&self, id: u64) -> AppResult<ServiceItem> {
        self.store.services.update(|list| {
            let i = list
                .iter()
                .position(|s| s.id == id)
                .ok_or(AppError::NotFound("not_found"))?;
            Ok(list.remove(i))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::temp_store;

    #[test]
    fn create_requires_a_name_and_defaults_price() {
        let (store, _dir) = temp_store();
        let svc = CatalogService::new(store);
        assert!(svc.create(NewService::default()).is_err());

        let item = svc
            .create(NewService {
                name: Some("Swedish Massage".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(item.price, 0.0);
        assert_eq!(item.duration_minutes, None);
    }

    #[test]
    fn update_changes_price_and_duration() {
        let (store, _dir) = temp_store();
        let svc = CatalogService::new(store);
        let item = svc
            .create(NewService {
                name: Some("Facial".to_string()),
                price: Some(120.0),
                duration_minutes: Some(45),
            })
            .unwrap();

        let item = svc
            .update(
                item.id,
                ServicePatch {
                    price: Some(150.0),
                    duration_minutes: Some(60),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(item.name, "Facial");
        assert_eq!(item.price, 150.0);
        assert_eq!(item.duration_minutes, Some(60));
    }

    #[test]
    fn delete_returns_the_removed_item() {
        let (store, _dir) = temp_store();
        let svc = CatalogService::new(store);
        let item = svc
            .create(NewService {
                name: Some("Facial".to_string()),
                ..Default::default()
            })
            .unwrap();
        let removed = svc.delete(item.id).unwrap();
        assert_eq!(removed.id, item.id);
        assert!(svc.list().is_empty());
        assert!(matches!(
            svc.delete(item.id),
            Err(AppError::NotFound("not_found"))
        ));
    }
}
