//! Therapists and other personnel.

use shared::{NewStaff, Staff, StaffPatch};

use crate::error::{AppError, AppResult};
use crate::storage::{next_id, Store};
use crate::util::now_iso;

#[derive(Clone)]
pub struct StaffService {
    store: Store,
}

impl StaffService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<Staff> {
        self.store.staff.read()
    }

    pub fn create(&self, req: NewStaff) -> AppResult<Staff> {
        let name = req.name.unwrap_or_default().trim().to_string();
        if name.is_empty() {
            return Err(AppError::bad_request("name is required"));
        }
        self.store.staff.update(|list| {
            let member = Staff {
                id: next_id(list),
                name,
                role: req.role.unwrap_or_default().trim().to_string(),
                phone: req.phone.unwrap_or_default().trim().to_string(),
                notes: req.notes.unwrap_or_default().trim().to_string(),
                created_at: now_iso(),
                updated_at: None,
            };
            list.push(member.clone());
            Ok(member)
        })
    }

    pub fn update(&self, id: u64, patch: StaffPatch) -> AppResult<Staff> {
        self.store.staff.update(|list| {
            let member = list
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or(AppError::NotFound("not found"))?;
            if let Some(v) = patch.name {
                member.name = v.trim().to_string();
            }
            if let Some(v) = patch.role {
                member.role = v.trim().to_string();
            }
            if let Some(v) = patch.phone {
                member.phone = v.trim().to_string();
            }
            if let Some(v) = patch.notes {
                member.notes = v.trim().to_string();
            }
            member.updated_at = Some(now_iso());
            Ok(member.clone())
        })
    }

    pub fn delete(&self, id: u64) -> AppResult<()> {
        self.store.staff.update(|list| {
            let before = list.len();
            list.retain(|s| s.id != id);
            if list.len() == before {
                return Err(AppError::NotFound("not found"));
            }
            Ok(())
        })
    }
}
