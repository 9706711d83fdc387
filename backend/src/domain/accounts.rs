//! User accounts: registration, login, and the admin-managed user list.
//! Passwords are stored as argon2 hashes and never serialized back out.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use shared::{AuthResponse, LoginRequest, NewUser, RegisterRequest, User, UserPatch, UserPublic};
use tracing::{info, warn};

use crate::auth::{clamp_role, CurrentUser, JwtService};
use crate::error::{AppError, AppResult};
use crate::storage::{next_id, Store};

fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("hashing password: {e}")))
}

fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[derive(Clone)]
pub struct AccountService {
    store: Store,
    jwt: JwtService,
}

impl AccountService {
    pub fn new(store: Store, jwt: JwtService) -> Self {
        Self { store, jwt }
    }

    /// First-run convenience: an empty user file gets a default admin and
    /// supervisor so the dashboard is reachable.
    pub fn seed_if_empty(&self) -> AppResult<()> {
        let seeded = self.store.users.update(|users| {
            if !users.is_empty() {
                return Ok::<_, AppError>(false);
            }
            users.push(User {
                id: 1,
                name: "Admin".to_string(),
                email: "admin@example.com".to_string(),
                password_hash: hash_password("password")?,
                role: "admin".to_string(),
            });
            users.push(User {
                id: 2,
                name: "Supervisor".to_string(),
                email: "supervisor@example.com".to_string(),
                password_hash: hash_password("password")?,
                role: "supervisor".to_string(),
            });
            Ok(true)
        })?;
        if seeded {
            warn!("seeded default users admin@example.com / supervisor@example.com");
        }
        Ok(())
    }

    pub fn register(&self, req: RegisterRequest) -> AppResult<AuthResponse> {
        let name = req.name.unwrap_or_default().trim().to_string();
        let email = req.email.unwrap_or_default().trim().to_ascii_lowercase();
        let password = req.password.unwrap_or_default();
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AppError::bad_request("name, email, password are required"));
        }

        let hash = hash_password(&password)?;
        let user = self.store.users.update(|users| {
            if users.iter().any(|u| u.email.eq_ignore_ascii_case(&email)) {
                return Err(AppError::Conflict("email_already_used"));
            }
            let user = User {
                id: next_id(users),
                name,
                email,
                password_hash: hash,
                role: clamp_role(req.role.as_deref().unwrap_or("staff")),
            };
            users.push(user.clone());
            Ok(user)
        })?;

        info!("registered user {} ({})", user.id, user.role);
        self.respond(&user)
    }

    pub fn login(&self, req: LoginRequest) -> AppResult<AuthResponse> {
        let email = req.email.unwrap_or_default().trim().to_ascii_lowercase();
        let password = req.password.unwrap_or_default();
        if email.is_empty() || password.is_empty() {
            return Err(AppError::bad_request("email and password are required"));
        }

        let user = self
            .store
            .users
            .read()
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(&email))
            .ok_or(AppError::Unauthorized("invalid_credentials"))?;
        if !verify_password(&password, &user.password_hash) {
            return Err(AppError::Unauthorized("invalid_credentials"));
        }

        self.respond(&user)
    }

    /// Resolve a verified token back to its user record.
    pub fn me(&self, current: &CurrentUser) -> AppResult<UserPublic> {
        let id: u64 = current
            .id
            .parse()
            .map_err(|_| AppError::NotFound("user_not_found"))?;
        self.store
            .users
            .read()
            .iter()
            .find(|u| u.id == id)
            .map(UserPublic::from)
            .ok_or(AppError::NotFound("user_not_found"))
    }

    pub fn list_users(&self) -> Vec<UserPublic> {
        self.store.users.read().iter().map(UserPublic::from).collect()
    }

    pub fn create_user(&self, req: NewUser) -> AppResult<UserPublic> {
        let name = req.name.unwrap_or_default().trim().to_string();
        let email = req.email.unwrap_or_default().trim().to_ascii_lowercase();
        let password = req.password.unwrap_or_default();
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AppError::bad_request("name, email, password, role are required"));
        }

        let hash = hash_password(&password)?;
        let user = self.store.users.update(|users| {
            if users.iter().any(|u| u.email.eq_ignore_ascii_case(&email)) {
                return Err(AppError::Conflict("email_already_used"));
            }
            let user = User {
                id: next_id(users),
                name,
                email,
                password_hash: hash,
                role: clamp_role(req.role.as_deref().unwrap_or("")),
            };
            users.push(user.clone());
            Ok(user)
        })?;
        Ok(UserPublic::from(&user))
    }

    pub fn update_user(&self, id: u64, patch: UserPatch) -> AppResult<UserPublic> {
        let new_hash = match patch.password.as_deref() {
            Some(p) if !p.is_empty() => Some(hash_password(p)?),
            _ => None,
        };
        self.store.users.update(|users| {
            let user = users
                .iter_mut()
                .find(|u| u.id == id)
                .ok_or(AppError::NotFound("not_found"))?;
            if let Some(v) = patch.name {
                user.name = v.trim().to_string();
            }
            if let Some(v) = patch.email {
                let v = v.trim().to_ascii_lowercase();
                if !v.is_empty() {
                    user.email = v;
                }
            }
            if let Some(v) = patch.role {
                user.role = clamp_role(&v);
            }
            if let Some(hash) = new_hash {
                user.password_hash = hash;
            }
            Ok(UserPublic::from(&*user))
        })
    }

    pub fn delete_user(&self, id: u64) -> AppResult<UserPublic> {
        self.store.users.update(|users| {
            let i = users
                .iter()
                .position(|u| u.id == id)
                .ok_or(AppError::NotFound("not_found"))?;
            let removed = users.remove(i);
            Ok(UserPublic::from(&removed))
        })
    }

    fn respond(&self, user: &User) -> AppResult<AuthResponse> {
        Ok(AuthResponse {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            token: self.jwt.sign(user)?,
        })
    }
}
