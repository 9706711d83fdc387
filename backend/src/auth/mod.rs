//! JWT authentication and role handling.

pub mod extractor;
pub mod jwt;

pub use extractor::CurrentUser;
pub use jwt::{Claims, JwtConfig, JwtService};

/// Roles accepted by the account system.
pub const ROLES: [&str; 3] = ["admin", "supervisor", "staff"];

/// Lowercase and validate a requested role; anything unknown becomes staff.
pub fn clamp_role(role: &str) -> String {
    let v = role.trim().to_ascii_lowercase();
    if ROLES.contains(&v.as_str()) {
        v
    } else {
        "staff".to_string()
    }
}
