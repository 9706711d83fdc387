pub mod collection;
pub mod connection;

pub use collection::{JsonCollection, JsonDocument};
pub use connection::JsonConnection;
