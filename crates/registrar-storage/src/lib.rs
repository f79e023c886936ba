// Storage layer for Registrar
// Decision: Support both PostgreSQL (production) and in-memory (dev mode)
//
// This crate provides the record store the API consumes:
// - Database: Postgres repositories over sqlx
// - InMemoryDatabase: HashMap-backed equivalent for dev mode and tests
// - StorageBackend: enum dispatch over the two
// - password: Argon2id hashing for account credentials

pub mod backend;
pub mod memory;
pub mod models;
pub mod password;
pub mod repositories;

pub use backend::StorageBackend;
pub use memory::InMemoryDatabase;
pub use models::*;
pub use password::{hash_password, verify_password};
pub use repositories::Database;
