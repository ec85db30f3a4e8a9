//! Repository implementations for database access
//!
//! Repositories borrow the shared [`Database`](super::Database) handle and
//! never hold their own connection.

pub mod todos;

pub use todos::TodoRepo;
