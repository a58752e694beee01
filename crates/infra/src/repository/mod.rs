//! Beer record storage boundary.
//!
//! The service only sees the `BeerRepository` trait; adapters decide where
//! records live (process memory for dev/tests, Postgres in production).

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryBeerRepository;
pub use postgres::PostgresBeerRepository;
pub use r#trait::{BeerRepository, RepositoryError};
