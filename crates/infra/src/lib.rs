//! Infrastructure layer: storage adapters, the stock service, configuration.

pub mod config;
pub mod repository;
pub mod service;

pub use config::{AppConfig, ConfigError};
pub use repository::{BeerRepository, InMemoryBeerRepository, PostgresBeerRepository, RepositoryError};
pub use service::{BeerLookup, BeerService, BeerServiceError};
