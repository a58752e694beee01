//! Beer stock domain module.
//!
//! This crate contains the business rules for beer stock, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod beer;
pub mod dto;
pub mod mapper;
pub mod stock;

pub use beer::{Beer, BeerType, NewBeer};
pub use dto::{BeerDto, QuantityDto};
pub use mapper::BeerMapper;
pub use stock::{StockLevel, StockViolation};
