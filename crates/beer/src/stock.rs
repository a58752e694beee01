//! Stock level value object and its bounds rules.

use thiserror::Error;

use beerstock_core::{DomainError, DomainResult, ValueObject};

/// Current stock of a record together with its upper bound.
///
/// Invariant: `quantity <= max` and `max > 0`. Every constructor and every
/// transition checks it, so a `StockLevel` in hand is always valid.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StockLevel {
    quantity: u32,
    max: u32,
}

impl ValueObject for StockLevel {}

/// A stock transition that would break the `0 <= quantity <= max` bound.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StockViolation {
    #[error("adding {amount} to {quantity} exceeds the max stock capacity of {max}")]
    Exceeded { quantity: u32, amount: u32, max: u32 },

    #[error("removing {amount} from {quantity} would leave negative stock")]
    BelowZero { quantity: u32, amount: u32 },
}

impl StockLevel {
    pub fn new(quantity: u32, max: u32) -> DomainResult<Self> {
        if max == 0 {
            return Err(DomainError::invariant("max must be positive"));
        }
        if quantity > max {
            return Err(DomainError::invariant(format!(
                "quantity {quantity} is above max {max}"
            )));
        }
        Ok(Self { quantity, max })
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn increment(self, amount: u32) -> Result<Self, StockViolation> {
        let quantity = self
            .quantity
            .checked_add(amount)
            .filter(|q| *q <= self.max)
            .ok_or(StockViolation::Exceeded {
                quantity: self.quantity,
                amount,
                max: self.max,
            })?;
        Ok(Self { quantity, ..self })
    }

    pub fn decrement(self, amount: u32) -> Result<Self, StockViolation> {
        let quantity = self
            .quantity
            .checked_sub(amount)
            .ok_or(StockViolation::BelowZero {
                quantity: self.quantity,
                amount,
            })?;
        Ok(Self { quantity, ..self })
    }
}
