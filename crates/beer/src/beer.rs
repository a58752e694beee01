use core::str::FromStr;

use serde::{Deserialize, Serialize};

use beerstock_core::{BeerId, DomainError, DomainResult, Entity};

use crate::stock::{StockLevel, StockViolation};

/// Longest accepted `name`/`brand`, in characters.
pub const MAX_TEXT_LEN: usize = 200;
/// Largest `max` a record may be created with.
pub const MAX_CAPACITY: u32 = 500;
/// Largest `quantity` a record may be created with.
pub const MAX_INITIAL_QUANTITY: u32 = 100;

/// Beer style (closed set).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BeerType {
    Lager,
    Malzbier,
    Witbier,
    Weiss,
    Ale,
    Ipa,
    Stout,
}

impl BeerType {
    pub const ALL: [BeerType; 7] = [
        BeerType::Lager,
        BeerType::Malzbier,
        BeerType::Witbier,
        BeerType::Weiss,
        BeerType::Ale,
        BeerType::Ipa,
        BeerType::Stout,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BeerType::Lager => "LAGER",
            BeerType::Malzbier => "MALZBIER",
            BeerType::Witbier => "WITBIER",
            BeerType::Weiss => "WEISS",
            BeerType::Ale => "ALE",
            BeerType::Ipa => "IPA",
            BeerType::Stout => "STOUT",
        }
    }
}

impl core::fmt::Display for BeerType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BeerType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BeerType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::validation(format!("unknown beer type: {s}")))
    }
}

/// A validated beer that has not been persisted yet (no id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBeer {
    name: String,
    brand: String,
    beer_type: BeerType,
    stock: StockLevel,
}

impl NewBeer {
    /// Validate creation input.
    ///
    /// `name` and `brand` are trimmed; `max` must be in `1..=MAX_CAPACITY`,
    /// `quantity` at most `MAX_INITIAL_QUANTITY` and never above `max`.
    pub fn new(
        name: &str,
        brand: &str,
        beer_type: BeerType,
        quantity: u32,
        max: u32,
    ) -> DomainResult<Self> {
        let name = validate_text("name", name)?;
        let brand = validate_text("brand", brand)?;

        if max == 0 || max > MAX_CAPACITY {
            return Err(DomainError::validation(format!(
                "max must be between 1 and {MAX_CAPACITY}"
            )));
        }
        if quantity > MAX_INITIAL_QUANTITY {
            return Err(DomainError::validation(format!(
                "quantity cannot exceed {MAX_INITIAL_QUANTITY}"
            )));
        }
        if quantity > max {
            return Err(DomainError::validation("quantity cannot exceed max"));
        }

        Ok(Self {
            name,
            brand,
            beer_type,
            stock: StockLevel::new(quantity, max)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn beer_type(&self) -> BeerType {
        self.beer_type
    }

    pub fn stock(&self) -> StockLevel {
        self.stock
    }

    /// Attach the identity assigned by the repository.
    pub fn with_id(self, id: BeerId) -> Beer {
        Beer {
            id,
            name: self.name,
            brand: self.brand,
            beer_type: self.beer_type,
            stock: self.stock,
        }
    }
}

fn validate_text(field: &str, value: &str) -> DomainResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(DomainError::validation(format!(
            "{field} cannot be longer than {MAX_TEXT_LEN} characters"
        )));
    }
    Ok(value.to_string())
}

/// Entity: a persisted beer record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Beer {
    id: BeerId,
    name: String,
    brand: String,
    beer_type: BeerType,
    stock: StockLevel,
}

impl Beer {
    /// Rebuild a record from storage columns.
    ///
    /// Only the stock invariant is checked here; creation limits apply to new
    /// records, not to ones already stored.
    pub fn from_parts(
        id: BeerId,
        name: String,
        brand: String,
        beer_type: BeerType,
        quantity: u32,
        max: u32,
    ) -> DomainResult<Self> {
        Ok(Self {
            id,
            name,
            brand,
            beer_type,
            stock: StockLevel::new(quantity, max)?,
        })
    }

    pub fn id_typed(&self) -> BeerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn beer_type(&self) -> BeerType {
        self.beer_type
    }

    pub fn stock(&self) -> StockLevel {
        self.stock
    }

    pub fn quantity(&self) -> u32 {
        self.stock.quantity()
    }

    pub fn max(&self) -> u32 {
        self.stock.max()
    }

    /// Add `amount` units. On error the record is left untouched.
    pub fn increment(&mut self, amount: u32) -> Result<(), StockViolation> {
        self.stock = self.stock.increment(amount)?;
        Ok(())
    }

    /// Remove `amount` units. On error the record is left untouched.
    pub fn decrement(&mut self, amount: u32) -> Result<(), StockViolation> {
        self.stock = self.stock.decrement(amount)?;
        Ok(())
    }
}

impl Entity for Beer {
    type Id = BeerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heineken() -> NewBeer {
        NewBeer::new("Heineken", "Heineken", BeerType::Ale, 10, 50).unwrap()
    }

    #[test]
    fn new_beer_trims_text_fields() {
        let beer = NewBeer::new("  Heineken ", " Heineken", BeerType::Lager, 0, 10).unwrap();
        assert_eq!(beer.name(), "Heineken");
        assert_eq!(beer.brand(), "Heineken");
        assert_eq!(beer.stock().quantity(), 0);
    }

    #[test]
    fn new_beer_rejects_blank_or_oversized_text() {
        let err = NewBeer::new("   ", "Heineken", BeerType::Ale, 10, 50).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let long = "x".repeat(MAX_TEXT_LEN + 1);
        let err = NewBeer::new("Heineken", &long, BeerType::Ale, 10, 50).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn new_beer_enforces_creation_limits() {
        assert!(NewBeer::new("a", "b", BeerType::Ale, 0, 0).is_err());
        assert!(NewBeer::new("a", "b", BeerType::Ale, 0, MAX_CAPACITY + 1).is_err());
        assert!(NewBeer::new("a", "b", BeerType::Ale, MAX_INITIAL_QUANTITY + 1, MAX_CAPACITY).is_err());
        assert!(NewBeer::new("a", "b", BeerType::Ale, 20, 10).is_err());
        assert!(NewBeer::new("a", "b", BeerType::Ale, MAX_INITIAL_QUANTITY, MAX_CAPACITY).is_ok());
    }

    #[test]
    fn with_id_keeps_all_fields() {
        let beer = heineken().with_id(BeerId::new(1));
        assert_eq!(*beer.id(), BeerId::new(1));
        assert_eq!(beer.name(), "Heineken");
        assert_eq!(beer.beer_type(), BeerType::Ale);
        assert_eq!(beer.quantity(), 10);
        assert_eq!(beer.max(), 50);
    }

    #[test]
    fn increment_and_decrement_mutate_stock() {
        let mut beer = heineken().with_id(BeerId::new(1));
        beer.increment(5).unwrap();
        assert_eq!(beer.quantity(), 15);
        beer.decrement(15).unwrap();
        assert_eq!(beer.quantity(), 0);
    }

    #[test]
    fn rejected_change_leaves_record_untouched() {
        let mut beer = heineken().with_id(BeerId::new(1));
        let err = beer.increment(41).unwrap_err();
        assert!(matches!(err, StockViolation::Exceeded { .. }));
        assert_eq!(beer.quantity(), 10);

        let err = beer.decrement(11).unwrap_err();
        assert!(matches!(err, StockViolation::BelowZero { .. }));
        assert_eq!(beer.quantity(), 10);
    }

    #[test]
    fn from_parts_checks_stock_invariant_only() {
        let beer = Beer::from_parts(
            BeerId::new(7),
            "Guinness".to_string(),
            "Diageo".to_string(),
            BeerType::Stout,
            400,
            900,
        )
        .unwrap();
        assert_eq!(beer.max(), 900);

        let err = Beer::from_parts(
            BeerId::new(7),
            "Guinness".to_string(),
            "Diageo".to_string(),
            BeerType::Stout,
            10,
            5,
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn beer_type_parses_case_insensitively() {
        assert_eq!("ipa".parse::<BeerType>().unwrap(), BeerType::Ipa);
        assert_eq!("MALZBIER".parse::<BeerType>().unwrap(), BeerType::Malzbier);
        assert!("pilsner".parse::<BeerType>().is_err());
        for t in BeerType::ALL {
            assert_eq!(t.as_str().parse::<BeerType>().unwrap(), t);
        }
    }
}
