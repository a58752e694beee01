//! Transfer representations of beer records (JSON shape).

use serde::{Deserialize, Serialize};

use beerstock_core::{DomainError, DomainResult};

use crate::beer::BeerType;

/// Largest amount a single increment/decrement request may carry.
pub const MAX_ADJUSTMENT: u32 = 100;

/// Field-equivalent transfer form of a beer record.
///
/// `id` is ignored on input (the repository assigns it) and always set on
/// output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeerDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub brand: String,
    pub max: u32,
    pub quantity: u32,
    #[serde(rename = "type")]
    pub beer_type: BeerType,
}

/// Body of increment/decrement requests.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityDto {
    pub quantity: u32,
}

impl QuantityDto {
    /// Check the request limit and return the amount to apply.
    ///
    /// Zero is accepted and leaves the stock unchanged. Stock bounds are the
    /// record's concern, not the request's.
    pub fn amount(&self) -> DomainResult<u32> {
        if self.quantity > MAX_ADJUSTMENT {
            return Err(DomainError::validation(format!(
                "quantity to adjust cannot exceed {MAX_ADJUSTMENT}"
            )));
        }
        Ok(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_without_id_and_with_type_field() {
        let dto: BeerDto = serde_json::from_value(json!({
            "name": "Heineken",
            "brand": "Heineken",
            "max": 50,
            "quantity": 10,
            "type": "ALE",
        }))
        .unwrap();
        assert_eq!(dto.id, None);
        assert_eq!(dto.beer_type, BeerType::Ale);
    }

    #[test]
    fn rejects_negative_quantity_and_unknown_type() {
        let negative = serde_json::from_value::<BeerDto>(json!({
            "name": "Heineken", "brand": "Heineken", "max": 50, "quantity": -1, "type": "ALE",
        }));
        assert!(negative.is_err());

        let unknown = serde_json::from_value::<BeerDto>(json!({
            "name": "Heineken", "brand": "Heineken", "max": 50, "quantity": 1, "type": "PILSNER",
        }));
        assert!(unknown.is_err());
    }

    #[test]
    fn adjustment_amount_is_capped_per_request() {
        assert_eq!(QuantityDto { quantity: 0 }.amount(), Ok(0));
        assert_eq!(QuantityDto { quantity: MAX_ADJUSTMENT }.amount(), Ok(MAX_ADJUSTMENT));
        assert!(matches!(
            QuantityDto { quantity: MAX_ADJUSTMENT + 1 }.amount(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn serializes_type_under_its_wire_name() {
        let dto = BeerDto {
            id: Some(3),
            name: "Erdinger".to_string(),
            brand: "Erdinger".to_string(),
            max: 20,
            quantity: 2,
            beer_type: BeerType::Weiss,
        };
        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["type"], "WEISS");
        assert!(value.get("beer_type").is_none());
    }
}
