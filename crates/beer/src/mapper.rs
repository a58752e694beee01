//! Conversion between transfer objects and domain records.

use beerstock_core::DomainResult;

use crate::beer::{Beer, NewBeer};
use crate::dto::BeerDto;

/// Maps `BeerDto` <-> `Beer`.
///
/// Both directions are pure. `to_model` can only fail on field validation;
/// the DTO `id` is dropped because identities come from the repository.
#[derive(Debug, Default, Copy, Clone)]
pub struct BeerMapper;

impl BeerMapper {
    pub fn new() -> Self {
        Self
    }

    pub fn to_model(&self, dto: &BeerDto) -> DomainResult<NewBeer> {
        NewBeer::new(&dto.name, &dto.brand, dto.beer_type, dto.quantity, dto.max)
    }

    pub fn to_dto(&self, beer: &Beer) -> BeerDto {
        BeerDto {
            id: Some(beer.id_typed().value()),
            name: beer.name().to_string(),
            brand: beer.brand().to_string(),
            max: beer.max(),
            quantity: beer.quantity(),
            beer_type: beer.beer_type(),
        }
    }
}
