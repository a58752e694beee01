//! Beer stock service (application-level orchestration).
//!
//! Every operation follows the same pipeline:
//!
//! ```text
//! request
//!   ↓
//! 1. Validate input (pure, no IO)
//!   ↓
//! 2. Look up the record(s) it depends on
//!   ↓
//! 3. Apply the business rule (duplicate name, stock bounds)
//!   ↓
//! 4. At most one repository write
//!   ↓
//! 5. Map the stored record back to a `BeerDto`
//! ```
//!
//! A rejected request never reaches step 4, so no operation leaves partial
//! state behind.
//!
//! Increments and decrements are read-then-write: two concurrent requests on
//! the same record can lose an update.

use thiserror::Error;
use tracing::{debug, info, instrument};

use beerstock_beer::{Beer, BeerDto, BeerMapper, StockViolation};
use beerstock_core::{BeerId, DomainError};

use crate::repository::{BeerRepository, RepositoryError};

/// Key a lookup was made with (for `NotFound` reporting).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeerLookup {
    Name(String),
    Id(BeerId),
}

impl core::fmt::Display for BeerLookup {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BeerLookup::Name(name) => write!(f, "name {name}"),
            BeerLookup::Id(id) => write!(f, "id {id}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum BeerServiceError {
    /// A beer with this name already exists.
    #[error("beer with name {0} already registered in the system")]
    AlreadyRegistered(String),

    #[error("beer with {0} not found in the system")]
    NotFound(BeerLookup),

    /// Increment would push `quantity` above `max`.
    #[error("beer with id {id}: adding {amount} to {quantity} exceeds the max stock capacity of {max}")]
    StockExceeded {
        id: BeerId,
        quantity: u32,
        amount: u32,
        max: u32,
    },

    /// Decrement would push `quantity` below zero.
    #[error("beer with id {id}: removing {amount} from {quantity} would leave negative stock")]
    InsufficientStock { id: BeerId, quantity: u32, amount: u32 },

    /// Malformed input (field limits).
    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl BeerServiceError {
    fn from_domain(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => Self::Validation(msg),
            other => Self::Validation(other.to_string()),
        }
    }

    fn from_stock_change(id: BeerId, err: StockViolation) -> Self {
        match err {
            StockViolation::Exceeded { quantity, amount, max } => Self::StockExceeded {
                id,
                quantity,
                amount,
                max,
            },
            StockViolation::BelowZero { quantity, amount } => Self::InsufficientStock {
                id,
                quantity,
                amount,
            },
        }
    }
}

pub type ServiceResult<T> = Result<T, BeerServiceError>;

/// Stock service over an injected repository.
#[derive(Debug, Clone)]
pub struct BeerService<R> {
    repository: R,
    mapper: BeerMapper,
}

impl<R> BeerService<R>
where
    R: BeerRepository,
{
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            mapper: BeerMapper::new(),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Register a new beer. Fails with `AlreadyRegistered` on a name collision.
    #[instrument(skip(self, beer), fields(name = %beer.name), err)]
    pub async fn create(&self, beer: BeerDto) -> ServiceResult<BeerDto> {
        let new_beer = self
            .mapper
            .to_model(&beer)
            .map_err(BeerServiceError::from_domain)?;

        if self.repository.find_by_name(new_beer.name()).await?.is_some() {
            debug!("rejecting duplicate beer name");
            return Err(BeerServiceError::AlreadyRegistered(new_beer.name().to_string()));
        }

        let saved = self.repository.save(new_beer).await?;
        info!(beer_id = %saved.id_typed(), "beer created");
        Ok(self.mapper.to_dto(&saved))
    }

    #[instrument(skip(self), err)]
    pub async fn find_by_name(&self, name: &str) -> ServiceResult<BeerDto> {
        let beer = self
            .repository
            .find_by_name(name)
            .await?
            .ok_or_else(|| BeerServiceError::NotFound(BeerLookup::Name(name.to_string())))?;
        Ok(self.mapper.to_dto(&beer))
    }

    #[instrument(skip(self), err)]
    pub async fn list_all(&self) -> ServiceResult<Vec<BeerDto>> {
        let beers = self.repository.find_all().await?;
        debug!(count = beers.len(), "listed beers");
        Ok(beers.iter().map(|b| self.mapper.to_dto(b)).collect())
    }

    #[instrument(skip(self), fields(beer_id = %id), err)]
    pub async fn delete_by_id(&self, id: BeerId) -> ServiceResult<()> {
        self.verify_exists(id).await?;
        self.repository.delete_by_id(id).await?;
        info!("beer deleted");
        Ok(())
    }

    /// Add `amount` to the stock of beer `id`. Fails with `StockExceeded` if
    /// the result would be above the record's `max`.
    #[instrument(skip(self), fields(beer_id = %id), err)]
    pub async fn increment(&self, id: BeerId, amount: u32) -> ServiceResult<BeerDto> {
        let mut beer = self.verify_exists(id).await?;
        beer.increment(amount)
            .map_err(|e| BeerServiceError::from_stock_change(id, e))?;

        let saved = self.repository.update(&beer).await?;
        info!(quantity = saved.quantity(), "stock incremented");
        Ok(self.mapper.to_dto(&saved))
    }

    /// Remove `amount` from the stock of beer `id`. Fails with
    /// `InsufficientStock` if the result would be negative.
    #[instrument(skip(self), fields(beer_id = %id), err)]
    pub async fn decrement(&self, id: BeerId, amount: u32) -> ServiceResult<BeerDto> {
        let mut beer = self.verify_exists(id).await?;
        beer.decrement(amount)
            .map_err(|e| BeerServiceError::from_stock_change(id, e))?;

        let saved = self.repository.update(&beer).await?;
        info!(quantity = saved.quantity(), "stock decremented");
        Ok(self.mapper.to_dto(&saved))
    }

    async fn verify_exists(&self, id: BeerId) -> ServiceResult<Beer> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(BeerServiceError::NotFound(BeerLookup::Id(id)))
    }
}
