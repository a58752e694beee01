use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use beerstock_beer::{Beer, NewBeer};
use beerstock_core::BeerId;

/// Repository operation error.
///
/// These are **infrastructure errors** as opposed to business-rule failures,
/// which the service reports on its own.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("storage error: {0}")]
    Storage(String),

    /// A stored row could not be turned back into a valid record.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Persistence port for beer records.
///
/// Lookups return `Option` for absent records; "not found" as a failure is a
/// service decision. Name uniqueness is not enforced here.
#[async_trait]
pub trait BeerRepository: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<Beer>, RepositoryError>;

    async fn find_by_id(&self, id: BeerId) -> Result<Option<Beer>, RepositoryError>;

    /// Insert a new record; the repository assigns its id.
    async fn save(&self, beer: NewBeer) -> Result<Beer, RepositoryError>;

    /// Persist the current state of an existing record.
    async fn update(&self, beer: &Beer) -> Result<Beer, RepositoryError>;

    /// All records, ordered by id.
    async fn find_all(&self) -> Result<Vec<Beer>, RepositoryError>;

    async fn delete_by_id(&self, id: BeerId) -> Result<(), RepositoryError>;
}

#[async_trait]
impl<R> BeerRepository for Arc<R>
where
    R: BeerRepository + ?Sized,
{
    async fn find_by_name(&self, name: &str) -> Result<Option<Beer>, RepositoryError> {
        (**self).find_by_name(name).await
    }

    async fn find_by_id(&self, id: BeerId) -> Result<Option<Beer>, RepositoryError> {
        (**self).find_by_id(id).await
    }

    async fn save(&self, beer: NewBeer) -> Result<Beer, RepositoryError> {
        (**self).save(beer).await
    }

    async fn update(&self, beer: &Beer) -> Result<Beer, RepositoryError> {
        (**self).update(beer).await
    }

    async fn find_all(&self) -> Result<Vec<Beer>, RepositoryError> {
        (**self).find_all().await
    }

    async fn delete_by_id(&self, id: BeerId) -> Result<(), RepositoryError> {
        (**self).delete_by_id(id).await
    }
}
