use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;

use beerstock_beer::{Beer, NewBeer};
use beerstock_core::{BeerId, Entity};

use super::r#trait::{BeerRepository, RepositoryError};

/// In-memory beer repository.
///
/// Intended for tests/dev. Ids are handed out from a sequence starting at 1
/// and are never reused, even after deletes.
#[derive(Debug)]
pub struct InMemoryBeerRepository {
    beers: RwLock<BTreeMap<BeerId, Beer>>,
    next_id: AtomicI64,
}

impl InMemoryBeerRepository {
    pub fn new() -> Self {
        Self {
            beers: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryBeerRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> RepositoryError {
    RepositoryError::Storage("in-memory beer map lock poisoned".to_string())
}

#[async_trait]
impl BeerRepository for InMemoryBeerRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Beer>, RepositoryError> {
        let beers = self.beers.read().map_err(|_| poisoned())?;
        Ok(beers.values().find(|b| b.name() == name).cloned())
    }

    async fn find_by_id(&self, id: BeerId) -> Result<Option<Beer>, RepositoryError> {
        let beers = self.beers.read().map_err(|_| poisoned())?;
        Ok(beers.get(&id).cloned())
    }

    async fn save(&self, beer: NewBeer) -> Result<Beer, RepositoryError> {
        let mut beers = self.beers.write().map_err(|_| poisoned())?;
        let id = BeerId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let beer = beer.with_id(id);
        beers.insert(id, beer.clone());
        Ok(beer)
    }

    async fn update(&self, beer: &Beer) -> Result<Beer, RepositoryError> {
        let mut beers = self.beers.write().map_err(|_| poisoned())?;
        match beers.get_mut(beer.id()) {
            Some(stored) => {
                *stored = beer.clone();
                Ok(beer.clone())
            }
            None => Err(RepositoryError::Storage(format!(
                "cannot update beer {}: no such record",
                beer.id()
            ))),
        }
    }

    async fn find_all(&self) -> Result<Vec<Beer>, RepositoryError> {
        let beers = self.beers.read().map_err(|_| poisoned())?;
        Ok(beers.values().cloned().collect())
    }

    async fn delete_by_id(&self, id: BeerId) -> Result<(), RepositoryError> {
        let mut beers = self.beers.write().map_err(|_| poisoned())?;
        beers.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beerstock_beer::BeerType;

    fn new_beer(name: &str) -> NewBeer {
        NewBeer::new(name, "Brand", BeerType::Lager, 10, 50).unwrap()
    }

    #[tokio::test]
    async fn save_assigns_sequential_ids() {
        let repo = InMemoryBeerRepository::new();
        let a = repo.save(new_beer("A")).await.unwrap();
        let b = repo.save(new_beer("B")).await.unwrap();

        assert_eq!(a.id_typed(), BeerId::new(1));
        assert_eq!(b.id_typed(), BeerId::new(2));
        assert_eq!(repo.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = InMemoryBeerRepository::new();
        let a = repo.save(new_beer("A")).await.unwrap();
        repo.delete_by_id(a.id_typed()).await.unwrap();
        let b = repo.save(new_beer("B")).await.unwrap();

        assert_eq!(b.id_typed(), BeerId::new(2));
        assert!(repo.find_by_id(a.id_typed()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn lookups_by_name_and_id() {
        let repo = InMemoryBeerRepository::new();
        let saved = repo.save(new_beer("Heineken")).await.unwrap();

        assert_eq!(repo.find_by_name("Heineken").await.unwrap(), Some(saved.clone()));
        assert_eq!(repo.find_by_id(saved.id_typed()).await.unwrap(), Some(saved));
        assert!(repo.find_by_name("heineken").await.unwrap().is_none());
        assert!(repo.find_by_id(BeerId::new(42)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_replaces_stock_of_existing_record_only() {
        let repo = InMemoryBeerRepository::new();
        let mut beer = repo.save(new_beer("A")).await.unwrap();
        beer.increment(5).unwrap();

        let updated = repo.update(&beer).await.unwrap();
        assert_eq!(updated.quantity(), 15);
        assert_eq!(
            repo.find_by_id(beer.id_typed()).await.unwrap().unwrap().quantity(),
            15
        );

        let ghost = new_beer("ghost").with_id(BeerId::new(99));
        assert!(matches!(repo.update(&ghost).await, Err(RepositoryError::Storage(_))));
    }

    #[tokio::test]
    async fn find_all_is_ordered_by_id() {
        let repo = InMemoryBeerRepository::new();
        assert!(repo.find_all().await.unwrap().is_empty());

        for name in ["C", "A", "B"] {
            repo.save(new_beer(name)).await.unwrap();
        }
        let names: Vec<_> = repo
            .find_all()
            .await
            .unwrap()
            .iter()
            .map(|b| b.name().to_string())
            .collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }
}
