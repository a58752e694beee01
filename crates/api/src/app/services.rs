use std::sync::Arc;

use anyhow::Context;
use sqlx::PgPool;

use beerstock_infra::{
    AppConfig, BeerRepository, BeerService, InMemoryBeerRepository, PostgresBeerRepository,
};

/// Repository handle shared by every request, whatever the backend.
pub type SharedRepository = Arc<dyn BeerRepository>;

/// Which repository adapter backs the service.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    InMemory,
    Postgres,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::InMemory => "in_memory",
            StorageBackend::Postgres => "postgres",
        }
    }
}

/// Application services shared across handlers.
pub struct AppServices {
    beers: BeerService<SharedRepository>,
    backend: StorageBackend,
}

impl AppServices {
    /// In-memory wiring (dev/test).
    pub fn in_memory() -> Self {
        let repository: SharedRepository = Arc::new(InMemoryBeerRepository::new());
        Self {
            beers: BeerService::new(repository),
            backend: StorageBackend::InMemory,
        }
    }

    /// Postgres wiring: connect, make sure the table exists.
    pub async fn postgres(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url)
            .await
            .context("failed to connect to Postgres")?;

        let repository = PostgresBeerRepository::new(pool);
        repository
            .ensure_schema()
            .await
            .context("failed to prepare beers table")?;

        let repository: SharedRepository = Arc::new(repository);
        Ok(Self {
            beers: BeerService::new(repository),
            backend: StorageBackend::Postgres,
        })
    }

    pub fn beers(&self) -> &BeerService<SharedRepository> {
        &self.beers
    }

    pub fn backend(&self) -> StorageBackend {
        self.backend
    }
}

/// Pick the repository from configuration: Postgres when `DATABASE_URL` is
/// set, in-memory otherwise.
pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    match config.database_url.as_deref() {
        Some(url) => AppServices::postgres(url).await,
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory beer repository");
            Ok(AppServices::in_memory())
        }
    }
}
