use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{CoffeeShopError, CoffeeShopResult};
use crate::models::{CoffeeShop, CreateCoffeeShop, Product, ProductCategory};
use crate::repository::CoffeeShopRepository;

/// Service layer for coffee shop business logic.
///
/// Validates input, resolves identifiers, and delegates persistence to
/// the repository. Identifiers arrive as raw path strings; anything that
/// does not parse as a UUID is treated as a shop that does not exist.
pub struct CoffeeShopService<R: CoffeeShopRepository> {
    repository: Arc<R>,
}

impl<R: CoffeeShopRepository> Clone for CoffeeShopService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: CoffeeShopRepository> CoffeeShopService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    fn parse_id(id: &str) -> CoffeeShopResult<Uuid> {
        Uuid::parse_str(id).map_err(|_| CoffeeShopError::NotFound(id.to_string()))
    }

    #[instrument(skip(self, input), fields(shop_name = %input.name))]
    pub async fn create(&self, input: CreateCoffeeShop) -> CoffeeShopResult<CoffeeShop> {
        input
            .validate()
            .map_err(|e| CoffeeShopError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> CoffeeShopResult<Vec<CoffeeShop>> {
        self.repository.list().await
    }

    /// Search shops by name, case-insensitively.
    ///
    /// An empty term matches every shop.
    #[instrument(skip(self))]
    pub async fn search(&self, term: &str) -> CoffeeShopResult<Vec<CoffeeShop>> {
        self.repository.search_by_name(term).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> CoffeeShopResult<CoffeeShop> {
        let uuid = Self::parse_id(id)?;
        self.repository
            .get_by_id(uuid)
            .await?
            .ok_or_else(|| CoffeeShopError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn set_favorite(&self, id: &str, favorite: bool) -> CoffeeShopResult<CoffeeShop> {
        let uuid = Self::parse_id(id)?;
        self.repository
            .set_favorite(uuid, favorite)
            .await?
            .ok_or_else(|| CoffeeShopError::NotFound(id.to_string()))
    }

    /// Products of one shop filtered by category.
    ///
    /// Category matching is exact and case-sensitive; an unknown
    /// category yields an empty list rather than an error.
    #[instrument(skip(self))]
    pub async fn products_by_category(
        &self,
        id: &str,
        category: &str,
    ) -> CoffeeShopResult<Vec<Product>> {
        let shop = self.get(id).await?;

        let Ok(category) = category.parse::<ProductCategory>() else {
            return Ok(Vec::new());
        };

        Ok(shop
            .products
            .into_iter()
            .filter(|p| p.category == category)
            .collect())
    }
}
