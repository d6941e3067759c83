use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::CoffeeShopResult;
use crate::models::{CoffeeShop, CreateCoffeeShop};

/// Repository trait for coffee shop persistence
///
/// This trait defines the data access interface for coffee shops.
/// Implementations can use different storage backends (MongoDB, in-memory).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CoffeeShopRepository: Send + Sync {
    /// Create a new coffee shop
    async fn create(&self, input: CreateCoffeeShop) -> CoffeeShopResult<CoffeeShop>;

    /// List all coffee shops in store order
    async fn list(&self) -> CoffeeShopResult<Vec<CoffeeShop>>;

    /// Case-insensitive substring search over shop names.
    ///
    /// The term is matched literally; an empty term matches every shop.
    async fn search_by_name(&self, term: &str) -> CoffeeShopResult<Vec<CoffeeShop>>;

    /// Get a coffee shop by ID
    async fn get_by_id(&self, id: Uuid) -> CoffeeShopResult<Option<CoffeeShop>>;

    /// Set the favorite flag, returning the updated shop if it exists
    async fn set_favorite(&self, id: Uuid, favorite: bool) -> CoffeeShopResult<Option<CoffeeShop>>;
}

/// In-memory repository for tests and local development.
///
/// Keeps shops in insertion order so list and search results are
/// deterministic.
#[derive(Clone, Default)]
pub struct InMemoryCoffeeShopRepository {
    shops: Arc<RwLock<Vec<CoffeeShop>>>,
}

impl InMemoryCoffeeShopRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CoffeeShopRepository for InMemoryCoffeeShopRepository {
    async fn create(&self, input: CreateCoffeeShop) -> CoffeeShopResult<CoffeeShop> {
        let shop = CoffeeShop::new(input);
        self.shops.write().await.push(shop.clone());
        Ok(shop)
    }

    async fn list(&self) -> CoffeeShopResult<Vec<CoffeeShop>> {
        Ok(self.shops.read().await.clone())
    }

    async fn search_by_name(&self, term: &str) -> CoffeeShopResult<Vec<CoffeeShop>> {
        let term = term.to_lowercase();
        Ok(self
            .shops
            .read()
            .await
            .iter()
            .filter(|shop| shop.name.to_lowercase().contains(&term))
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: Uuid) -> CoffeeShopResult<Option<CoffeeShop>> {
        Ok(self
            .shops
            .read()
            .await
            .iter()
            .find(|shop| shop.id == id)
            .cloned())
    }

    async fn set_favorite(&self, id: Uuid, favorite: bool) -> CoffeeShopResult<Option<CoffeeShop>> {
        let mut shops = self.shops.write().await;
        match shops.iter_mut().find(|shop| shop.id == id) {
            Some(shop) => {
                shop.favorite = favorite;
                Ok(Some(shop.clone()))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateProduct, ProductCategory};

    fn create_input(name: &str) -> CreateCoffeeShop {
        CreateCoffeeShop {
            name: name.to_string(),
            address: "1 Main St".to_string(),
            rating: 4.0,
            favorite: false,
            products: vec![CreateProduct {
                name: "Flat White".to_string(),
                description: None,
                price: 3.5,
                category: ProductCategory::Coffee,
            }],
        }
    }

    #[tokio::test]
    async fn test_create_and_get_roundtrip() {
        let repo = InMemoryCoffeeShopRepository::new();
        let shop = repo.create(create_input("Bluebird")).await.unwrap();

        let found = repo.get_by_id(shop.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Bluebird");
        assert_eq!(found.products.len(), 1);
    }

    #[tokio::test]
    async fn test_get_unknown_id_returns_none() {
        let repo = InMemoryCoffeeShopRepository::new();
        assert!(repo.get_by_id(Uuid::now_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let repo = InMemoryCoffeeShopRepository::new();
        repo.create(create_input("Bluebird Cafe")).await.unwrap();
        repo.create(create_input("BLUE MOUNTAIN")).await.unwrap();
        repo.create(create_input("Redstone")).await.unwrap();

        let results = repo.search_by_name("blue").await.unwrap();
        assert_eq!(results.len(), 2);

        let all = repo.search_by_name("").await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_set_favorite_updates_only_the_flag() {
        let repo = InMemoryCoffeeShopRepository::new();
        let shop = repo.create(create_input("Bluebird")).await.unwrap();

        let updated = repo.set_favorite(shop.id, true).await.unwrap().unwrap();
        assert!(updated.favorite);
        assert_eq!(updated.name, shop.name);
        assert_eq!(updated.rating, shop.rating);

        assert!(repo
            .set_favorite(Uuid::now_v7(), true)
            .await
            .unwrap()
            .is_none());
    }
}
