//! MongoDB implementation of CoffeeShopRepository

use async_trait::async_trait;
use mongodb::{
    Collection, Database,
    bson::{Bson, Document, doc, to_bson},
    options::{FindOneAndUpdateOptions, ReturnDocument},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::CoffeeShopResult;
use crate::models::{CoffeeShop, CreateCoffeeShop};
use crate::repository::CoffeeShopRepository;

/// MongoDB implementation of the CoffeeShopRepository
pub struct MongoCoffeeShopRepository {
    collection: Collection<CoffeeShop>,
}

impl MongoCoffeeShopRepository {
    /// Create a new MongoCoffeeShopRepository
    ///
    /// # Arguments
    /// * `db` - MongoDB database instance
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let db = client.database("coffee");
    /// let repo = MongoCoffeeShopRepository::new(db);
    /// ```
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<CoffeeShop>("coffee_shops");
        Self { collection }
    }

    /// Create a new MongoCoffeeShopRepository with a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<CoffeeShop>(collection_name);
        Self { collection }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<CoffeeShop> {
        &self.collection
    }

    fn id_filter(id: &Uuid) -> Document {
        doc! { "_id": to_bson(id).unwrap_or(Bson::Null) }
    }

    /// Build a case-insensitive name filter.
    ///
    /// The search term is escaped so regex metacharacters match
    /// literally; user input never reaches the regex engine as a pattern.
    fn name_filter(term: &str) -> Document {
        doc! { "name": { "$regex": regex::escape(term), "$options": "i" } }
    }
}

#[async_trait]
impl CoffeeShopRepository for MongoCoffeeShopRepository {
    #[instrument(skip(self, input), fields(shop_name = %input.name))]
    async fn create(&self, input: CreateCoffeeShop) -> CoffeeShopResult<CoffeeShop> {
        let shop = CoffeeShop::new(input);

        self.collection.insert_one(&shop).await?;

        tracing::info!(shop_id = %shop.id, "Coffee shop created successfully");
        Ok(shop)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> CoffeeShopResult<Vec<CoffeeShop>> {
        use futures_util::TryStreamExt;

        let cursor = self.collection.find(doc! {}).await?;
        let shops: Vec<CoffeeShop> = cursor.try_collect().await?;

        Ok(shops)
    }

    #[instrument(skip(self))]
    async fn search_by_name(&self, term: &str) -> CoffeeShopResult<Vec<CoffeeShop>> {
        use futures_util::TryStreamExt;

        let cursor = self.collection.find(Self::name_filter(term)).await?;
        let shops: Vec<CoffeeShop> = cursor.try_collect().await?;

        Ok(shops)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> CoffeeShopResult<Option<CoffeeShop>> {
        let shop = self.collection.find_one(Self::id_filter(&id)).await?;
        Ok(shop)
    }

    #[instrument(skip(self))]
    async fn set_favorite(&self, id: Uuid, favorite: bool) -> CoffeeShopResult<Option<CoffeeShop>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let shop = self
            .collection
            .find_one_and_update(
                Self::id_filter(&id),
                doc! { "$set": { "favorite": favorite } },
            )
            .with_options(options)
            .await?;

        if shop.is_some() {
            tracing::info!(shop_id = %id, favorite, "Favorite flag updated");
        }
        Ok(shop)
    }
}
