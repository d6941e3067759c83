use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Product category
///
/// The category set is closed: anything outside it is rejected at
/// deserialization time.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProductCategory {
    Coffee,
    Food,
    Drinks,
}

/// A product sold by a coffee shop, embedded in the shop document
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub name: String,
    /// Optional free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub category: ProductCategory,
}

/// Coffee shop entity - represents a shop stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CoffeeShop {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Shop name
    pub name: String,
    /// Street address
    pub address: String,
    /// Rating from 0 to 5 (halves allowed by convention, not enforced)
    pub rating: f64,
    /// Whether the shop is marked as a favorite
    pub favorite: bool,
    /// Products sold by this shop, in insertion order
    pub products: Vec<Product>,
}

/// DTO for a product inside a create request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(custom(function = "validate_not_blank"), length(max = 200))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: f64,
    pub category: ProductCategory,
}

/// DTO for creating a new coffee shop
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCoffeeShop {
    #[validate(custom(function = "validate_not_blank"), length(max = 200))]
    pub name: String,
    #[validate(custom(function = "validate_not_blank"), length(max = 500))]
    pub address: String,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: f64,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    #[validate(nested)]
    pub products: Vec<CreateProduct>,
}

/// DTO for toggling the favorite flag
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SetFavorite {
    pub favorite: bool,
}

/// Query parameters for name search
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct SearchQuery {
    /// Case-insensitive substring to match against shop names
    pub q: Option<String>,
}

/// Rejects strings that are empty or whitespace-only
fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank")
            .with_message("must not be blank".into()));
    }
    Ok(())
}

impl CoffeeShop {
    /// Create a new coffee shop from a CreateCoffeeShop DTO.
    ///
    /// Leading and trailing whitespace on names and addresses is trimmed
    /// before the document is stored.
    pub fn new(input: CreateCoffeeShop) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name.trim().to_string(),
            address: input.address.trim().to_string(),
            rating: input.rating,
            favorite: input.favorite,
            products: input
                .products
                .into_iter()
                .map(|p| Product {
                    name: p.name.trim().to_string(),
                    description: p.description.map(|d| d.trim().to_string()),
                    price: p.price,
                    category: p.category,
                })
                .collect(),
        }
    }
}
