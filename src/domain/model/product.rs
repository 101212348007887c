use super::{FieldRegistry, Filterable};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use utoipa::ToSchema;

/// A single catalog entry, as persisted in the products document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct Product {
    /// Assigned by the catalog on creation; never changes afterwards.
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub specifications: Option<String>,
}

/// Product fields supplied by callers on create and update (everything but `id`).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, ToSchema)]
pub struct ProductInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub specifications: Option<String>,
}

impl Product {
    /// Builds a product from caller input and an assigned identifier.
    pub fn from_input(id: i64, input: ProductInput) -> Self {
        Self {
            id,
            name: input.name,
            image: input.image,
            description: input.description,
            price: input.price,
            rating: input.rating,
            specifications: input.specifications,
        }
    }

    /// Overwrites every mutable field, keeping `id`.
    pub fn apply(&mut self, input: ProductInput) {
        self.name = input.name;
        self.image = input.image;
        self.description = input.description;
        self.price = input.price;
        self.rating = input.rating;
        self.specifications = input.specifications;
    }
}

static PRODUCT_FIELDS: OnceLock<FieldRegistry<Product>> = OnceLock::new();

impl Filterable for Product {
    fn field_registry() -> &'static FieldRegistry<Product> {
        PRODUCT_FIELDS.get_or_init(|| {
            FieldRegistry::<Product>::new()
                // i64 -> f64 is exact for every id the catalog can realistically assign.
                .numeric("id", |p| Some(p.id as f64))
                .text("name", |p| p.name.as_deref())
                .text("image", |p| p.image.as_deref())
                .text("description", |p| p.description.as_deref())
                .numeric("price", |p| p.price)
                .numeric("rating", |p| p.rating)
                .text("specifications", |p| p.specifications.as_deref())
        })
    }
}
