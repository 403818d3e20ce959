use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Target audience of a product
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
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Gender {
    #[sea_orm(string_value = "men")]
    Men,
    #[sea_orm(string_value = "women")]
    Women,
    #[sea_orm(string_value = "kid")]
    Kid,
    #[sea_orm(string_value = "unisex")]
    Unisex,
}

/// Image owned by a product. `id` is `None` until the row is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: Option<i32>,
    pub url: String,
}

impl ProductImage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: None,
            url: url.into(),
        }
    }
}

/// Catalog entry together with the images it owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub price: f64,
    pub description: Option<String>,
    pub slug: String,
    pub stock: i32,
    pub sizes: Vec<String>,
    pub gender: Gender,
    pub tags: Vec<String>,
    pub images: Vec<ProductImage>,
}

impl Product {
    /// Builds an unsaved product from a validated create payload.
    pub fn new(input: CreateProduct) -> Self {
        let slug = normalize_slug(input.slug.as_deref().unwrap_or(&input.title));

        Self {
            id: Uuid::now_v7(),
            title: input.title,
            price: input.price.unwrap_or(0.0),
            description: input.description,
            slug,
            stock: input.stock.unwrap_or(0),
            sizes: input.sizes,
            gender: input.gender,
            tags: input.tags,
            images: input.images.into_iter().map(ProductImage::new).collect(),
        }
    }

    /// Merges the scalar fields of `update`. Images are handled by the
    /// transactional update, never here.
    pub fn apply_update(&mut self, update: &UpdateProduct) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(description) = &update.description {
            self.description = Some(description.clone());
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(sizes) = &update.sizes {
            self.sizes = sizes.clone();
        }
        if let Some(gender) = update.gender {
            self.gender = gender;
        }
        if let Some(tags) = &update.tags {
            self.tags = tags.clone();
        }

        let source = update.slug.as_deref().unwrap_or(&self.slug);
        self.slug = normalize_slug(source);
    }

    /// Replaces the in-memory image list with unsaved images for `urls`.
    pub fn attach_images(&mut self, urls: &[String]) {
        self.images = urls.iter().cloned().map(ProductImage::new).collect();
    }
}

/// Lowercases, turns spaces into `_` and drops apostrophes.
pub fn normalize_slug(raw: &str) -> String {
    raw.to_lowercase().replace(' ', "_").replace('\'', "")
}

/// Product as returned to callers, with image URLs flattened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: Uuid,
    #[schema(example = "Men's Chill Crew Neck Sweatshirt")]
    pub title: String,
    #[schema(example = 75.0)]
    pub price: f64,
    pub description: Option<String>,
    #[schema(example = "mens_chill_crew_neck_sweatshirt")]
    pub slug: String,
    pub stock: i32,
    pub sizes: Vec<String>,
    pub gender: Gender,
    pub tags: Vec<String>,
    pub images: Vec<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            description: product.description,
            slug: product.slug,
            stock: product.stock,
            sizes: product.sizes,
            gender: product.gender,
            tags: product.tags,
            images: product.images.into_iter().map(|image| image.url).collect(),
        }
    }
}

/// DTO for creating a product
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    pub description: Option<String>,
    /// Derived from the title when absent
    pub slug: Option<String>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    #[serde(default)]
    pub sizes: Vec<String>,
    pub gender: Gender,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Image URLs
    #[serde(default)]
    pub images: Vec<String>,
}

/// DTO for a partial update. An absent `images` keeps the current images,
/// `images: []` removes them all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    pub description: Option<String>,
    pub slug: Option<String>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    pub sizes: Option<Vec<String>>,
    pub gender: Option<Gender>,
    pub tags: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
}

/// Page selection for the product listing
#[derive(Debug, Clone, Copy, Deserialize, Validate, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// Maximum number of products to return
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: u64,
    /// Number of products to skip
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> u64 {
    10
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}
