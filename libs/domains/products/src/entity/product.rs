use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::{Gender, Product, ProductImage};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text", unique)]
    pub title: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Text", unique)]
    pub slug: String,
    pub stock: i32,
    pub sizes: Vec<String>,
    pub gender: Gender,
    pub tags: Vec<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_image::Entity")]
    Images,
}

impl Related<super::product_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Joins the row with its already-loaded image rows.
    pub fn into_product(self, images: Vec<super::product_image::Model>) -> Product {
        Product {
            id: self.id,
            title: self.title,
            price: self.price,
            description: self.description,
            slug: self.slug,
            stock: self.stock,
            sizes: self.sizes,
            gender: self.gender,
            tags: self.tags,
            images: images.into_iter().map(ProductImage::from).collect(),
        }
    }
}

impl From<&Product> for ActiveModel {
    fn from(product: &Product) -> Self {
        ActiveModel {
            id: Set(product.id),
            title: Set(product.title.clone()),
            price: Set(product.price),
            description: Set(product.description.clone()),
            slug: Set(product.slug.clone()),
            stock: Set(product.stock),
            sizes: Set(product.sizes.clone()),
            gender: Set(product.gender),
            tags: Set(product.tags.clone()),
        }
    }
}
