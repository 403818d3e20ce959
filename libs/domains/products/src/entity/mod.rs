//! Sea-ORM entities backing the catalog tables.

pub mod product;
pub mod product_image;
