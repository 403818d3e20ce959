use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{OwnedRwLockWriteGuard, RwLock};
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductImage, UpdateProduct};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a product and its images in one unit
    async fn create(&self, product: Product) -> ProductResult<Product>;

    /// Page of products ordered by title
    async fn find_page(&self, limit: u64, offset: u64) -> ProductResult<Vec<Product>>;

    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Match `UPPER(title) = UPPER(title) OR slug = slug`. When one product
    /// matches the slug and another the title, the slug match wins.
    async fn find_by_title_or_slug(
        &self,
        title: &str,
        slug: &str,
    ) -> ProductResult<Option<Product>>;

    /// Load the product and merge the scalar fields of `update` without writing.
    async fn preload_merge(
        &self,
        id: Uuid,
        update: &UpdateProduct,
    ) -> ProductResult<Option<Product>> {
        let Some(mut product) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        product.apply_update(update);
        Ok(Some(product))
    }

    /// Open a transactional scope. Dropping it without commit discards its writes.
    async fn begin(&self) -> ProductResult<Box<dyn ProductTransaction>>;

    /// Delete a product; its images go with it
    async fn remove(&self, id: Uuid) -> ProductResult<()>;

    /// Delete every product, returning how many were removed
    async fn delete_all(&self) -> ProductResult<u64>;
}

/// Writes performed inside one transaction. `commit` and `rollback` finish
/// the scope; later calls to them are no-ops.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductTransaction: Send {
    async fn delete_images_by_owner(&mut self, product_id: Uuid) -> ProductResult<u64>;

    /// Update the product row and insert its images that have no id yet
    async fn save(&mut self, product: &Product) -> ProductResult<()>;

    async fn commit(&mut self) -> ProductResult<()>;

    async fn rollback(&mut self) -> ProductResult<()>;
}

#[derive(Debug, Clone, PartialEq)]
struct ImageRow {
    id: i32,
    url: String,
    product_id: Uuid,
}

/// Product rows (without images) plus the image table
#[derive(Debug, Default, Clone)]
struct ProductTable {
    products: HashMap<Uuid, Product>,
    images: Vec<ImageRow>,
    next_image_id: i32,
}

impl ProductTable {
    fn with_images(&self, product: &Product) -> Product {
        let mut product = product.clone();
        product.images = self
            .images
            .iter()
            .filter(|row| row.product_id == product.id)
            .map(|row| ProductImage {
                id: Some(row.id),
                url: row.url.clone(),
            })
            .collect();
        product
    }

    fn check_unique(&self, product: &Product) -> ProductResult<()> {
        for other in self.products.values().filter(|other| other.id != product.id) {
            if other.title == product.title {
                return Err(ProductError::Conflict(format!(
                    "Key (title)=({}) already exists.",
                    product.title
                )));
            }
            if other.slug == product.slug {
                return Err(ProductError::Conflict(format!(
                    "Key (slug)=({}) already exists.",
                    product.slug
                )));
            }
        }
        Ok(())
    }

    fn upsert(&mut self, product: &Product) -> ProductResult<()> {
        self.check_unique(product)?;

        for image in product.images.iter().filter(|image| image.id.is_none()) {
            self.next_image_id += 1;
            self.images.push(ImageRow {
                id: self.next_image_id,
                url: image.url.clone(),
                product_id: product.id,
            });
        }

        let mut row = product.clone();
        row.images.clear();
        self.products.insert(row.id, row);
        Ok(())
    }
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    table: Arc<RwLock<ProductTable>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored image rows owned by `product_id`
    pub async fn image_count(&self, product_id: Uuid) -> usize {
        let table = self.table.read().await;
        table
            .images
            .iter()
            .filter(|row| row.product_id == product_id)
            .count()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: Product) -> ProductResult<Product> {
        let mut table = self.table.write().await;
        table.upsert(&product)?;

        tracing::info!(product_id = %product.id, "Created product");
        Ok(table.with_images(&product))
    }

    async fn find_page(&self, limit: u64, offset: u64) -> ProductResult<Vec<Product>> {
        let table = self.table.read().await;

        let mut products: Vec<&Product> = table.products.values().collect();
        products.sort_by(|a, b| a.title.cmp(&b.title));

        Ok(products
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|product| table.with_images(product))
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let table = self.table.read().await;
        Ok(table.products.get(&id).map(|product| table.with_images(product)))
    }

    async fn find_by_title_or_slug(
        &self,
        title: &str,
        slug: &str,
    ) -> ProductResult<Option<Product>> {
        let table = self.table.read().await;
        let title = title.to_uppercase();
        let found = table
            .products
            .values()
            .find(|p| p.slug == slug)
            .or_else(|| table.products.values().find(|p| p.title.to_uppercase() == title));

        Ok(found.map(|product| table.with_images(product)))
    }

    async fn begin(&self) -> ProductResult<Box<dyn ProductTransaction>> {
        let guard = self.table.clone().write_owned().await;
        let working = guard.clone();

        Ok(Box::new(InMemoryProductTransaction {
            guard: Some(guard),
            working,
        }))
    }

    async fn remove(&self, id: Uuid) -> ProductResult<()> {
        let mut table = self.table.write().await;
        table.products.remove(&id);
        table.images.retain(|row| row.product_id != id);
        Ok(())
    }

    async fn delete_all(&self) -> ProductResult<u64> {
        let mut table = self.table.write().await;
        let removed = table.products.len() as u64;
        table.products.clear();
        table.images.clear();
        Ok(removed)
    }
}

/// Holds the table's write lock for its whole lifetime and mutates a copy;
/// the copy replaces the table only on commit.
pub struct InMemoryProductTransaction {
    guard: Option<OwnedRwLockWriteGuard<ProductTable>>,
    working: ProductTable,
}

impl InMemoryProductTransaction {
    fn ensure_open(&self) -> ProductResult<()> {
        match self.guard {
            Some(_) => Ok(()),
            None => Err(ProductError::Internal(
                "transaction already finished".to_string(),
            )),
        }
    }
}

#[async_trait]
impl ProductTransaction for InMemoryProductTransaction {
    async fn delete_images_by_owner(&mut self, product_id: Uuid) -> ProductResult<u64> {
        self.ensure_open()?;
        let before = self.working.images.len();
        self.working.images.retain(|row| row.product_id != product_id);
        Ok((before - self.working.images.len()) as u64)
    }

    async fn save(&mut self, product: &Product) -> ProductResult<()> {
        self.ensure_open()?;
        if !self.working.products.contains_key(&product.id) {
            return Err(ProductError::Database(format!(
                "product {} does not exist",
                product.id
            )));
        }
        self.working.upsert(product)
    }

    async fn commit(&mut self) -> ProductResult<()> {
        if let Some(mut guard) = self.guard.take() {
            *guard = std::mem::take(&mut self.working);
        }
        Ok(())
    }

    async fn rollback(&mut self) -> ProductResult<()> {
        self.guard.take();
        self.working = ProductTable::default();
        Ok(())
    }
}
