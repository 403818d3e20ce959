use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, PaginationQuery, Product, ProductResponse, UpdateProduct};
use crate::repository::{ProductRepository, ProductTransaction};
use crate::seed;

/// Service layer for Product business logic
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<ProductResponse> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let product = self
            .repository
            .create(Product::new(input))
            .await
            .map_err(handle_db_error)?;

        Ok(product.into())
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, page: PaginationQuery) -> ProductResult<Vec<ProductResponse>> {
        page.validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let products = self
            .repository
            .find_page(page.limit, page.offset)
            .await
            .map_err(handle_db_error)?;

        Ok(products.into_iter().map(ProductResponse::from).collect())
    }

    /// Look up by id when `term` is a hyphenated UUID, otherwise by title
    /// (case-insensitive) or slug (exact).
    #[instrument(skip(self))]
    pub async fn find_one(&self, term: &str) -> ProductResult<Product> {
        let found = match parse_hyphenated_uuid(term) {
            Some(id) => self.repository.find_by_id(id).await,
            None => self.repository.find_by_title_or_slug(term, term).await,
        }
        .map_err(handle_db_error)?;

        found.ok_or_else(|| ProductError::NotFound(format!("Product with term '{term}' not found")))
    }

    pub async fn find_one_plain(&self, term: &str) -> ProductResult<ProductResponse> {
        self.find_one(term).await.map(ProductResponse::from)
    }

    /// Merge `input` onto the stored product and persist it in one transaction.
    /// A present `images` list replaces every stored image of the product.
    #[instrument(skip(self, input))]
    pub async fn update_product(
        &self,
        id: Uuid,
        input: UpdateProduct,
    ) -> ProductResult<ProductResponse> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let mut product = self
            .repository
            .preload_merge(id, &input)
            .await
            .map_err(handle_db_error)?
            .ok_or_else(|| ProductError::NotFound("Product not found".to_string()))?;

        let mut tx = self.repository.begin().await.map_err(handle_db_error)?;

        if let Err(err) = write_update(tx.as_mut(), &mut product, input.images.as_deref()).await {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(product_id = %id, error = %rollback_err, "Rollback failed");
            }
            return Err(handle_db_error(err));
        }
        drop(tx);

        tracing::info!(product_id = %id, "Updated product");
        self.find_one_plain(&id.to_string()).await
    }

    #[instrument(skip(self))]
    pub async fn remove_product(&self, id: Uuid) -> ProductResult<()> {
        let product = self.find_one(&id.to_string()).await?;
        self.repository
            .remove(product.id)
            .await
            .map_err(handle_db_error)?;

        tracing::info!(product_id = %id, "Removed product");
        Ok(())
    }

    pub async fn delete_all_products(&self) -> ProductResult<u64> {
        self.repository.delete_all().await.map_err(handle_db_error)
    }

    /// Wipe the catalog and reload the demo products. Returns how many were inserted.
    #[instrument(skip(self))]
    pub async fn seed_catalog(&self) -> ProductResult<usize> {
        let removed = self.delete_all_products().await?;
        tracing::info!(removed, "Cleared catalog before seeding");

        let mut inserted = 0;
        for input in seed::catalog() {
            self.create_product(input).await?;
            inserted += 1;
        }
        Ok(inserted)
    }
}

async fn write_update(
    tx: &mut dyn ProductTransaction,
    product: &mut Product,
    images: Option<&[String]>,
) -> ProductResult<()> {
    if let Some(urls) = images {
        tx.delete_images_by_owner(product.id).await?;
        product.attach_images(urls);
    }
    tx.save(product).await?;
    tx.commit().await
}

/// Logs store failures and hides their detail from callers.
/// Only the canonical `8-4-4-4-12` form counts as an id; simple, braced and
/// URN spellings are treated as titles or slugs.
fn parse_hyphenated_uuid(term: &str) -> Option<Uuid> {
    let id = Uuid::parse_str(term).ok()?;
    (term.len() == 36).then_some(id)
}

fn handle_db_error(err: ProductError) -> ProductError {
    match err {
        ProductError::Database(detail) => {
            tracing::error!(error = %detail, "Product store failure");
            ProductError::Internal(detail)
        }
        other => other,
    }
}
