use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, EntityTrait, LoaderTrait, ModelTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    entity::{product, product_image},
    error::{ProductError, ProductResult},
    models::Product,
    repository::{ProductRepository, ProductTransaction},
};

#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn with_images(&self, model: product::Model) -> ProductResult<Product> {
        let images = model
            .find_related(product_image::Entity)
            .order_by_asc(product_image::Column::Id)
            .all(&self.db)
            .await?;
        Ok(model.into_product(images))
    }
}

/// Inserts the images of `product` that were never persisted.
async fn insert_new_images<C: ConnectionTrait>(db: &C, product: &Product) -> ProductResult<()> {
    let rows: Vec<product_image::ActiveModel> = product
        .images
        .iter()
        .filter(|image| image.id.is_none())
        .map(|image| product_image::new_row(product.id, &image.url))
        .collect();

    if rows.is_empty() {
        return Ok(());
    }

    product_image::Entity::insert_many(rows).exec(db).await?;
    Ok(())
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, product: Product) -> ProductResult<Product> {
        let txn = self.db.begin().await?;
        product::ActiveModel::from(&product).insert(&txn).await?;
        insert_new_images(&txn, &product).await?;
        txn.commit().await?;

        tracing::info!(product_id = %product.id, "Created product");

        self.find_by_id(product.id)
            .await?
            .ok_or_else(|| ProductError::Internal(format!("product {} vanished", product.id)))
    }

    async fn find_page(&self, limit: u64, offset: u64) -> ProductResult<Vec<Product>> {
        let models = product::Entity::find()
            .order_by_asc(product::Column::Title)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await?;

        let images = models
            .load_many(
                product_image::Entity::find().order_by_asc(product_image::Column::Id),
                &self.db,
            )
            .await?;

        Ok(models
            .into_iter()
            .zip(images)
            .map(|(model, images)| model.into_product(images))
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        match product::Entity::find_by_id(id).one(&self.db).await? {
            Some(model) => Ok(Some(self.with_images(model).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_title_or_slug(
        &self,
        title: &str,
        slug: &str,
    ) -> ProductResult<Option<Product>> {
        let model = product::Entity::find()
            .filter(
                Condition::any()
                    .add(Expr::cust_with_values("UPPER(title) = UPPER(?)", [title]))
                    .add(product::Column::Slug.eq(slug)),
            )
            .order_by_desc(Expr::cust_with_values("slug = ?", [slug]))
            .one(&self.db)
            .await?;

        match model {
            Some(model) => Ok(Some(self.with_images(model).await?)),
            None => Ok(None),
        }
    }

    async fn begin(&self) -> ProductResult<Box<dyn ProductTransaction>> {
        let txn = self.db.begin().await?;
        Ok(Box::new(PgProductTransaction { txn: Some(txn) }))
    }

    async fn remove(&self, id: Uuid) -> ProductResult<()> {
        product::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    async fn delete_all(&self) -> ProductResult<u64> {
        let result = product::Entity::delete_many().exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}

/// A live database transaction. Dropping it while still open rolls it back.
pub struct PgProductTransaction {
    txn: Option<DatabaseTransaction>,
}

impl PgProductTransaction {
    fn open(&self) -> ProductResult<&DatabaseTransaction> {
        self.txn
            .as_ref()
            .ok_or_else(|| ProductError::Internal("transaction already finished".to_string()))
    }
}

#[async_trait]
impl ProductTransaction for PgProductTransaction {
    async fn delete_images_by_owner(&mut self, product_id: Uuid) -> ProductResult<u64> {
        let result = product_image::Entity::delete_many()
            .filter(product_image::Column::ProductId.eq(product_id))
            .exec(self.open()?)
            .await?;
        Ok(result.rows_affected)
    }

    async fn save(&mut self, product: &Product) -> ProductResult<()> {
        let txn = self.open()?;
        product::ActiveModel::from(product).update(txn).await?;
        insert_new_images(txn, product).await
    }

    async fn commit(&mut self) -> ProductResult<()> {
        if let Some(txn) = self.txn.take() {
            txn.commit().await?;
        }
        Ok(())
    }

    async fn rollback(&mut self) -> ProductResult<()> {
        if let Some(txn) = self.txn.take() {
            txn.rollback().await?;
        }
        Ok(())
    }
}
