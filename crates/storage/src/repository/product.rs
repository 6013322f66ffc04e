use crate::backend::{Filter, Order, SelectQuery, Table, TableBackend};
use crate::dto::product::ProductPayload;
use crate::error::{Result, StorageError};
use crate::models::Product;

use super::decode_rows;

/// Columns for list views, with the category name joined in.
const LIST_COLUMNS: &str = "id,name,subtitle,price,description,image_url,category_id,categories(name)";

pub struct ProductRepository<'a> {
    backend: &'a dyn TableBackend,
}

impl<'a> ProductRepository<'a> {
    pub fn new(backend: &'a dyn TableBackend) -> Self {
        Self { backend }
    }

    /// List all products by ascending id, each with its category name when it has one
    pub async fn list(&self) -> Result<Vec<Product>> {
        let query = SelectQuery::new(Table::Products)
            .columns(LIST_COLUMNS)
            .order(Order::asc("id"));
        let rows = self.backend.select(&query).await?;

        decode_rows(rows)
    }

    /// Find product by ID, without the join
    pub async fn find_by_id(&self, id: i64) -> Result<Product> {
        let query = SelectQuery::new(Table::Products).eq("id", id);
        let rows = self.backend.select(&query).await?;

        decode_rows(rows)?
            .into_iter()
            .next()
            .ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, payload: &ProductPayload) -> Result<()> {
        let record = serde_json::to_value(payload)?;
        self.backend.insert(Table::Products, &record).await
    }

    pub async fn update(&self, id: i64, payload: &ProductPayload) -> Result<()> {
        let patch = serde_json::to_value(payload)?;
        self.backend
            .update(Table::Products, &patch, &Filter::id(id))
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.backend.delete(Table::Products, &Filter::id(id)).await
    }
}
