use crate::backend::{Filter, Order, SelectQuery, Table, TableBackend};
use crate::dto::category::CategoryPayload;
use crate::error::{Result, StorageError};
use crate::models::Category;

use super::decode_rows;

pub struct CategoryRepository<'a> {
    backend: &'a dyn TableBackend,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(backend: &'a dyn TableBackend) -> Self {
        Self { backend }
    }

    /// List all categories by ascending id
    pub async fn list(&self) -> Result<Vec<Category>> {
        let query = SelectQuery::new(Table::Categories).order(Order::asc("id"));
        let rows = self.backend.select(&query).await?;

        decode_rows(rows)
    }

    /// Find category by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Category> {
        let query = SelectQuery::new(Table::Categories).eq("id", id);
        let rows = self.backend.select(&query).await?;

        decode_rows(rows)?
            .into_iter()
            .next()
            .ok_or(StorageError::NotFound)
    }

    pub async fn create(&self, payload: &CategoryPayload) -> Result<()> {
        let record = serde_json::to_value(payload)?;
        self.backend.insert(Table::Categories, &record).await
    }

    pub async fn update(&self, id: i64, payload: &CategoryPayload) -> Result<()> {
        let patch = serde_json::to_value(payload)?;
        self.backend
            .update(Table::Categories, &patch, &Filter::id(id))
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.backend.delete(Table::Categories, &Filter::id(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::MemoryBackend;

    #[tokio::test]
    async fn test_crud_cycle() {
        let backend = MemoryBackend::new();
        let repo = CategoryRepository::new(&backend);

        repo.create(&CategoryPayload {
            name: "Çorbalar".to_string(),
        })
        .await
        .unwrap();
        repo.create(&CategoryPayload {
            name: "Tatlılar".to_string(),
        })
        .await
        .unwrap();

        let categories = repo.list().await.unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, "Çorbalar");

        repo.update(
            categories[1].id,
            &CategoryPayload {
                name: "Sütlü Tatlılar".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(
            repo.find_by_id(categories[1].id).await.unwrap().name,
            "Sütlü Tatlılar"
        );

        repo.delete(categories[0].id).await.unwrap();
        assert!(matches!(
            repo.find_by_id(categories[0].id).await,
            Err(StorageError::NotFound)
        ));
    }
}
