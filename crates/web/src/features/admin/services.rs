use storefront_storage::{
    backend::TableBackend,
    dto::{category::CategoryForm, product::ProductForm},
    models::{Category, Product},
    repository::{category::CategoryRepository, product::ProductRepository},
};

use crate::error::{Action, WebError, WebResult};
use crate::features::catalog::services::{list_categories, list_products};

use super::session::{AdminSession, SaveMode};

/// Both admin tables, as last fetched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminLists {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
}

/// Lists re-fetched after a write that went through. The re-fetch can fail on
/// its own without undoing the write.
pub type Refreshed = WebResult<AdminLists>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl Confirmation {
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag.map(str::trim) {
            Some("true" | "1" | "on" | "yes") => Self::Confirmed,
            _ => Self::Declined,
        }
    }
}

#[derive(Debug)]
pub enum DeleteOutcome {
    Deleted(Refreshed),
    /// Nothing was sent to the backend.
    Cancelled,
}

/// Admin operations for one request.
///
/// Every successful write re-fetches both lists. A failed write keeps the
/// editing id so the same form can be submitted again; once the write went
/// through the id is cleared, even when the re-fetch then fails.
pub struct AdminController<'a> {
    backend: &'a dyn TableBackend,
    session: AdminSession,
}

impl<'a> AdminController<'a> {
    pub fn new(backend: &'a dyn TableBackend, session: AdminSession) -> Self {
        Self { backend, session }
    }

    pub fn session(&self) -> AdminSession {
        self.session
    }

    pub async fn refresh(&self) -> WebResult<AdminLists> {
        Ok(AdminLists {
            categories: list_categories(self.backend).await?,
            products: list_products(self.backend).await?,
        })
    }

    pub async fn save_category(&mut self, form: &CategoryForm) -> WebResult<Refreshed> {
        let payload = form.to_payload()?;
        let repository = CategoryRepository::new(self.backend);

        match self.session.category_mode() {
            SaveMode::Update(id) => {
                repository
                    .update(id, &payload)
                    .await
                    .map_err(WebError::action(Action::UpdateCategory))?;
                tracing::info!("Updated category {}", id);
            }
            SaveMode::Create => {
                repository
                    .create(&payload)
                    .await
                    .map_err(WebError::action(Action::CreateCategory))?;
                tracing::info!("Created category {:?}", payload.name);
            }
        }

        self.session.finish_category_edit();
        Ok(self.refresh().await)
    }

    pub async fn edit_category(&mut self, id: i64) -> WebResult<CategoryForm> {
        let category = CategoryRepository::new(self.backend)
            .find_by_id(id)
            .await
            .map_err(WebError::action(Action::FetchCategory))?;

        self.session.begin_category_edit(id);
        Ok(CategoryForm::from(&category))
    }

    /// Fails while products still reference the category.
    pub async fn delete_category(
        &mut self,
        id: i64,
        confirmation: Confirmation,
    ) -> WebResult<DeleteOutcome> {
        if confirmation == Confirmation::Declined {
            return Ok(DeleteOutcome::Cancelled);
        }

        CategoryRepository::new(self.backend)
            .delete(id)
            .await
            .map_err(WebError::action(Action::DeleteCategory))?;
        tracing::info!("Deleted category {}", id);

        Ok(DeleteOutcome::Deleted(self.refresh().await))
    }

    pub async fn save_product(&mut self, form: &ProductForm) -> WebResult<Refreshed> {
        let payload = form.to_payload()?;
        let repository = ProductRepository::new(self.backend);

        match self.session.product_mode() {
            SaveMode::Update(id) => {
                repository
                    .update(id, &payload)
                    .await
                    .map_err(WebError::action(Action::UpdateProduct))?;
                tracing::info!("Updated product {}", id);
            }
            SaveMode::Create => {
                repository
                    .create(&payload)
                    .await
                    .map_err(WebError::action(Action::CreateProduct))?;
                tracing::info!("Created product {:?}", payload.name);
            }
        }

        self.session.finish_product_edit();
        Ok(self.refresh().await)
    }

    pub async fn edit_product(&mut self, id: i64) -> WebResult<ProductForm> {
        let product = ProductRepository::new(self.backend)
            .find_by_id(id)
            .await
            .map_err(WebError::action(Action::FetchProduct))?;

        self.session.begin_product_edit(id);
        Ok(ProductForm::from(&product))
    }

    pub async fn delete_product(
        &mut self,
        id: i64,
        confirmation: Confirmation,
    ) -> WebResult<DeleteOutcome> {
        if confirmation == Confirmation::Declined {
            return Ok(DeleteOutcome::Cancelled);
        }

        ProductRepository::new(self.backend)
            .delete(id)
            .await
            .map_err(WebError::action(Action::DeleteProduct))?;
        tracing::info!("Deleted product {}", id);

        Ok(DeleteOutcome::Deleted(self.refresh().await))
    }
}
