use storefront_storage::{
    backend::TableBackend,
    models::{Category, Product},
    repository::{category::CategoryRepository, product::ProductRepository},
};

use crate::error::{Action, WebError, WebResult};

pub async fn list_categories(backend: &dyn TableBackend) -> WebResult<Vec<Category>> {
    CategoryRepository::new(backend)
        .list()
        .await
        .map_err(WebError::action(Action::ListCategories))
}

pub async fn list_products(backend: &dyn TableBackend) -> WebResult<Vec<Product>> {
    ProductRepository::new(backend)
        .list()
        .await
        .map_err(WebError::action(Action::ListProducts))
}

/// Categories then products, both by ascending id.
pub async fn load_catalog(backend: &dyn TableBackend) -> WebResult<(Vec<Category>, Vec<Product>)> {
    let categories = list_categories(backend).await?;
    let products = list_products(backend).await?;

    tracing::debug!(
        "Loaded catalog: {} categories, {} products",
        categories.len(),
        products.len()
    );

    Ok((categories, products))
}

pub async fn get_product(backend: &dyn TableBackend, id: i64) -> WebResult<Product> {
    ProductRepository::new(backend)
        .find_by_id(id)
        .await
        .map_err(WebError::action(Action::FetchProduct))
}
