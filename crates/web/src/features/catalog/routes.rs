use axum::{Router, routing::get};

use crate::state::AppState;

use super::handlers::{
    catalog_page, catalog_tree, get_catalog, list_categories, list_products, product_modal,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog_page))
        .route("/catalog/tree", get(catalog_tree))
        .route("/catalog/products/:id", get(product_modal))
}

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/catalog", get(get_catalog))
        .route("/categories", get(list_categories))
        .route("/products", get(list_products))
}
