use axum::{
    Json,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use storefront_storage::{
    models::{Category, Product},
    services::search::SearchQuery,
};
use utoipa::IntoParams;

use crate::error::WebError;
use crate::state::AppState;

use super::modal::ModalOverlay;
use super::render::{render_catalog_page, render_detail, render_tree};
use super::services;
use super::view::{CatalogView, ProductDetail, build_catalog_view};

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CatalogParams {
    /// Search text; empty shows everything.
    pub q: Option<String>,
    /// Product whose detail overlay starts open.
    pub product: Option<i64>,
}

/// Catalog page. Backend failures leave an alert above an empty tree.
pub async fn catalog_page(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> Html<String> {
    let query = SearchQuery::from_optional(params.q.as_deref());
    let mut modal = ModalOverlay::new().with_search(query.raw());

    let (view, alert) = match services::load_catalog(state.store.backend()).await {
        Ok((categories, products)) => {
            if let Some(id) = params.product {
                match products.iter().find(|p| p.id == id) {
                    Some(product) => {
                        let content = render_detail(&ProductDetail::from(product));
                        modal.open(content, product);
                    }
                    None => tracing::warn!("Requested product {} is not in the catalog", id),
                }
            }
            (build_catalog_view(&categories, &products, &query), None)
        }
        Err(e) => (
            build_catalog_view(&[], &[], &query),
            Some(e.alert_message()),
        ),
    };

    Html(render_catalog_page(&view, &modal, alert.as_deref()))
}

/// Tree fragment, re-requested on every keystroke in the search box.
pub async fn catalog_tree(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> Response {
    let query = SearchQuery::from_optional(params.q.as_deref());

    match services::load_catalog(state.store.backend()).await {
        Ok((categories, products)) => {
            let view = build_catalog_view(&categories, &products, &query);
            Html(render_tree(&view).render()).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Overlay root with the product's detail, opened. `q` is the search the
/// close link returns to.
pub async fn product_modal(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<CatalogParams>,
) -> Result<Html<String>, WebError> {
    let product = services::get_product(state.store.backend(), id).await?;

    let query = SearchQuery::from_optional(params.q.as_deref());
    let mut modal = ModalOverlay::new().with_search(query.raw());
    modal.open(render_detail(&ProductDetail::from(&product)), &product);

    Ok(Html(modal.render().render()))
}

#[utoipa::path(
    get,
    path = "/api/catalog",
    params(CatalogParams),
    responses(
        (status = 200, description = "Catalog grouped by category for the given search", body = CatalogView),
        (status = 502, description = "Table service failure")
    ),
    tag = "catalog"
)]
pub async fn get_catalog(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> Result<Response, WebError> {
    let query = SearchQuery::from_optional(params.q.as_deref());
    let (categories, products) = services::load_catalog(state.store.backend()).await?;

    Ok(Json(build_catalog_view(&categories, &products, &query)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "All categories by ascending id", body = Vec<Category>)
    ),
    tag = "catalog"
)]
pub async fn list_categories(State(state): State<AppState>) -> Result<Response, WebError> {
    let categories = services::list_categories(state.store.backend()).await?;

    Ok(Json(categories).into_response())
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "All products by ascending id with category names", body = Vec<Product>)
    ),
    tag = "catalog"
)]
pub async fn list_products(State(state): State<AppState>) -> Result<Response, WebError> {
    let products = services::list_products(state.store.backend()).await?;

    Ok(Json(products).into_response())
}
