use axum::Router;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod error;
pub mod features;
pub mod html;
pub mod middleware;
pub mod state;

use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::catalog::handlers::get_catalog,
        features::catalog::handlers::list_categories,
        features::catalog::handlers::list_products,
    ),
    components(
        schemas(
            storefront_storage::models::Category,
            storefront_storage::models::CategoryName,
            storefront_storage::models::Product,
            features::catalog::view::CatalogView,
            features::catalog::view::CategorySection,
            features::catalog::view::Indicator,
            features::catalog::view::ProductCard,
            features::catalog::view::ProductDetail,
        )
    ),
    tags(
        (name = "catalog", description = "Public read-only catalog endpoints"),
    )
)]
pub struct ApiDoc;

/// Every page, fragment and API route, with CORS and the Swagger UI.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(features::catalog::routes::routes())
        .merge(features::login::routes::routes())
        .merge(features::admin::routes::routes())
        .nest("/api", features::catalog::routes::api_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
