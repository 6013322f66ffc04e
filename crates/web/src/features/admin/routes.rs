use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};

use crate::middleware::session::require_session;
use crate::state::AppState;

use super::handlers::{
    admin_page, delete_category, delete_product, save_category, save_product,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin_page))
        .route("/admin/categories", post(save_category))
        .route("/admin/categories/:id/delete", post(delete_category))
        .route(
            "/admin/products",
            post(save_product).layer(DefaultBodyLimit::disable()),
        )
        .route("/admin/products/:id/delete", post(delete_product))
        .route_layer(middleware::from_fn(require_session))
}
