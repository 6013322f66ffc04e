use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::session::LOGIN_PATH;
use crate::state::AppState;

use super::handlers::{login, login_form, logout};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(LOGIN_PATH, get(login_form).post(login))
        .route("/logout", post(logout))
}
