use axum::{
    Form,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::html::{el, page};
use crate::middleware::session::{LOGIN_PATH, cleared_session_cookie, session_cookie};
use crate::state::AppState;

pub const ADMIN_PATH: &str = "/admin";

#[derive(Debug, Default, Deserialize)]
pub struct LoginSubmission {
    #[serde(default)]
    pub passphrase: String,
}

fn render_login(alert: Option<&str>) -> String {
    let mut form = el("form")
        .attr("method", "post")
        .attr("action", LOGIN_PATH)
        .style("max-width:360px;margin:80px auto;background:#fff;padding:24px;border-radius:12px")
        .child(el("h1").style("font-size:20px").text("Yönetici Girişi"));

    if let Some(message) = alert {
        form = form.child(el("div").class("alert").attr("role", "alert").text(message));
    }

    let form = form
        .child(
            el("input")
                .attr("type", "password")
                .attr("name", "passphrase")
                .attr("placeholder", "Parola")
                .attr("autocomplete", "current-password")
                .style("display:block;width:100%;padding:8px;margin:12px 0"),
        )
        .child(el("button").class("btn").attr("type", "submit").text("Giriş"));

    page("Giriş", vec![form.into()])
}

pub async fn login_form() -> Html<String> {
    Html(render_login(None))
}

pub async fn login(
    State(state): State<AppState>,
    Form(submission): Form<LoginSubmission>,
) -> Response {
    if !state.passphrases.is_valid(submission.passphrase.trim()) {
        tracing::warn!("Rejected admin login attempt");
        return (
            StatusCode::UNAUTHORIZED,
            Html(render_login(Some("Parola hatalı"))),
        )
            .into_response();
    }

    tracing::info!("Admin session started");
    (
        [(header::SET_COOKIE, session_cookie())],
        Redirect::to(ADMIN_PATH),
    )
        .into_response()
}

pub async fn logout() -> Response {
    (
        [(header::SET_COOKIE, cleared_session_cookie())],
        Redirect::to(LOGIN_PATH),
    )
        .into_response()
}
