//! Soft admin gate.
//!
//! The gate is a session cookie `auth=1` and nothing more; anyone can set it.
//! It keeps casual visitors out of the admin panel and is not an
//! authorization boundary.

use axum::{
    extract::Request,
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::collections::HashSet;
use std::sync::Arc;

pub const SESSION_COOKIE: &str = "auth";
pub const LOGIN_PATH: &str = "/login";

pub async fn require_session(req: Request, next: Next) -> Response {
    if has_session_flag(req.headers()) {
        next.run(req).await
    } else {
        tracing::debug!("No session flag on {}, redirecting to login", req.uri().path());
        Redirect::to(LOGIN_PATH).into_response()
    }
}

pub fn has_session_flag(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .any(|(name, value)| name == SESSION_COOKIE && value == "1")
}

/// `Set-Cookie` value that raises the flag for the browser session.
pub fn session_cookie() -> String {
    format!("{}=1; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE)
}

/// `Set-Cookie` value that clears the flag.
pub fn cleared_session_cookie() -> String {
    format!("{}=; Path=/; Max-Age=0; SameSite=Lax", SESSION_COOKIE)
}

/// Passphrases accepted by the login form. An empty set accepts anything.
#[derive(Clone, Default)]
pub struct AdminPassphrases {
    keys: Arc<HashSet<String>>,
}

impl AdminPassphrases {
    pub fn from_comma_separated(keys_str: &str) -> Self {
        let keys = keys_str
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Self {
            keys: Arc::new(keys),
        }
    }

    pub fn is_open(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn is_valid(&self, key: &str) -> bool {
        self.is_open() || self.keys.contains(key)
    }
}
