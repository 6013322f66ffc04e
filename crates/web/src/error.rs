use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storefront_storage::error::StorageError;
use validator::ValidationErrors;

/// User-facing operation a failure is reported against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ListCategories,
    ListProducts,
    CreateCategory,
    UpdateCategory,
    DeleteCategory,
    FetchCategory,
    CreateProduct,
    UpdateProduct,
    DeleteProduct,
    FetchProduct,
}

impl Action {
    pub fn failure_prefix(&self) -> &'static str {
        match self {
            Self::ListCategories => "Kategori listesi alınamadı",
            Self::ListProducts => "Ürün listesi alınamadı",
            Self::CreateCategory => "Kategori eklenemedi",
            Self::UpdateCategory => "Kategori güncellenemedi",
            Self::DeleteCategory => "Kategori silinemedi",
            Self::FetchCategory => "Kategori getirilemedi",
            Self::CreateProduct => "Ürün eklenemedi",
            Self::UpdateProduct => "Ürün güncellenemedi",
            Self::DeleteProduct => "Ürün silinemedi",
            Self::FetchProduct => "Ürün getirilemedi",
        }
    }
}

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(ValidationErrors),
    Action {
        action: Action,
        source: StorageError,
    },
    BadRequest(String),
    Unauthorized,
    NotFound,
}

impl WebError {
    /// Wraps a storage failure with the operation that hit it, logging the raw error.
    pub fn action(action: Action) -> impl FnOnce(StorageError) -> WebError {
        move |source| {
            tracing::error!("{}: {:?}", action.failure_prefix(), source);
            WebError::Action { action, source }
        }
    }

    /// Text for the alert banner: action prefix plus the raw backend message.
    pub fn alert_message(&self) -> String {
        match self {
            Self::Action { action, source } => format!("{}: {}", action.failure_prefix(), source),
            Self::Validation(errors) => first_validation_message(errors),
            Self::Storage(e) => e.to_string(),
            Self::BadRequest(msg) => msg.clone(),
            Self::Unauthorized => "Yetkisiz erişim".to_string(),
            Self::NotFound => "Kayıt bulunamadı".to_string(),
        }
    }
}

fn first_validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    // `name` is checked before `category_id`, mirroring the form order.
    fields.sort_by_key(|(field, _)| if *field == "name" { 0 } else { 1 });
    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{}: {}", field, e.code))
            })
        })
        .next()
        .unwrap_or_else(|| "Geçersiz form".to_string())
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::Action { action, source } => {
                write!(f, "{}: {}", action.failure_prefix(), source)
            }
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized => write!(f, "Unauthorized"),
            Self::NotFound => write!(f, "Resource not found"),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let source = match &self {
            Self::Storage(e) | Self::Action { source: e, .. } => Some(e),
            _ => None,
        };

        let status_code = match (&self, source) {
            (_, Some(StorageError::NotFound)) => StatusCode::NOT_FOUND,
            (_, Some(e)) if e.is_foreign_key_violation() => StatusCode::CONFLICT,
            (_, Some(_)) => StatusCode::BAD_GATEWAY,
            (Self::Validation(_), _) | (Self::BadRequest(_), _) => StatusCode::BAD_REQUEST,
            (Self::Unauthorized, _) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::NOT_FOUND,
        };

        let body = match &self {
            Self::Validation(errors) => {
                json!({
                    "error": "Validation failed",
                    "details": [first_validation_message(errors)]
                })
            }
            _ => {
                if let Some(e) = source {
                    tracing::error!("Storage error: {:?}", e);
                }
                json!({
                    "error": self.alert_message()
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

pub type WebResult<T> = Result<T, WebError>;
