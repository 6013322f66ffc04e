use axum::{
    Form,
    extract::{Multipart, Path, Query, State, multipart::MultipartError},
    response::Html,
};
use serde::Deserialize;
use storefront_storage::dto::{category::CategoryForm, product::ProductForm};

use crate::error::{WebError, WebResult};
use crate::state::AppState;

use super::image::{ImageUpload, to_data_url};
use super::render::{AdminPage, AdminTab, render_admin_page};
use super::services::{AdminController, Confirmation, DeleteOutcome, Refreshed};
use super::session::AdminSession;

#[derive(Debug, Default, Deserialize)]
pub struct AdminParams {
    pub tab: Option<String>,
    pub edit_category: Option<i64>,
    pub edit_product: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CategorySubmission {
    #[serde(default)]
    pub editing_id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteSubmission {
    pub confirmed: Option<String>,
}

/// Renders the page after an operation. Failures become the alert banner and
/// the lists are re-fetched either way.
async fn respond(
    controller: &AdminController<'_>,
    mut admin: AdminPage,
    outcome: WebResult<Option<Refreshed>>,
) -> Html<String> {
    let lists = match outcome {
        Ok(Some(refreshed)) => refreshed,
        Ok(None) => controller.refresh().await,
        Err(e) => {
            admin.alert = Some(e.alert_message());
            controller.refresh().await
        }
    };

    match lists {
        Ok(lists) => admin.lists = lists,
        Err(e) => {
            admin.alert.get_or_insert_with(|| e.alert_message());
        }
    }

    admin.session = controller.session();
    Html(render_admin_page(&admin))
}

fn deleted_lists(outcome: DeleteOutcome) -> Option<Refreshed> {
    match outcome {
        DeleteOutcome::Deleted(lists) => Some(lists),
        DeleteOutcome::Cancelled => None,
    }
}

pub async fn admin_page(
    State(state): State<AppState>,
    Query(params): Query<AdminParams>,
) -> Html<String> {
    let mut controller = AdminController::new(state.store.backend(), AdminSession::new());
    let mut admin = AdminPage {
        tab: AdminTab::from_query(params.tab.as_deref()),
        ..Default::default()
    };
    let mut outcome = Ok(None);

    if let Some(id) = params.edit_category {
        match controller.edit_category(id).await {
            Ok(form) => admin.category_form = form,
            Err(e) => outcome = Err(e),
        }
    }
    if let Some(id) = params.edit_product {
        match controller.edit_product(id).await {
            Ok(form) => admin.product_form = form,
            Err(e) => outcome = Err(e),
        }
    }

    respond(&controller, admin, outcome).await
}

pub async fn save_category(
    State(state): State<AppState>,
    Form(submission): Form<CategorySubmission>,
) -> Html<String> {
    let session = AdminSession::from_hidden_fields(Some(submission.editing_id.as_str()), None);
    let mut controller = AdminController::new(state.store.backend(), session);
    let form = CategoryForm {
        name: submission.name,
    };
    let mut admin = AdminPage {
        tab: AdminTab::Categories,
        ..Default::default()
    };

    let outcome = controller.save_category(&form).await.map(Some);
    if outcome.is_err() {
        admin.category_form = form;
    }

    respond(&controller, admin, outcome).await
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(submission): Form<DeleteSubmission>,
) -> Html<String> {
    let mut controller = AdminController::new(state.store.backend(), AdminSession::new());
    let admin = AdminPage {
        tab: AdminTab::Categories,
        ..Default::default()
    };

    let outcome = controller
        .delete_category(id, Confirmation::from_flag(submission.confirmed.as_deref()))
        .await
        .map(deleted_lists);

    respond(&controller, admin, outcome).await
}

pub async fn save_product(State(state): State<AppState>, multipart: Multipart) -> Html<String> {
    let mut admin = AdminPage {
        tab: AdminTab::Products,
        ..Default::default()
    };

    let (session, form) = match read_product_submission(multipart).await {
        Ok(submission) => submission,
        Err(e) => {
            let controller = AdminController::new(state.store.backend(), AdminSession::new());
            return respond(&controller, admin, Err(e)).await;
        }
    };

    let mut controller = AdminController::new(state.store.backend(), session);
    let outcome = controller.save_product(&form).await.map(Some);
    if outcome.is_err() {
        admin.product_form = form;
    }

    respond(&controller, admin, outcome).await
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(submission): Form<DeleteSubmission>,
) -> Html<String> {
    let mut controller = AdminController::new(state.store.backend(), AdminSession::new());
    let admin = AdminPage {
        tab: AdminTab::Products,
        ..Default::default()
    };

    let outcome = controller
        .delete_product(id, Confirmation::from_flag(submission.confirmed.as_deref()))
        .await
        .map(deleted_lists);

    respond(&controller, admin, outcome).await
}

fn bad_multipart(error: MultipartError) -> WebError {
    tracing::warn!("Unreadable product form: {}", error);
    WebError::BadRequest(format!("Form okunamadı: {}", error))
}

/// Reads the product form. A chosen image file replaces the typed image URL.
async fn read_product_submission(
    mut multipart: Multipart,
) -> WebResult<(AdminSession, ProductForm)> {
    let mut editing_id = String::new();
    let mut form = ProductForm::default();
    let mut upload = ImageUpload::default();

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();

        if name == "image_file" {
            upload.file_name = field.file_name().map(String::from);
            upload.content_type = field.content_type().map(String::from);
            upload.bytes = field.bytes().await.map_err(bad_multipart)?.to_vec();
            continue;
        }

        let value = field.text().await.map_err(bad_multipart)?;
        match name.as_str() {
            "editing_id" => editing_id = value,
            "name" => form.name = value,
            "subtitle" => form.subtitle = value,
            "price" => form.price = value,
            "category_id" => form.category_id = value,
            "description" => form.description = value,
            "image_url" => form.image_url = value,
            other => tracing::debug!("Ignoring product form field {:?}", other),
        }
    }

    if let Some(data_url) = to_data_url(&upload) {
        tracing::debug!(
            "Embedding {:?} ({} bytes) as image",
            upload.file_name,
            upload.bytes.len()
        );
        form.image_url = data_url;
    }

    Ok((AdminSession::from_hidden_fields(None, Some(editing_id.as_str())), form))
}
