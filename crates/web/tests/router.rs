use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use serde_json::{Value, json};
use storefront_storage::{
    DataStore,
    backend::{Table, memory::MemoryBackend},
};
use storefront_web::{app, middleware::session::AdminPassphrases, state::AppState};
use tower::ServiceExt;

fn seeded() -> Arc<MemoryBackend> {
    let backend = Arc::new(MemoryBackend::new());
    backend.seed(Table::Categories, json!({"id": 1, "name": "Tatlılar"}));
    backend.seed(Table::Categories, json!({"id": 2, "name": "Çorbalar"}));
    backend.seed(
        Table::Products,
        json!({"id": 10, "name": "Künefe", "subtitle": "Peynirli", "price": 95.5, "category_id": 1}),
    );
    backend
}

fn test_app(backend: Arc<MemoryBackend>, passphrases: &str) -> Router {
    let store = DataStore::from_backend(backend);
    app(AppState::new(
        store,
        AdminPassphrases::from_comma_separated(passphrases),
    ))
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn admin_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::COOKIE, "auth=1")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_catalog_page_renders_tree() {
    let app = test_app(seeded(), "");

    let response = app.oneshot(get("/?q=kunefe")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Künefe"));
    assert!(html.contains("₺95,50"));
    assert!(html.contains("value=\"kunefe\""));
}

#[tokio::test]
async fn test_catalog_page_shows_alert_on_backend_failure() {
    let backend = seeded();
    backend.fail_next("connection refused");
    let app = test_app(backend, "");

    let html = body_text(app.oneshot(get("/")).await.unwrap()).await;
    assert!(html.contains("Kategori listesi alınamadı: connection refused"));
}

#[tokio::test]
async fn test_tree_fragment_filters() {
    let app = test_app(seeded(), "");

    let html = body_text(app.oneshot(get("/catalog/tree?q=corba")).await.unwrap()).await;
    assert!(html.starts_with("<div id=\"dynamic-content\">"));
    assert!(!html.contains("Künefe"));
    assert!(html.contains("Ürün yok"));
}

#[tokio::test]
async fn test_product_modal_fragment() {
    let app = test_app(seeded(), "");

    let response = app.clone().oneshot(get("/catalog/products/10")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("product-modal-root"));
    assert!(html.contains("Peynirli"));

    let response = app.oneshot(get("/catalog/products/99")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_api_catalog_json() {
    let app = test_app(seeded(), "");

    let response = app.oneshot(get("/api/catalog?q=kun")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["sections"][0]["expanded"], true);
    assert_eq!(json["sections"][0]["products"][0]["price_label"], "₺95,50");
    assert_eq!(json["sections"][1]["indicator"], "empty");
}

#[tokio::test]
async fn test_admin_requires_session() {
    let app = test_app(seeded(), "");

    let response = app.oneshot(get("/admin")).await.unwrap();
    assert!(response.status().is_redirection());
    assert_eq!(response.headers()[header::LOCATION], "/login");
}

#[tokio::test]
async fn test_login_checks_passphrase() {
    let app = test_app(seeded(), "kasa");

    let request = |body: &str| {
        Request::builder()
            .method("POST")
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    };

    let response = app.clone().oneshot(request("passphrase=yanlis")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.oneshot(request("passphrase=kasa")).await.unwrap();
    assert_eq!(response.headers()[header::LOCATION], "/admin");
    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("auth=1"));
}

#[tokio::test]
async fn test_admin_category_flow() {
    let backend = seeded();
    let app = test_app(Arc::clone(&backend), "");

    let html = body_text(
        app.clone()
            .oneshot(admin_form("/admin/categories", "editing_id=&name=+%C4%B0%C3%A7ecekler+"))
            .await
            .unwrap(),
    )
    .await;
    assert!(html.contains("<td>İçecekler</td>"));
    assert_eq!(backend.row_count(Table::Categories), 3);

    let html = body_text(
        app.clone()
            .oneshot(admin_form("/admin/categories/1/delete", "confirmed=true"))
            .await
            .unwrap(),
    )
    .await;
    assert!(html.contains("Kategori silinemedi: "));
    assert_eq!(backend.row_count(Table::Categories), 3);

    let html = body_text(
        app.oneshot(admin_form("/admin/categories/2/delete", ""))
            .await
            .unwrap(),
    )
    .await;
    assert!(!html.contains("role=\"alert\""));
    assert_eq!(backend.row_count(Table::Categories), 3);
}

#[tokio::test]
async fn test_admin_product_upload_embeds_image() {
    let backend = seeded();
    let app = test_app(Arc::clone(&backend), "");

    let boundary = "XBOUNDARY";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"editing_id\"\r\n\r\n\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\nSütlaç\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"price\"\r\n\r\n40.5\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"category_id\"\r\n\r\n1\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"image_url\"\r\n\r\nhttps://x/typed.png\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"image_file\"; filename=\"s.png\"\r\nContent-Type: image/png\r\n\r\nPNG\r\n\
         --{b}--\r\n",
        b = boundary
    );
    let request = Request::builder()
        .method("POST")
        .uri("/admin/products")
        .header(header::COOKIE, "auth=1")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap();

    let html = body_text(app.clone().oneshot(request).await.unwrap()).await;
    assert!(html.contains("<td>Sütlaç</td>"));
    assert!(html.contains("<td>₺40,50</td>"));

    let json: Value =
        serde_json::from_str(&body_text(app.oneshot(get("/api/products")).await.unwrap()).await)
            .unwrap();
    let created = json
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["name"] == "Sütlaç")
        .unwrap();
    assert_eq!(created["image_url"], "data:image/png;base64,UE5H");
    assert_eq!(created["categories"]["name"], "Tatlılar");
}

#[tokio::test]
async fn test_admin_edit_populates_form() {
    let app = test_app(seeded(), "");
    let request = Request::builder()
        .uri("/admin?tab=products&edit_product=10")
        .header(header::COOKIE, "auth=1")
        .body(Body::empty())
        .unwrap();

    let html = body_text(app.oneshot(request).await.unwrap()).await;
    assert!(html.contains("name=\"editing_id\" value=\"10\""));
    assert!(html.contains("name=\"price\" value=\"95.5\""));
    assert!(html.contains("<option value=\"1\" selected=\"selected\">Tatlılar</option>"));
}

#[tokio::test]
async fn test_update_is_not_replayed_when_refetch_fails() {
    let backend = seeded();
    backend.fail_selects(Some("timeout".to_string()));
    let app = test_app(Arc::clone(&backend), "");

    let html = body_text(
        app.oneshot(admin_form("/admin/categories", "editing_id=1&name=Yeni"))
            .await
            .unwrap(),
    )
    .await;
    assert!(html.contains("Kategori listesi alınamadı: timeout"));
    assert!(!html.contains("name=\"editing_id\" value=\"1\""));
    assert!(!html.contains("value=\"Yeni\""));

    backend.fail_selects(None);
    assert_eq!(backend.row_count(Table::Categories), 2);

    let app = test_app(Arc::clone(&backend), "");
    let json: Value = serde_json::from_str(
        &body_text(app.oneshot(get("/api/categories")).await.unwrap()).await,
    )
    .unwrap();
    assert_eq!(json[0]["name"], "Yeni");
}

#[tokio::test]
async fn test_modal_close_link_returns_to_search() {
    let app = test_app(seeded(), "");

    let html = body_text(app.clone().oneshot(get("/?q=k%C3%BCn&product=10")).await.unwrap()).await;
    assert!(html.contains("href=\"/?q=k%C3%BCn\" data-modal-close"));

    let html = body_text(
        app.clone()
            .oneshot(get("/catalog/products/10?q=%C3%A7ay+su"))
            .await
            .unwrap(),
    )
    .await;
    assert!(html.contains("href=\"/?q=%C3%A7ay+su\""));

    let html = body_text(app.oneshot(get("/catalog/products/10")).await.unwrap()).await;
    assert!(html.contains("href=\"/\" data-modal-close"));
}

#[tokio::test]
async fn test_catalog_page_has_empty_alert_slot() {
    let app = test_app(seeded(), "");

    let html = body_text(app.oneshot(get("/")).await.unwrap()).await;
    assert!(html.contains("id=\"catalog-alert\""));
    assert!(html.contains("hidden=\"\"></div>"));
}

#[tokio::test]
async fn test_admin_opens_on_products_tab() {
    let app = test_app(seeded(), "");
    let request = Request::builder()
        .uri("/admin")
        .header(header::COOKIE, "auth=1")
        .body(Body::empty())
        .unwrap();

    let html = body_text(app.oneshot(request).await.unwrap()).await;
    assert!(html.contains("id=\"panel-categories\" style=\"display:none\""));
    assert!(!html.contains("id=\"panel-products\" style=\"display:none\""));
}
