use storefront_storage::{
    dto::{category::CategoryForm, product::ProductForm},
    models::{Category, Product},
    services::currency::format_try,
};

use crate::html::{Element, Node, el, page};

use super::services::AdminLists;
use super::session::AdminSession;

pub const MISSING_CATEGORY: &str = "—";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdminTab {
    Categories,
    #[default]
    Products,
}

impl AdminTab {
    /// Products unless `tab=categories` was asked for.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("categories") => Self::Categories,
            _ => Self::Products,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Categories => "categories",
            Self::Products => "products",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Categories => "Kategoriler",
            Self::Products => "Ürünler",
        }
    }
}

/// State of the admin page for one response.
#[derive(Debug, Clone, Default)]
pub struct AdminPage {
    pub tab: AdminTab,
    pub lists: AdminLists,
    pub session: AdminSession,
    pub category_form: CategoryForm,
    pub product_form: ProductForm,
    pub alert: Option<String>,
}

pub fn render_admin_page(admin: &AdminPage) -> String {
    let mut body: Vec<Node> = vec![header().into(), tabs(admin.tab).into()];

    if let Some(message) = &admin.alert {
        body.push(
            el("div")
                .class("alert")
                .attr("role", "alert")
                .text(message.clone())
                .into(),
        );
    }

    body.push(panel(AdminTab::Categories, admin.tab, categories_panel(admin)).into());
    body.push(panel(AdminTab::Products, admin.tab, products_panel(admin)).into());

    page("Yönetim Paneli", body)
}

fn header() -> Element {
    el("header")
        .style("display:flex;justify-content:space-between;align-items:center;max-width:960px;margin:12px auto")
        .child(el("h1").style("font-size:22px").text("Yönetim Paneli"))
        .child(
            el("div")
                .child(el("a").attr("href", "/").style("margin-right:12px").text("Menü"))
                .child(
                    el("form")
                        .attr("method", "post")
                        .attr("action", "/logout")
                        .style("display:inline")
                        .child(el("button").class("btn muted").attr("type", "submit").text("Çıkış")),
                ),
        )
}

fn tabs(active: AdminTab) -> Element {
    let link = |tab: AdminTab| {
        el("a")
            .class(if tab == active { "tab active" } else { "tab" })
            .attr("href", format!("/admin?tab={}", tab.as_str()))
            .style(if tab == active {
                "font-weight:700;margin-right:16px"
            } else {
                "margin-right:16px"
            })
            .text(tab.label())
    };

    el("nav")
        .style("max-width:960px;margin:0 auto 12px")
        .child(link(AdminTab::Categories))
        .child(link(AdminTab::Products))
}

fn panel(tab: AdminTab, active: AdminTab, content: Vec<Node>) -> Element {
    el("section")
        .attr("id", format!("panel-{}", tab.as_str()))
        .style(if tab == active {
            "max-width:960px;margin:0 auto"
        } else {
            "display:none"
        })
        .children(content)
}

fn hidden(name: &'static str, value: impl Into<String>) -> Element {
    el("input")
        .attr("type", "hidden")
        .attr("name", name)
        .attr("value", value)
}

fn labeled_input(label: &'static str, name: &'static str, value: &str) -> Element {
    el("label")
        .style("display:block;margin:6px 0")
        .text(label)
        .child(
            el("input")
                .attr("type", "text")
                .attr("name", name)
                .attr("value", value.to_string())
                .style("display:block;width:100%;padding:6px"),
        )
}

fn editing_value(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

fn form_buttons(editing: Option<i64>, tab: AdminTab) -> Element {
    let submit = el("button")
        .class("btn")
        .attr("type", "submit")
        .text(if editing.is_some() { "Güncelle" } else { "Kaydet" });

    let mut buttons = el("div").style("margin:8px 0").child(submit);
    if editing.is_some() {
        buttons = buttons.child(
            el("a")
                .class("btn muted")
                .attr("href", format!("/admin?tab={}", tab.as_str()))
                .style("margin-left:8px")
                .text("İptal"),
        );
    }
    buttons
}

fn delete_form(action: String, prompt: &'static str) -> Element {
    el("form")
        .attr("method", "post")
        .attr("action", action)
        .attr("onsubmit", format!("return confirm('{}')", prompt))
        .style("display:inline")
        .child(hidden("confirmed", "true"))
        .child(el("button").class("btn danger").attr("type", "submit").text("Sil"))
}

fn categories_panel(admin: &AdminPage) -> Vec<Node> {
    let editing = admin.session.editing_category();

    let form = el("form")
        .attr("id", "category-form")
        .attr("method", "post")
        .attr("action", "/admin/categories")
        .child(hidden("editing_id", editing_value(editing)))
        .child(labeled_input("Kategori adı", "name", &admin.category_form.name))
        .child(form_buttons(editing, AdminTab::Categories));

    let table = el("table")
        .attr("id", "category-table")
        .child(el("tr").children(["ID", "Ad", ""].map(|h| el("th").text(h))))
        .children(admin.lists.categories.iter().map(category_row));

    vec![form.into(), table.into()]
}

fn category_row(category: &Category) -> Element {
    el("tr")
        .attr("data-category-id", category.id.to_string())
        .child(el("td").text(category.id.to_string()))
        .child(el("td").text(category.name.clone()))
        .child(
            el("td")
                .child(
                    el("a")
                        .class("btn muted")
                        .attr(
                            "href",
                            format!("/admin?tab=categories&edit_category={}", category.id),
                        )
                        .text("Düzenle"),
                )
                .child(delete_form(
                    format!("/admin/categories/{}/delete", category.id),
                    "Kategori silinsin mi?",
                )),
        )
}

fn products_panel(admin: &AdminPage) -> Vec<Node> {
    let editing = admin.session.editing_product();
    let form_values = &admin.product_form;
    let selected = form_values.selected_category();

    let select = el("select")
        .attr("name", "category_id")
        .style("display:block;width:100%;padding:6px")
        .child(el("option").attr("value", "").text("Kategori seçin"))
        .children(admin.lists.categories.iter().map(|category| {
            el("option")
                .attr("value", category.id.to_string())
                .attr_if(selected == Some(category.id), "selected", "selected")
                .text(category.name.clone())
        }));

    let description = el("label")
        .style("display:block;margin:6px 0")
        .text("Açıklama")
        .child(
            el("textarea")
                .attr("name", "description")
                .attr("rows", "4")
                .style("display:block;width:100%;padding:6px")
                .text(form_values.description.clone()),
        );

    let file = el("label")
        .style("display:block;margin:6px 0")
        .text("Görsel dosyası")
        .child(
            el("input")
                .attr("type", "file")
                .attr("name", "image_file")
                .attr("accept", "image/*"),
        );

    let form = el("form")
        .attr("id", "product-form")
        .attr("method", "post")
        .attr("action", "/admin/products")
        .attr("enctype", "multipart/form-data")
        .child(hidden("editing_id", editing_value(editing)))
        .child(labeled_input("Ürün adı", "name", &form_values.name))
        .child(labeled_input("Alt başlık", "subtitle", &form_values.subtitle))
        .child(labeled_input("Fiyat", "price", &form_values.price))
        .child(
            el("label")
                .style("display:block;margin:6px 0")
                .text("Kategori")
                .child(select),
        )
        .child(description)
        .child(labeled_input("Görsel URL", "image_url", &form_values.image_url))
        .child(file)
        .child(form_buttons(editing, AdminTab::Products));

    let table = el("table")
        .attr("id", "product-table")
        .child(
            el("tr").children(["ID", "Ad", "Kategori", "Fiyat", ""].map(|h| el("th").text(h))),
        )
        .children(admin.lists.products.iter().map(product_row));

    vec![form.into(), table.into()]
}

fn product_row(product: &Product) -> Element {
    el("tr")
        .attr("data-product-id", product.id.to_string())
        .child(el("td").text(product.id.to_string()))
        .child(el("td").text(product.name.clone()))
        .child(el("td").text(product.category_name().unwrap_or(MISSING_CATEGORY)))
        .child(el("td").text(format_try(product.price)))
        .child(
            el("td")
                .child(
                    el("a")
                        .class("btn muted")
                        .attr(
                            "href",
                            format!("/admin?tab=products&edit_product={}", product.id),
                        )
                        .text("Düzenle"),
                )
                .child(delete_form(
                    format!("/admin/products/{}/delete", product.id),
                    "Ürün silinsin mi?",
                )),
        )
}

#[cfg(test)]
mod tests {
    use storefront_storage::models::CategoryName;

    use super::*;
    use crate::features::catalog::view::tests::{category, product};

    fn admin_page() -> AdminPage {
        let mut baklava = product(10, "Baklava", Some(1));
        baklava.category = Some(CategoryName {
            name: "Tatlılar".to_string(),
        });
        let orphan = product(11, "Yetim <x>", None);

        AdminPage {
            lists: AdminLists {
                categories: vec![category(1, "Tatlılar"), category(2, "İçecekler")],
                products: vec![baklava, orphan],
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_product_table_shows_category_or_dash() {
        let html = render_admin_page(&admin_page());
        assert!(html.contains("<td>Tatlılar</td>"));
        assert!(html.contains("<td>—</td>"));
        assert!(html.contains("<td>₺12,50</td>"));
        assert!(html.contains("Yetim &lt;x&gt;"));
    }

    #[test]
    fn test_select_lists_categories_and_marks_selection() {
        let mut admin = admin_page();
        admin.product_form.category_id = "2".to_string();

        let html = render_admin_page(&admin);
        assert!(html.contains("<option value=\"1\">Tatlılar</option>"));
        assert!(html.contains("<option value=\"2\" selected=\"selected\">İçecekler</option>"));
    }

    #[test]
    fn test_editing_id_travels_in_hidden_field() {
        let mut admin = admin_page();
        admin.session.begin_category_edit(2);
        admin.category_form.name = "İçecekler".to_string();

        let html = render_admin_page(&admin);
        assert!(html.contains("name=\"editing_id\" value=\"2\""));
        assert!(html.contains("Güncelle"));
        assert!(html.contains("name=\"editing_id\" value=\"\""));
    }

    #[test]
    fn test_delete_asks_for_confirmation() {
        let html = render_admin_page(&admin_page());
        assert!(html.contains("action=\"/admin/products/10/delete\""));
        assert!(html.contains("return confirm(&#39;Ürün silinsin mi?&#39;)"));
    }

    #[test]
    fn test_tabs_and_alert() {
        let mut admin = admin_page();
        admin.tab = AdminTab::from_query(Some("products"));
        admin.alert = Some("Ürün eklenemedi: boom".to_string());

        let html = render_admin_page(&admin);
        assert!(html.contains("id=\"panel-categories\" style=\"display:none\""));
        assert!(html.contains("role=\"alert\">Ürün eklenemedi: boom"));
    }

    #[test]
    fn test_products_tab_is_the_default() {
        assert_eq!(AdminTab::from_query(None), AdminTab::Products);
        assert_eq!(AdminTab::from_query(Some("x")), AdminTab::Products);
        assert_eq!(AdminTab::from_query(Some("categories")), AdminTab::Categories);

        let html = render_admin_page(&admin_page());
        assert!(html.contains("id=\"panel-categories\" style=\"display:none\""));
        assert!(html.contains("class=\"tab active\" href=\"/admin?tab=products\""));
    }
}
