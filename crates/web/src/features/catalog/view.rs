use serde::Serialize;
use storefront_storage::{
    models::{Category, Product},
    services::{
        currency::format_try,
        search::{SearchQuery, products_in_category},
    },
};
use utoipa::ToSchema;

pub const EMPTY_CATALOG_WARNING: &str =
    "UYARI: Kategoriler gelmedi veya boş. Supabase bağlantısını kontrol et.";

/// Everything the catalog page shows for one search, before any markup.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CatalogView {
    pub search: String,
    pub warning: Option<String>,
    pub sections: Vec<CategorySection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CategorySection {
    pub category_id: i64,
    pub name: String,
    pub indicator: Indicator,
    pub expanded: bool,
    pub products: Vec<ProductCard>,
}

/// Availability marker next to a category heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    HasProducts,
    Empty,
}

impl Indicator {
    pub fn color(&self) -> &'static str {
        match self {
            Indicator::HasProducts => "#2e7d32",
            Indicator::Empty => "#c62828",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProductCard {
    pub id: i64,
    pub name: String,
    pub subtitle: String,
    pub price_label: String,
    pub image_url: String,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            subtitle: product.subtitle.clone().unwrap_or_default(),
            price_label: format_try(product.price),
            image_url: product.image().unwrap_or_default().to_string(),
        }
    }
}

/// Detail pane of the product modal.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProductDetail {
    pub name: String,
    pub subtitle: String,
    /// Description split on line breaks.
    pub description_lines: Vec<String>,
    pub price_label: String,
}

impl From<&Product> for ProductDetail {
    fn from(product: &Product) -> Self {
        let description = product.description.as_deref().unwrap_or_default();
        let description_lines = if description.is_empty() {
            Vec::new()
        } else {
            description
                .split('\n')
                .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
                .collect()
        };

        Self {
            name: product.name.clone(),
            subtitle: product.subtitle.clone().unwrap_or_default(),
            description_lines,
            price_label: format_try(product.price),
        }
    }
}

/// Groups products under their categories, keeping category order.
///
/// Products whose category is not among `categories` never appear. A section
/// is expanded only while searching and when it has at least one match.
pub fn build_catalog_view(
    categories: &[Category],
    products: &[Product],
    query: &SearchQuery,
) -> CatalogView {
    let sections = categories
        .iter()
        .map(|category| {
            let matches = products_in_category(products, category.id, query);
            let indicator = if matches.is_empty() {
                Indicator::Empty
            } else {
                Indicator::HasProducts
            };

            CategorySection {
                category_id: category.id,
                name: category.name.clone(),
                indicator,
                expanded: !query.is_empty() && !matches.is_empty(),
                products: matches.into_iter().map(ProductCard::from).collect(),
            }
        })
        .collect();

    CatalogView {
        search: query.raw().to_string(),
        warning: categories
            .is_empty()
            .then(|| EMPTY_CATALOG_WARNING.to_string()),
        sections,
    }
}
