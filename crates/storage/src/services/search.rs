use crate::models::{NormalizedText, Product};

/// Current catalog search. Built once per keystroke and passed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    raw: String,
    normalized: NormalizedText,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        let raw = raw.trim();
        Self {
            raw: raw.to_string(),
            normalized: NormalizedText::new(raw),
        }
    }

    pub fn from_optional(raw: Option<&str>) -> Self {
        raw.map(Self::new).unwrap_or_default()
    }

    /// Trimmed text as typed, for echoing back into the search box.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn normalized(&self) -> &NormalizedText {
        &self.normalized
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// An empty query matches everything; otherwise the folded query must occur
    /// in the folded name, subtitle or description.
    pub fn matches(&self, product: &Product) -> bool {
        if self.is_empty() {
            return true;
        }

        [
            Some(product.name.as_str()),
            product.subtitle.as_deref(),
            product.description.as_deref(),
        ]
        .into_iter()
        .any(|field| NormalizedText::from_optional(field).contains(&self.normalized))
    }
}

/// Products of one category that match `query`, in their original order.
pub fn products_in_category<'a>(
    products: &'a [Product],
    category_id: i64,
    query: &SearchQuery,
) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| p.belongs_to(category_id) && query.matches(p))
        .collect()
}
