use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::Product;
use crate::services::currency::{parse_id, parse_price};

/// Raw product form input, every field as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
}

impl ProductForm {
    /// Trims text, coerces price and category id, then validates.
    ///
    /// Price has no bounds check: non-numeric input silently becomes zero.
    pub fn to_payload(&self) -> Result<ProductPayload, validator::ValidationErrors> {
        let payload = ProductPayload {
            name: self.name.trim().to_string(),
            subtitle: self.subtitle.trim().to_string(),
            price: parse_price(&self.price),
            category_id: parse_id(&self.category_id),
            description: self.description.trim().to_string(),
            image_url: self.image_url.trim().to_string(),
        };
        payload.validate()?;
        Ok(payload)
    }

    pub fn selected_category(&self) -> Option<i64> {
        Some(parse_id(&self.category_id)).filter(|id| *id > 0)
    }
}

impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            subtitle: product.subtitle.clone().unwrap_or_default(),
            price: product.price.normalize().to_string(),
            category_id: product
                .category_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            description: product.description.clone().unwrap_or_default(),
            image_url: product.image_url.clone().unwrap_or_default(),
        }
    }
}

/// Record sent on insert and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductPayload {
    #[validate(length(min = 1, message = "Ürün adı gerekli"))]
    pub name: String,
    pub subtitle: String,
    pub price: Decimal,
    #[validate(range(min = 1, message = "Kategori seçin"))]
    pub category_id: i64,
    pub description: String,
    pub image_url: String,
}
