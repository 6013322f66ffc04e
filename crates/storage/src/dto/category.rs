use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::Category;

/// Raw category form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CategoryForm {
    #[serde(default)]
    pub name: String,
}

impl CategoryForm {
    pub fn to_payload(&self) -> Result<CategoryPayload, validator::ValidationErrors> {
        let payload = CategoryPayload {
            name: self.name.trim().to_string(),
        };
        payload.validate()?;
        Ok(payload)
    }
}

impl From<&Category> for CategoryForm {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
        }
    }
}

/// Record sent on insert and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CategoryPayload {
    #[validate(length(min = 1, message = "Kategori adı gerekli"))]
    pub name: String,
}
