use storefront_storage::services::currency::parse_id;

/// Which rows the admin forms are currently editing.
///
/// Travels with each form as a hidden field; the only mutation points are
/// the methods below.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdminSession {
    editing_category: Option<i64>,
    editing_product: Option<i64>,
}

/// Whether a save inserts a new row or updates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    Create,
    Update(i64),
}

impl From<Option<i64>> for SaveMode {
    fn from(id: Option<i64>) -> Self {
        id.map_or(SaveMode::Create, SaveMode::Update)
    }
}

impl AdminSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores the session from the hidden `editing_id` fields of a submitted form.
    pub fn from_hidden_fields(category: Option<&str>, product: Option<&str>) -> Self {
        Self {
            editing_category: category.and_then(parse_hidden_id),
            editing_product: product.and_then(parse_hidden_id),
        }
    }

    pub fn editing_category(&self) -> Option<i64> {
        self.editing_category
    }

    pub fn editing_product(&self) -> Option<i64> {
        self.editing_product
    }

    pub fn category_mode(&self) -> SaveMode {
        self.editing_category.into()
    }

    pub fn product_mode(&self) -> SaveMode {
        self.editing_product.into()
    }

    pub fn begin_category_edit(&mut self, id: i64) {
        self.editing_category = Some(id);
    }

    pub fn begin_product_edit(&mut self, id: i64) {
        self.editing_product = Some(id);
    }

    pub fn finish_category_edit(&mut self) {
        self.editing_category = None;
    }

    pub fn finish_product_edit(&mut self) {
        self.editing_product = None;
    }
}

fn parse_hidden_id(value: &str) -> Option<i64> {
    Some(parse_id(value)).filter(|id| *id > 0)
}
