mod category;
mod normalized_text;
mod product;

pub use category::{Category, CategoryName};
pub use normalized_text::{NormalizedText, TURKISH_SPECIAL_LETTERS};
pub use product::Product;
