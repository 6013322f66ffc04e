pub mod category;
pub mod product;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;

fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(Into::into))
        .collect()
}
