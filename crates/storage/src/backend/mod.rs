//! Table-query abstraction over the hosted data store.
//!
//! Every operation is a pass-through CRUD call. Callers get a `Result`
//! back instead of checking an error field after each call.

use std::fmt;

use serde_json::Value;

use crate::error::Result;

#[cfg(any(test, feature = "memory-backend"))]
pub mod memory;
pub mod rest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Table {
    Categories,
    Products,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Categories => "categories",
            Table::Products => "products",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Equality filter on one column, `column = value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: Value,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn id(id: i64) -> Self {
        Self::eq("id", id)
    }

    /// Value as it appears in a query string (`eq.5`, `eq.abc`).
    pub fn value_text(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            Value::Null => "null".to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

impl Order {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: true,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: false,
        }
    }
}

/// A `select` against one table, built fluently:
///
/// ```
/// use storefront_storage::backend::{Order, SelectQuery, Table};
///
/// let query = SelectQuery::new(Table::Products)
///     .columns("*, categories(name)")
///     .eq("category_id", 3)
///     .order(Order::asc("id"));
///
/// assert_eq!(query.filters.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    pub table: Table,
    pub columns: String,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
}

impl SelectQuery {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            columns: "*".to_string(),
            filters: Vec::new(),
            order: None,
        }
    }

    pub fn columns(mut self, columns: impl Into<String>) -> Self {
        self.columns = columns.into();
        self
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::eq(column, value));
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }
}

#[async_trait::async_trait]
pub trait TableBackend: Send + Sync {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Value>>;

    async fn insert(&self, table: Table, record: &Value) -> Result<()>;

    async fn update(&self, table: Table, patch: &Value, filter: &Filter) -> Result<()>;

    async fn delete(&self, table: Table, filter: &Filter) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_value_text() {
        assert_eq!(Filter::id(42).value_text(), "42");
        assert_eq!(Filter::eq("name", "Çay").value_text(), "Çay");
        assert_eq!(Filter::eq("image_url", Value::Null).value_text(), "null");
    }

    #[test]
    fn test_select_query_defaults_to_all_columns() {
        let query = SelectQuery::new(Table::Categories);
        assert_eq!(query.columns, "*");
        assert!(query.filters.is_empty());
        assert!(query.order.is_none());
    }
}
