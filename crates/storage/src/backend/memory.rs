//! In-process table backend for tests and local demos.
//!
//! Mirrors the subset of PostgREST behaviour the storefront relies on:
//! generated integer ids, equality filters, ordering, column projection,
//! the `categories(name)` embed (plain and `!inner`), and foreign-key
//! checks between `products.category_id` and `categories.id`.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Mutex;

use serde_json::{Map, Value};

use super::{Filter, SelectQuery, Table, TableBackend};
use crate::error::{Result, StorageError};

#[derive(Default)]
struct Tables {
    rows: BTreeMap<Table, Vec<Map<String, Value>>>,
    next_id: BTreeMap<Table, i64>,
    pending_failure: Option<String>,
    select_failure: Option<String>,
}

#[derive(Default)]
pub struct MemoryBackend {
    inner: Mutex<Tables>,
}

enum Projection {
    All,
    Column(String),
    Embed { table: String, inner: bool, columns: Vec<String> },
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next call of any kind fail with `message`.
    pub fn fail_next(&self, message: impl Into<String>) {
        self.lock().pending_failure = Some(message.into());
    }

    /// Makes every `select` fail with `message` until cleared; writes still succeed.
    pub fn fail_selects(&self, message: Option<String>) {
        self.lock().select_failure = message;
    }

    /// Inserts a row with an explicit id and returns it.
    pub fn seed(&self, table: Table, record: Value) -> i64 {
        let mut tables = self.lock();
        let mut row = as_object(record);
        let id = match row.get("id").and_then(Value::as_i64) {
            Some(id) => id,
            None => tables.allocate_id(table),
        };
        row.insert("id".to_string(), Value::from(id));
        let next = tables.next_id.entry(table).or_insert(1);
        *next = (*next).max(id + 1);
        tables.rows.entry(table).or_default().push(row);
        id
    }

    pub fn row_count(&self, table: Table) -> usize {
        self.lock().rows.get(&table).map_or(0, Vec::len)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        // A poisoned lock only means a test panicked mid-call; the data is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Tables {
    fn allocate_id(&mut self, table: Table) -> i64 {
        let next = self.next_id.entry(table).or_insert(1);
        let id = *next;
        *next += 1;
        id
    }

    fn take_failure(&mut self) -> Result<()> {
        match self.pending_failure.take() {
            Some(message) => Err(StorageError::backend(500, message)),
            None => Ok(()),
        }
    }

    fn table(&self, table: Table) -> &[Map<String, Value>] {
        self.rows.get(&table).map(Vec::as_slice).unwrap_or(&[])
    }

    fn category_exists(&self, id: &Value) -> bool {
        self.table(Table::Categories)
            .iter()
            .any(|row| row.get("id") == Some(id))
    }

    fn check_product_reference(&self, row: &Map<String, Value>) -> Result<()> {
        match row.get("category_id") {
            None | Some(Value::Null) => Ok(()),
            Some(id) if self.category_exists(id) => Ok(()),
            Some(_) => Err(StorageError::backend(
                409,
                "insert or update on table \"products\" violates foreign key constraint \"products_category_id_fkey\"",
            )),
        }
    }
}

fn as_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn matches_filters(row: &Map<String, Value>, filters: &[Filter]) -> bool {
    filters
        .iter()
        .all(|f| values_equal(row.get(&f.column).unwrap_or(&Value::Null), &f.value))
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Greater,
        (_, None | Some(Value::Null)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

fn split_top_level(columns: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in columns.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => parts.push(std::mem::take(&mut current)),
            c if c.is_whitespace() => {}
            c => current.push(c),
        }
    }
    parts.push(current);
    parts.into_iter().filter(|p| !p.is_empty()).collect()
}

fn parse_projection(columns: &str) -> Vec<Projection> {
    split_top_level(columns)
        .into_iter()
        .map(|part| {
            if part == "*" {
                return Projection::All;
            }
            match part.split_once('(') {
                Some((head, rest)) => {
                    let (table, inner) = match head.split_once('!') {
                        Some((table, hint)) => (table.to_string(), hint == "inner"),
                        None => (head.to_string(), false),
                    };
                    let columns = split_top_level(rest.trim_end_matches(')'));
                    Projection::Embed {
                        table,
                        inner,
                        columns,
                    }
                }
                None => Projection::Column(part),
            }
        })
        .collect()
}

fn pick(row: &Map<String, Value>, columns: &[String]) -> Map<String, Value> {
    let mut out = Map::new();
    for column in columns {
        if column == "*" {
            out.extend(row.clone());
        } else {
            out.insert(
                column.clone(),
                row.get(column).cloned().unwrap_or(Value::Null),
            );
        }
    }
    out
}

#[async_trait::async_trait]
impl TableBackend for MemoryBackend {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Value>> {
        let mut tables = self.lock();
        tables.take_failure()?;
        if let Some(message) = &tables.select_failure {
            return Err(StorageError::backend(500, message.clone()));
        }

        let mut rows: Vec<&Map<String, Value>> = tables
            .table(query.table)
            .iter()
            .filter(|row| matches_filters(row, &query.filters))
            .collect();

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let ordering = compare_values(a.get(&order.column), b.get(&order.column));
                if order.ascending {
                    ordering
                } else {
                    ordering.reverse()
                }
            });
        }

        let projection = parse_projection(&query.columns);
        let mut out = Vec::with_capacity(rows.len());
        'rows: for row in rows {
            let mut record = Map::new();
            for item in &projection {
                match item {
                    Projection::All => record.extend(row.clone()),
                    Projection::Column(column) => {
                        record.insert(
                            column.clone(),
                            row.get(column).cloned().unwrap_or(Value::Null),
                        );
                    }
                    Projection::Embed {
                        table,
                        inner,
                        columns,
                    } => {
                        if query.table != Table::Products || table != "categories" {
                            return Err(StorageError::backend(
                                400,
                                format!(
                                    "Could not find a relationship between '{}' and '{}'",
                                    query.table, table
                                ),
                            ));
                        }
                        let parent = row.get("category_id").and_then(|id| {
                            tables
                                .table(Table::Categories)
                                .iter()
                                .find(|c| c.get("id").is_some_and(|v| values_equal(v, id)))
                        });
                        match parent {
                            Some(parent) => {
                                record.insert(table.clone(), Value::Object(pick(parent, columns)));
                            }
                            None if *inner => continue 'rows,
                            None => {
                                record.insert(table.clone(), Value::Null);
                            }
                        }
                    }
                }
            }
            out.push(Value::Object(record));
        }

        Ok(out)
    }

    async fn insert(&self, table: Table, record: &Value) -> Result<()> {
        let mut tables = self.lock();
        tables.take_failure()?;

        let mut row = as_object(record.clone());
        if table == Table::Products {
            tables.check_product_reference(&row)?;
        }
        let id = tables.allocate_id(table);
        row.insert("id".to_string(), Value::from(id));
        tables.rows.entry(table).or_default().push(row);

        Ok(())
    }

    async fn update(&self, table: Table, patch: &Value, filter: &Filter) -> Result<()> {
        let mut tables = self.lock();
        tables.take_failure()?;

        let patch = as_object(patch.clone());
        if table == Table::Products {
            tables.check_product_reference(&patch)?;
        }
        if let Some(rows) = tables.rows.get_mut(&table) {
            for row in rows
                .iter_mut()
                .filter(|row| matches_filters(row, std::slice::from_ref(filter)))
            {
                row.extend(patch.clone());
            }
        }

        Ok(())
    }

    async fn delete(&self, table: Table, filter: &Filter) -> Result<()> {
        let mut tables = self.lock();
        tables.take_failure()?;

        if table == Table::Categories {
            let doomed: Vec<Value> = tables
                .table(Table::Categories)
                .iter()
                .filter(|row| matches_filters(row, std::slice::from_ref(filter)))
                .filter_map(|row| row.get("id").cloned())
                .collect();
            let referenced = tables.table(Table::Products).iter().any(|p| {
                p.get("category_id")
                    .is_some_and(|id| doomed.iter().any(|d| values_equal(d, id)))
            });
            if referenced {
                return Err(StorageError::backend(
                    409,
                    "update or delete on table \"categories\" violates foreign key constraint \"products_category_id_fkey\" on table \"products\"",
                ));
            }
        }

        if let Some(rows) = tables.rows.get_mut(&table) {
            rows.retain(|row| !matches_filters(row, std::slice::from_ref(filter)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::backend::Order;

    fn seeded() -> MemoryBackend {
        let backend = MemoryBackend::new();
        backend.seed(Table::Categories, json!({"id": 1, "name": "Tatlılar"}));
        backend.seed(Table::Categories, json!({"id": 2, "name": "İçecekler"}));
        backend.seed(
            Table::Products,
            json!({"id": 10, "name": "Baklava", "price": "120", "category_id": 1}),
        );
        backend.seed(
            Table::Products,
            json!({"id": 11, "name": "Ayran", "price": "25", "category_id": 2}),
        );
        backend
    }

    #[tokio::test]
    async fn test_insert_allocates_ids_after_seeded_rows() {
        let backend = seeded();
        backend
            .insert(Table::Categories, &json!({"name": "Kahvaltı"}))
            .await
            .unwrap();

        let rows = backend
            .select(&SelectQuery::new(Table::Categories).eq("name", "Kahvaltı"))
            .await
            .unwrap();
        assert_eq!(rows[0]["id"], json!(3));
    }

    #[tokio::test]
    async fn test_select_embeds_category_name() {
        let backend = seeded();
        backend.seed(
            Table::Products,
            json!({"id": 12, "name": "Yetim", "price": "1", "category_id": null}),
        );

        let query = SelectQuery::new(Table::Products)
            .columns("id,name, categories(name)")
            .order(Order::desc("id"));
        let rows = backend.select(&query).await.unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["categories"], Value::Null);
        assert_eq!(rows[1]["categories"], json!({"name": "İçecekler"}));
        assert!(rows[1].get("price").is_none());
    }

    #[tokio::test]
    async fn test_inner_embed_drops_orphans() {
        let backend = seeded();
        backend.seed(
            Table::Products,
            json!({"id": 12, "name": "Yetim", "price": "1", "category_id": null}),
        );

        let query = SelectQuery::new(Table::Products).columns("*, categories!inner(name)");
        let rows = backend.select(&query).await.unwrap();

        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn test_foreign_key_checks() {
        let backend = seeded();

        let err = backend
            .insert(Table::Products, &json!({"name": "X", "category_id": 99}))
            .await
            .unwrap_err();
        assert!(err.is_foreign_key_violation());

        let err = backend
            .delete(Table::Categories, &Filter::id(1))
            .await
            .unwrap_err();
        assert!(err.is_foreign_key_violation());
        assert_eq!(backend.row_count(Table::Categories), 2);
    }

    #[tokio::test]
    async fn test_update_and_delete_by_id() {
        let backend = seeded();
        backend
            .update(Table::Products, &json!({"name": "Fıstıklı Baklava"}), &Filter::id(10))
            .await
            .unwrap();
        backend
            .delete(Table::Products, &Filter::id(11))
            .await
            .unwrap();

        let rows = backend
            .select(&SelectQuery::new(Table::Products))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], json!("Fıstıklı Baklava"));
    }

    #[tokio::test]
    async fn test_fail_next_applies_once() {
        let backend = seeded();
        backend.fail_next("network down");

        let err = backend
            .select(&SelectQuery::new(Table::Categories))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "network down");

        assert!(backend
            .select(&SelectQuery::new(Table::Categories))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_fail_selects_leaves_writes_working() {
        let backend = seeded();
        backend.fail_selects(Some("timeout".to_string()));

        backend
            .insert(Table::Categories, &json!({"name": "Kahvaltı"}))
            .await
            .unwrap();
        let err = backend
            .select(&SelectQuery::new(Table::Categories))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "timeout");
        assert_eq!(backend.row_count(Table::Categories), 3);

        backend.fail_selects(None);
        assert!(backend
            .select(&SelectQuery::new(Table::Categories))
            .await
            .is_ok());
    }
}
