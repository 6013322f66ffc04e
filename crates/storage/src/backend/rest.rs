use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::Value;

use super::{Filter, SelectQuery, Table, TableBackend};
use crate::error::{Result, StorageError};

/// Connection settings for a hosted PostgREST endpoint (a Supabase project).
#[derive(Debug, Clone)]
pub struct RestConfig {
    pub project_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl RestConfig {
    pub fn new(project_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            project_url: project_url.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Error body returned by PostgREST on non-2xx responses.
#[derive(Debug, Deserialize)]
struct RestErrorBody {
    message: Option<String>,
    code: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

pub struct RestBackend {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestBackend {
    pub fn new(config: &RestConfig) -> Result<Self> {
        let project_url = config.project_url.trim_end_matches('/');
        if project_url.is_empty() {
            return Err(StorageError::Config("project URL is empty".to_string()));
        }
        if config.api_key.is_empty() {
            return Err(StorageError::Config("API key is empty".to_string()));
        }

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: format!("{}/rest/v1", project_url),
            api_key: config.api_key.clone(),
        })
    }

    fn table_url(&self, table: Table) -> String {
        format!("{}/{}", self.base_url, table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn check(response: Response) -> Result<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<RestErrorBody>(&text) {
            Ok(body) => {
                tracing::debug!(
                    "PostgREST error code={:?} details={:?} hint={:?}",
                    body.code,
                    body.details,
                    body.hint
                );
                body.message.unwrap_or_else(|| status.to_string())
            }
            Err(_) if !text.is_empty() => text,
            Err(_) => status.to_string(),
        };

        Err(StorageError::backend(status.as_u16(), message))
    }
}

/// Query string pairs for a `select` in PostgREST syntax.
pub fn select_params(query: &SelectQuery) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), compact_columns(&query.columns))];
    params.extend(query.filters.iter().map(filter_param));
    if let Some(order) = &query.order {
        let direction = if order.ascending { "asc" } else { "desc" };
        params.push((
            "order".to_string(),
            format!("{}.{}", order.column, direction),
        ));
    }
    params
}

pub fn filter_param(filter: &Filter) -> (String, String) {
    (filter.column.clone(), format!("eq.{}", filter.value_text()))
}

// PostgREST rejects whitespace inside the select list.
fn compact_columns(columns: &str) -> String {
    columns.chars().filter(|c| !c.is_whitespace()).collect()
}

#[async_trait::async_trait]
impl TableBackend for RestBackend {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Value>> {
        tracing::debug!("select {} columns={}", query.table, query.columns);

        let request = self
            .client
            .get(self.table_url(query.table))
            .query(&select_params(query));
        let response = Self::check(self.authorized(request).send().await?).await?;

        let rows = response.json::<Vec<Value>>().await?;
        Ok(rows)
    }

    async fn insert(&self, table: Table, record: &Value) -> Result<()> {
        tracing::debug!("insert into {}", table);

        let request = self
            .client
            .post(self.table_url(table))
            .header("Prefer", "return=minimal")
            .json(record);
        Self::check(self.authorized(request).send().await?).await?;

        Ok(())
    }

    async fn update(&self, table: Table, patch: &Value, filter: &Filter) -> Result<()> {
        tracing::debug!("update {} where {}={}", table, filter.column, filter.value_text());

        let request = self
            .client
            .patch(self.table_url(table))
            .query(&[filter_param(filter)])
            .header("Prefer", "return=minimal")
            .json(patch);
        Self::check(self.authorized(request).send().await?).await?;

        Ok(())
    }

    async fn delete(&self, table: Table, filter: &Filter) -> Result<()> {
        tracing::debug!("delete from {} where {}={}", table, filter.column, filter.value_text());

        let request = self
            .client
            .delete(self.table_url(table))
            .query(&[filter_param(filter)]);
        Self::check(self.authorized(request).send().await?).await?;

        Ok(())
    }
}
