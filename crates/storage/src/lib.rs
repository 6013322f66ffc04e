pub mod backend;
pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

use std::sync::Arc;

use backend::TableBackend;
use backend::rest::{RestBackend, RestConfig};
use error::Result;

/// Shared handle to the hosted table service.
#[derive(Clone)]
pub struct DataStore {
    backend: Arc<dyn TableBackend>,
}

impl DataStore {
    pub fn connect(config: &RestConfig) -> Result<Self> {
        let backend = RestBackend::new(config)?;
        Ok(Self::from_backend(Arc::new(backend)))
    }

    pub fn from_backend(backend: Arc<dyn TableBackend>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &dyn TableBackend {
        self.backend.as_ref()
    }
}
