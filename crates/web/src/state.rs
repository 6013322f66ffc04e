use storefront_storage::DataStore;

use crate::middleware::session::AdminPassphrases;

#[derive(Clone)]
pub struct AppState {
    pub store: DataStore,
    pub passphrases: AdminPassphrases,
}

impl AppState {
    pub fn new(store: DataStore, passphrases: AdminPassphrases) -> Self {
        Self { store, passphrases }
    }
}
