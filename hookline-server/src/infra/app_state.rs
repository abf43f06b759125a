use std::{fmt, sync::Arc};

use hookline_config::Config;
use hookline_core::database::ActivityStore;

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn ActivityStore>,
    config: Arc<Config>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(store: Arc<dyn ActivityStore>, config: Arc<Config>) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &dyn ActivityStore {
        self.store.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
