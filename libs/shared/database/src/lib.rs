pub mod seed;
pub mod store;

use shared_config::AppConfig;
use store::ClinicStore;

/// Shared state handed to every cell router.
pub struct AppState {
    pub config: AppConfig,
    pub store: ClinicStore,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            store: ClinicStore::new(),
        }
    }
}
