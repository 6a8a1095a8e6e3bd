use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use metrics_exporter_prometheus::PrometheusHandle;
use tracing::info;
use vendcat::catalog::{
    CatalogConfig, CurationError, CurationSeed, CurationSnapshot, CurationStore,
    InterestSubmission, Product, ProductId, SubmissionError, SubmissionTransport,
};
use vendcat::error::AppError;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local curation store. Production deployments swap this for a
/// durable key-value backing; the trait contract is identical.
#[derive(Default)]
pub(crate) struct InMemoryCurationStore {
    state: Mutex<CurationSnapshot>,
}

impl InMemoryCurationStore {
    /// Initialize empty storage from the operator's default seed.
    pub(crate) fn with_seed(seed: CurationSeed) -> Self {
        Self {
            state: Mutex::new(seed.into_snapshot()),
        }
    }
}

impl CurationStore for InMemoryCurationStore {
    fn snapshot(&self) -> Result<CurationSnapshot, CurationError> {
        Ok(self.state.lock().expect("curation mutex poisoned").clone())
    }

    fn hide(&self, id: &ProductId) -> Result<(), CurationError> {
        let mut state = self.state.lock().expect("curation mutex poisoned");
        state.hidden.insert(id.clone());
        Ok(())
    }

    fn unhide(&self, id: &ProductId) -> Result<(), CurationError> {
        let mut state = self.state.lock().expect("curation mutex poisoned");
        state.hidden.remove(id);
        Ok(())
    }

    fn promote(&self, id: &ProductId) -> Result<(), CurationError> {
        let mut state = self.state.lock().expect("curation mutex poisoned");
        if !state.promoted.contains(id) {
            state.promoted.push(id.clone());
        }
        Ok(())
    }

    fn demote(&self, id: &ProductId) -> Result<(), CurationError> {
        let mut state = self.state.lock().expect("curation mutex poisoned");
        state.promoted.retain(|entry| entry != id);
        Ok(())
    }

    fn set_custom_price(&self, id: &ProductId, price: f64) -> Result<(), CurationError> {
        let mut state = self.state.lock().expect("curation mutex poisoned");
        state.custom_prices.insert(id.clone(), price);
        Ok(())
    }

    fn clear_custom_price(&self, id: &ProductId) -> Result<(), CurationError> {
        let mut state = self.state.lock().expect("curation mutex poisoned");
        state.custom_prices.remove(id);
        Ok(())
    }

    fn add_interest(&self, id: &ProductId) -> Result<(), CurationError> {
        let mut state = self.state.lock().expect("curation mutex poisoned");
        if !state.interest.contains(id) {
            state.interest.push(id.clone());
        }
        Ok(())
    }

    fn remove_interest(&self, id: &ProductId) -> Result<(), CurationError> {
        let mut state = self.state.lock().expect("curation mutex poisoned");
        state.interest.retain(|entry| entry != id);
        Ok(())
    }
}

/// Transport that records the dispatch in the service log. Swap for a real
/// intake integration in deployments that forward interest lists.
#[derive(Default)]
pub(crate) struct LoggingSubmissionTransport;

impl SubmissionTransport for LoggingSubmissionTransport {
    fn send(&self, submission: InterestSubmission) -> Result<(), SubmissionError> {
        info!(
            contact = %submission.contact.email,
            items = submission.item_count,
            "interest submission dispatched"
        );
        Ok(())
    }
}

pub(crate) fn default_catalog_config() -> CatalogConfig {
    CatalogConfig::default()
}

pub(crate) fn load_products(path: &Path) -> Result<Vec<Product>, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let products: Vec<Product> = serde_json::from_str(&raw)?;
    Ok(products)
}
