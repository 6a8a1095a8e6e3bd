use std::sync::{Arc, Mutex};

use crate::catalog::curation::{CurationError, CurationSeed, CurationSnapshot, CurationStore};
use crate::catalog::domain::{Product, ProductId};
use crate::catalog::service::{CatalogConfig, CatalogService};
use crate::catalog::submission::{InterestSubmission, SubmissionError, SubmissionTransport};

pub(super) fn product(
    id: &str,
    name: &str,
    brand: &str,
    category: &str,
    unit_price: f64,
    popularity: Option<u32>,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        brand: brand.to_string(),
        size: "1 ct".to_string(),
        category: category.to_string(),
        unit_price,
        case_price: None,
        unit_count: None,
        competitive_price: None,
        vending_price_override: None,
        seven_eleven_price: None,
        popularity,
        is_healthy: None,
        rebate: None,
        image_url: None,
    }
}

/// Small catalog exercising every classification and pricing branch:
/// tiered prices land at 2.00 (chips), 3.50 (cola), 3.00 (water),
/// 3.50 (protein bar), 7.00 (sandwich), 3.50 (ice cream), 2.50 (candy),
/// 3.50 (kind bar), 2.00 (pretzels).
pub(super) fn sample_products() -> Vec<Product> {
    vec![
        product("chips", "Classic Potato Chips", "Lays", "snacks", 0.55, Some(80)),
        product("cola", "Cola Classic 20oz", "Fizz", "cold_beverage", 1.10, Some(95)),
        product("water", "Smart Water 1L", "Smartwater", "beverages", 0.89, Some(60)),
        product(
            "protein-bar",
            "Chocolate Protein Bar",
            "Quest Nutrition",
            "snacks",
            1.25,
            Some(70),
        ),
        product(
            "sandwich",
            "Turkey Club Sandwich",
            "Deli Fresh",
            "refrigerated",
            2.75,
            Some(40),
        ),
        product(
            "ice-cream",
            "Ice Cream Sandwich",
            "Frosty",
            "frozen_foods",
            1.10,
            Some(55),
        ),
        product("candy", "Chocolate Candy Bar", "Kinder", "snacks", 0.75, Some(90)),
        product("kind-bar", "Dark Chocolate Nut Bar", "KIND", "snacks", 1.20, Some(65)),
        product("pretzels", "Salted Pretzels", "Snyder", "snacks", 0.55, Some(20)),
    ]
}

pub(super) fn id(value: &str) -> ProductId {
    ProductId::new(value)
}

#[derive(Debug, Default)]
pub(super) struct MemoryCurationStore {
    state: Mutex<CurationSnapshot>,
}

impl MemoryCurationStore {
    pub(super) fn with_seed(seed: CurationSeed) -> Self {
        Self {
            state: Mutex::new(seed.into_snapshot()),
        }
    }
}

impl CurationStore for MemoryCurationStore {
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

/// Store whose persisted state never parses, for degrade-path coverage.
pub(super) struct MalformedCurationStore;

impl CurationStore for MalformedCurationStore {
    fn snapshot(&self) -> Result<CurationSnapshot, CurationError> {
        Err(CurationError::Malformed("unexpected token".to_string()))
    }

    fn hide(&self, _id: &ProductId) -> Result<(), CurationError> {
        Err(CurationError::Unavailable("read-only".to_string()))
    }

    fn unhide(&self, _id: &ProductId) -> Result<(), CurationError> {
        Err(CurationError::Unavailable("read-only".to_string()))
    }

    fn promote(&self, _id: &ProductId) -> Result<(), CurationError> {
        Err(CurationError::Unavailable("read-only".to_string()))
    }

    fn demote(&self, _id: &ProductId) -> Result<(), CurationError> {
        Err(CurationError::Unavailable("read-only".to_string()))
    }

    fn set_custom_price(&self, _id: &ProductId, _price: f64) -> Result<(), CurationError> {
        Err(CurationError::Unavailable("read-only".to_string()))
    }

    fn clear_custom_price(&self, _id: &ProductId) -> Result<(), CurationError> {
        Err(CurationError::Unavailable("read-only".to_string()))
    }

    fn add_interest(&self, _id: &ProductId) -> Result<(), CurationError> {
        Err(CurationError::Unavailable("read-only".to_string()))
    }

    fn remove_interest(&self, _id: &ProductId) -> Result<(), CurationError> {
        Err(CurationError::Unavailable("read-only".to_string()))
    }
}

#[derive(Debug, Default)]
pub(super) struct MemoryTransport {
    sent: Mutex<Vec<InterestSubmission>>,
}

impl MemoryTransport {
    pub(super) fn sent(&self) -> Vec<InterestSubmission> {
        self.sent.lock().expect("transport mutex poisoned").clone()
    }
}

impl SubmissionTransport for MemoryTransport {
    fn send(&self, submission: InterestSubmission) -> Result<(), SubmissionError> {
        self.sent
            .lock()
            .expect("transport mutex poisoned")
            .push(submission);
        Ok(())
    }
}

pub(super) struct FailingTransport;

impl SubmissionTransport for FailingTransport {
    fn send(&self, _submission: InterestSubmission) -> Result<(), SubmissionError> {
        Err(SubmissionError::Transport(
            "intake endpoint unreachable".to_string(),
        ))
    }
}

pub(super) fn build_service() -> (
    Arc<CatalogService<MemoryCurationStore, MemoryTransport>>,
    Arc<MemoryCurationStore>,
    Arc<MemoryTransport>,
) {
    let store = Arc::new(MemoryCurationStore::default());
    let transport = Arc::new(MemoryTransport::default());
    let service = CatalogService::new(
        sample_products(),
        store.clone(),
        transport.clone(),
        CatalogConfig::default(),
    )
    .expect("service builds");
    (Arc::new(service), store, transport)
}
