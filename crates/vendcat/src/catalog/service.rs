use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use super::classify::{Classifier, ClassifierConfig};
use super::curation::{CurationError, CurationSnapshot, CurationStore};
use super::domain::{FilterParams, Product, ProductId};
use super::engine::{EngineConfig, FilterSortEngine};
use super::export::{self, ExportError};
use super::pricing::{self, PricingPolicy};
use super::projection::{self, CatalogPage, CatalogSummary, ProductView, DEFAULT_PAGE_SIZE};
use super::submission::{
    ContactIdentity, InterestSubmission, SubmissionError, SubmissionReceipt, SubmissionTransport,
};

/// Full configuration for one catalog deployment.
#[derive(Debug, Clone, Default)]
pub struct CatalogConfig {
    pub pricing: PricingPolicy,
    pub engine: EngineConfig,
    pub classifier: ClassifierConfig,
    pub page_size: Option<usize>,
}

/// One browse pass: the cumulative page plus the header summary counts.
#[derive(Debug, Clone, Serialize)]
pub struct BrowseResult {
    #[serde(flatten)]
    pub page: CatalogPage,
    pub summary: CatalogSummary,
}

/// Error raised by the catalog service.
#[derive(Debug, thiserror::Error)]
pub enum CatalogServiceError {
    /// The product collection failed to load or contained nothing usable.
    /// Distinct from a zero-match browse, which is a normal empty page.
    #[error("product collection is unavailable")]
    NoProducts,
    #[error("unknown product id: {0}")]
    UnknownProduct(String),
    #[error("custom price must be a positive amount")]
    InvalidCustomPrice,
    #[error(transparent)]
    Curation(#[from] CurationError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

/// Facade composing the classifier, pricing policy, filter/sort engine,
/// curation store, and submission transport over an immutable product
/// snapshot. Every curation mutation is a point write; callers re-run
/// `browse` afterwards for the updated view.
#[derive(Debug)]
pub struct CatalogService<S, T> {
    products: Vec<Product>,
    classifier: Classifier,
    engine: FilterSortEngine,
    pricing: PricingPolicy,
    page_size: usize,
    store: Arc<S>,
    transport: Arc<T>,
}

impl<S, T> CatalogService<S, T>
where
    S: CurationStore + 'static,
    T: SubmissionTransport + 'static,
{
    /// Build the service over a freshly loaded product collection.
    /// Non-food supply items are dropped here, once, not per pass.
    pub fn new(
        products: Vec<Product>,
        store: Arc<S>,
        transport: Arc<T>,
        config: CatalogConfig,
    ) -> Result<Self, CatalogServiceError> {
        if products.is_empty() {
            return Err(CatalogServiceError::NoProducts);
        }

        let classifier = Classifier::new(config.classifier);
        let supplied = products.len();
        let products: Vec<Product> = products
            .into_iter()
            .filter(|product| classifier.is_food(product))
            .collect();
        if products.len() < supplied {
            info!(
                kept = products.len(),
                dropped = supplied - products.len(),
                "dropped non-food supply items from catalog"
            );
        }
        if products.is_empty() {
            return Err(CatalogServiceError::NoProducts);
        }

        let engine = FilterSortEngine::new(
            classifier.clone(),
            config.pricing.clone(),
            config.engine,
        );

        Ok(Self {
            products,
            classifier,
            engine,
            pricing: config.pricing,
            page_size: config.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            store,
            transport,
        })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    /// Run one full filter/sort/project pass. A failed curation read
    /// degrades to an empty overlay so the view still renders.
    pub fn browse(&self, params: &FilterParams, page: usize) -> BrowseResult {
        let curation = self.curation_snapshot();
        let ordered = self.engine.apply(&self.products, &curation, params);
        let total = ordered.len();
        let (end, has_more) = projection::page_bounds(total, page, self.page_size);

        let visible = ordered[..end]
            .iter()
            .map(|product| self.view(product, &curation))
            .collect();

        BrowseResult {
            page: CatalogPage {
                visible,
                total,
                page: page.max(1),
                page_size: self.page_size,
                has_more,
            },
            summary: projection::summarize(&self.products, &curation),
        }
    }

    pub fn summary(&self) -> CatalogSummary {
        projection::summarize(&self.products, &self.curation_snapshot())
    }

    pub fn hide(&self, id: &ProductId) -> Result<(), CatalogServiceError> {
        self.require_product(id)?;
        self.store.hide(id)?;
        Ok(())
    }

    pub fn unhide(&self, id: &ProductId) -> Result<(), CatalogServiceError> {
        self.require_product(id)?;
        self.store.unhide(id)?;
        Ok(())
    }

    pub fn promote(&self, id: &ProductId) -> Result<(), CatalogServiceError> {
        self.require_product(id)?;
        self.store.promote(id)?;
        Ok(())
    }

    pub fn demote(&self, id: &ProductId) -> Result<(), CatalogServiceError> {
        self.require_product(id)?;
        self.store.demote(id)?;
        Ok(())
    }

    pub fn set_custom_price(&self, id: &ProductId, price: f64) -> Result<(), CatalogServiceError> {
        self.require_product(id)?;
        if !price.is_finite() || price <= 0.0 {
            return Err(CatalogServiceError::InvalidCustomPrice);
        }
        self.store.set_custom_price(id, price)?;
        Ok(())
    }

    pub fn clear_custom_price(&self, id: &ProductId) -> Result<(), CatalogServiceError> {
        self.require_product(id)?;
        self.store.clear_custom_price(id)?;
        Ok(())
    }

    pub fn add_interest(&self, id: &ProductId) -> Result<(), CatalogServiceError> {
        self.require_product(id)?;
        self.store.add_interest(id)?;
        Ok(())
    }

    pub fn remove_interest(&self, id: &ProductId) -> Result<(), CatalogServiceError> {
        self.require_product(id)?;
        self.store.remove_interest(id)?;
        Ok(())
    }

    /// Saved interest items in insertion order. Ids that no longer resolve
    /// against the catalog are skipped.
    pub fn interest_list(&self) -> Vec<ProductView> {
        let curation = self.curation_snapshot();
        self.interest_products(&curation)
            .iter()
            .map(|product| self.view(product, &curation))
            .collect()
    }

    pub fn export_interest_csv(&self) -> Result<String, CatalogServiceError> {
        let curation = self.curation_snapshot();
        let items = self.interest_products(&curation);
        Ok(export::interest_list_csv(&items)?)
    }

    /// Submit the interest list to the external intake endpoint. Single
    /// attempt; on failure the interest list is untouched for a retry.
    pub fn submit_interest(
        &self,
        contact: ContactIdentity,
    ) -> Result<SubmissionReceipt, CatalogServiceError> {
        if contact.name.trim().is_empty() || contact.email.trim().is_empty() {
            return Err(SubmissionError::MissingContact.into());
        }

        let curation = self.curation_snapshot();
        let items = self.interest_products(&curation);
        if items.is_empty() {
            return Err(SubmissionError::EmptyInterestList.into());
        }

        let summary = super::submission::format_summary(&contact, &items);
        let item_count = items.len();
        self.transport.send(InterestSubmission {
            contact,
            summary,
            item_count,
        })?;

        Ok(SubmissionReceipt {
            item_count,
            submitted_at: Utc::now(),
        })
    }

    fn curation_snapshot(&self) -> CurationSnapshot {
        match self.store.snapshot() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, "curation state unavailable, rendering with empty overlay");
                CurationSnapshot::default()
            }
        }
    }

    fn interest_products<'a>(&'a self, curation: &CurationSnapshot) -> Vec<&'a Product> {
        curation
            .interest
            .iter()
            .filter_map(|id| self.find(id))
            .collect()
    }

    fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    fn require_product(&self, id: &ProductId) -> Result<(), CatalogServiceError> {
        if self.find(id).is_none() {
            return Err(CatalogServiceError::UnknownProduct(id.0.clone()));
        }
        Ok(())
    }

    fn view(&self, product: &Product, curation: &CurationSnapshot) -> ProductView {
        let vending_price =
            pricing::resolve_price(product, curation.custom_price(&product.id), &self.pricing).ok();
        let markup_pct = vending_price
            .filter(|_| product.unit_price > 0.0)
            .map(|price| {
                (pricing::markup_ratio(product.unit_price, price) * 100.0).round() as i64
            });

        ProductView {
            id: product.id.0.clone(),
            name: product.name.clone(),
            brand: product.brand.clone(),
            size: product.size.clone(),
            category: product.category.clone(),
            unit_price: product.unit_price,
            case_price: product.case_price,
            unit_count: product.unit_count,
            vending_price,
            markup_pct,
            healthy: self.classifier.is_healthy(product),
            hidden: curation.is_hidden(&product.id),
            promoted_rank: curation.promoted_rank(&product.id),
            rebate: product.rebate.clone(),
            image_url: product.image_url.clone(),
        }
    }
}
