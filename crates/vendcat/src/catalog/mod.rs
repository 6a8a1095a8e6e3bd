//! Catalog browsing and pricing derivation for the vending product list.
//!
//! The product collection loads once per session as an immutable snapshot;
//! the operator-controlled curation overlay (hidden set, promoted order,
//! custom prices, interest list) lives behind [`CurationStore`] and is read
//! consistently once per filter/sort pass.

pub mod classify;
pub mod curation;
pub mod domain;
pub mod engine;
pub mod export;
pub mod pricing;
pub mod projection;
pub mod router;
pub mod service;
pub mod submission;

#[cfg(test)]
mod tests;

pub use classify::{Classifier, ClassifierConfig};
pub use curation::{CurationError, CurationSeed, CurationSnapshot, CurationStore};
pub use domain::{CategoryFilter, FilterParams, PriceBucket, Product, ProductId, SortKey};
pub use engine::{EngineConfig, FilterSortEngine, PopularityOrder, SearchMode};
pub use export::{ExportError, INTEREST_CSV_COLUMNS};
pub use pricing::{
    resolve_price, PricingError, PricingPolicy, PricingStrategy, ReferencePriceSource,
};
pub use projection::{CatalogPage, CatalogSummary, ProductView, DEFAULT_PAGE_SIZE};
pub use router::catalog_router;
pub use service::{BrowseResult, CatalogConfig, CatalogService, CatalogServiceError};
pub use submission::{
    ContactIdentity, InterestSubmission, SubmissionError, SubmissionReceipt, SubmissionTransport,
};
