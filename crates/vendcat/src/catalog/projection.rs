use std::collections::BTreeMap;

use serde::Serialize;

use super::curation::CurationSnapshot;
use super::domain::Product;

pub const DEFAULT_PAGE_SIZE: usize = 24;

/// Serializable render model for one product in a view.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub size: String,
    pub category: String,
    pub unit_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_count: Option<u32>,
    /// Resolved display price; absent when the wholesale cost is unusable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vending_price: Option<f64>,
    /// Whole-percent markup over wholesale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markup_pct: Option<i64>,
    pub healthy: bool,
    pub hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promoted_rank: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rebate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// One cumulative page of an ordered result. "Load more" semantics: the
/// visible slice is always the prefix `[0, page * page_size)`, so each
/// successive page strictly grows the slice rather than replacing it.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogPage {
    pub visible: Vec<ProductView>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub has_more: bool,
}

/// Header counts over the whole catalog, independent of active filters.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogSummary {
    pub total_products: usize,
    pub total_brands: usize,
    pub brand_counts: BTreeMap<String, usize>,
    pub hidden_count: usize,
}

/// Prefix length and has-more flag for a cumulative page request.
/// Page numbers below 1 are treated as the first page.
pub(crate) fn page_bounds(total: usize, page: usize, page_size: usize) -> (usize, bool) {
    let page = page.max(1);
    let end = page.saturating_mul(page_size).min(total);
    (end, end < total)
}

pub(crate) fn summarize(products: &[Product], curation: &CurationSnapshot) -> CatalogSummary {
    let mut brand_counts: BTreeMap<String, usize> = BTreeMap::new();
    for product in products {
        *brand_counts.entry(product.brand.clone()).or_default() += 1;
    }

    CatalogSummary {
        total_products: products.len(),
        total_brands: brand_counts.len(),
        brand_counts,
        hidden_count: curation.hidden_count(),
    }
}
