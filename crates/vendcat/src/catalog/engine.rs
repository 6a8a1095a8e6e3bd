use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::classify::Classifier;
use super::curation::CurationSnapshot;
use super::domain::{CategoryFilter, FilterParams, Product, SortKey};
use super::pricing::{self, PricingPolicy};

/// Direction convention for the popularity signal. Both appear across the
/// product line's lifetime, so the engine takes it as configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PopularityOrder {
    /// Higher popularity value ranks first; missing treated as 0.
    HighestFirst,
    /// Lower popularity value ranks first; missing treated as 500.
    LowestFirst,
}

/// How an active search query combines with the category/brand/price stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchMode {
    /// Search narrows the result of every preceding filter stage.
    And,
    /// An active query skips the category/brand/price stages entirely;
    /// visibility rules still apply.
    Bypass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub popularity_order: PopularityOrder,
    pub search_mode: SearchMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            popularity_order: PopularityOrder::HighestFirst,
            search_mode: SearchMode::And,
        }
    }
}

/// Stateless filter/sort pipeline over the immutable product snapshot.
/// Each pass reads one consistent curation snapshot and a caller-owned
/// parameter set; nothing is retained between passes.
#[derive(Debug, Clone)]
pub struct FilterSortEngine {
    classifier: Classifier,
    pricing: PricingPolicy,
    config: EngineConfig,
}

impl FilterSortEngine {
    pub fn new(classifier: Classifier, pricing: PricingPolicy, config: EngineConfig) -> Self {
        Self {
            classifier,
            pricing,
            config,
        }
    }

    /// Run the full pipeline: visibility, category, brand, price bucket,
    /// search, then ordering. Returns references into the input slice.
    pub fn apply<'a>(
        &self,
        products: &'a [Product],
        curation: &CurationSnapshot,
        params: &FilterParams,
    ) -> Vec<&'a Product> {
        let mut kept: Vec<&Product> = products
            .iter()
            .filter(|product| self.keeps(product, curation, params))
            .collect();
        self.order(&mut kept, curation, params);
        kept
    }

    /// Display price under the engine's pricing policy, if resolvable.
    /// Products with unusable wholesale costs stay out of price-based
    /// comparisons instead of failing the pass.
    pub fn resolved_price(&self, product: &Product, curation: &CurationSnapshot) -> Option<f64> {
        pricing::resolve_price(product, curation.custom_price(&product.id), &self.pricing).ok()
    }

    fn keeps(&self, product: &Product, curation: &CurationSnapshot, params: &FilterParams) -> bool {
        let hidden = curation.is_hidden(&product.id);

        // Stage 1: visibility. The hidden and promoted selectors replace the
        // category stage entirely; search still applies to both.
        match &params.category {
            CategoryFilter::Hidden => {
                return hidden && self.search_allows(product, params);
            }
            CategoryFilter::Promoted => {
                if curation.promoted_rank(&product.id).is_none() {
                    return false;
                }
                if hidden && !params.include_hidden {
                    return false;
                }
                return self.search_allows(product, params);
            }
            _ => {
                if hidden && !params.include_hidden {
                    return false;
                }
            }
        }

        if self.config.search_mode == SearchMode::Bypass && params.active_search().is_some() {
            return self.search_allows(product, params);
        }

        // Stage 2: category.
        if !self.classifier.matches(product, &params.category) {
            return false;
        }

        // Stage 3: brand.
        if let Some(brand) = params.brand.as_deref() {
            if product.brand != brand {
                return false;
            }
        }

        // Stage 4: price bucket, on the resolved display price.
        if let Some(bucket) = params.price_bucket {
            match self.resolved_price(product, curation) {
                Some(price) if bucket.contains(price) => {}
                _ => return false,
            }
        }

        // Stage 5: search narrows everything that survived the prior stages.
        self.search_allows(product, params)
    }

    fn search_allows(&self, product: &Product, params: &FilterParams) -> bool {
        match params.active_search() {
            Some(query) => {
                let query = query.to_lowercase();
                product.name.to_lowercase().contains(&query)
                    || product.brand.to_lowercase().contains(&query)
            }
            None => true,
        }
    }

    fn order(&self, items: &mut [&Product], curation: &CurationSnapshot, params: &FilterParams) {
        let promoted_first = params.category == CategoryFilter::All;
        items.sort_by(|a, b| {
            if promoted_first {
                match (
                    curation.promoted_rank(&a.id),
                    curation.promoted_rank(&b.id),
                ) {
                    (Some(rank_a), Some(rank_b)) => return rank_a.cmp(&rank_b),
                    (Some(_), None) => return Ordering::Less,
                    (None, Some(_)) => return Ordering::Greater,
                    (None, None) => {}
                }
            }
            self.compare(a, b, curation, params.sort)
        });
    }

    fn compare(
        &self,
        a: &Product,
        b: &Product,
        curation: &CurationSnapshot,
        sort: SortKey,
    ) -> Ordering {
        match sort {
            SortKey::Popularity => match self.config.popularity_order {
                PopularityOrder::HighestFirst => {
                    b.popularity.unwrap_or(0).cmp(&a.popularity.unwrap_or(0))
                }
                PopularityOrder::LowestFirst => a
                    .popularity
                    .unwrap_or(500)
                    .cmp(&b.popularity.unwrap_or(500)),
            },
            SortKey::PriceLow => a.unit_price.total_cmp(&b.unit_price),
            SortKey::PriceHigh => b.unit_price.total_cmp(&a.unit_price),
            SortKey::Margin => {
                let margin_a = self.margin_ratio(a, curation);
                let margin_b = self.margin_ratio(b, curation);
                margin_b.total_cmp(&margin_a)
            }
            SortKey::Name => a
                .name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name)),
        }
    }

    fn margin_ratio(&self, product: &Product, curation: &CurationSnapshot) -> f64 {
        match self.resolved_price(product, curation) {
            Some(price) if product.unit_price > 0.0 => {
                pricing::markup_ratio(product.unit_price, price)
            }
            // Unresolvable margins sort after every real one.
            _ => f64::NEG_INFINITY,
        }
    }
}

impl Default for FilterSortEngine {
    fn default() -> Self {
        Self::new(
            Classifier::default(),
            PricingPolicy::default(),
            EngineConfig::default(),
        )
    }
}
