mod config;

pub use config::ClassifierConfig;

use super::domain::{CategoryFilter, Product};

/// Pure classifier over the static keyword tables. Same product and same
/// tables always produce the same answer, independent of call order.
#[derive(Debug, Clone)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Supplies-vs-food gate, applied once when the catalog loads.
    pub fn is_food(&self, product: &Product) -> bool {
        let name = product.name.to_lowercase();
        !self
            .config
            .non_food_keywords
            .iter()
            .any(|keyword| name.contains(keyword))
    }

    pub fn is_healthy(&self, product: &Product) -> bool {
        if product.is_healthy.unwrap_or(false) || product.category == "healthy" {
            return true;
        }

        let brand = product.brand.to_lowercase();
        // Kind bars qualify, Kinder does not.
        if brand == "kind" || brand.starts_with("kind ") {
            return true;
        }
        if self
            .config
            .healthy_brands
            .iter()
            .any(|entry| &brand == entry || brand.starts_with(entry.as_str()))
        {
            return true;
        }

        let name = product.name.to_lowercase();
        self.config
            .healthy_product_terms
            .iter()
            .any(|term| name.contains(term))
    }

    pub fn is_meal(&self, product: &Product) -> bool {
        if !self
            .config
            .meal_categories
            .iter()
            .any(|category| category == &product.category)
        {
            return false;
        }

        let name = product.name.to_lowercase();
        if self
            .config
            .meal_exclude_terms
            .iter()
            .any(|term| name.contains(term))
        {
            return false;
        }

        self.config
            .meal_include_terms
            .iter()
            .any(|term| name.contains(term))
    }

    pub fn is_beverage(&self, product: &Product) -> bool {
        self.config
            .beverage_categories
            .iter()
            .any(|category| category == &product.category)
    }

    /// Category predicate for the filter pipeline. Visibility-only selectors
    /// (all, hidden, promoted) always pass; membership for those views is
    /// decided by the engine against curation state.
    pub fn matches(&self, product: &Product, filter: &CategoryFilter) -> bool {
        match filter {
            CategoryFilter::All | CategoryFilter::Hidden | CategoryFilter::Promoted => true,
            CategoryFilter::Healthy => self.is_healthy(product),
            CategoryFilter::Meals => self.is_meal(product),
            CategoryFilter::Beverages => self.is_beverage(product),
            CategoryFilter::Raw(name) => &product.category == name,
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}
