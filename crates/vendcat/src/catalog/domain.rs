use serde::{Deserialize, Serialize};

/// Opaque product identifier. The source feed mixes UUIDs and human-readable
/// slugs; both are treated as plain strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// A single record from the supplied product list. Records load once per
/// session as an immutable snapshot; curation overlays are keyed by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    #[serde(default)]
    pub size: String,
    /// Raw taxonomy value, e.g. "hot_foods", "beverages", "cold_beverage".
    pub category: String,
    /// Wholesale unit cost, the basis for all computed markup.
    pub unit_price: f64,
    #[serde(default)]
    pub case_price: Option<f64>,
    #[serde(default)]
    pub unit_count: Option<u32>,
    #[serde(default)]
    pub competitive_price: Option<f64>,
    #[serde(default)]
    pub vending_price_override: Option<f64>,
    #[serde(default)]
    pub seven_eleven_price: Option<f64>,
    #[serde(default)]
    pub popularity: Option<u32>,
    #[serde(default)]
    pub is_healthy: Option<bool>,
    #[serde(default)]
    pub rebate: Option<String>,
    #[serde(default, alias = "image")]
    pub image_url: Option<String>,
}

/// Category selector for a browse pass. "hidden" and "promoted" are
/// operator views rather than taxonomy values; "healthy", "meals", and
/// "beverages" are heuristic categories resolved by the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Hidden,
    Promoted,
    Healthy,
    Meals,
    Beverages,
    Raw(String),
}

impl CategoryFilter {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Self::All,
            "hidden" => Self::Hidden,
            "promoted" | "popular" | "top" => Self::Promoted,
            "healthy" => Self::Healthy,
            "meals" => Self::Meals,
            "beverages" => Self::Beverages,
            other => Self::Raw(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Hidden => "hidden",
            Self::Promoted => "promoted",
            Self::Healthy => "healthy",
            Self::Meals => "meals",
            Self::Beverages => "beverages",
            Self::Raw(name) => name.as_str(),
        }
    }
}

/// User-selectable ordering applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Popularity,
    PriceLow,
    PriceHigh,
    Margin,
    Name,
}

impl SortKey {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "price-low" => Self::PriceLow,
            "price-high" => Self::PriceHigh,
            "margin" => Self::Margin,
            "name" => Self::Name,
            _ => Self::Popularity,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Popularity => "popularity",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Margin => "margin",
            Self::Name => "name",
        }
    }
}

/// Display-price buckets. Boundaries are half-open on the low end, so a
/// resolved price of exactly 2.00 falls in the 2-4 bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriceBucket {
    UnderTwo,
    TwoToFour,
    FourToSix,
    SixUp,
}

impl PriceBucket {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "0-2" => Some(Self::UnderTwo),
            "2-4" => Some(Self::TwoToFour),
            "4-6" => Some(Self::FourToSix),
            "6+" => Some(Self::SixUp),
            _ => None,
        }
    }

    pub fn contains(self, price: f64) -> bool {
        match self {
            Self::UnderTwo => price < 2.0,
            Self::TwoToFour => (2.0..4.0).contains(&price),
            Self::FourToSix => (4.0..6.0).contains(&price),
            Self::SixUp => price >= 6.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::UnderTwo => "0-2",
            Self::TwoToFour => "2-4",
            Self::FourToSix => "4-6",
            Self::SixUp => "6+",
        }
    }
}

/// Immutable parameter set for one filter/sort pass. The caller owns this
/// state; the engine never keeps ambient filter state between passes.
#[derive(Debug, Clone, Default)]
pub struct FilterParams {
    pub category: CategoryFilter,
    pub brand: Option<String>,
    pub price_bucket: Option<PriceBucket>,
    pub search: Option<String>,
    pub sort: SortKey,
    /// Operator-only capability: keep hidden items in non-hidden views.
    pub include_hidden: bool,
}

impl FilterParams {
    pub(crate) fn active_search(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|query| !query.is_empty())
    }
}
