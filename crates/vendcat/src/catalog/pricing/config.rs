use serde::{Deserialize, Serialize};

/// Markup strategy used when no override or reference price applies. The
/// product line moved between these two over time, so both stay supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PricingStrategy {
    /// Tiered 2.25x-3.25x markup with vending-friendly rounding steps.
    TieredAggressive,
    /// Fixed 1.7x markup rounded up to the nearest quarter.
    FlatMarkup,
}

/// Which product field supplies the external reference price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferencePriceSource {
    Competitive,
    SevenEleven,
}

/// Pricing policy for one catalog deployment. Every divergent behavior
/// observed across the product line's lifetime is a named flag here rather
/// than a silent pick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingPolicy {
    pub strategy: PricingStrategy,
    pub reference_source: ReferencePriceSource,
    /// Accept the reference price only when it already carries at least a
    /// 100% markup over wholesale; below that, fall through to computed
    /// markup instead of selling under cost basis.
    pub competitive_floor: bool,
    /// Floor the computed tiered result at twice wholesale.
    pub markup_floor: bool,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            strategy: PricingStrategy::TieredAggressive,
            reference_source: ReferencePriceSource::Competitive,
            competitive_floor: true,
            markup_floor: true,
        }
    }
}

impl PricingPolicy {
    pub fn flat() -> Self {
        Self {
            strategy: PricingStrategy::FlatMarkup,
            ..Self::default()
        }
    }
}
