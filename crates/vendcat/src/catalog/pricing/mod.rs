mod config;

pub use config::{PricingPolicy, PricingStrategy, ReferencePriceSource};

use super::domain::Product;
use thiserror::Error;

/// Minimum acceptable markup multiple over wholesale.
pub const MIN_MARKUP_MULTIPLE: f64 = 2.0;

/// Price computation asked to operate on an unusable wholesale cost.
#[derive(Debug, Error)]
pub enum PricingError {
    #[error("wholesale cost must be a positive amount, got {0}")]
    InvalidWholesaleCost(f64),
}

/// Resolve the displayable vending price for one product.
///
/// Precedence, first match wins: operator custom price, data-source
/// override, external reference price, computed markup over wholesale.
/// The result is deterministic and always positive.
pub fn resolve_price(
    product: &Product,
    custom_price: Option<f64>,
    policy: &PricingPolicy,
) -> Result<f64, PricingError> {
    if let Some(price) = custom_price {
        return Ok(price);
    }
    if let Some(price) = product.vending_price_override {
        return Ok(price);
    }

    let wholesale = product.unit_price;
    if !wholesale.is_finite() || wholesale <= 0.0 {
        return Err(PricingError::InvalidWholesaleCost(wholesale));
    }

    let reference = match policy.reference_source {
        ReferencePriceSource::Competitive => product.competitive_price,
        ReferencePriceSource::SevenEleven => product.seven_eleven_price,
    };
    if let Some(reference) = reference.filter(|price| *price > 0.0) {
        if !policy.competitive_floor || reference >= wholesale * MIN_MARKUP_MULTIPLE {
            return Ok(reference);
        }
        // Reference sits under the markup floor: price from wholesale instead.
    }

    let computed = match policy.strategy {
        PricingStrategy::TieredAggressive => tiered_markup(wholesale),
        PricingStrategy::FlatMarkup => ceil_to_step(wholesale * 1.7, 0.25),
    };

    if policy.markup_floor && policy.strategy == PricingStrategy::TieredAggressive {
        Ok(computed.max(wholesale * MIN_MARKUP_MULTIPLE))
    } else {
        Ok(computed)
    }
}

/// Markup ratio of a resolved price over wholesale.
pub fn markup_ratio(wholesale: f64, resolved: f64) -> f64 {
    (resolved - wholesale) / wholesale
}

fn tiered_markup(wholesale: f64) -> f64 {
    let multiplier = if wholesale < 1.0 {
        3.25
    } else if wholesale < 2.0 {
        2.75
    } else if wholesale < 4.0 {
        2.5
    } else {
        2.25
    };

    let raw = wholesale * multiplier;

    // Vending-friendly steps: quarters under $2, halves under $5, whole
    // dollars above. Always rounds up to protect margin.
    if raw < 2.0 {
        ceil_to_step(raw, 0.25)
    } else if raw < 5.0 {
        ceil_to_step(raw, 0.5)
    } else {
        raw.ceil()
    }
}

fn ceil_to_step(value: f64, step: f64) -> f64 {
    (value / step).ceil() * step
}
