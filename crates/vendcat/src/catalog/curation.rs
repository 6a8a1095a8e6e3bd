use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::domain::ProductId;

/// Consistent view of the curation overlay, read once per filter/sort pass.
/// Mutations made through the store take effect on the next snapshot only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurationSnapshot {
    pub hidden: HashSet<ProductId>,
    /// Order is significant: position defines the promoted rank.
    pub promoted: Vec<ProductId>,
    pub custom_prices: HashMap<ProductId, f64>,
    /// Viewer-scoped saved-interest order, independent of admin curation.
    pub interest: Vec<ProductId>,
}

impl CurationSnapshot {
    pub fn is_hidden(&self, id: &ProductId) -> bool {
        self.hidden.contains(id)
    }

    /// 1-based rank within the promoted list, if promoted.
    pub fn promoted_rank(&self, id: &ProductId) -> Option<usize> {
        self.promoted
            .iter()
            .position(|entry| entry == id)
            .map(|index| index + 1)
    }

    pub fn custom_price(&self, id: &ProductId) -> Option<f64> {
        self.custom_prices.get(id).copied()
    }

    pub fn hidden_count(&self) -> usize {
        self.hidden.len()
    }
}

/// Operator-supplied defaults applied the first time a store initializes
/// with no persisted state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurationSeed {
    #[serde(default)]
    pub hidden: Vec<ProductId>,
    #[serde(default)]
    pub promoted: Vec<ProductId>,
    #[serde(default)]
    pub custom_prices: HashMap<ProductId, f64>,
}

impl CurationSeed {
    /// Sanitized initial snapshot: promoted duplicates collapse to their
    /// first position and non-positive prices are discarded.
    pub fn into_snapshot(self) -> CurationSnapshot {
        let mut promoted: Vec<ProductId> = Vec::with_capacity(self.promoted.len());
        for id in self.promoted {
            if !promoted.contains(&id) {
                promoted.push(id);
            }
        }

        let custom_prices = self
            .custom_prices
            .into_iter()
            .filter(|(_, price)| price.is_finite() && *price > 0.0)
            .collect();

        CurationSnapshot {
            hidden: self.hidden.into_iter().collect(),
            promoted,
            custom_prices,
            interest: Vec::new(),
        }
    }
}

/// Error enumeration for curation store failures.
#[derive(Debug, thiserror::Error)]
pub enum CurationError {
    #[error("stored curation state is malformed: {0}")]
    Malformed(String),
    #[error("curation store unavailable: {0}")]
    Unavailable(String),
}

/// Storage abstraction over the four curation collections. Backing storage
/// is an external concern; implementations must preserve insertion order
/// for the promoted and interest lists.
///
/// All mutations are idempotent: adding an already-present id or removing
/// an absent one is a no-op, not an error. `promote` appends to the end of
/// the order unless the id is already promoted.
pub trait CurationStore: Send + Sync {
    fn snapshot(&self) -> Result<CurationSnapshot, CurationError>;

    fn hide(&self, id: &ProductId) -> Result<(), CurationError>;
    fn unhide(&self, id: &ProductId) -> Result<(), CurationError>;

    fn promote(&self, id: &ProductId) -> Result<(), CurationError>;
    fn demote(&self, id: &ProductId) -> Result<(), CurationError>;

    fn set_custom_price(&self, id: &ProductId, price: f64) -> Result<(), CurationError>;
    fn clear_custom_price(&self, id: &ProductId) -> Result<(), CurationError>;

    fn add_interest(&self, id: &ProductId) -> Result<(), CurationError>;
    fn remove_interest(&self, id: &ProductId) -> Result<(), CurationError>;
}
