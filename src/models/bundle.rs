use bigdecimal::BigDecimal;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

/// Identifier of the singleton bundle entity.
pub const BUNDLE_ID: &str = "1";

/// Global reference price holder.
///
/// There is exactly one bundle per deployment. It carries the USD price of
/// one unit of the native asset, refreshed from the stablecoin pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    #[serde(default)]
    pub native_price_usd: BigDecimal,
}

impl Bundle {
    pub fn new(native_price_usd: BigDecimal) -> Self {
        Self { native_price_usd }
    }

    pub fn id(&self) -> &'static str {
        BUNDLE_ID
    }
}

impl Default for Bundle {
    fn default() -> Self {
        Self::new(BigDecimal::zero())
    }
}
