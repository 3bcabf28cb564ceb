use alloy::primitives::Address;
use bigdecimal::BigDecimal;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

/// Token valuation state.
///
/// `derived_native` is the price of one unit of this token expressed in
/// native-asset units. Zero means the token is unpriced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub id: Address,
    #[serde(default)]
    pub derived_native: BigDecimal,
}

impl Token {
    pub fn new(id: Address, derived_native: BigDecimal) -> Self {
        Self { id, derived_native }
    }

    /// A token seen for the first time, not yet priced.
    pub fn unpriced(id: Address) -> Self {
        Self::new(id, BigDecimal::zero())
    }

    pub fn is_priced(&self) -> bool {
        !self.derived_native.is_zero()
    }

    /// USD price of one unit given the current native-asset USD price.
    pub fn price_usd(&self, native_price_usd: &BigDecimal) -> BigDecimal {
        &self.derived_native * native_price_usd
    }
}
