use alloy::primitives::Address;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::utils::safe_div;

/// Constant-product pair state.
///
/// Token ordering is fixed at pair creation and never swapped.
///
/// ## Price Convention:
/// - `token0_price` = token0 per token1 (reserve0 / reserve1)
/// - `token1_price` = token1 per token0 (reserve1 / reserve0)
///
/// Both are zero while the opposite reserve is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pair {
    pub id: Address,
    pub token0: Address,
    pub token1: Address,

    #[serde(default)]
    pub reserve0: BigDecimal,
    #[serde(default)]
    pub reserve1: BigDecimal,

    // Pool value in native units / USD (written back after repricing)
    #[serde(default)]
    pub reserve_native: BigDecimal,
    #[serde(default)]
    pub reserve_usd: BigDecimal,
    #[serde(default)]
    pub tracked_reserve_native: BigDecimal,

    #[serde(default)]
    pub token0_price: BigDecimal,
    #[serde(default)]
    pub token1_price: BigDecimal,

    #[serde(default)]
    pub liquidity_provider_count: u64,
}

impl Pair {
    /// Fresh pair as emitted by the factory, with empty reserves.
    pub fn new(id: Address, token0: Address, token1: Address) -> Self {
        Self {
            id,
            token0,
            token1,
            reserve0: BigDecimal::default(),
            reserve1: BigDecimal::default(),
            reserve_native: BigDecimal::default(),
            reserve_usd: BigDecimal::default(),
            tracked_reserve_native: BigDecimal::default(),
            token0_price: BigDecimal::default(),
            token1_price: BigDecimal::default(),
            liquidity_provider_count: 0,
        }
    }

    /// Store new reserves and refresh both spot prices.
    pub fn set_reserves(&mut self, reserve0: BigDecimal, reserve1: BigDecimal) {
        self.token0_price = safe_div(&reserve0, &reserve1);
        self.token1_price = safe_div(&reserve1, &reserve0);
        self.reserve0 = reserve0;
        self.reserve1 = reserve1;
    }

    pub fn contains(&self, token: &Address) -> bool {
        self.token0 == *token || self.token1 == *token
    }

    /// The token on the other side of `token`, if `token` belongs to this pair.
    pub fn other_token(&self, token: &Address) -> Option<Address> {
        if self.token0 == *token {
            Some(self.token1)
        } else if self.token1 == *token {
            Some(self.token0)
        } else {
            None
        }
    }

    /// How many counterpart tokens one unit of `token` is worth.
    ///
    /// - token is token0 → token1 per token0 = `token1_price`
    /// - token is token1 → token0 per token1 = `token0_price`
    pub fn price_in_counterpart(&self, token: &Address) -> Option<&BigDecimal> {
        if self.token0 == *token {
            Some(&self.token1_price)
        } else if self.token1 == *token {
            Some(&self.token0_price)
        } else {
            None
        }
    }
}
