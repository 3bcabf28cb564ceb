//! Price discovery and tracked-value classification.
//!
//! - [`native_price`] - native asset USD price from the stablecoin pairs
//! - [`token_price`] - token price in native units via the whitelist
//! - [`volume`] - how much of a swap counts toward tracked USD volume
//! - [`liquidity`] - how much of a liquidity amount counts toward tracked USD
//! - [`sync`] - recomputation of bundle, token and pair values after a reserve sync
//!
//! Nothing in here writes. Resolvers return candidate values and the caller
//! persists them.

use std::sync::Arc;

use alloy::primitives::Address;

use crate::{
    config::PricingConfig,
    store::{EntityStore, PairRegistry},
};

pub mod liquidity;
pub mod native_price;
pub mod sync;
pub mod token_price;
pub mod volume;

pub use liquidity::tracked_liquidity_usd;
pub use sync::PairRepricing;
pub use token_price::TokenPrice;
pub use volume::{tracked_volume_usd, value_swap, SwapValuation};

/// Which side(s) of a pair sit on the whitelist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhitelistCoverage {
    Both,
    Token0,
    Token1,
    Neither,
}

impl WhitelistCoverage {
    pub fn of(config: &PricingConfig, token0: &Address, token1: &Address) -> Self {
        match (config.is_whitelisted(token0), config.is_whitelisted(token1)) {
            (true, true) => Self::Both,
            (true, false) => Self::Token0,
            (false, true) => Self::Token1,
            (false, false) => Self::Neither,
        }
    }
}

/// Store-backed price resolution.
///
/// Every call re-derives from the current store snapshot, so two calls
/// against unchanged state return identical results.
pub struct PriceResolver<S, R> {
    config: Arc<PricingConfig>,
    store: S,
    registry: R,
}

impl<S: EntityStore, R: PairRegistry> PriceResolver<S, R> {
    pub fn new(config: Arc<PricingConfig>, store: S, registry: R) -> Self {
        Self {
            config,
            store,
            registry,
        }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }
}
