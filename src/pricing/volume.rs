use bigdecimal::BigDecimal;
use num_traits::Zero;

use super::WhitelistCoverage;
use crate::{
    config::PricingConfig,
    models::{Bundle, Pair, Token},
    utils::{safe_div, TWO_BD},
};

/// Tracked USD volume of a swap.
///
/// Uses the whitelist approach:
/// - Untracked pair → 0, whatever else holds
/// - Pairs with few providers must clear a minimum USD reserve first
/// - Both tokens whitelisted → average of both sides' USD value
/// - One token whitelisted → full USD value of that side
/// - Neither whitelisted → 0
pub fn tracked_volume_usd(
    config: &PricingConfig,
    amount0: &BigDecimal,
    token0: &Token,
    amount1: &BigDecimal,
    token1: &Token,
    pair: &Pair,
    bundle: &Bundle,
) -> BigDecimal {
    if config.is_untracked(&pair.id) {
        return BigDecimal::zero();
    }

    let price0 = token0.price_usd(&bundle.native_price_usd);
    let price1 = token1.price_usd(&bundle.native_price_usd);
    let coverage = WhitelistCoverage::of(config, &token0.id, &token1.id);

    // Thin-pool guard: only vetoes, never changes the amount
    if pair.liquidity_provider_count < config.min_liquidity_providers() {
        let reserve0_usd = &pair.reserve0 * &price0;
        let reserve1_usd = &pair.reserve1 * &price1;
        let threshold = config.min_usd_new_pairs();

        let too_thin = match coverage {
            WhitelistCoverage::Both => reserve0_usd + reserve1_usd < *threshold,
            WhitelistCoverage::Token0 => reserve0_usd * &*TWO_BD < *threshold,
            WhitelistCoverage::Token1 => reserve1_usd * &*TWO_BD < *threshold,
            // falls through: classification below yields zero
            WhitelistCoverage::Neither => false,
        };
        if too_thin {
            return BigDecimal::zero();
        }
    }

    match coverage {
        WhitelistCoverage::Both => (amount0 * price0 + amount1 * price1) / &*TWO_BD,
        WhitelistCoverage::Token0 => amount0 * price0,
        WhitelistCoverage::Token1 => amount1 * price1,
        WhitelistCoverage::Neither => BigDecimal::zero(),
    }
}

/// Full valuation of a swap for pair, token and global aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapValuation {
    /// Volume that counts toward tracked statistics
    pub tracked_usd: BigDecimal,
    /// `tracked_usd` expressed in native units
    pub tracked_native: BigDecimal,
    /// Average of both sides in native units, whitelist or not
    pub derived_native: BigDecimal,
    /// `derived_native` in USD, reported as untracked volume
    pub untracked_usd: BigDecimal,
}

/// Value a swap both ways: tracked (whitelist-filtered) and derived
/// (every priced token counts).
pub fn value_swap(
    config: &PricingConfig,
    amount0: &BigDecimal,
    token0: &Token,
    amount1: &BigDecimal,
    token1: &Token,
    pair: &Pair,
    bundle: &Bundle,
) -> SwapValuation {
    let tracked_usd = tracked_volume_usd(config, amount0, token0, amount1, token1, pair, bundle);
    let tracked_native = safe_div(&tracked_usd, &bundle.native_price_usd);

    let derived_native =
        (amount0 * &token0.derived_native + amount1 * &token1.derived_native) / &*TWO_BD;
    let untracked_usd = &derived_native * &bundle.native_price_usd;

    SwapValuation {
        tracked_usd,
        tracked_native,
        derived_native,
        untracked_usd,
    }
}
