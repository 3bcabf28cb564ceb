use bigdecimal::BigDecimal;
use num_traits::Zero;

use super::WhitelistCoverage;
use crate::{
    config::PricingConfig,
    models::{Bundle, Token},
    utils::TWO_BD,
};

/// Tracked USD value of liquidity amounts.
///
/// No untracked-pair override and no thin-pool guard here, only the
/// whitelist:
/// - Both tokens whitelisted → sum of both sides
/// - One token whitelisted → double that side (balanced pool assumption)
/// - Neither whitelisted → 0
pub fn tracked_liquidity_usd(
    config: &PricingConfig,
    amount0: &BigDecimal,
    token0: &Token,
    amount1: &BigDecimal,
    token1: &Token,
    bundle: &Bundle,
) -> BigDecimal {
    let price0 = token0.price_usd(&bundle.native_price_usd);
    let price1 = token1.price_usd(&bundle.native_price_usd);

    match WhitelistCoverage::of(config, &token0.id, &token1.id) {
        WhitelistCoverage::Both => amount0 * price0 + amount1 * price1,
        WhitelistCoverage::Token0 => amount0 * price0 * &*TWO_BD,
        WhitelistCoverage::Token1 => amount1 * price1 * &*TWO_BD,
        WhitelistCoverage::Neither => BigDecimal::zero(),
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;

    #[test]
    fn test_both_whitelisted_sums() {
        let liquidity = tracked_liquidity_usd(
            &config(),
            &dec("100"),
            &token(USDC, "0.5"),
            &dec("50"),
            &token(WNATIVE, "1"),
            &bundle("2"),
        );
        assert_eq!(liquidity, dec("200"));
    }

    #[test]
    fn test_single_whitelisted_doubles() {
        let x = dec("12.5");
        let p = dec("0.8");
        let r = dec("3");

        let liquidity = tracked_liquidity_usd(
            &config(),
            &dec("1000"),
            &token(MEME, "9"),
            &x,
            &Token::new(DAI, p.clone()),
            &bundle("3"),
        );
        assert_eq!(liquidity, dec("2") * &x * &p * &r);
        assert_eq!(liquidity, dec("60"));
    }

    #[test]
    fn test_neither_whitelisted_is_zero() {
        let liquidity = tracked_liquidity_usd(
            &config(),
            &dec("1000"),
            &token(MEME, "1"),
            &dec("1000"),
            &token(SCAM, "1"),
            &bundle("3"),
        );
        assert!(liquidity.is_zero());
    }

    #[test]
    fn test_one_sided_deposit_doubles_whitelisted_side() {
        let liquidity = tracked_liquidity_usd(
            &config(),
            &dec("10"),
            &token(USDC, "1"),
            &dec("0"),
            &token(MEME, "0"),
            &bundle("1"),
        );
        assert_eq!(liquidity, dec("20"));
    }
}
