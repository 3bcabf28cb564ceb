use bigdecimal::BigDecimal;
use log::debug;
use num_traits::Zero;

use super::PriceResolver;
use crate::{
    store::{EntityStore, PairRegistry},
    utils::safe_div,
};

impl<S: EntityStore, R: PairRegistry> PriceResolver<S, R> {
    /// USD price of one unit of the native asset.
    ///
    /// ## Algorithm:
    /// - Both stable pairs present: reserve-weighted average of the two
    ///   implied prices, weighted by each pair's native-side reserve
    /// - Only the token1-stable pair present: its implied price
    /// - Otherwise: zero (no USD reference yet)
    ///
    /// ## Sides:
    /// - token0-stable pair: native reserve = reserve1, USD per native = token0_price
    /// - token1-stable pair: native reserve = reserve0, USD per native = token1_price
    pub fn native_price_usd(&self) -> BigDecimal {
        let stable_pairs = self.config.stable_pairs();
        let token0_stable = stable_pairs
            .token0_stable
            .and_then(|id| self.store.pair(&id));
        let token1_stable = stable_pairs
            .token1_stable
            .and_then(|id| self.store.pair(&id));

        match (token0_stable, token1_stable) {
            (Some(a), Some(b)) => {
                let total_native = &a.reserve1 + &b.reserve0;
                let a_weight = safe_div(&a.reserve1, &total_native);
                let b_weight = safe_div(&b.reserve0, &total_native);
                a.token0_price * a_weight + b.token1_price * b_weight
            },
            (None, Some(b)) => b.token1_price,
            (Some(a), None) => {
                // token0-stable pair alone does not price
                debug!("Stable pair {} present without its companion, native price unset", a.id);
                BigDecimal::zero()
            },
            (None, None) => BigDecimal::zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::super::PriceResolver;
    use crate::config::{PricingConfig, StablePairs};
    use bigdecimal::BigDecimal;
    use num_traits::Zero;
    use std::sync::Arc;

    #[test]
    fn test_weighted_by_native_reserves() {
        // token0-stable: 1000 native vs 2000 USDC -> 2.0 USD per native
        let a = pair(USDC_NATIVE_PAIR, USDC, WNATIVE, "2000", "1000", "2000");
        // token1-stable: 3000 native vs 6600 DAI -> 2.2 USD per native
        let b = pair(NATIVE_DAI_PAIR, WNATIVE, DAI, "3000", "6600", "6000");
        let (store, index) = world(vec![a.clone(), b.clone()], vec![]);
        let resolver = PriceResolver::new(config(), &store, &index);

        let expected = dec("0.25") * &a.token0_price + dec("0.75") * &b.token1_price;
        assert_eq!(resolver.native_price_usd(), expected);
        assert_eq!(resolver.native_price_usd(), dec("2.15"));
    }

    #[test]
    fn test_only_token1_stable_pair() {
        let b = pair(NATIVE_DAI_PAIR, WNATIVE, DAI, "10", "4", "20");
        let (store, index) = world(vec![b], vec![]);
        let resolver = PriceResolver::new(config(), &store, &index);

        assert_eq!(resolver.native_price_usd(), dec("0.4"));
    }

    #[test]
    fn test_only_token0_stable_pair_is_zero() {
        let a = pair(USDC_NATIVE_PAIR, USDC, WNATIVE, "2000", "1000", "2000");
        let (store, index) = world(vec![a], vec![]);
        let resolver = PriceResolver::new(config(), &store, &index);

        assert!(resolver.native_price_usd().is_zero());
    }

    #[test]
    fn test_no_stable_pairs() {
        let (store, index) = world(vec![], vec![]);
        let resolver = PriceResolver::new(config(), &store, &index);

        assert!(resolver.native_price_usd().is_zero());
    }

    #[test]
    fn test_unconfigured_stable_pairs() {
        let mut settings = settings();
        settings.stable_pairs = StablePairs::default();
        let config = Arc::new(PricingConfig::from_settings(&settings).unwrap());

        let b = pair(NATIVE_DAI_PAIR, WNATIVE, DAI, "10", "4", "20");
        let (store, index) = world(vec![b], vec![]);
        let resolver = PriceResolver::new(config, &store, &index);

        assert!(resolver.native_price_usd().is_zero());
    }

    #[test]
    fn test_empty_native_reserves_do_not_divide_by_zero() {
        let a = pair(USDC_NATIVE_PAIR, USDC, WNATIVE, "0", "0", "0");
        let b = pair(NATIVE_DAI_PAIR, WNATIVE, DAI, "0", "0", "0");
        let (store, index) = world(vec![a, b], vec![]);
        let resolver = PriceResolver::new(config(), &store, &index);

        assert_eq!(resolver.native_price_usd(), BigDecimal::zero());
    }
}
