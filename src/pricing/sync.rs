use alloy::primitives::Address;
use bigdecimal::BigDecimal;

use super::{liquidity::tracked_liquidity_usd, PriceResolver};
use crate::{
    models::{Bundle, Pair, Token},
    store::{EntityStore, PairRegistry},
    utils::safe_div,
};

/// Candidate values after a pair's reserves changed.
///
/// Computed from one store snapshot; the caller writes them back.
#[derive(Debug, Clone, PartialEq)]
pub struct PairRepricing {
    pub native_price_usd: BigDecimal,
    pub token0_derived_native: BigDecimal,
    pub token1_derived_native: BigDecimal,
    /// reserve0 * d0 + reserve1 * d1
    pub reserve_native: BigDecimal,
    pub reserve_usd: BigDecimal,
    /// Whitelist-filtered reserves in native units
    pub tracked_reserve_native: BigDecimal,
}

impl PairRepricing {
    pub fn bundle(&self) -> Bundle {
        Bundle::new(self.native_price_usd.clone())
    }

    pub fn token0(&self, pair: &Pair) -> Token {
        Token::new(pair.token0, self.token0_derived_native.clone())
    }

    pub fn token1(&self, pair: &Pair) -> Token {
        Token::new(pair.token1, self.token1_derived_native.clone())
    }

    pub fn apply_to_pair(&self, pair: &mut Pair) {
        pair.reserve_native = self.reserve_native.clone();
        pair.reserve_usd = self.reserve_usd.clone();
        pair.tracked_reserve_native = self.tracked_reserve_native.clone();
    }
}

/// Store view with one token's price replaced by a value not yet written.
struct PendingToken<'a, S> {
    store: &'a S,
    token: &'a Token,
}

impl<S: EntityStore> EntityStore for PendingToken<'_, S> {
    fn token(&self, id: &Address) -> Option<Token> {
        if *id == self.token.id {
            Some(self.token.clone())
        } else {
            self.store.token(id)
        }
    }

    fn pair(&self, id: &Address) -> Option<Pair> {
        self.store.pair(id)
    }

    fn bundle(&self) -> Option<Bundle> {
        self.store.bundle()
    }
}

impl<S: EntityStore, R: PairRegistry> PriceResolver<S, R> {
    /// Recompute everything a reserve sync on `pair` affects.
    ///
    /// `pair` must already carry its new reserves, and the store must
    /// already hold that version, since the native price and the token
    /// search may read it back. token1 is searched with token0's new price
    /// in place, as if token0 had been written first.
    pub fn reprice_pair(&self, pair: &Pair) -> PairRepricing {
        let bundle = Bundle::new(self.native_price_usd());
        let token0 = Token::new(pair.token0, self.find_native_per_token(&pair.token0));

        let pending = PriceResolver {
            config: self.config.clone(),
            store: PendingToken {
                store: &self.store,
                token: &token0,
            },
            registry: &self.registry,
        };
        let token1 = Token::new(pair.token1, pending.find_native_per_token(&pair.token1));

        self.pair_values(pair, bundle, token0, token1)
    }

    /// Value `pair` against the bundle and token prices already stored.
    ///
    /// Missing entities count as zero.
    pub fn value_pair(&self, pair: &Pair) -> PairRepricing {
        let bundle = self.store.bundle().unwrap_or_default();
        let stored = |id: &Address| {
            self.store
                .token(id)
                .unwrap_or_else(|| Token::unpriced(*id))
        };

        self.pair_values(pair, bundle, stored(&pair.token0), stored(&pair.token1))
    }

    fn pair_values(&self, pair: &Pair, bundle: Bundle, token0: Token, token1: Token) -> PairRepricing {
        let tracked_usd = tracked_liquidity_usd(
            &self.config,
            &pair.reserve0,
            &token0,
            &pair.reserve1,
            &token1,
            &bundle,
        );
        let tracked_reserve_native = safe_div(&tracked_usd, &bundle.native_price_usd);

        let reserve_native =
            &pair.reserve0 * &token0.derived_native + &pair.reserve1 * &token1.derived_native;
        let reserve_usd = &reserve_native * &bundle.native_price_usd;

        PairRepricing {
            native_price_usd: bundle.native_price_usd,
            token0_derived_native: token0.derived_native,
            token1_derived_native: token1.derived_native,
            reserve_native,
            reserve_usd,
            tracked_reserve_native,
        }
    }
}
