use alloy::primitives::Address;
use bigdecimal::BigDecimal;
use log::debug;
use num_traits::{One, Zero};

use super::PriceResolver;
use crate::store::{EntityStore, PairRegistry};

/// Outcome of the whitelist search for a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenPrice {
    /// The token is the native asset itself.
    Native,
    /// Priced through `pair` against the whitelisted `anchor`.
    Anchored {
        anchor: Address,
        pair: Address,
        derived_native: BigDecimal,
    },
    /// No sufficiently liquid whitelisted pair.
    Unpriced,
}

impl TokenPrice {
    /// Price in native units, zero when unpriced.
    pub fn derived_native(&self) -> BigDecimal {
        match self {
            Self::Native => BigDecimal::one(),
            Self::Anchored { derived_native, .. } => derived_native.clone(),
            Self::Unpriced => BigDecimal::zero(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unpriced)
    }
}

impl<S: EntityStore, R: PairRegistry> PriceResolver<S, R> {
    /// Search the whitelist for a pair that prices `token` in native units.
    ///
    /// Anchors are tried in declared order and the first pair whose
    /// `reserve_native` exceeds the minimum liquidity wins, even if a later
    /// anchor has a deeper pool. Single hop only: the anchor's own
    /// `derived_native` is read from the store, not recomputed.
    pub fn resolve_token(&self, token: &Address) -> TokenPrice {
        if self.config.is_native(token) {
            return TokenPrice::Native;
        }

        for anchor in self.config.whitelist() {
            if anchor == token {
                continue;
            }

            let Some(pair_id) = self.registry.get_pair(token, anchor) else {
                continue;
            };

            let Some(pair) = self.store.pair(&pair_id) else {
                debug!("Registry returned pair {pair_id} missing from store");
                continue;
            };

            // token1 per token0 when we are token0, token0 per token1 otherwise
            let (Some(counterpart), Some(price)) =
                (pair.other_token(token), pair.price_in_counterpart(token))
            else {
                continue;
            };

            if pair.reserve_native <= *self.config.min_liquidity_native() {
                continue;
            }

            let counterpart_native = self
                .store
                .token(&counterpart)
                .map(|t| t.derived_native)
                .unwrap_or_default();

            debug!("Token {token} priced against {anchor} via pair {pair_id}");

            return TokenPrice::Anchored {
                anchor: *anchor,
                pair: pair_id,
                derived_native: price * counterpart_native,
            };
        }

        TokenPrice::Unpriced
    }

    /// Derived native price of `token`, zero when no anchor prices it.
    pub fn find_native_per_token(&self, token: &Address) -> BigDecimal {
        self.resolve_token(token).derived_native()
    }
}
