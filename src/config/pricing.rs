use alloy::primitives::Address;
use anyhow::{bail, Result};
use bigdecimal::BigDecimal;
use log::warn;
use num_traits::Signed;
use rustc_hash::FxHashSet;

use super::settings::{PricingSettings, StablePairs};

/// Validated reference data used by the resolvers.
///
/// Keeps the whitelist both as an ordered list (search priority) and as a
/// set (membership checks on every swap).
#[derive(Debug, Clone)]
pub struct PricingConfig {
    native_token: Address,
    whitelist: Vec<Address>,
    whitelist_set: FxHashSet<Address>,
    stable_pairs: StablePairs,
    untracked_pairs: FxHashSet<Address>,
    min_liquidity_native: BigDecimal,
    min_usd_new_pairs: BigDecimal,
    min_liquidity_providers: u64,
}

impl PricingConfig {
    pub fn from_settings(settings: &PricingSettings) -> Result<Self> {
        if settings.whitelist.is_empty() {
            bail!("pricing.whitelist must contain at least one anchor token");
        }

        let mut whitelist_set = FxHashSet::default();
        for token in &settings.whitelist {
            if !whitelist_set.insert(*token) {
                bail!("pricing.whitelist contains {token} more than once");
            }
        }

        if settings.min_liquidity_native.is_negative() {
            bail!("pricing.min_liquidity_native must not be negative");
        }
        if settings.min_usd_new_pairs.is_negative() {
            bail!("pricing.min_usd_new_pairs must not be negative");
        }

        if !whitelist_set.contains(&settings.native_token) {
            warn!(
                "Native token {} is not whitelisted, its pairs will not count toward tracked volume",
                settings.native_token
            );
        }

        Ok(Self {
            native_token: settings.native_token,
            whitelist: settings.whitelist.clone(),
            whitelist_set,
            stable_pairs: settings.stable_pairs.clone(),
            untracked_pairs: settings.untracked_pairs.iter().copied().collect(),
            min_liquidity_native: settings.min_liquidity_native.clone(),
            min_usd_new_pairs: settings.min_usd_new_pairs.clone(),
            min_liquidity_providers: settings.min_liquidity_providers,
        })
    }

    pub fn native_token(&self) -> Address {
        self.native_token
    }

    pub fn is_native(&self, token: &Address) -> bool {
        self.native_token == *token
    }

    /// Anchors in declared priority order.
    pub fn whitelist(&self) -> &[Address] {
        &self.whitelist
    }

    pub fn is_whitelisted(&self, token: &Address) -> bool {
        self.whitelist_set.contains(token)
    }

    pub fn stable_pairs(&self) -> &StablePairs {
        &self.stable_pairs
    }

    pub fn is_untracked(&self, pair: &Address) -> bool {
        self.untracked_pairs.contains(pair)
    }

    pub fn min_liquidity_native(&self) -> &BigDecimal {
        &self.min_liquidity_native
    }

    pub fn min_usd_new_pairs(&self) -> &BigDecimal {
        &self.min_usd_new_pairs
    }

    pub fn min_liquidity_providers(&self) -> u64 {
        self.min_liquidity_providers
    }
}

impl TryFrom<&PricingSettings> for PricingConfig {
    type Error = anyhow::Error;

    fn try_from(settings: &PricingSettings) -> Result<Self> {
        Self::from_settings(settings)
    }
}
