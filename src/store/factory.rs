//! Pair discovery against the on-chain factory.
//!
//! The valuation search is synchronous, so factory lookups are resolved up
//! front: every (token, anchor) combination the search can ask about is
//! fetched concurrently and collected into a [`PairIndex`].

use alloy::primitives::Address;
use alloy::providers::{DynProvider, ProviderBuilder};
use anyhow::{Context, Result};
use futures::{stream, StreamExt, TryStreamExt};
use log::info;
use rustc_hash::FxHashSet;
use url::Url;

use super::memory::PairIndex;
use crate::abis::IUniswapV2Factory;

/// Build an HTTP provider for factory calls.
pub fn connect(rpc_url: &str) -> Result<DynProvider> {
    let url = Url::parse(rpc_url).with_context(|| format!("Invalid RPC URL {rpc_url}"))?;
    let client = ProviderBuilder::new().connect_http(url);
    Ok(DynProvider::new(client))
}

/// Every unordered (token, anchor) combination worth asking the factory
/// about. A token is never paired with itself.
pub fn candidate_pairs(tokens: &[Address], anchors: &[Address]) -> Vec<(Address, Address)> {
    let mut seen = FxHashSet::default();
    let mut candidates = Vec::new();

    for token in tokens {
        for anchor in anchors {
            if token == anchor {
                continue;
            }
            let key = if token < anchor { (*token, *anchor) } else { (*anchor, *token) };
            if seen.insert(key) {
                candidates.push(key);
            }
        }
    }

    candidates
}

/// Query `getPair` for every candidate combination and index the hits.
pub async fn fetch_factory_pairs(
    provider: &DynProvider,
    factory: Address,
    tokens: &[Address],
    anchors: &[Address],
    concurrency: usize,
) -> Result<PairIndex> {
    let candidates = candidate_pairs(tokens, anchors);
    let total = candidates.len();
    let factory = IUniswapV2Factory::new(factory, provider.clone());

    let resolved: Vec<(Address, Address, Address)> = stream::iter(candidates)
        .map(|(token_a, token_b)| {
            let factory = &factory;
            async move {
                let pair = factory
                    .getPair(token_a, token_b)
                    .call()
                    .await
                    .with_context(|| format!("getPair({token_a}, {token_b}) failed"))?;
                Ok::<_, anyhow::Error>((token_a, token_b, pair))
            }
        })
        .buffer_unordered(concurrency.max(1))
        .try_collect()
        .await?;

    let mut index = PairIndex::new();
    for (token_a, token_b, pair) in resolved {
        index.insert(token_a, token_b, pair);
    }

    info!("Resolved {} of {} candidate pairs from factory", index.len(), total);

    Ok(index)
}
