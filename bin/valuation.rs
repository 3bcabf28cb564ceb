use std::sync::Arc;

use alloy::primitives::Address;
use anyhow::Context;
use jemallocator::Jemalloc;
use log::{debug, info, LevelFilter};
use simple_logger::SimpleLogger;

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use valuation::{
    store::{self, MemoryStore, Snapshot},
    Bundle, Pair, PriceResolver, PricingConfig, Settings, Token, TokenPrice,
};

#[tokio::main()]
async fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .init()
        .unwrap();

    // Load configuration
    let settings = Settings::new()
        .context("Failed to load config.yaml. Please ensure it exists and is valid")?;

    let config = Arc::new(
        PricingConfig::from_settings(&settings.pricing).context("Invalid pricing configuration")?,
    );

    let snapshot = Snapshot::from_file(&settings.snapshot_path)?;
    let mut store = MemoryStore::from(snapshot);

    info!(
        "Loaded snapshot {}: {} tokens, {} pairs",
        settings.snapshot_path,
        store.tokens().count(),
        store.pairs().count()
    );

    // Pair registry: on-chain factory when configured, snapshot pairs otherwise
    let registry = match &settings.rpc {
        Some(rpc) => {
            let provider = store::connect(&rpc.url)?;
            let tokens: Vec<Address> = store.tokens().map(|t| t.id).collect();
            store::fetch_factory_pairs(
                &provider,
                rpc.factory,
                &tokens,
                config.whitelist(),
                rpc.concurrency,
            )
            .await
            .context("Failed to resolve pairs from factory")?
        },
        None => store.pair_index(),
    };

    // Pass 1: bundle and token prices, all from the loaded snapshot
    let (bundle, prices) = {
        let resolver = PriceResolver::new(config.clone(), &store, &registry);
        let bundle = Bundle::new(resolver.native_price_usd());
        let prices: Vec<(Address, TokenPrice)> = store
            .tokens()
            .map(|token| (token.id, resolver.resolve_token(&token.id)))
            .collect();
        (bundle, prices)
    };

    info!("Native price: {} USD", bundle.native_price_usd);

    let mut unpriced = 0usize;
    for (id, price) in prices {
        match &price {
            TokenPrice::Native => debug!("{id}: native"),
            TokenPrice::Anchored {
                anchor,
                derived_native,
                ..
            } => debug!("{id}: {derived_native} native via {anchor}"),
            TokenPrice::Unpriced => unpriced += 1,
        }
        store.insert_token(Token::new(id, price.derived_native()));
    }
    store.set_bundle(bundle);

    info!("{unpriced} tokens have no whitelisted pair deep enough to price them");

    // Pass 2: pair values from the stored tokens and bundle
    let repriced: Vec<Pair> = {
        let resolver = PriceResolver::new(config.clone(), &store, &registry);
        store
            .pairs()
            .map(|pair| {
                let mut pair = pair.clone();
                resolver.value_pair(&pair).apply_to_pair(&mut pair);
                pair
            })
            .collect()
    };
    for pair in repriced {
        store.insert_pair(pair);
    }

    if let Some(output_path) = &settings.output_path {
        let json = serde_json::to_string_pretty(&store.into_snapshot())
            .context("Failed to serialize snapshot")?;
        std::fs::write(output_path, json)
            .with_context(|| format!("Failed to write snapshot to {output_path}"))?;
        info!("Repriced snapshot written to {output_path}");
    }

    Ok(())
}
