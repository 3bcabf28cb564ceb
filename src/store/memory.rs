use std::path::Path;

use alloy::primitives::Address;
use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::{EntityStore, PairRegistry};
use crate::models::{Bundle, Pair, Token};

/// Serialized state of the entity store at a given block.
///
/// Decimals are written as strings to keep full precision through JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub bundle: Option<Bundle>,
    #[serde(default)]
    pub tokens: Vec<Token>,
    #[serde(default)]
    pub pairs: Vec<Pair>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse snapshot JSON")
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        Self::from_json(&raw)
    }
}

/// In-memory entity store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tokens: FxHashMap<Address, Token>,
    pairs: FxHashMap<Address, Pair>,
    bundle: Option<Bundle>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_token(&mut self, token: Token) {
        self.tokens.insert(token.id, token);
    }

    pub fn insert_pair(&mut self, pair: Pair) {
        self.pairs.insert(pair.id, pair);
    }

    pub fn set_bundle(&mut self, bundle: Bundle) {
        self.bundle = Some(bundle);
    }

    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.values()
    }

    pub fn pairs(&self) -> impl Iterator<Item = &Pair> {
        self.pairs.values()
    }

    /// Registry over every pair currently held by the store.
    pub fn pair_index(&self) -> PairIndex {
        PairIndex::from_pairs(self.pairs.values())
    }

    pub fn into_snapshot(self) -> Snapshot {
        Snapshot {
            bundle: self.bundle,
            tokens: self.tokens.into_values().collect(),
            pairs: self.pairs.into_values().collect(),
        }
    }
}

impl From<Snapshot> for MemoryStore {
    fn from(snapshot: Snapshot) -> Self {
        let mut store = Self::new();
        for token in snapshot.tokens {
            store.insert_token(token);
        }
        for pair in snapshot.pairs {
            store.insert_pair(pair);
        }
        store.bundle = snapshot.bundle;
        store
    }
}

impl EntityStore for MemoryStore {
    fn token(&self, id: &Address) -> Option<Token> {
        self.tokens.get(id).cloned()
    }

    fn pair(&self, id: &Address) -> Option<Pair> {
        self.pairs.get(id).cloned()
    }

    fn bundle(&self) -> Option<Bundle> {
        self.bundle.clone()
    }
}

/// Pair registry keyed by the unordered token pair.
///
/// Mirrors the factory's `getPair`: lookups are symmetric in their
/// arguments.
#[derive(Debug, Clone, Default)]
pub struct PairIndex {
    pairs: FxHashMap<(Address, Address), Address>,
}

impl PairIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = &'a Pair>) -> Self {
        let mut index = Self::new();
        for pair in pairs {
            index.insert(pair.token0, pair.token1, pair.id);
        }
        index
    }

    /// Register a pair. The zero address is ignored.
    pub fn insert(&mut self, token_a: Address, token_b: Address, pair: Address) {
        if pair.is_zero() {
            return;
        }
        self.pairs.insert(sort_tokens(token_a, token_b), pair);
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl PairRegistry for PairIndex {
    fn get_pair(&self, token_a: &Address, token_b: &Address) -> Option<Address> {
        self.pairs.get(&sort_tokens(*token_a, *token_b)).copied()
    }
}

/// Lower address first, like the factory's token sorting.
fn sort_tokens(a: Address, b: Address) -> (Address, Address) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;
    use bigdecimal::BigDecimal;

    const TOKEN_A: Address = address!("0x1000000000000000000000000000000000000001");
    const TOKEN_B: Address = address!("0x2000000000000000000000000000000000000002");
    const PAIR_AB: Address = address!("0xab00000000000000000000000000000000000000");

    #[test]
    fn test_pair_index_is_symmetric() {
        let mut index = PairIndex::new();
        index.insert(TOKEN_B, TOKEN_A, PAIR_AB);

        assert_eq!(index.get_pair(&TOKEN_A, &TOKEN_B), Some(PAIR_AB));
        assert_eq!(index.get_pair(&TOKEN_B, &TOKEN_A), Some(PAIR_AB));
        assert_eq!(index.get_pair(&TOKEN_A, &PAIR_AB), None);
    }

    #[test]
    fn test_pair_index_ignores_zero_address() {
        let mut index = PairIndex::new();
        index.insert(TOKEN_A, TOKEN_B, Address::ZERO);

        assert!(index.is_empty());
        assert_eq!(index.get_pair(&TOKEN_A, &TOKEN_B), None);
    }

    #[test]
    fn test_snapshot_json_loading() {
        let json = r#"{
            "bundle": { "native_price_usd": "0.42" },
            "tokens": [
                { "id": "0x1000000000000000000000000000000000000001", "derived_native": "1" },
                { "id": "0x2000000000000000000000000000000000000002" }
            ],
            "pairs": [
                {
                    "id": "0xab00000000000000000000000000000000000000",
                    "token0": "0x1000000000000000000000000000000000000001",
                    "token1": "0x2000000000000000000000000000000000000002",
                    "reserve0": "1000",
                    "reserve1": "250",
                    "reserve_native": "2000",
                    "token0_price": "4",
                    "token1_price": "0.25",
                    "liquidity_provider_count": 12
                }
            ]
        }"#;

        let store = MemoryStore::from(Snapshot::from_json(json).unwrap());

        let bundle = store.bundle().unwrap();
        assert_eq!(bundle.native_price_usd, "0.42".parse::<BigDecimal>().unwrap());

        let token_b = store.token(&TOKEN_B).unwrap();
        assert!(!token_b.is_priced());

        let pair = store.pair(&PAIR_AB).unwrap();
        assert_eq!(pair.reserve1, BigDecimal::from(250u32));
        assert_eq!(pair.liquidity_provider_count, 12);
        assert_eq!(pair.reserve_usd, BigDecimal::default());

        assert_eq!(store.pair_index().get_pair(&TOKEN_B, &TOKEN_A), Some(PAIR_AB));
    }

    #[test]
    fn test_snapshot_rejects_garbage() {
        assert!(Snapshot::from_json("{ \"tokens\": 3 }").is_err());
    }

    #[test]
    fn test_missing_snapshot_file() {
        let err = Snapshot::from_file("/nonexistent/snapshot.json").unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read snapshot"));
    }
}
