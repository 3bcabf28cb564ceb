use alloy::primitives::Address;
use bigdecimal::BigDecimal;
use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;

/// The two stablecoin/native pairs the native USD price is read from.
///
/// Named after the side the stablecoin sits on:
/// - `token0_stable`: stablecoin is token0, native asset is token1
/// - `token1_stable`: stablecoin is token1, native asset is token0
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct StablePairs {
    #[serde(default)]
    pub token0_stable: Option<Address>,
    #[serde(default)]
    pub token1_stable: Option<Address>,
}

/// Per-deployment reference data for price discovery and volume tracking.
///
/// The whitelist order matters: earlier anchors win the token valuation
/// search even when a later anchor has a deeper pool.
#[derive(Debug, Deserialize, Clone)]
pub struct PricingSettings {
    /// Wrapped native asset (WETH, WFTM, ...)
    pub native_token: Address,
    pub whitelist: Vec<Address>,
    #[serde(default)]
    pub stable_pairs: StablePairs,
    /// Pairs whose volume never counts (rebasing / fee-on-transfer tokens)
    #[serde(default)]
    pub untracked_pairs: Vec<Address>,
    /// Minimum pair value, in native units, for a pair to price a token
    #[serde(default = "default_min_liquidity_native")]
    pub min_liquidity_native: BigDecimal,
    /// Minimum USD reserves for volume on pairs with few providers
    #[serde(default = "default_min_usd_new_pairs")]
    pub min_usd_new_pairs: BigDecimal,
    /// Pairs with fewer providers than this go through the thin-pool guard
    #[serde(default = "default_min_liquidity_providers")]
    pub min_liquidity_providers: u64,
}

fn default_min_liquidity_native() -> BigDecimal {
    BigDecimal::from(2u32)
}

fn default_min_usd_new_pairs() -> BigDecimal {
    BigDecimal::from(100_000u32)
}

fn default_min_liquidity_providers() -> u64 {
    5
}

/// Factory access for resolving pairs on-chain.
#[derive(Debug, Deserialize, Clone)]
pub struct RpcSettings {
    pub url: String,
    pub factory: Address,
    #[serde(default = "default_rpc_concurrency")]
    pub concurrency: usize,
}

fn default_rpc_concurrency() -> usize {
    16
}

/// Root application configuration.
///
/// Loaded from `config.yaml` at startup.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub pricing: PricingSettings,
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
    /// Where to write the repriced snapshot, if anywhere
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub rpc: Option<RpcSettings>,
}

fn default_snapshot_path() -> String {
    "snapshot.json".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_path("config")
    }

    /// Load settings from a file; the extension may be omitted.
    pub fn from_path(path: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name(path))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn test_defaults_applied() {
        let settings = Settings::from_yaml_str(
            r#"
pricing:
  native_token: "0x21be370d5312f44cb42ce377bc9b8a0cef1a4c83"
  whitelist:
    - "0x21be370d5312f44cb42ce377bc9b8a0cef1a4c83"
    - "0x04068da6c83afcfa0e13ba15a6696662335d5b75"
"#,
        )
        .unwrap();

        let pricing = &settings.pricing;
        assert_eq!(
            pricing.native_token,
            address!("0x21be370d5312f44cb42ce377bc9b8a0cef1a4c83")
        );
        assert_eq!(pricing.whitelist.len(), 2);
        assert_eq!(pricing.min_liquidity_native, BigDecimal::from(2u32));
        assert_eq!(pricing.min_usd_new_pairs, BigDecimal::from(100_000u32));
        assert_eq!(pricing.min_liquidity_providers, 5);
        assert_eq!(pricing.stable_pairs, StablePairs::default());
        assert!(pricing.untracked_pairs.is_empty());
        assert_eq!(settings.snapshot_path, "snapshot.json");
        assert!(settings.output_path.is_none());
        assert!(settings.rpc.is_none());
    }

    #[test]
    fn test_full_settings() {
        let settings = Settings::from_yaml_str(
            r#"
pricing:
  native_token: "0x21be370d5312f44cb42ce377bc9b8a0cef1a4c83"
  whitelist:
    - "0x21be370d5312f44cb42ce377bc9b8a0cef1a4c83"
  stable_pairs:
    token0_stable: "0xa196c7754f4ec79de55bb5db82187bbe82275f7f"
    token1_stable: "0x90469acbc4b6d877873cd4f1cca54fde8075a998"
  untracked_pairs:
    - "0x9999999999999999999999999999999999999999"
  min_liquidity_native: "3.5"
  min_usd_new_pairs: "50000"
  min_liquidity_providers: 3
snapshot_path: "/var/lib/valuation/snapshot.json"
rpc:
  url: "http://localhost:8545"
  factory: "0x152ee697f2e276fa89e96742e9bb9ab1f2e61be3"
"#,
        )
        .unwrap();

        let pricing = &settings.pricing;
        assert_eq!(
            pricing.stable_pairs.token0_stable,
            Some(address!("0xa196c7754f4ec79de55bb5db82187bbe82275f7f"))
        );
        assert_eq!(
            pricing.stable_pairs.token1_stable,
            Some(address!("0x90469acbc4b6d877873cd4f1cca54fde8075a998"))
        );
        assert_eq!(pricing.untracked_pairs.len(), 1);
        assert_eq!(pricing.min_liquidity_native, "3.5".parse::<BigDecimal>().unwrap());
        assert_eq!(pricing.min_usd_new_pairs, BigDecimal::from(50_000u32));
        assert_eq!(pricing.min_liquidity_providers, 3);

        let rpc = settings.rpc.unwrap();
        assert_eq!(rpc.url, "http://localhost:8545");
        assert_eq!(rpc.concurrency, 16);
    }

    #[test]
    fn test_example_config_loads() {
        let settings = Settings::from_yaml_str(include_str!("../../config.example.yaml")).unwrap();

        let whitelist = &settings.pricing.whitelist;
        assert_eq!(whitelist.len(), 29);
        assert_eq!(whitelist[0], settings.pricing.native_token);
        // MATIC closes the priority list
        assert_eq!(
            whitelist[28],
            address!("0x40df1ae6074c35047bff66675488aa2f9f6384f3")
        );
    }

    #[test]
    fn test_missing_whitelist_is_error() {
        let result = Settings::from_yaml_str(
            r#"
pricing:
  native_token: "0x21be370d5312f44cb42ce377bc9b8a0cef1a4c83"
"#,
        );
        assert!(result.is_err());
    }
}
