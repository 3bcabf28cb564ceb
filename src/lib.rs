pub mod abis;
pub mod config;
pub mod models;
pub mod pricing;
pub mod store;
pub mod utils;

pub use crate::config::{PricingConfig, Settings};
pub use models::{Bundle, Pair, Token};
pub use pricing::{PriceResolver, TokenPrice};
pub use store::{EntityStore, MemoryStore, PairIndex, PairRegistry, Snapshot};
