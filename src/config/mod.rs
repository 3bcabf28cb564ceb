mod pricing;
mod settings;

pub use pricing::PricingConfig;
pub use settings::{PricingSettings, RpcSettings, Settings, StablePairs};
