pub mod v2;

pub use v2::IUniswapV2Factory;
