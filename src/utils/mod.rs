//! Utility functions for the valuation engine.
//!
//! - [`decimal`] - Zero-safe BigDecimal arithmetic and shared constants

mod decimal;

// ============================================
// Re-exports
// ============================================

pub use decimal::{safe_div, TWO_BD};
