pub mod bundle;
pub mod pair;
pub mod token;

pub use bundle::{Bundle, BUNDLE_ID};
pub use pair::Pair;
pub use token::Token;
