//! Read access to the entities the resolvers work on.
//!
//! The indexing pipeline owns persistence. The resolvers only need point
//! lookups against a snapshot consistent with the event being processed,
//! so both collaborators are expressed as small read-only traits:
//!
//! - [`EntityStore`] - `Token`, `Pair` and the singleton `Bundle`
//! - [`PairRegistry`] - the factory's `getPair(tokenA, tokenB)`

use alloy::primitives::Address;

use crate::models::{Bundle, Pair, Token};

pub mod factory;
pub mod memory;

pub use factory::{candidate_pairs, connect, fetch_factory_pairs};
pub use memory::{MemoryStore, PairIndex, Snapshot};

/// Point lookups against the entity store.
pub trait EntityStore {
    fn token(&self, id: &Address) -> Option<Token>;
    fn pair(&self, id: &Address) -> Option<Pair>;
    fn bundle(&self) -> Option<Bundle>;
}

/// Pair lookup by constituent tokens, in either order.
///
/// Implementations backed by the factory contract must map the zero
/// address ("no pair") to `None`.
pub trait PairRegistry {
    fn get_pair(&self, token_a: &Address, token_b: &Address) -> Option<Address>;
}

impl<T: EntityStore + ?Sized> EntityStore for &T {
    fn token(&self, id: &Address) -> Option<Token> {
        (**self).token(id)
    }

    fn pair(&self, id: &Address) -> Option<Pair> {
        (**self).pair(id)
    }

    fn bundle(&self) -> Option<Bundle> {
        (**self).bundle()
    }
}

impl<T: PairRegistry + ?Sized> PairRegistry for &T {
    fn get_pair(&self, token_a: &Address, token_b: &Address) -> Option<Address> {
        (**self).get_pair(token_a, token_b)
    }
}
