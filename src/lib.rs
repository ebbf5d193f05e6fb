//! Symbolic attractor detection in multi-valued regulatory networks.
//!
//! The crate encodes a [`network::MvNetwork`] into BDDs ([`encoding`]), builds its
//! synchronous and asynchronous transition relations ([`relation`]) and uses symbolic
//! reachability ([`reachability`]) to enumerate fixed points and cyclic attractors
//! ([`attractor`]). Results can be decoded into readable value ranges ([`decoder`]) and
//! written as CSV files ([`export`]).

use crate::encoding::StateSet;

#[cfg(test)]
mod test_utils;

pub mod attractor;
pub mod decoder;
pub mod encoding;
pub mod error;
pub mod export;
pub mod network;
pub mod reachability;
pub mod relation;

pub use error::AttractorError;

/// A utility method for printing useful metadata of symbolic sets.
fn log_set(set: &StateSet) -> String {
    format!(
        "elements={}; BDD nodes={}",
        set.exact_cardinality(),
        set.symbolic_size()
    )
}

/// Extract the "simple name" of a type argument at compile time.
///
/// In the future, this should be a `const fn`, but `type_name` and `unwrap_or` are not
/// yet stabilized as `const` functions (even thought they probably are).
fn simple_type_name<T>() -> &'static str {
    std::any::type_name::<T>().split("::").last().unwrap_or("?")
}
