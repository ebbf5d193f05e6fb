//! Symbolic attractor enumeration for multi-valued networks.
//!
//! This module provides the building blocks of attractor detection as well as the
//! combined synchronous/asynchronous search.
//!
//! # Algorithms
//!
//! - [`fixed_points`]: all states that are stable under a transition relation.
//! - [`RandomPivotAttractors`]: a generator which repeatedly samples a random pivot state
//!   and checks whether its forward reachable set is closed under backward reachability.
//!   Each iteration removes the backward reachable set of the pivot, so the state space
//!   is gradually partitioned into attractor basins.
//! - [`is_async_stable_loop`]: checks whether a synchronous loop is also an asynchronous
//!   attractor.
//! - [`AttractorSearch`]: the combined procedure, see [`SearchMode`].
//!
//! # Typical usage
//!
//! ```no_run
//! use biodivine_algo_mv_attractors::attractor::{AttractorSearch, SearchConfig, SearchMode};
//! use biodivine_algo_mv_attractors::network::{MvNetwork, NetworkVariable, UpdateTable};
//!
//! // x' = y, y' = x
//! let network = MvNetwork::new(
//!     vec![NetworkVariable::new(1), NetworkVariable::new(1)],
//!     vec![
//!         UpdateTable::new(vec![1], vec![vec![0], vec![1]], vec![0, 1]),
//!         UpdateTable::new(vec![0], vec![vec![0], vec![1]], vec![0, 1]),
//!     ],
//! ).unwrap();
//!
//! let search = AttractorSearch::new(&network, SearchConfig::new(SearchMode::Synchronous)).unwrap();
//! for attractor in search.run().unwrap() {
//!     println!("{:?}: {} states.", attractor.kind, attractor.states.exact_cardinality());
//! }
//! ```

mod async_stable;
mod attractor_config;
mod fixed_points;
mod random_pivot;
mod search;

#[cfg(test)]
mod tests;

use crate::encoding::StateSet;
pub use async_stable::is_async_stable_loop;
pub use attractor_config::{AttractorConfig, DEFAULT_SETTLE_STEPS};
use biodivine_lib_param_bn::biodivine_std::traits::Set;
use cancel_this::Cancellable;
use computation_process::{Generator, Stateful};
pub use fixed_points::fixed_points;
pub use random_pivot::{DEFAULT_SEED, RandomPivotState, RandomPivotStep};
pub use search::{Attractor, AttractorKind, AttractorSearch, SearchConfig, SearchMode};

/// Enumerate attractors using randomly sampled pivots.
pub type RandomPivotAttractors =
    Generator<AttractorConfig, RandomPivotState, StateSet, RandomPivotStep>;

/// Find all attractors of `config.relation` that are disjoint with the `excluded` set.
///
/// The `excluded` set should be backward-closed (e.g. the basin of already known
/// attractors). Otherwise, attractors which only partially intersect it can still
/// be reported.
pub fn find_attractors(
    config: &AttractorConfig,
    excluded: &StateSet,
    seed: u64,
) -> Cancellable<Vec<StateSet>> {
    let candidates = config.relation.encoding().mk_unit_states().minus(excluded);
    let generator =
        RandomPivotAttractors::configure(config.clone(), RandomPivotState::new(candidates, seed));

    let mut attractors = Vec::new();
    for attractor in generator {
        attractors.push(attractor?);
    }
    Ok(attractors)
}
