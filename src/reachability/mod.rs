//! Symbolic reachability over a monolithic [`TransitionRelation`].
//!
//! The reachability procedures repeatedly apply one relational product (image or preimage)
//! to the most recently discovered states (the *frontier*) until no new states appear.
//! The result always contains the initial set, i.e. it is the reflexive-transitive closure
//! of the relation.
//!
//! # Type Aliases
//!
//! - [`ForwardReachability`]: all states reachable from the initial set.
//! - [`BackwardReachability`]: all states that can reach the initial set.
//!
//! # Example
//!
//! ```no_run
//! use biodivine_algo_mv_attractors::encoding::SymbolicEncoding;
//! use biodivine_algo_mv_attractors::network::{MvNetwork, NetworkVariable, UpdateTable};
//! use biodivine_algo_mv_attractors::reachability::ForwardReachability;
//! use biodivine_algo_mv_attractors::relation::TransitionRelation;
//! use computation_process::Algorithm;
//! use std::sync::Arc;
//!
//! let network = MvNetwork::new(
//!     vec![NetworkVariable::new(2)],
//!     vec![UpdateTable::new(vec![0], vec![vec![0], vec![1], vec![2]], vec![1, 2, 2])],
//! ).unwrap();
//! let encoding = Arc::new(SymbolicEncoding::new(&network.ranges()).unwrap());
//! let relation = TransitionRelation::build_sync(&network, encoding.clone());
//!
//! let initial = encoding.mk_state(&[0]);
//! let reachable = ForwardReachability::run(&relation, initial).unwrap();
//! ```

use crate::encoding::StateSet;
use cancel_this::Cancellable;
use computation_process::Computation;


mod iterative_union;
mod reachability_config;
mod reachability_state;
mod step_operators;

pub use iterative_union::IterativeUnion;
pub use reachability_config::ReachabilityConfig;
pub use reachability_state::ReachabilityState;
pub use step_operators::{PostImage, PreImage};

/// A helper alias which allows us to use [`ReachabilityComputation`] as shorthand for
/// `Computation<Context = ReachabilityConfig, State = ReachabilityState>`.
pub type ReachabilityComputation<STEP> =
    Computation<ReachabilityConfig, ReachabilityState, StateSet, STEP>;

/// Forward reachability: the initial set and all states reachable from it.
pub type ForwardReachability = ReachabilityComputation<IterativeUnion<PostImage>>;

/// Backward reachability: the initial set and all states that can reach it.
pub type BackwardReachability = ReachabilityComputation<IterativeUnion<PreImage>>;

/// Used to reduce code repetition in various reachability-like algorithms.
///
/// Implementors define a single step of a reachability procedure, which is then
/// iterated by higher-level algorithms like [`IterativeUnion`].
pub trait ReachabilityStep {
    /// Perform a single step of reachability computation.
    ///
    /// Returns the image of the given `state`. The caller is responsible for removing
    /// states that are already known.
    fn step(context: &ReachabilityConfig, state: &StateSet) -> Cancellable<StateSet>;
}
