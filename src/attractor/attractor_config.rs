use crate::reachability::ReachabilityConfig;
use crate::relation::TransitionRelation;

/// The default number of random successor steps taken before a pivot is classified.
pub const DEFAULT_SETTLE_STEPS: usize = 8;

/// A configuration object for attractor detection algorithms.
#[derive(Clone)]
pub struct AttractorConfig {
    /// The transition relation in which attractors are searched.
    pub relation: TransitionRelation,
    /// Before the reachable sets of a pivot are computed, the pivot is replaced by a random
    /// successor (staying within the candidate set) up to this many times. This tends to move
    /// the pivot from a transient state into an attractor, but has no effect on correctness
    /// (default: [`DEFAULT_SETTLE_STEPS`]; `0` disables settling).
    pub settle_steps: usize,
    /// Cancel the procedure if the symbolic representation exceeds the given number of BDD nodes
    /// (default: `usize::MAX`).
    pub max_symbolic_size: usize,
}

impl From<TransitionRelation> for AttractorConfig {
    fn from(value: TransitionRelation) -> Self {
        AttractorConfig::new(value)
    }
}

impl From<&TransitionRelation> for AttractorConfig {
    fn from(value: &TransitionRelation) -> Self {
        AttractorConfig::new(value.clone())
    }
}

impl From<&AttractorConfig> for ReachabilityConfig {
    fn from(value: &AttractorConfig) -> Self {
        ReachabilityConfig {
            relation: value.relation.clone(),
            max_iterations: usize::MAX,
            max_symbolic_size: value.max_symbolic_size,
        }
    }
}

impl AttractorConfig {
    /// Create a new instance of [`AttractorConfig`] from a [`TransitionRelation`].
    pub fn new(relation: TransitionRelation) -> AttractorConfig {
        AttractorConfig {
            relation,
            settle_steps: DEFAULT_SETTLE_STEPS,
            max_symbolic_size: usize::MAX,
        }
    }
}
