use crate::relation::TransitionRelation;

/// A "flat" configuration object for reachability problems.
#[derive(Clone)]
pub struct ReachabilityConfig {
    /// The transition relation used for reachability computation.
    ///
    /// # Panics
    ///
    /// The procedure is allowed to panic if initialized with states that do not belong
    /// to the encoding of this relation.
    pub relation: TransitionRelation,
    /// Cancel the procedure if it exceeds the specified number of iterations (default:
    /// `usize::MAX`).
    ///
    /// One iteration corresponds to one image computation.
    pub max_iterations: usize,
    /// Cancel the procedure if the symbolic representation exceeds the given amount of BDD nodes
    /// (default: `usize::MAX`).
    pub max_symbolic_size: usize,
}

impl From<TransitionRelation> for ReachabilityConfig {
    fn from(value: TransitionRelation) -> Self {
        ReachabilityConfig::new(value)
    }
}

impl From<&TransitionRelation> for ReachabilityConfig {
    fn from(value: &TransitionRelation) -> Self {
        ReachabilityConfig::new(value.clone())
    }
}

impl ReachabilityConfig {
    /// Create a new instance of [`ReachabilityConfig`] without any limits.
    pub fn new(relation: TransitionRelation) -> ReachabilityConfig {
        ReachabilityConfig {
            relation,
            max_iterations: usize::MAX,
            max_symbolic_size: usize::MAX,
        }
    }
}
