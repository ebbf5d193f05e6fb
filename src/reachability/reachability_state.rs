use crate::encoding::StateSet;

/// Internal state of an [`crate::reachability::IterativeUnion`] computation.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ReachabilityState {
    pub iteration: usize,
    /// All states discovered so far (including the initial set).
    pub set: StateSet,
    /// States discovered in the last iteration.
    pub frontier: StateSet,
}

impl From<StateSet> for ReachabilityState {
    fn from(value: StateSet) -> Self {
        ReachabilityState {
            iteration: 0,
            frontier: value.clone(),
            set: value,
        }
    }
}

impl From<&StateSet> for ReachabilityState {
    fn from(value: &StateSet) -> Self {
        Self::from(value.clone())
    }
}

impl From<ReachabilityState> for StateSet {
    fn from(value: ReachabilityState) -> Self {
        value.set
    }
}
