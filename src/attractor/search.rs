use crate::attractor::{
    AttractorConfig, DEFAULT_SEED, DEFAULT_SETTLE_STEPS, find_attractors, fixed_points,
    is_async_stable_loop,
};
use crate::encoding::{StateSet, SymbolicEncoding};
use crate::error::AttractorError;
use crate::log_set;
use crate::network::MvNetwork;
use crate::reachability::BackwardReachability;
use crate::relation::TransitionRelation;
use biodivine_lib_param_bn::biodivine_std::traits::Set;
use computation_process::Algorithm;
use log::{debug, info};
use std::sync::Arc;

/// Which dynamics should be analysed by an [`AttractorSearch`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SearchMode {
    /// Fixed points and loops of the synchronous dynamics.
    Synchronous,
    /// Fixed points, async-stable synchronous loops and the remaining attractors of the
    /// asynchronous dynamics.
    Asynchronous,
}

/// The way an [`Attractor`] was discovered.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum AttractorKind {
    /// All fixed points of the network, reported together.
    FixedPoints,
    /// A cyclic attractor of the synchronous dynamics.
    SynchronousLoop,
    /// A synchronous loop which is also an attractor of the asynchronous dynamics.
    AsyncStableLoop,
    /// An attractor of the asynchronous dynamics which is not a fixed point or
    /// an async-stable loop.
    AsynchronousAttractor,
    /// A single valid state without any outgoing transition. Only appears when some
    /// update table does not cover every combination of its input values.
    Deadlock,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attractor {
    pub kind: AttractorKind,
    pub states: StateSet,
}

impl Attractor {
    pub fn new(kind: AttractorKind, states: StateSet) -> Attractor {
        Attractor { kind, states }
    }
}

/// Configuration of the combined attractor search.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SearchConfig {
    pub mode: SearchMode,
    /// See [`AttractorConfig::settle_steps`].
    pub settle_steps: usize,
    /// Seed of the random pivot selection.
    pub seed: u64,
    /// Cancel the search if a symbolic set exceeds the given number of BDD nodes
    /// (default: `usize::MAX`).
    pub max_symbolic_size: usize,
}

impl SearchConfig {
    pub fn new(mode: SearchMode) -> SearchConfig {
        SearchConfig {
            mode,
            settle_steps: DEFAULT_SETTLE_STEPS,
            seed: DEFAULT_SEED,
            max_symbolic_size: usize::MAX,
        }
    }
}

impl From<SearchMode> for SearchConfig {
    fn from(value: SearchMode) -> Self {
        SearchConfig::new(value)
    }
}

/// Combined search for synchronous and asynchronous attractors of a [`MvNetwork`].
///
/// Synchronous loops are found first. In [`SearchMode::Asynchronous`], each loop is then
/// checked with [`is_async_stable_loop`], and the asynchronous relation is searched only
/// outside the basins of the fixed points and the accepted loops. This avoids most of
/// the (expensive) asynchronous reachability for networks whose loops are async-stable.
pub struct AttractorSearch {
    network: MvNetwork,
    encoding: Arc<SymbolicEncoding>,
    sync: TransitionRelation,
    config: SearchConfig,
}

impl AttractorSearch {
    /// Encode `network` and build its synchronous transition relation.
    ///
    /// Fails with [`AttractorError::EmptyTransitionRelation`] if the synchronous relation
    /// is empty.
    pub fn new(network: &MvNetwork, config: SearchConfig) -> Result<AttractorSearch, AttractorError> {
        let encoding = Arc::new(SymbolicEncoding::new(&network.ranges())?);
        let sync = TransitionRelation::build_sync(network, encoding.clone());
        if sync.is_empty() {
            return Err(AttractorError::EmptyTransitionRelation);
        }

        Ok(AttractorSearch {
            network: network.clone(),
            encoding,
            sync,
            config,
        })
    }

    pub fn encoding(&self) -> &Arc<SymbolicEncoding> {
        &self.encoding
    }

    pub fn sync_relation(&self) -> &TransitionRelation {
        &self.sync
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run the search. Fixed points (if any) are reported first, as a single attractor.
    pub fn run(&self) -> Result<Vec<Attractor>, AttractorError> {
        let fixed = fixed_points(&self.sync);

        let sync_config = self.attractor_config(self.sync.clone());
        let fixed_basin = BackwardReachability::run(&sync_config, fixed.clone())?;
        let loops = find_attractors(&sync_config, &fixed_basin, self.config.seed)?;
        info!("Found {} synchronous loop(s).", loops.len());

        let mut result = Vec::new();
        if !fixed.is_empty() {
            result.push(Attractor::new(AttractorKind::FixedPoints, fixed.clone()));
        }

        match self.config.mode {
            SearchMode::Synchronous => {
                let deadlocks = self.sync.deadlocks();
                result.extend(loops.into_iter().map(|it| {
                    classify(&deadlocks, it, AttractorKind::SynchronousLoop)
                }));
            }
            SearchMode::Asynchronous => {
                let mut known = fixed;
                for attractor in loops {
                    if is_async_stable_loop(&self.sync, &attractor)? {
                        known = known.union(&attractor);
                        result.push(Attractor::new(AttractorKind::AsyncStableLoop, attractor));
                    } else {
                        debug!("Synchronous loop ({}) is not async-stable.", log_set(&attractor));
                    }
                }

                let relation = TransitionRelation::build_async(&self.network, self.encoding.clone());
                let deadlocks = relation.deadlocks();
                let async_config = self.attractor_config(relation);
                let excluded = BackwardReachability::run(&async_config, known)?;
                let others = find_attractors(&async_config, &excluded, self.config.seed)?;
                info!("Found {} asynchronous attractor(s).", others.len());
                result.extend(others.into_iter().map(|it| {
                    classify(&deadlocks, it, AttractorKind::AsynchronousAttractor)
                }));
            }
        }

        Ok(result)
    }

    fn attractor_config(&self, relation: TransitionRelation) -> AttractorConfig {
        AttractorConfig {
            relation,
            settle_steps: self.config.settle_steps,
            max_symbolic_size: self.config.max_symbolic_size,
        }
    }
}

/// Attractors containing a deadlock state are exactly that one state.
fn classify(deadlocks: &StateSet, states: StateSet, kind: AttractorKind) -> Attractor {
    if states.intersect(deadlocks).is_empty() {
        Attractor::new(kind, states)
    } else {
        Attractor::new(AttractorKind::Deadlock, states)
    }
}
