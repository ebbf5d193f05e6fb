use crate::attractor::AttractorConfig;
use crate::encoding::StateSet;
use crate::log_set;
use crate::reachability::{BackwardReachability, ForwardReachability, ReachabilityConfig};
use biodivine_lib_param_bn::biodivine_std::traits::Set;
use cancel_this::{Cancellable, is_cancelled};
use computation_process::Incomplete::Suspended;
use computation_process::{Completable, Computable, GeneratorStep, Stateful};
use log::{debug, info, trace};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// The seed used by [`RandomPivotState`] when none is given.
pub const DEFAULT_SEED: u64 = 0;

/// Internal state of the random pivot attractor algorithm.
pub struct RandomPivotState {
    computing: Step,
    remaining: StateSet,
    rng: StdRng,
}

/// Step implementation for the random pivot attractor algorithm.
///
/// In each round, a random pivot is sampled from the remaining candidate states and
/// (optionally) moved forward along random transitions. Then, its forward and backward
/// reachable sets are computed. If every state reachable from the pivot can also reach
/// the pivot, the forward set is an attractor. In any case, the pivot and its backward
/// reachable set are removed from the candidates.
pub struct RandomPivotStep;

enum Step {
    Idle,
    Forward(Step1),
    Backward(Step2),
}

struct Step1 {
    pivot: StateSet,
    forward: ForwardReachability,
}

struct Step2 {
    pivot: StateSet,
    forward: StateSet,
    backward: BackwardReachability,
}

impl RandomPivotState {
    /// Create a new state which searches for attractors among the `candidates`, using
    /// a random number generator initialized with `seed`.
    pub fn new(candidates: StateSet, seed: u64) -> RandomPivotState {
        RandomPivotState {
            computing: Step::Idle,
            remaining: candidates,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Candidate states that have not been classified yet.
    pub fn remaining(&self) -> &StateSet {
        &self.remaining
    }
}

impl From<StateSet> for RandomPivotState {
    fn from(value: StateSet) -> Self {
        RandomPivotState::new(value, DEFAULT_SEED)
    }
}

impl From<&StateSet> for RandomPivotState {
    fn from(value: &StateSet) -> Self {
        RandomPivotState::from(value.clone())
    }
}

impl GeneratorStep<AttractorConfig, RandomPivotState, StateSet> for RandomPivotStep {
    fn step(
        context: &AttractorConfig,
        state: &mut RandomPivotState,
    ) -> Completable<Option<StateSet>> {
        match &mut state.computing {
            Step::Idle => {
                info!(
                    "Start next iteration. Remaining ({}).",
                    log_set(&state.remaining),
                );

                let Some(pivot) = settle(context, &state.remaining, &mut state.rng)? else {
                    // If there is nothing to process, we are done.
                    return Ok(None);
                };

                state.computing = Step::Forward(Step1 {
                    forward: ForwardReachability::configure(
                        ReachabilityConfig::from(context),
                        pivot.clone(),
                    ),
                    pivot,
                });
                Err(Suspended)
            }
            Step::Forward(step) => {
                let forward = step.forward.try_compute()?;
                state.computing = Step::Backward(Step2 {
                    backward: BackwardReachability::configure(
                        ReachabilityConfig::from(context),
                        step.pivot.clone(),
                    ),
                    pivot: step.pivot.clone(),
                    forward,
                });
                Err(Suspended)
            }
            Step::Backward(step) => {
                let backward = step.backward.try_compute()?;
                let is_attractor = step.forward.minus(&backward).is_empty();

                // The backward set always contains the pivot itself.
                state.remaining = state.remaining.minus(&step.pivot.union(&backward));

                if is_attractor {
                    let attractor = step.forward.clone();
                    info!(
                        "Attractor ({}) with basin ({}) found.",
                        log_set(&attractor),
                        log_set(&backward),
                    );
                    state.computing = Step::Idle;
                    Ok(Some(attractor))
                } else {
                    debug!(
                        "Pivot is transient. Removing its basin ({}).",
                        log_set(&backward)
                    );
                    state.computing = Step::Idle;
                    Err(Suspended)
                }
            }
        }
    }
}

/// Sample a pivot from `remaining` and move it along random transitions that stay
/// in `remaining`.
fn settle(
    context: &AttractorConfig,
    remaining: &StateSet,
    rng: &mut StdRng,
) -> Cancellable<Option<StateSet>> {
    let encoding = context.relation.encoding();
    let Some(mut pivot) = encoding.pick_random(remaining, rng) else {
        return Ok(None);
    };

    for i in 0..context.settle_steps {
        is_cancelled!()?;
        let successors = context.relation.successors(&pivot).intersect(remaining);
        let Some(next) = encoding.pick_random(&successors, rng) else {
            trace!("Settling stopped after {} steps (no successors).", i);
            break;
        };
        pivot = next;
    }

    Ok(Some(pivot))
}
