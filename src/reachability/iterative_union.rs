use crate::encoding::StateSet;
use crate::reachability::reachability_state::ReachabilityState;
use crate::reachability::{ReachabilityConfig, ReachabilityStep};
use crate::{log_set, simple_type_name};
use biodivine_lib_param_bn::biodivine_std::traits::Set;
use cancel_this::Cancelled;
use computation_process::Incomplete::Suspended;
use computation_process::{Completable, ComputationStep};
use log::debug;
use std::marker::PhantomData;

/// A helper implementation of [`ComputationStep`] that repeatedly applies a [`ReachabilityStep`]
/// to the current frontier, collecting the newly discovered states into the reachable set.
///
/// The computation ends once the frontier contains no new states.
pub struct IterativeUnion<S: ReachabilityStep>(PhantomData<S>);

impl<S: ReachabilityStep> ComputationStep<ReachabilityConfig, ReachabilityState, StateSet>
    for IterativeUnion<S>
{
    fn step(context: &ReachabilityConfig, state: &mut ReachabilityState) -> Completable<StateSet> {
        if state.iteration >= context.max_iterations {
            debug!(
                "[iteration:{}] Union<{}> canceled (exceeded iteration count).",
                state.iteration,
                simple_type_name::<S>()
            );

            return Err(Cancelled::new("ReachabilityConfig::max_iterations").into());
        } else {
            state.iteration += 1;
        }

        let frontier = S::step(context, &state.frontier)?.minus(&state.set);
        if frontier.is_empty() {
            debug!(
                "[iteration:{}] Union<{}> finished with ({}).",
                state.iteration,
                simple_type_name::<S>(),
                log_set(&state.set)
            );

            Ok(state.set.clone())
        } else {
            state.set = state.set.union(&frontier);
            state.frontier = frontier;

            if state.set.symbolic_size() > context.max_symbolic_size {
                debug!(
                    "[iteration:{}] Union<{}> canceled (exceeded symbolic size).",
                    state.iteration,
                    simple_type_name::<S>()
                );

                return Err(Cancelled::new("ReachabilityConfig::max_symbolic_size").into());
            }

            debug!(
                "[iteration:{}] Union<{}> increased to ({}).",
                state.iteration,
                simple_type_name::<S>(),
                log_set(&state.set)
            );

            Err(Suspended)
        }
    }
}
