use crate::encoding::StateSet;
use crate::relation::TransitionRelation;
use biodivine_lib_param_bn::biodivine_std::traits::Set;
use cancel_this::{Cancellable, is_cancelled};
use log::debug;

/// Check whether a synchronous loop attractor is also an attractor of the asynchronous
/// dynamics.
///
/// Starting from one state of `attractor`, the synchronous trajectory is followed until it
/// closes. The loop is accepted only if every step changes at most one network variable
/// (compared per variable, not per bit). In such a loop, every state has exactly one enabled
/// variable, so the asynchronous successor coincides with the synchronous one.
///
/// A state without a synchronous successor rejects the loop.
pub fn is_async_stable_loop(sync: &TransitionRelation, attractor: &StateSet) -> Cancellable<bool> {
    let encoding = sync.encoding();
    let Some(mut current) = encoding.pick_any(attractor) else {
        return Ok(false);
    };

    let changes = (0..encoding.num_vars())
        .map(|var| encoding.block_changes(var))
        .collect::<Vec<_>>();

    let mut visited = current.clone();
    loop {
        is_cancelled!()?;
        let next = sync.successors(&current);
        if next.is_empty() {
            debug!("Loop rejected: trajectory reached a state without successors.");
            return Ok(false);
        }

        let step = current.as_bdd().and(&encoding.prime(&next));
        let changed = changes
            .iter()
            .filter(|it| !step.and(it).is_false())
            .count();
        if changed > 1 {
            debug!("Loop rejected: {} variables change in one step.", changed);
            return Ok(false);
        }

        if next.is_subset(&visited) {
            debug!("Loop accepted after visiting {} states.", visited.exact_cardinality());
            return Ok(true);
        }

        visited = visited.union(&next);
        current = next;
    }
}
