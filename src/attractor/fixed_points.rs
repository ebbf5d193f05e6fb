use crate::encoding::StateSet;
use crate::log_set;
use crate::relation::TransitionRelation;
use log::info;

/// Compute all states whose only successor in `relation` is the state itself.
///
/// For the synchronous relation these are exactly the states `s` with `f(s) = s`. The
/// asynchronous relation has the same fixed points, because a state is stable there only
/// if no variable can change.
pub fn fixed_points(relation: &TransitionRelation) -> StateSet {
    let encoding = relation.encoding();
    let identity = encoding.identity();
    let primed = encoding.primed_variables();

    let has_loop = relation.as_bdd().and(&identity).exists(primed);
    let can_leave = relation.as_bdd().and_not(&identity).exists(primed);
    let result = encoding.mk_states(has_loop.and_not(&can_leave));

    info!(
        "Found {:?} fixed points ({}).",
        relation.semantics(),
        log_set(&result)
    );
    result
}
