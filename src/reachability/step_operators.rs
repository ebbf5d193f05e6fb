use crate::encoding::StateSet;
use crate::log_set;
use crate::reachability::{ReachabilityConfig, ReachabilityStep};
use cancel_this::{Cancellable, is_cancelled};
use log::trace;

/// Computes the direct successors of the given set using one relational product.
pub struct PostImage;

/// Computes the direct predecessors of the given set using one relational product.
pub struct PreImage;

impl ReachabilityStep for PostImage {
    fn step(context: &ReachabilityConfig, state: &StateSet) -> Cancellable<StateSet> {
        is_cancelled!()?;
        let post = context.relation.successors(state);
        trace!("Computed successors ({}).", log_set(&post));
        Ok(post)
    }
}

impl ReachabilityStep for PreImage {
    fn step(context: &ReachabilityConfig, state: &StateSet) -> Cancellable<StateSet> {
        is_cancelled!()?;
        let pre = context.relation.predecessors(state);
        trace!("Computed predecessors ({}).", log_set(&pre));
        Ok(pre)
    }
}
