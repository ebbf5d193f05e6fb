//! Monolithic symbolic transition relations of a multi-valued network.
//!
//! A [`TransitionRelation`] is a single [`Bdd`] over the unprimed (current) and primed (next)
//! BDD variables of a [`SymbolicEncoding`]. Two flavours are supported:
//!
//!  - [`UpdateSemantics::Synchronous`]: all variables are updated at once.
//!  - [`UpdateSemantics::Asynchronous`]: exactly one variable is updated in each step
//!    (states where no variable can change keep a self-loop).
//!
//! Both relations only relate valid states to valid states.


use crate::encoding::{StateSet, SymbolicEncoding};
use crate::log_set;
use crate::network::MvNetwork;
use biodivine_lib_bdd::Bdd;
use biodivine_lib_param_bn::biodivine_std::traits::Set;
use log::{debug, info, warn};
use std::sync::Arc;

/// The update semantics represented by a [`TransitionRelation`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum UpdateSemantics {
    Synchronous,
    Asynchronous,
}

/// A symbolic transition relation over a shared [`SymbolicEncoding`].
#[derive(Clone)]
pub struct TransitionRelation {
    encoding: Arc<SymbolicEncoding>,
    semantics: UpdateSemantics,
    bdd: Bdd,
}

impl TransitionRelation {
    /// Build the synchronous transition relation of `network`.
    ///
    /// The result is the conjunction of [`update_constraint`] over all dynamic variables.
    /// It can be empty if the tables are contradictory, which is *not* reported here
    /// (see [`TransitionRelation::is_empty`]).
    pub fn build_sync(network: &MvNetwork, encoding: Arc<SymbolicEncoding>) -> TransitionRelation {
        let mut bdd = encoding.valid_states().and(encoding.valid_primed());
        for var in network.dynamic_variables() {
            bdd = bdd.and(&update_constraint(network, &encoding, var));
        }

        let relation = TransitionRelation {
            encoding,
            semantics: UpdateSemantics::Synchronous,
            bdd,
        };
        relation.log_created();
        relation
    }

    /// Build the asynchronous transition relation of `network`.
    ///
    /// For every dynamic variable `v`, the relation contains the transitions where `v`
    /// follows its update table and all other variables keep their value.
    pub fn build_async(network: &MvNetwork, encoding: Arc<SymbolicEncoding>) -> TransitionRelation {
        let identity = encoding.identity();
        let dynamic = network.dynamic_variables().collect::<Vec<_>>();
        let unchanged = dynamic
            .iter()
            .map(|var| encoding.block_changes(*var).not())
            .collect::<Vec<_>>();

        let mut bdd = encoding.bdd_variables().mk_false();
        for (i, var) in dynamic.iter().enumerate() {
            let frame = unchanged
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .fold(encoding.bdd_variables().mk_true(), |acc, (_, it)| acc.and(it));
            let changes = encoding.block_changes(*var);
            let transition = update_constraint(network, &encoding, *var)
                .and(&frame)
                .and(&identity.or(&changes));
            bdd = bdd.or(&transition);
        }
        let bdd = bdd
            .and(encoding.valid_states())
            .and(encoding.valid_primed());

        let relation = TransitionRelation {
            encoding,
            semantics: UpdateSemantics::Asynchronous,
            bdd,
        };
        relation.log_created();
        relation
    }

    pub fn encoding(&self) -> &Arc<SymbolicEncoding> {
        &self.encoding
    }

    pub fn semantics(&self) -> UpdateSemantics {
        self.semantics
    }

    pub fn as_bdd(&self) -> &Bdd {
        &self.bdd
    }

    /// True if the relation contains no transition at all.
    pub fn is_empty(&self) -> bool {
        self.bdd.is_false()
    }

    /// Compute all direct successors of states in `set`.
    pub fn successors(&self, set: &StateSet) -> StateSet {
        let image = self
            .bdd
            .and(set.as_bdd())
            .exists(self.encoding.state_variables());
        self.encoding.unprime(image)
    }

    /// Compute all direct predecessors of states in `set`.
    pub fn predecessors(&self, set: &StateSet) -> StateSet {
        let primed = self.encoding.prime(set);
        let image = self
            .bdd
            .and(&primed)
            .exists(self.encoding.primed_variables());
        set.copy(image)
    }

    /// Valid states that have no outgoing transition.
    ///
    /// With complete update tables, this set is empty for both semantics.
    pub fn deadlocks(&self) -> StateSet {
        let has_successor = self.bdd.exists(self.encoding.primed_variables());
        self.encoding
            .mk_unit_states()
            .minus(&self.encoding.mk_states(has_successor))
    }

    fn log_created(&self) {
        info!(
            "Created {:?} transition relation (BDD nodes={}).",
            self.semantics,
            self.bdd.size()
        );
        let deadlocks = self.deadlocks();
        if deadlocks.is_empty() {
            debug!("{:?} relation has no deadlock states.", self.semantics);
        } else {
            warn!(
                "{:?} relation has states without successors ({}). Are the update tables complete?",
                self.semantics,
                log_set(&deadlocks)
            );
        }
    }
}

/// Build the constraint binding the primed block of `var` to its update table.
///
/// For every value `val` of `var`, the next value is `val` if and only if the current state
/// matches one of the rows with output `val`. States that match no row (or rows with
/// different outputs) are not related to any valid primed value.
pub fn update_constraint(network: &MvNetwork, encoding: &SymbolicEncoding, var: usize) -> Bdd {
    let table = network.table(var);
    let variables = encoding.bdd_variables();
    let mut result = variables.mk_true();
    for value in 0..=network.variable(var).range {
        let state_for_value = table
            .entries()
            .filter(|(_, output)| *output == value)
            .fold(variables.mk_false(), |acc, (row, _)| {
                let assignment = table
                    .inputs
                    .iter()
                    .copied()
                    .zip(row.iter().copied())
                    .collect::<Vec<_>>();
                acc.or(&encoding.mk_assignment(&assignment, false))
            });
        let next_is_value = encoding.mk_value(var, value, true);
        result = result.and(&state_for_value.iff(&next_is_value));
    }
    result
}
