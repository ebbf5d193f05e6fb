use crate::encoding::{StateSet, SymbolicEncoding};
use crate::network::{MvNetwork, NetworkVariable, UpdateTable};
use crate::relation::TransitionRelation;
use std::sync::Arc;

/// Initialize env_logger for tests. Safe to call multiple times.
pub fn init_logger() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

/// Build an exhaustive update table: one row for every combination of input values.
///
/// `ranges` are the ranges of *all* network variables, `update` receives the values of
/// `inputs` (in the given order) and returns the next value of the target variable.
pub fn mk_table<F: Fn(&[u32]) -> u32>(ranges: &[u32], inputs: Vec<usize>, update: F) -> UpdateTable {
    let mut rows: Vec<Vec<u32>> = vec![Vec::new()];
    for input in &inputs {
        rows = rows
            .into_iter()
            .flat_map(|row| {
                (0..=ranges[*input]).map(move |value| {
                    let mut row = row.clone();
                    row.push(value);
                    row
                })
            })
            .collect();
    }
    let outputs = rows.iter().map(|row| update(row)).collect();
    UpdateTable::new(inputs, rows, outputs)
}

fn mk_network(ranges: &[u32], tables: Vec<UpdateTable>) -> MvNetwork {
    let variables = ranges.iter().map(|r| NetworkVariable::new(*r)).collect();
    MvNetwork::new(variables, tables).unwrap()
}

/// `x' = y, y' = x`
///
/// Synchronous: fixed points `00`, `11` and the loop `{01, 10}`.
/// Asynchronous: only the two fixed points.
pub fn toggle_network() -> MvNetwork {
    let ranges = [1, 1];
    mk_network(
        &ranges,
        vec![
            mk_table(&ranges, vec![1], |v| v[0]),
            mk_table(&ranges, vec![0], |v| v[0]),
        ],
    )
}

/// `x' = 1`
pub fn constant_network() -> MvNetwork {
    mk_network(&[1], vec![UpdateTable::constant(1)])
}

/// A single variable with range 2 counting up to its maximum: `x' = min(x + 1, 2)`.
pub fn counter_network() -> MvNetwork {
    let ranges = [2];
    mk_network(&ranges, vec![mk_table(&ranges, vec![0], |v| (v[0] + 1).min(2))])
}

/// `x' = !y, y' = x`
///
/// A four-state loop where every step changes exactly one variable, under both semantics.
pub fn negative_loop_network() -> MvNetwork {
    let ranges = [1, 1];
    mk_network(
        &ranges,
        vec![
            mk_table(&ranges, vec![1], |v| 1 - v[0]),
            mk_table(&ranges, vec![0], |v| v[0]),
        ],
    )
}

/// `x' = (x + 1) mod 3, y' = !y` where `x` has range 2.
///
/// Synchronous: one six-state loop where both variables change in every step.
/// Asynchronous: all six states form a single attractor.
pub fn mv_oscillator_network() -> MvNetwork {
    let ranges = [2, 1];
    mk_network(
        &ranges,
        vec![
            mk_table(&ranges, vec![0], |v| (v[0] + 1) % 3),
            mk_table(&ranges, vec![1], |v| 1 - v[0]),
        ],
    )
}

/// A variable whose table requires both `0` and `1` as the next value in every state.
pub fn contradictory_network() -> MvNetwork {
    let table = UpdateTable::new(Vec::new(), vec![Vec::new(), Vec::new()], vec![0, 1]);
    mk_network(&[1], vec![table])
}

/// Encoding and both relations of `network`.
pub fn mk_relations(network: &MvNetwork) -> (TransitionRelation, TransitionRelation) {
    let encoding = Arc::new(SymbolicEncoding::new(&network.ranges()).unwrap());
    let sync = TransitionRelation::build_sync(network, encoding.clone());
    let async_relation = TransitionRelation::build_async(network, encoding);
    (sync, async_relation)
}

/// Build a set from a list of explicit states.
pub fn mk_states(encoding: &SymbolicEncoding, states: &[&[u32]]) -> StateSet {
    use biodivine_lib_param_bn::biodivine_std::traits::Set;
    states
        .iter()
        .fold(encoding.mk_empty_states(), |acc, it| acc.union(&encoding.mk_state(it)))
}
