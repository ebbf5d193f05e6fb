use crate::attractor::{
    AttractorConfig, AttractorKind, AttractorSearch, RandomPivotAttractors, RandomPivotState,
    SearchConfig, SearchMode, find_attractors, fixed_points, is_async_stable_loop,
};
use crate::encoding::{StateSet, SymbolicEncoding};
use crate::error::AttractorError;
use crate::network::{MvNetwork, NetworkVariable, UpdateTable};
use crate::reachability::{BackwardReachability, ForwardReachability};
use crate::relation::TransitionRelation;
use crate::test_utils::{
    constant_network, contradictory_network, counter_network, init_logger, mk_relations,
    mk_table, mv_oscillator_network, negative_loop_network, toggle_network,
};
use biodivine_lib_param_bn::biodivine_std::traits::Set;
use cancel_this::Cancellable;
use computation_process::{Algorithm, Stateful};
use num_bigint::BigInt;
use std::sync::Arc;

/// `x' = !x, y' = !y`
fn independent_oscillators() -> MvNetwork {
    let ranges = [1, 1];
    MvNetwork::new(
        vec![NetworkVariable::new(1), NetworkVariable::new(1)],
        vec![
            mk_table(&ranges, vec![0], |v| 1 - v[0]),
            mk_table(&ranges, vec![1], |v| 1 - v[0]),
        ],
    )
    .unwrap()
}

/// Sorted explicit representation of a list of sets, so that results can be compared
/// independently of the pivot order.
fn explicit(encoding: &SymbolicEncoding, sets: &[StateSet]) -> Vec<Vec<Vec<u32>>> {
    let mut result = sets
        .iter()
        .map(|it| encoding.state_values(it))
        .collect::<Vec<_>>();
    result.sort();
    result
}

/// Check that `set` is closed under `relation` and that every state of `set` can reach
/// every other state.
fn assert_attractor(relation: &TransitionRelation, set: &StateSet) -> Cancellable<()> {
    let encoding = relation.encoding();
    assert!(!set.is_empty());
    assert!(relation.successors(set).is_subset(set));
    for state in encoding.state_values(set) {
        let forward = ForwardReachability::run(relation, encoding.mk_state(&state))?;
        assert_eq!(encoding.state_values(&forward), encoding.state_values(set));
    }
    Ok(())
}

/// Check that the given attractors are pairwise disjoint and that every state can reach
/// at least one of them.
fn assert_partition(relation: &TransitionRelation, attractors: &[StateSet]) -> Cancellable<()> {
    let encoding = relation.encoding();
    let mut union = encoding.mk_empty_states();
    for attractor in attractors {
        assert!(attractor.intersect(&union).is_empty());
        union = union.union(attractor);
    }
    let basin = BackwardReachability::run(relation, union)?;
    assert!(encoding.mk_unit_states().is_subset(&basin));
    Ok(())
}

#[test]
fn test_fixed_points_toggle() {
    init_logger();
    let (sync, async_relation) = mk_relations(&toggle_network());
    let encoding = sync.encoding().clone();
    let expected = vec![vec![0, 0], vec![1, 1]];
    assert_eq!(encoding.state_values(&fixed_points(&sync)), expected);
    assert_eq!(encoding.state_values(&fixed_points(&async_relation)), expected);
}

#[test]
fn test_fixed_points_constant() {
    init_logger();
    let (sync, async_relation) = mk_relations(&constant_network());
    let encoding = sync.encoding().clone();
    assert_eq!(encoding.state_values(&fixed_points(&sync)), vec![vec![1]]);
    assert_eq!(
        encoding.state_values(&fixed_points(&async_relation)),
        vec![vec![1]]
    );
}

#[test]
fn test_fixed_points_multi_valued() {
    init_logger();
    let (sync, _) = mk_relations(&counter_network());
    let encoding = sync.encoding().clone();
    // The invalid pattern `3` is not a fixed point, even though no transition leaves it.
    assert_eq!(encoding.state_values(&fixed_points(&sync)), vec![vec![2]]);
}

#[test]
fn test_no_fixed_points() {
    init_logger();
    let (sync, async_relation) = mk_relations(&negative_loop_network());
    assert!(fixed_points(&sync).is_empty());
    assert!(fixed_points(&async_relation).is_empty());
}

#[test]
fn test_find_attractors_toggle() -> Cancellable<()> {
    init_logger();
    let (sync, async_relation) = mk_relations(&toggle_network());
    let encoding = sync.encoding().clone();
    let nothing = encoding.mk_empty_states();

    let attractors = find_attractors(&AttractorConfig::from(&sync), &nothing, 0)?;
    for attractor in &attractors {
        assert_attractor(&sync, attractor)?;
    }
    assert_partition(&sync, &attractors)?;
    assert_eq!(
        explicit(&encoding, &attractors),
        vec![
            vec![vec![0, 0]],
            vec![vec![0, 1], vec![1, 0]],
            vec![vec![1, 1]],
        ]
    );

    let attractors = find_attractors(&AttractorConfig::from(&async_relation), &nothing, 0)?;
    assert_partition(&async_relation, &attractors)?;
    assert_eq!(
        explicit(&encoding, &attractors),
        vec![vec![vec![0, 0]], vec![vec![1, 1]]]
    );
    Ok(())
}

#[test]
fn test_find_attractors_with_exclusion() -> Cancellable<()> {
    init_logger();
    let (sync, _) = mk_relations(&toggle_network());
    let encoding = sync.encoding().clone();

    let fixed = fixed_points(&sync);
    let excluded = BackwardReachability::run(&sync, fixed)?;
    let attractors = find_attractors(&AttractorConfig::from(&sync), &excluded, 0)?;
    assert_eq!(
        explicit(&encoding, &attractors),
        vec![vec![vec![0, 1], vec![1, 0]]]
    );

    let everything = encoding.mk_unit_states();
    let attractors = find_attractors(&AttractorConfig::from(&sync), &everything, 0)?;
    assert!(attractors.is_empty());
    Ok(())
}

#[test]
fn test_find_attractors_is_seed_independent() -> Cancellable<()> {
    init_logger();
    let (sync, async_relation) = mk_relations(&independent_oscillators());
    let encoding = sync.encoding().clone();
    let nothing = encoding.mk_empty_states();

    for seed in [0, 1, 17, 12345] {
        let mut config = AttractorConfig::from(&sync);
        config.settle_steps = (seed % 4) as usize;

        let attractors = find_attractors(&config, &nothing, seed)?;
        assert_eq!(
            explicit(&encoding, &attractors),
            vec![
                vec![vec![0, 0], vec![1, 1]],
                vec![vec![0, 1], vec![1, 0]],
            ]
        );

        let attractors = find_attractors(&AttractorConfig::from(&async_relation), &nothing, seed)?;
        assert_eq!(attractors.len(), 1);
        assert_eq!(attractors[0].exact_cardinality(), BigInt::from(4));
    }
    Ok(())
}

#[test]
fn test_random_pivot_generator() -> Cancellable<()> {
    init_logger();
    let (_, async_relation) = mk_relations(&mv_oscillator_network());
    let encoding = async_relation.encoding().clone();

    let state = RandomPivotState::new(encoding.mk_unit_states(), 3);
    assert_eq!(state.remaining().exact_cardinality(), BigInt::from(6));

    let generator = RandomPivotAttractors::configure(&async_relation, state);
    let mut attractors = Vec::new();
    for attractor in generator {
        attractors.push(attractor?);
    }
    assert_eq!(attractors.len(), 1);
    assert_attractor(&async_relation, &attractors[0])?;
    Ok(())
}

#[test]
fn test_toggle_loop_is_not_async_stable() -> Cancellable<()> {
    init_logger();
    let (sync, _) = mk_relations(&toggle_network());
    let encoding = sync.encoding().clone();
    let toggle_loop = encoding
        .mk_state(&[0, 1])
        .union(&encoding.mk_state(&[1, 0]));
    assert!(!is_async_stable_loop(&sync, &toggle_loop)?);
    Ok(())
}

#[test]
fn test_negative_loop_is_async_stable() -> Cancellable<()> {
    init_logger();
    let (sync, async_relation) = mk_relations(&negative_loop_network());
    let encoding = sync.encoding().clone();
    let cycle = ForwardReachability::run(&sync, encoding.mk_state(&[0, 0]))?;
    assert_eq!(cycle.exact_cardinality(), BigInt::from(4));
    assert!(is_async_stable_loop(&sync, &cycle)?);
    assert_attractor(&async_relation, &cycle)?;
    Ok(())
}

#[test]
fn test_multi_valued_loop_is_not_async_stable() -> Cancellable<()> {
    init_logger();
    let (sync, _) = mk_relations(&mv_oscillator_network());
    let encoding = sync.encoding().clone();
    let cycle = encoding.mk_unit_states();
    assert!(!is_async_stable_loop(&sync, &cycle)?);
    assert!(!is_async_stable_loop(&sync, &encoding.mk_empty_states())?);
    Ok(())
}

#[test]
fn test_search_toggle_sync() -> Result<(), AttractorError> {
    init_logger();
    let search = AttractorSearch::new(&toggle_network(), SearchMode::Synchronous.into())?;
    let encoding = search.encoding().clone();
    let attractors = search.run()?;

    assert_eq!(attractors.len(), 2);
    assert_eq!(attractors[0].kind, AttractorKind::FixedPoints);
    assert_eq!(
        encoding.state_values(&attractors[0].states),
        vec![vec![0, 0], vec![1, 1]]
    );
    assert_eq!(attractors[1].kind, AttractorKind::SynchronousLoop);
    assert_eq!(
        encoding.state_values(&attractors[1].states),
        vec![vec![0, 1], vec![1, 0]]
    );
    assert_attractor(search.sync_relation(), &attractors[1].states)?;
    Ok(())
}

#[test]
fn test_search_toggle_async() -> Result<(), AttractorError> {
    init_logger();
    let search = AttractorSearch::new(&toggle_network(), SearchMode::Asynchronous.into())?;
    let encoding = search.encoding().clone();
    let attractors = search.run()?;

    // The synchronous loop is rejected and the fixed points attract everything.
    assert_eq!(attractors.len(), 1);
    assert_eq!(attractors[0].kind, AttractorKind::FixedPoints);
    assert_eq!(
        encoding.state_values(&attractors[0].states),
        vec![vec![0, 0], vec![1, 1]]
    );
    Ok(())
}

#[test]
fn test_search_single_fixed_point() -> Result<(), AttractorError> {
    init_logger();
    for mode in [SearchMode::Synchronous, SearchMode::Asynchronous] {
        let search = AttractorSearch::new(&constant_network(), mode.into())?;
        let attractors = search.run()?;
        assert_eq!(attractors.len(), 1);
        assert_eq!(attractors[0].kind, AttractorKind::FixedPoints);
        assert_eq!(
            search.encoding().state_values(&attractors[0].states),
            vec![vec![1]]
        );
    }
    Ok(())
}

#[test]
fn test_search_multi_valued_fixed_point() -> Result<(), AttractorError> {
    init_logger();
    for mode in [SearchMode::Synchronous, SearchMode::Asynchronous] {
        let search = AttractorSearch::new(&counter_network(), mode.into())?;
        let attractors = search.run()?;
        assert_eq!(attractors.len(), 1);
        assert_eq!(
            search.encoding().state_values(&attractors[0].states),
            vec![vec![2]]
        );
    }
    Ok(())
}

#[test]
fn test_search_async_stable_loop() -> Result<(), AttractorError> {
    init_logger();
    let network = negative_loop_network();

    let search = AttractorSearch::new(&network, SearchMode::Synchronous.into())?;
    let attractors = search.run()?;
    assert_eq!(attractors.len(), 1);
    assert_eq!(attractors[0].kind, AttractorKind::SynchronousLoop);

    let search = AttractorSearch::new(&network, SearchMode::Asynchronous.into())?;
    let attractors = search.run()?;
    assert_eq!(attractors.len(), 1);
    assert_eq!(attractors[0].kind, AttractorKind::AsyncStableLoop);
    assert_eq!(attractors[0].states.exact_cardinality(), BigInt::from(4));
    Ok(())
}

#[test]
fn test_search_async_only_attractor() -> Result<(), AttractorError> {
    init_logger();
    let network = mv_oscillator_network();

    let search = AttractorSearch::new(&network, SearchMode::Synchronous.into())?;
    let attractors = search.run()?;
    assert_eq!(attractors.len(), 1);
    assert_eq!(attractors[0].kind, AttractorKind::SynchronousLoop);
    assert_eq!(attractors[0].states.exact_cardinality(), BigInt::from(6));

    let search = AttractorSearch::new(&network, SearchMode::Asynchronous.into())?;
    let attractors = search.run()?;
    assert_eq!(attractors.len(), 1);
    assert_eq!(attractors[0].kind, AttractorKind::AsynchronousAttractor);

    let (_, async_relation) = mk_relations(&network);
    assert_eq!(
        async_relation.encoding().state_values(&attractors[0].states),
        search.encoding().state_values(&search.encoding().mk_unit_states())
    );
    assert_attractor(&async_relation, &attractors[0].states)?;
    Ok(())
}

#[test]
fn test_search_two_async_rejected_loops() -> Result<(), AttractorError> {
    init_logger();
    let search = AttractorSearch::new(&independent_oscillators(), SearchMode::Asynchronous.into())?;
    let attractors = search.run()?;
    assert_eq!(attractors.len(), 1);
    assert_eq!(attractors[0].kind, AttractorKind::AsynchronousAttractor);
    assert_eq!(attractors[0].states.exact_cardinality(), BigInt::from(4));
    Ok(())
}

#[test]
fn test_search_empty_relation() {
    init_logger();
    let result = AttractorSearch::new(&contradictory_network(), SearchMode::Synchronous.into());
    assert!(matches!(result, Err(AttractorError::EmptyTransitionRelation)));
}

#[test]
fn test_search_respects_symbolic_limit() {
    init_logger();
    let mut config = SearchConfig::new(SearchMode::Asynchronous);
    config.max_symbolic_size = 1;
    let search = AttractorSearch::new(&mv_oscillator_network(), config.clone()).unwrap();
    assert_eq!(search.config(), &config);
    assert!(matches!(search.run(), Err(AttractorError::Cancelled(_))));
}

#[test]
fn test_random_pivot_in_large_network() -> Cancellable<()> {
    init_logger();
    // `x0' = 1` and `xi' = xi` over 520 Boolean variables. Every state with `x0 = 1` is
    // a fixed point, and there are far more of them than an `f64` can count.
    let ranges = vec![1u32; 520];
    let mut tables = vec![UpdateTable::constant(1)];
    tables.extend((1..ranges.len()).map(|i| mk_table(&ranges, vec![i], |v| v[0])));
    let variables = ranges.iter().map(|r| NetworkVariable::new(*r)).collect();
    let network = MvNetwork::new(variables, tables).unwrap();

    let encoding = Arc::new(SymbolicEncoding::new(&network.ranges()).unwrap());
    let sync = TransitionRelation::build_sync(&network, encoding.clone());
    let candidates = encoding.mk_partial_state(&[(0, 1)]);

    let generator = RandomPivotAttractors::configure(&sync, RandomPivotState::new(candidates, 11));
    let mut found = encoding.mk_empty_states();
    for attractor in generator.take(3) {
        let attractor = attractor?;
        assert!(attractor.is_singleton());
        assert!(!attractor.is_subset(&found));
        assert!(sync.successors(&attractor).is_subset(&attractor));
        assert_eq!(encoding.state_values(&attractor)[0][0], 1);
        found = found.union(&attractor);
    }
    assert_eq!(found.exact_cardinality(), BigInt::from(3));
    Ok(())
}

/// `x' = x`, but only defined for `x = 1`.
fn partial_identity_network() -> MvNetwork {
    MvNetwork::new(
        vec![NetworkVariable::new(1)],
        vec![UpdateTable::new(vec![0], vec![vec![1]], vec![1])],
    )
    .unwrap()
}

#[test]
fn test_search_reports_deadlocks() -> Result<(), AttractorError> {
    init_logger();
    for mode in [SearchMode::Synchronous, SearchMode::Asynchronous] {
        let search = AttractorSearch::new(&partial_identity_network(), mode.into())?;
        let encoding = search.encoding().clone();
        let attractors = search.run()?;

        assert_eq!(attractors.len(), 2);
        assert_eq!(attractors[0].kind, AttractorKind::FixedPoints);
        assert_eq!(encoding.state_values(&attractors[0].states), vec![vec![1]]);
        assert_eq!(attractors[1].kind, AttractorKind::Deadlock);
        assert_eq!(encoding.state_values(&attractors[1].states), vec![vec![0]]);
    }
    Ok(())
}
