use biodivine_lib_bdd::Bdd;
use biodivine_lib_param_bn::biodivine_std::traits::Set;
use num_bigint::BigInt;

/// A symbolic set of network states.
///
/// The underlying [`Bdd`] only ever depends on the unprimed (current state) BDD variables
/// of a [`crate::encoding::SymbolicEncoding`]. Sets are immutable: every operation
/// produces a new set.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct StateSet {
    bdd: Bdd,
    /// Number of primed BDD variables, which are unconstrained in `bdd`.
    primed_bits: usize,
}

impl StateSet {
    /// Wrap a raw [`Bdd`] without checking that it only depends on state variables.
    pub(crate) fn new(bdd: Bdd, primed_bits: usize) -> StateSet {
        StateSet { bdd, primed_bits }
    }

    /// Create a set sharing the encoding of `self` but using a different [`Bdd`].
    pub(crate) fn copy(&self, bdd: Bdd) -> StateSet {
        StateSet::new(bdd, self.primed_bits)
    }

    pub fn as_bdd(&self) -> &Bdd {
        &self.bdd
    }

    /// The exact number of network states in this set.
    pub fn exact_cardinality(&self) -> BigInt {
        (self.bdd.exact_cardinality() >> self.primed_bits).into()
    }

    /// An approximate number of network states in this set.
    pub fn approx_cardinality(&self) -> f64 {
        self.bdd.cardinality() / 2.0f64.powi(self.primed_bits as i32)
    }

    /// The number of BDD nodes used by this set.
    pub fn symbolic_size(&self) -> usize {
        self.bdd.size()
    }

    pub fn is_singleton(&self) -> bool {
        self.exact_cardinality() == BigInt::from(1)
    }
}

impl Set for StateSet {
    fn union(&self, other: &Self) -> Self {
        self.copy(self.bdd.or(&other.bdd))
    }

    fn intersect(&self, other: &Self) -> Self {
        self.copy(self.bdd.and(&other.bdd))
    }

    fn minus(&self, other: &Self) -> Self {
        self.copy(self.bdd.and_not(&other.bdd))
    }

    fn is_empty(&self) -> bool {
        self.bdd.is_false()
    }

    fn is_subset(&self, other: &Self) -> bool {
        self.bdd.and_not(&other.bdd).is_false()
    }
}
