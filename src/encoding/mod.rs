//! Symbolic encoding of multi-valued network states.
//!
//! Each network variable with range `r` is represented by a block of [`bits`]`(r)` Boolean
//! BDD variables using the standard binary encoding (least significant bit first). Every
//! bit has an *unprimed* copy (current state) and a *primed* copy (next state). The copies
//! are interleaved in the BDD variable ordering: state bit `k` is BDD variable `2k` and its
//! primed copy is BDD variable `2k + 1`. This keeps transition relations small and allows
//! renaming between the two copies without reordering.
//!
//! Binary encoding does not use all bit patterns when `r + 1` is not a power of two. Such
//! patterns are excluded by [`SymbolicEncoding::valid_states`], which is part of every
//! [`StateSet`] produced by this module.

mod state_set;


use crate::error::AttractorError;
use biodivine_lib_bdd::{Bdd, BddValuation, BddVariable, BddVariableSet};
use biodivine_lib_param_bn::biodivine_std::traits::Set;
use num_bigint::{BigInt, RandBigInt};
use rand::rngs::StdRng;
pub use state_set::StateSet;

/// The number of Boolean variables needed to represent values `0..=range`.
pub fn bits(range: u32) -> usize {
    if range == 0 {
        0
    } else {
        (range.ilog2() + 1) as usize
    }
}

/// BDD variables of a single network variable.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VariableBlock {
    range: u32,
    bits: Vec<BddVariable>,
    primed_bits: Vec<BddVariable>,
}

impl VariableBlock {
    pub fn range(&self) -> u32 {
        self.range
    }

    /// Unprimed BDD variables of this block, least significant bit first.
    pub fn bits(&self) -> &[BddVariable] {
        &self.bits
    }

    /// Primed BDD variables of this block, least significant bit first.
    pub fn primed_bits(&self) -> &[BddVariable] {
        &self.primed_bits
    }

    fn decode(&self, valuation: &BddValuation) -> u32 {
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, bit)| valuation.value(**bit))
            .map(|(i, _)| 1u32 << i)
            .sum()
    }
}

/// Maps the state space of a multi-valued network onto BDD variables.
#[derive(Clone)]
pub struct SymbolicEncoding {
    bdd_variables: BddVariableSet,
    blocks: Vec<VariableBlock>,
    state_variables: Vec<BddVariable>,
    primed_variables: Vec<BddVariable>,
    valid_states: Bdd,
    valid_primed: Bdd,
}

impl SymbolicEncoding {
    /// Create an encoding for variables with the given `ranges`.
    pub fn new(ranges: &[u32]) -> Result<SymbolicEncoding, AttractorError> {
        let state_bits: usize = ranges.iter().map(|it| bits(*it)).sum();
        let Some(total) = state_bits
            .checked_mul(2)
            .and_then(|it| u16::try_from(it).ok())
        else {
            return Err(AttractorError::TooManyBits(state_bits));
        };

        let bdd_variables = BddVariableSet::new_anonymous(total);
        let all = bdd_variables.variables();
        let state_variables: Vec<BddVariable> = all.iter().step_by(2).copied().collect();
        let primed_variables: Vec<BddVariable> = all.iter().skip(1).step_by(2).copied().collect();

        let mut blocks = Vec::with_capacity(ranges.len());
        let mut offset = 0;
        for range in ranges {
            let width = bits(*range);
            blocks.push(VariableBlock {
                range: *range,
                bits: state_variables[offset..offset + width].to_vec(),
                primed_bits: primed_variables[offset..offset + width].to_vec(),
            });
            offset += width;
        }

        let mut valid_states = bdd_variables.mk_true();
        let mut valid_primed = bdd_variables.mk_true();
        for block in &blocks {
            valid_states = valid_states.and(&mk_at_most(&bdd_variables, &block.bits, block.range));
            valid_primed =
                valid_primed.and(&mk_at_most(&bdd_variables, &block.primed_bits, block.range));
        }

        Ok(SymbolicEncoding {
            bdd_variables,
            blocks,
            state_variables,
            primed_variables,
            valid_states,
            valid_primed,
        })
    }

    pub fn bdd_variables(&self) -> &BddVariableSet {
        &self.bdd_variables
    }

    pub fn num_vars(&self) -> usize {
        self.blocks.len()
    }

    pub fn block(&self, var: usize) -> &VariableBlock {
        &self.blocks[var]
    }

    /// All unprimed BDD variables in the variable ordering.
    pub fn state_variables(&self) -> &[BddVariable] {
        &self.state_variables
    }

    /// All primed BDD variables in the variable ordering.
    pub fn primed_variables(&self) -> &[BddVariable] {
        &self.primed_variables
    }

    /// Encode `var == value` over the unprimed (or primed) block of `var`.
    ///
    /// # Panics
    ///
    /// Panics if `value` is outside of the range of `var`.
    pub fn mk_value(&self, var: usize, value: u32, primed: bool) -> Bdd {
        let block = &self.blocks[var];
        assert!(
            value <= block.range,
            "Value {} out of range [0, {}] of variable {}",
            value,
            block.range,
            var
        );
        let bits = if primed {
            &block.primed_bits
        } else {
            &block.bits
        };
        bits.iter()
            .enumerate()
            .fold(self.bdd_variables.mk_true(), |acc, (i, bit)| {
                let literal = self.bdd_variables.mk_var(*bit);
                if (value >> i) & 1 == 1 {
                    acc.and(&literal)
                } else {
                    acc.and(&literal.not())
                }
            })
    }

    /// Encode a partial assignment of values as a raw conjunction of [`Self::mk_value`].
    pub fn mk_assignment(&self, assignment: &[(usize, u32)], primed: bool) -> Bdd {
        assignment
            .iter()
            .fold(self.bdd_variables.mk_true(), |acc, (var, value)| {
                acc.and(&self.mk_value(*var, *value, primed))
            })
    }

    /// The set of all states that agree with the given partial assignment.
    pub fn mk_partial_state(&self, assignment: &[(usize, u32)]) -> StateSet {
        self.mk_states(self.mk_assignment(assignment, false))
    }

    /// The singleton set containing the state with the given `values`.
    ///
    /// # Panics
    ///
    /// Panics if the number of values does not match the number of variables, or if
    /// a value is out of range.
    pub fn mk_state(&self, values: &[u32]) -> StateSet {
        assert_eq!(values.len(), self.num_vars());
        let assignment = values.iter().copied().enumerate().collect::<Vec<_>>();
        self.mk_partial_state(&assignment)
    }

    pub fn mk_empty_states(&self) -> StateSet {
        self.mk_states(self.bdd_variables.mk_false())
    }

    /// The set of all valid states.
    pub fn mk_unit_states(&self) -> StateSet {
        self.mk_states(self.valid_states.clone())
    }

    /// Convert a [`Bdd`] over unprimed variables into a [`StateSet`], removing invalid
    /// bit patterns.
    pub fn mk_states(&self, bdd: Bdd) -> StateSet {
        StateSet::new(bdd.and(&self.valid_states), self.primed_variables.len())
    }

    /// The predicate restricting unprimed blocks to valid values.
    pub fn valid_states(&self) -> &Bdd {
        &self.valid_states
    }

    /// The predicate restricting primed blocks to valid values.
    pub fn valid_primed(&self) -> &Bdd {
        &self.valid_primed
    }

    /// The relation in which every bit is equal to its primed copy.
    pub fn identity(&self) -> Bdd {
        self.state_variables
            .iter()
            .zip(&self.primed_variables)
            .fold(self.bdd_variables.mk_true(), |acc, (x, y)| {
                let x = self.bdd_variables.mk_var(*x);
                let y = self.bdd_variables.mk_var(*y);
                acc.and(&x.iff(&y))
            })
    }

    /// The relation in which at least one bit of `var` differs from its primed copy.
    pub fn block_changes(&self, var: usize) -> Bdd {
        let block = &self.blocks[var];
        block
            .bits
            .iter()
            .zip(&block.primed_bits)
            .fold(self.bdd_variables.mk_false(), |acc, (x, y)| {
                let x = self.bdd_variables.mk_var(*x);
                let y = self.bdd_variables.mk_var(*y);
                acc.or(&x.xor(&y))
            })
    }

    /// Move a state set onto the primed BDD variables.
    pub fn prime(&self, set: &StateSet) -> Bdd {
        let mut result = set.as_bdd().clone();
        for (x, y) in self.state_variables.iter().zip(&self.primed_variables) {
            // SAFETY: `set` does not depend on primed variables and `y` directly follows
            // `x` in the ordering, so the renaming keeps the BDD ordered.
            unsafe { result.rename_variable(*x, *y) };
        }
        result
    }

    /// Move a [`Bdd`] over primed variables back onto the unprimed variables.
    ///
    /// The argument must not depend on unprimed variables.
    pub fn unprime(&self, bdd: Bdd) -> StateSet {
        let mut result = bdd;
        for (x, y) in self.state_variables.iter().zip(&self.primed_variables) {
            // SAFETY: `bdd` does not depend on unprimed variables and `x` directly precedes
            // `y` in the ordering, so the renaming keeps the BDD ordered.
            unsafe { result.rename_variable(*y, *x) };
        }
        StateSet::new(result, self.primed_variables.len())
    }

    /// Pick one state of `set` uniformly at random.
    ///
    /// A random index below the exact cardinality of `set` is drawn first. Then bits are
    /// fixed one by one: the index selects the `true` branch if it is smaller than the
    /// number of states in that branch, otherwise it is shifted into the `false` branch.
    pub fn pick_random(&self, set: &StateSet, rng: &mut StdRng) -> Option<StateSet> {
        if set.is_empty() {
            return None;
        }
        let mut index = rng.gen_bigint_range(&BigInt::from(0u8), &set.exact_cardinality());
        let mut result = set.clone();
        for bit in &self.state_variables {
            let when_true = set.copy(result.as_bdd().var_select(*bit, true));
            let true_count = when_true.exact_cardinality();
            if index < true_count {
                result = when_true;
            } else {
                index -= true_count;
                result = set.copy(result.as_bdd().var_select(*bit, false));
            }
        }
        Some(result)
    }

    /// Pick an arbitrary (but deterministic) state of `set`.
    pub fn pick_any(&self, set: &StateSet) -> Option<StateSet> {
        let witness = set.as_bdd().sat_witness()?;
        let assignment = self
            .state_variables
            .iter()
            .map(|bit| (*bit, witness.value(*bit)))
            .collect::<Vec<_>>();
        Some(set.copy(set.as_bdd().select(&assignment)))
    }

    /// Decode the network state stored in the unprimed part of `valuation`.
    pub fn decode_state(&self, valuation: &BddValuation) -> Vec<u32> {
        self.blocks.iter().map(|it| it.decode(valuation)).collect()
    }

    /// Explicitly enumerate all states of `set`.
    ///
    /// This is intended for small sets (output and testing).
    pub fn state_values(&self, set: &StateSet) -> Vec<Vec<u32>> {
        let primed_false = self
            .primed_variables
            .iter()
            .map(|it| (*it, false))
            .collect::<Vec<_>>();
        let mut result = set
            .as_bdd()
            .select(&primed_false)
            .sat_valuations()
            .map(|valuation| self.decode_state(&valuation))
            .collect::<Vec<_>>();
        result.sort();
        result
    }
}

/// Encodes `value(bits) <= bound` using the binary comparator over `bits` (LSB first).
fn mk_at_most(variables: &BddVariableSet, bits: &[BddVariable], bound: u32) -> Bdd {
    let mut result = variables.mk_true();
    for (i, bit) in bits.iter().enumerate() {
        let literal = variables.mk_var(*bit);
        // `result` is the comparator on the lower `i` bits.
        result = if (bound >> i) & 1 == 1 {
            literal.not().or(&result)
        } else {
            literal.not().and(&result)
        };
    }
    result
}
