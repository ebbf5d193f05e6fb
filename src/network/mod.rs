//! The multi-valued network model.
//!
//! A network consists of [`NetworkVariable`]s, each paired with an [`UpdateTable`] that
//! maps combinations of input values to the next value of the variable. Both objects are
//! validated once by [`MvNetwork::new`] and are immutable afterwards, so the symbolic
//! encoding never has to deal with values outside of the declared ranges.

mod flat;


use crate::error::AttractorError;
use crate::error::AttractorError::{EncodingOverflow, InvalidNetwork};
pub use flat::FlatNetwork;

/// A single variable of a multi-valued network.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkVariable {
    /// The maximal value of the variable. The variable can take values `0..=range`.
    /// A variable with `range == 0` is constant.
    pub range: u32,
    /// Offset added to every value when it is displayed. It has no effect on the dynamics.
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_value: i32,
}

impl NetworkVariable {
    pub fn new(range: u32) -> NetworkVariable {
        NetworkVariable {
            range,
            min_value: 0,
        }
    }

    pub fn with_offset(range: u32, min_value: i32) -> NetworkVariable {
        NetworkVariable { range, min_value }
    }
}

/// An explicit (partial) update table of one variable.
///
/// Row `i` assigns `rows[i][j]` to the input variable `inputs[j]`. When the current state
/// matches the row, the next value of the variable is `outputs[i]`. States that match
/// no row have no successor.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpdateTable {
    pub inputs: Vec<usize>,
    pub rows: Vec<Vec<u32>>,
    pub outputs: Vec<u32>,
}

impl UpdateTable {
    pub fn new(inputs: Vec<usize>, rows: Vec<Vec<u32>>, outputs: Vec<u32>) -> UpdateTable {
        UpdateTable {
            inputs,
            rows,
            outputs,
        }
    }

    /// A table without inputs which always produces `value`.
    pub fn constant(value: u32) -> UpdateTable {
        UpdateTable {
            inputs: Vec::new(),
            rows: vec![Vec::new()],
            outputs: vec![value],
        }
    }

    /// Iterate over `(row, output)` pairs of this table.
    pub fn entries(&self) -> impl Iterator<Item = (&[u32], u32)> {
        self.rows
            .iter()
            .map(|it| it.as_slice())
            .zip(self.outputs.iter().copied())
    }
}

/// A validated multi-valued network.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawNetwork"))]
pub struct MvNetwork {
    variables: Vec<NetworkVariable>,
    tables: Vec<UpdateTable>,
}

/// Unvalidated mirror of [`MvNetwork`] used for deserialization.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawNetwork {
    variables: Vec<NetworkVariable>,
    tables: Vec<UpdateTable>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawNetwork> for MvNetwork {
    type Error = AttractorError;

    fn try_from(value: RawNetwork) -> Result<Self, Self::Error> {
        MvNetwork::new(value.variables, value.tables)
    }
}

impl MvNetwork {
    /// Create a new network, checking that every table is consistent with the variable
    /// ranges.
    ///
    /// Out-of-range values are reported as [`AttractorError::EncodingOverflow`], all other
    /// structural problems as [`AttractorError::InvalidNetwork`].
    pub fn new(
        variables: Vec<NetworkVariable>,
        tables: Vec<UpdateTable>,
    ) -> Result<MvNetwork, AttractorError> {
        if variables.len() != tables.len() {
            return Err(InvalidNetwork(format!(
                "{} variables but {} update tables",
                variables.len(),
                tables.len()
            )));
        }

        for (var, table) in tables.iter().enumerate() {
            if table.rows.len() != table.outputs.len() {
                return Err(InvalidNetwork(format!(
                    "Variable {}: {} rows but {} outputs",
                    var,
                    table.rows.len(),
                    table.outputs.len()
                )));
            }

            for (i, input) in table.inputs.iter().enumerate() {
                if *input >= variables.len() {
                    return Err(InvalidNetwork(format!(
                        "Variable {}: input {} does not exist",
                        var, input
                    )));
                }
                if table.inputs[..i].contains(input) {
                    return Err(InvalidNetwork(format!(
                        "Variable {}: input {} is listed twice",
                        var, input
                    )));
                }
            }

            for (row, output) in table.entries() {
                if row.len() != table.inputs.len() {
                    return Err(InvalidNetwork(format!(
                        "Variable {}: row {:?} does not match {} inputs",
                        var,
                        row,
                        table.inputs.len()
                    )));
                }
                for (input, value) in table.inputs.iter().zip(row) {
                    check_range(*input, *value, &variables[*input])?;
                }
                check_range(var, output, &variables[var])?;
            }
        }

        Ok(MvNetwork { variables, tables })
    }

    pub fn num_vars(&self) -> usize {
        self.variables.len()
    }

    pub fn variables(&self) -> &[NetworkVariable] {
        &self.variables
    }

    pub fn variable(&self, var: usize) -> &NetworkVariable {
        &self.variables[var]
    }

    pub fn table(&self, var: usize) -> &UpdateTable {
        &self.tables[var]
    }

    pub fn ranges(&self) -> Vec<u32> {
        self.variables.iter().map(|it| it.range).collect()
    }

    /// Variables with a non-trivial range, i.e. variables that take part in the dynamics.
    pub fn dynamic_variables(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.num_vars()).filter(|var| self.variables[*var].range > 0)
    }
}

fn check_range(var: usize, value: u32, variable: &NetworkVariable) -> Result<(), AttractorError> {
    if value > variable.range {
        Err(EncodingOverflow {
            variable: var,
            value,
            range: variable.range,
        })
    } else {
        Ok(())
    }
}
