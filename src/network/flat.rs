use crate::error::AttractorError;
use crate::error::AttractorError::InvalidNetwork;
use crate::network::{MvNetwork, NetworkVariable, UpdateTable};

/// A network description in the flattened "host array" layout.
///
/// Per-variable lists are concatenated into single vectors:
///  - `input_variables` holds `input_counts[0]` indices of variable `0`, followed by
///    `input_counts[1]` indices of variable `1`, etc.
///  - `output_values` holds `row_counts[v]` outputs of each variable `v` in order.
///  - `input_values` holds, for each variable `v`, `row_counts[v]` rows of
///    `input_counts[v]` values each.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FlatNetwork {
    pub ranges: Vec<u32>,
    pub min_values: Vec<i32>,
    pub input_counts: Vec<usize>,
    pub input_variables: Vec<usize>,
    pub row_counts: Vec<usize>,
    pub input_values: Vec<u32>,
    pub output_values: Vec<u32>,
}

impl TryFrom<&FlatNetwork> for MvNetwork {
    type Error = AttractorError;

    fn try_from(value: &FlatNetwork) -> Result<Self, Self::Error> {
        let num_vars = value.ranges.len();
        for (name, len) in [
            ("min_values", value.min_values.len()),
            ("input_counts", value.input_counts.len()),
            ("row_counts", value.row_counts.len()),
        ] {
            if len != num_vars {
                return Err(InvalidNetwork(format!(
                    "`{}` has {} entries, expected {}",
                    name, len, num_vars
                )));
            }
        }

        let expected_inputs: usize = value.input_counts.iter().sum();
        let expected_rows: usize = value.row_counts.iter().sum();
        let expected_values: usize = value
            .input_counts
            .iter()
            .zip(&value.row_counts)
            .map(|(inputs, rows)| inputs * rows)
            .sum();
        for (name, len, expected) in [
            ("input_variables", value.input_variables.len(), expected_inputs),
            ("output_values", value.output_values.len(), expected_rows),
            ("input_values", value.input_values.len(), expected_values),
        ] {
            if len != expected {
                return Err(InvalidNetwork(format!(
                    "`{}` has {} entries, expected {}",
                    name, len, expected
                )));
            }
        }

        let mut inputs = value.input_variables.as_slice();
        let mut outputs = value.output_values.as_slice();
        let mut values = value.input_values.as_slice();
        let mut tables = Vec::with_capacity(num_vars);
        for var in 0..num_vars {
            let input_count = value.input_counts[var];
            let row_count = value.row_counts[var];

            let (var_inputs, rest) = inputs.split_at(input_count);
            inputs = rest;
            let (var_outputs, rest) = outputs.split_at(row_count);
            outputs = rest;
            let (var_values, rest) = values.split_at(input_count * row_count);
            values = rest;

            let rows = (0..row_count)
                .map(|row| var_values[row * input_count..(row + 1) * input_count].to_vec())
                .collect();
            tables.push(UpdateTable::new(
                var_inputs.to_vec(),
                rows,
                var_outputs.to_vec(),
            ));
        }

        let variables = value
            .ranges
            .iter()
            .zip(&value.min_values)
            .map(|(range, min)| NetworkVariable::with_offset(*range, *min))
            .collect();

        MvNetwork::new(variables, tables)
    }
}

impl TryFrom<FlatNetwork> for MvNetwork {
    type Error = AttractorError;

    fn try_from(value: FlatNetwork) -> Result<Self, Self::Error> {
        MvNetwork::try_from(&value)
    }
}
