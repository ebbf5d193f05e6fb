//! Conversion of symbolic state sets into readable per-variable value ranges.
//!
//! A set is first enumerated explicitly and then compacted: rows which agree on all
//! columns except one, and hold adjacent intervals in that column, are merged into a
//! single row. The compaction is applied to each column once, so the output is a list of
//! disjoint "boxes" that together cover exactly the decoded set.


use crate::encoding::{StateSet, SymbolicEncoding};
use crate::network::MvNetwork;
use std::cmp::Ordering;

/// A closed interval of variable values.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ValueRange {
    pub lo: u32,
    pub hi: u32,
}

impl ValueRange {
    pub fn single(value: u32) -> ValueRange {
        ValueRange {
            lo: value,
            hi: value,
        }
    }

    pub fn is_single(&self) -> bool {
        self.lo == self.hi
    }

    /// Render the range shifted by `offset`, either as `value` or as `[lo; hi]`.
    pub fn render(&self, offset: i32) -> String {
        let lo = i64::from(self.lo) + i64::from(offset);
        let hi = i64::from(self.hi) + i64::from(offset);
        if self.is_single() {
            format!("{}", lo)
        } else {
            format!("[{}; {}]", lo, hi)
        }
    }
}

/// Decode `set` into a compact list of rows, one [`ValueRange`] per network variable.
///
/// Rows are sorted lexicographically.
pub fn decode_ranges(encoding: &SymbolicEncoding, set: &StateSet) -> Vec<Vec<ValueRange>> {
    let mut rows = encoding
        .state_values(set)
        .into_iter()
        .map(|state| state.into_iter().map(ValueRange::single).collect::<Vec<_>>())
        .collect::<Vec<_>>();
    for column in 0..encoding.num_vars() {
        rows = merge_column(rows, column);
    }
    rows.sort();
    rows
}

/// Decode `set` into comma-separated lines, applying the `min_value` offsets of `network`.
pub fn format_rows(network: &MvNetwork, encoding: &SymbolicEncoding, set: &StateSet) -> Vec<String> {
    decode_ranges(encoding, set)
        .into_iter()
        .map(|row| {
            row.iter()
                .zip(network.variables())
                .map(|(range, variable)| range.render(variable.min_value))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect()
}

fn merge_column(mut rows: Vec<Vec<ValueRange>>, column: usize) -> Vec<Vec<ValueRange>> {
    rows.sort_by(|a, b| compare_except(a, b, column).then(a[column].cmp(&b[column])));

    let mut result: Vec<Vec<ValueRange>> = Vec::with_capacity(rows.len());
    for row in rows {
        if let Some(last) = result.last_mut() {
            let adjacent = last[column].hi.checked_add(1) == Some(row[column].lo);
            if adjacent && compare_except(last, &row, column) == Ordering::Equal {
                last[column].hi = row[column].hi;
                continue;
            }
        }
        result.push(row);
    }
    result
}

/// Lexicographic comparison of two rows, ignoring `column`.
fn compare_except(a: &[ValueRange], b: &[ValueRange], column: usize) -> Ordering {
    a.iter()
        .zip(b)
        .enumerate()
        .filter(|(i, _)| *i != column)
        .map(|(_, (x, y))| x.cmp(y))
        .find(|it| *it != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}
