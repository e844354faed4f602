//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;
pub mod mock_helpers;

use streamable_rs::Value;

/// Build a list value of integers
pub fn ints(values: &[i64]) -> Value {
    Value::List(values.iter().copied().map(Value::Int).collect())
}

/// Sort a list of values by their integer content, for multiset comparisons
pub fn sorted_ints(values: &[Value]) -> Vec<i64> {
    let mut out: Vec<i64> = values.iter().filter_map(Value::as_int).collect();
    out.sort_unstable();
    out
}
