//! Flattening raised faults into failure messages
//!
//! A fault is any `std::error::Error`. Its own message is its `Display`
//! output and its inner cause is `source()`. [`AggregateFault`] is the
//! composite fault: it gathers the errors of several sub-operations and
//! contributes no message of its own.
//!
//! `source()` chains are assumed to be acyclic. Owned Rust error types cannot
//! point back at themselves, so no cycle guard is applied.

use std::error::Error;
use std::fmt;

/// Boxed cause held by an [`AggregateFault`]
pub type BoxedFault = Box<dyn Error + Send + Sync + 'static>;

/// A fault aggregating several underlying causes, in order
#[derive(Debug, Default)]
pub struct AggregateFault {
    causes: Vec<BoxedFault>,
}

impl AggregateFault {
    pub fn new(causes: Vec<BoxedFault>) -> Self {
        Self { causes }
    }

    /// Collect the errors out of a batch of sub-operation results
    pub fn from_errors<T, E>(results: impl IntoIterator<Item = Result<T, E>>) -> Self
    where
        E: Into<BoxedFault>,
    {
        Self {
            causes: results
                .into_iter()
                .filter_map(Result::err)
                .map(Into::into)
                .collect(),
        }
    }

    pub fn push(&mut self, cause: impl Into<BoxedFault>) {
        self.causes.push(cause.into());
    }

    pub fn causes(&self) -> &[BoxedFault] {
        &self.causes
    }

    pub fn len(&self) -> usize {
        self.causes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.causes.is_empty()
    }
}

impl fmt::Display for AggregateFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("One or more errors occurred.")
    }
}

impl Error for AggregateFault {}

impl From<Vec<BoxedFault>> for AggregateFault {
    fn from(causes: Vec<BoxedFault>) -> Self {
        Self::new(causes)
    }
}

/// Ordered, human-readable messages for `fault`
///
/// An [`AggregateFault`] contributes the flattened messages of each cause in
/// order, depth first. Any other fault contributes its own message followed by
/// the flattened messages of its `source()`.
pub fn flatten(fault: &(dyn Error + 'static)) -> Vec<String> {
    let mut messages = Vec::new();
    flatten_into(fault, &mut messages);
    messages
}

fn flatten_into(fault: &(dyn Error + 'static), messages: &mut Vec<String>) {
    if let Some(aggregate) = fault.downcast_ref::<AggregateFault>() {
        for cause in aggregate.causes() {
            flatten_into(cause.as_ref(), messages);
        }
        return;
    }

    messages.push(fault.to_string());
    if let Some(inner) = fault.source() {
        flatten_into(inner, messages);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thiserror::Error as ThisError;

    #[derive(Debug, ThisError)]
    #[error("{0}")]
    struct Plain(&'static str);

    #[derive(Debug, ThisError)]
    #[error("{message}")]
    struct Wrapping {
        message: &'static str,
        #[source]
        inner: BoxedFault,
    }

    fn wrap(message: &'static str, inner: impl Into<BoxedFault>) -> Wrapping {
        Wrapping {
            message,
            inner: inner.into(),
        }
    }

    #[test]
    fn test_plain_fault() {
        assert_eq!(flatten(&Plain("X")), vec!["X"]);
    }

    #[test]
    fn test_aggregate_of_two_plain_causes() {
        let fault = AggregateFault::new(vec![Box::new(Plain("X")), Box::new(Plain("Y"))]);
        assert_eq!(flatten(&fault), vec!["X", "Y"]);
    }

    #[test]
    fn test_wrapped_inner_cause() {
        assert_eq!(flatten(&wrap("X", Plain("Y"))), vec!["X", "Y"]);
    }

    #[test]
    fn test_nested_aggregates_are_depth_first() {
        let inner = AggregateFault::new(vec![
            Box::new(wrap("B", Plain("C"))),
            Box::new(Plain("D")),
        ]);
        let outer = AggregateFault::new(vec![
            Box::new(Plain("A")),
            Box::new(inner),
            Box::new(Plain("E")),
        ]);
        assert_eq!(flatten(&outer), vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_aggregate_inside_wrapper() {
        let fault = wrap(
            "batch failed",
            AggregateFault::new(vec![Box::new(Plain("X")), Box::new(Plain("Y"))]),
        );
        assert_eq!(flatten(&fault), vec!["batch failed", "X", "Y"]);
    }

    #[test]
    fn test_empty_aggregate_contributes_nothing() {
        assert!(flatten(&AggregateFault::default()).is_empty());
    }

    #[test]
    fn test_from_errors_keeps_only_failures_in_order() {
        let results: Vec<Result<u8, Plain>> =
            vec![Err(Plain("first")), Ok(1), Err(Plain("second"))];
        let mut fault = AggregateFault::from_errors(results);
        assert_eq!(fault.len(), 2);
        fault.push(Plain("third"));
        assert_eq!(flatten(&fault), vec!["first", "second", "third"]);
    }
}
