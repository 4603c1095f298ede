//! Values crossing the boundary with the host application. The bridge that
//! actually calls into PML produces these; everything past this module only
//! sees ordered lines and PmlError.

use std::fmt;
use std::time::Duration;

use crate::language::TestResult;
use crate::stack::{PmlError, StackError};
use crate::resolving::{Resolve, SimpleResolver};

/// A single value held in a host table.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    String(String),
    Real(f64),
    Boolean(bool),
    /// Anything else, described by its PML type name.
    Object(String),
}

impl fmt::Display for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostValue::String(value) => write!(f, "'{}'", value),
            HostValue::Real(value) => write!(f, "{}", value),
            HostValue::Boolean(value) => write!(f, "{}", if *value { "TRUE" } else { "FALSE" }),
            HostValue::Object(kind) => write!(f, "<{}>", kind),
        }
    }
}

/// What came back from invoking a method through the host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostOutcome {
    /// The method completed. Whatever it returned is of no interest and
    /// has already been released.
    Returned,
    /// The method raised an error, reported as a table of lines keyed by
    /// sequence number.
    Raised(Vec<(f64, HostValue)>),
}

impl HostOutcome {
    /// The error carried by this outcome, if any. An empty table counts as
    /// no error.
    pub fn into_error(self) -> Result<Option<PmlError>, StackError> {
        self.into_error_with(&SimpleResolver)
    }

    pub fn into_error_with(self, resolver: &dyn Resolve) -> Result<Option<PmlError>, StackError> {
        match self {
            HostOutcome::Returned => Ok(None),
            HostOutcome::Raised(table) => PmlError::from_table_with(&table, resolver),
        }
    }
}

impl TestResult {
    /// Record the outcome of running a test that took the given time.
    pub fn from_outcome(
        duration: Duration,
        outcome: HostOutcome,
        resolver: &dyn Resolve,
    ) -> Result<TestResult, StackError> {
        let error = outcome.into_error_with(resolver)?;
        Ok(TestResult::new(duration, error))
    }
}

#[cfg(test)]
mod check {
    use super::*;
    use crate::language::ArgumentError;

    fn lines(values: &[&str]) -> Vec<(f64, HostValue)> {
        values
            .iter()
            .enumerate()
            .map(|(i, value)| ((i + 1) as f64, HostValue::String(value.to_string())))
            .collect()
    }

    #[test]
    fn returned_is_success() {
        let result =
            TestResult::from_outcome(Duration::from_millis(3), HostOutcome::Returned, &SimpleResolver)
                .unwrap();
        assert!(result.passed());
        assert_eq!(result.duration(), Duration::from_millis(3));
    }

    #[test]
    fn empty_table_is_success() {
        let outcome = HostOutcome::Raised(Vec::new());
        assert_eq!(outcome.into_error(), Ok(None));
    }

    #[test]
    fn raised_is_failure() {
        let outcome = HostOutcome::Raised(lines(&[
            "(46,28) Expected TRUE but was FALSE",
            "In line 5 of PML function pmlassert.isTrue",
            "return error 46 28 ^^|Expected TRUE but was FALSE|",
            "Called from line 9 of PML function sampletest.testTruth",
            "!assert.isTrue(FALSE)",
        ]));

        let result = TestResult::from_outcome(Duration::ZERO, outcome, &SimpleResolver).unwrap();
        assert!(!result.passed());

        let error = result
            .error()
            .unwrap();
        assert_eq!(error.message(), "(46,28) Expected TRUE but was FALSE");
        assert_eq!(
            error
                .stack_trace()
                .len(),
            2
        );
        assert_eq!(error.stack_trace()[0].column_number(), 19);
    }

    #[test]
    fn malformed_table_propagates() {
        let outcome = HostOutcome::Raised(vec![
            (1.0, HostValue::String("(1,1) oops".to_string())),
            (2.0, HostValue::Boolean(true)),
            (3.0, HostValue::String("x".to_string())),
        ]);

        assert_eq!(
            outcome.into_error(),
            Err(StackError::Argument(ArgumentError::NotAString(2.0)))
        );
    }

    #[test]
    fn display_values() {
        assert_eq!(HostValue::String("a".to_string()).to_string(), "'a'");
        assert_eq!(HostValue::Real(1.5).to_string(), "1.5");
        assert_eq!(HostValue::Boolean(false).to_string(), "FALSE");
        assert_eq!(HostValue::Object("GADGET".to_string()).to_string(), "<GADGET>");
    }
}
