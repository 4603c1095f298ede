//! Test suites discovered in PML object definitions, and the results of
//! running them.

use std::fmt;
use std::time::Duration;

use super::ArgumentError;
use crate::stack::PmlError;

/// Names of suites and tests are non-empty and made of letters and digits
/// only, in any script. A leading digit is allowed.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphanumeric() => chars.all(char::is_alphanumeric),
        _ => false,
    }
}

pub fn validate_name(name: &str) -> Result<(), ArgumentError> {
    if name.is_empty() {
        return Err(ArgumentError::Empty("name"));
    }
    if !is_valid_name(name) {
        return Err(ArgumentError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// The outcome of a single run of a Test.
#[derive(Debug, Clone, PartialEq)]
pub struct TestResult {
    duration: Duration,
    error: Option<PmlError>,
}

impl TestResult {
    pub fn new(duration: Duration, error: Option<PmlError>) -> TestResult {
        TestResult { duration, error }
    }

    pub fn success(duration: Duration) -> TestResult {
        TestResult::new(duration, None)
    }

    pub fn failure(duration: Duration, error: PmlError) -> TestResult {
        TestResult::new(duration, Some(error))
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn error(&self) -> Option<&PmlError> {
        self.error
            .as_ref()
    }

    pub fn passed(&self) -> bool {
        self.error
            .is_none()
    }
}

type Observer = Box<dyn Fn(&Test) + Send + Sync>;

/// A single test method of a TestCase.
pub struct Test {
    name: String,
    suite: String,
    result: Option<TestResult>,
    observers: Vec<Observer>,
}

impl Test {
    fn new(suite: &str, name: &str) -> Test {
        Test {
            name: name.to_string(),
            suite: suite.to_string(),
            result: None,
            observers: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the TestCase this test belongs to.
    pub fn suite(&self) -> &str {
        &self.suite
    }

    pub fn result(&self) -> Option<&TestResult> {
        self.result
            .as_ref()
    }

    /// Replace the result of the previous run (if any), notifying observers.
    /// Returns the result being replaced.
    pub fn set_result(&mut self, result: Option<TestResult>) -> Option<TestResult> {
        let previous = std::mem::replace(&mut self.result, result);

        for observer in &self.observers {
            observer(self);
        }

        previous
    }

    /// Register a callback invoked every time the result changes.
    pub fn watch<F>(&mut self, observer: F)
    where
        F: Fn(&Test) + Send + Sync + 'static,
    {
        self.observers
            .push(Box::new(observer));
    }
}

impl fmt::Debug for Test {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Test")
            .field("name", &self.name)
            .field("suite", &self.suite)
            .field("result", &self.result)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl fmt::Display for Test {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.suite, self.name)
    }
}

/// A test suite: one PML object definition and the test methods found in
/// it. Use a TestCaseBuilder to create one.
#[derive(Debug)]
pub struct TestCase {
    name: String,
    tests: Vec<Test>,
    has_set_up: bool,
    has_tear_down: bool,
}

impl TestCase {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tests(&self) -> &[Test] {
        &self.tests
    }

    pub fn tests_mut(&mut self) -> impl Iterator<Item = &mut Test> {
        self.tests
            .iter_mut()
    }

    pub fn len(&self) -> usize {
        self.tests
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests
            .is_empty()
    }

    pub fn has_set_up(&self) -> bool {
        self.has_set_up
    }

    pub fn has_tear_down(&self) -> bool {
        self.has_tear_down
    }

    /// Look up a test by name, ignoring case as PML does.
    pub fn test(&self, name: &str) -> Option<&Test> {
        self.tests
            .iter()
            .find(|test| {
                test.name
                    .eq_ignore_ascii_case(name)
            })
    }

    pub fn test_mut(&mut self, name: &str) -> Option<&mut Test> {
        self.tests
            .iter_mut()
            .find(|test| {
                test.name
                    .eq_ignore_ascii_case(name)
            })
    }

    pub fn test_names(&self) -> impl Iterator<Item = &str> {
        self.tests
            .iter()
            .map(|test| test.name())
    }
}

impl PartialEq for TestCase {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.has_set_up == other.has_set_up
            && self.has_tear_down == other.has_tear_down
            && self
                .test_names()
                .eq(other.test_names())
    }
}

impl Eq for TestCase {}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone)]
pub struct TestCaseBuilder {
    name: String,
    tests: Vec<String>,
    has_set_up: bool,
    has_tear_down: bool,
}

impl TestCaseBuilder {
    pub fn new(name: &str) -> Result<TestCaseBuilder, ArgumentError> {
        validate_name(name)?;
        Ok(TestCaseBuilder {
            name: name.to_string(),
            tests: Vec::new(),
            has_set_up: false,
            has_tear_down: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a test. A name already present (in any case) is ignored, and the
    /// first spelling seen is kept.
    pub fn add_test(&mut self, name: &str) -> Result<&mut Self, ArgumentError> {
        validate_name(name)?;

        let duplicate = self
            .tests
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(name));

        if !duplicate {
            self.tests
                .push(name.to_string());
        }
        Ok(self)
    }

    pub fn set_up(&mut self, present: bool) -> &mut Self {
        self.has_set_up = present;
        self
    }

    pub fn tear_down(&mut self, present: bool) -> &mut Self {
        self.has_tear_down = present;
        self
    }

    pub fn build(&self) -> TestCase {
        let tests = self
            .tests
            .iter()
            .map(|name| Test::new(&self.name, name))
            .collect();

        TestCase {
            name: self
                .name
                .clone(),
            tests,
            has_set_up: self.has_set_up,
            has_tear_down: self.has_tear_down,
        }
    }
}
