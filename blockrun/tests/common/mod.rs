//! Common test utilities and macros

use blockrun::{Outcome, Program, Value, ValueQueue};

#[derive(Debug)]
pub enum TestResult {
    Success(Value),
    Empty,
    Error(String),
    ErrorRegex(String),
}

impl PartialEq for TestResult {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TestResult::Success(a), TestResult::Success(b)) => a == b,
            (TestResult::Empty, TestResult::Empty) => true,
            (TestResult::Error(a), TestResult::Error(b)) => a == b,
            (TestResult::ErrorRegex(pattern), TestResult::Error(msg)) => {
                regex::Regex::new(pattern).unwrap().is_match(msg)
            }
            (TestResult::Error(msg), TestResult::ErrorRegex(pattern)) => {
                regex::Regex::new(pattern).unwrap().is_match(msg)
            }
            _ => false,
        }
    }
}

/// Evaluates `program` on `inputs`, capturing the diagnostic channel.
///
/// A failed run must leave exactly one diagnostic line, which becomes the
/// error message of the result.
pub fn run_program_test(program: &Program, inputs: &[i128]) -> TestResult {
    let mut diagnostics = Vec::new();
    let outcome = program.evaluate(
        &mut ValueQueue::new(inputs.iter().copied()),
        &mut diagnostics,
    );
    let diagnostics = String::from_utf8(diagnostics).unwrap();

    match outcome {
        Outcome::Value(value) => {
            assert!(diagnostics.is_empty(), "unexpected diagnostic: {diagnostics}");
            TestResult::Success(value)
        }
        Outcome::Empty => {
            assert!(diagnostics.is_empty(), "unexpected diagnostic: {diagnostics}");
            TestResult::Empty
        }
        Outcome::Failed => {
            let lines: Vec<&str> = diagnostics.lines().collect();
            assert_eq!(lines.len(), 1, "expected one diagnostic, got {lines:?}");
            TestResult::Error(lines[0].to_string())
        }
    }
}

#[macro_export]
macro_rules! check_program {
    ($test_name:ident, program=$program:expr, inputs=[$($input:expr),* $(,)?], result=$expected:expr) => {
        #[test]
        fn $test_name() {
            let program = $program;
            let result = crate::common::run_program_test(&program, &[$($input),*]);
            assert_eq!(result, $expected);
        }
    };
}
