//! Reassemble the error a PML invocation raised from the lines the host
//! hands back.

use std::fmt;

use tracing::debug;

use super::{StackError, StackFrame, StackTrace};
use crate::host::HostValue;
use crate::language::ArgumentError;
use crate::resolving::{Resolve, SimpleResolver};

/// Prefix of the lines the host emits in place of frames when it could not
/// collect stack information.
pub const MISSING_STACK_PREFIX: &str = " *** ";

/// An error raised by PML code: the message the host reported, and where
/// it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PmlError {
    message: String,
    stack_trace: StackTrace,
}

impl PmlError {
    pub fn new(message: &str, stack_trace: StackTrace) -> Result<PmlError, ArgumentError> {
        if message.is_empty() {
            return Err(ArgumentError::Empty("message"));
        }

        Ok(PmlError {
            message: message.to_string(),
            stack_trace,
        })
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn stack_trace(&self) -> &StackTrace {
        &self.stack_trace
    }

    /// Build from raw text, one line per entry. Blank text means no error.
    pub fn from_string(text: &str) -> Result<Option<PmlError>, StackError> {
        PmlError::from_string_with(text, &SimpleResolver)
    }

    pub fn from_string_with(
        text: &str,
        resolver: &dyn Resolve,
    ) -> Result<Option<PmlError>, StackError> {
        if text
            .trim()
            .is_empty()
        {
            return Ok(None);
        }

        let lines: Vec<&str> = text
            .split('\n')
            .map(|line| {
                line.strip_suffix('\r')
                    .unwrap_or(line)
            })
            .filter(|line| {
                !line
                    .trim()
                    .is_empty()
            })
            .collect();

        PmlError::from_list_with(&lines, resolver)
    }

    /// Build from the table the host returns, whose keys are sequence
    /// numbers standing in for list positions. An empty table means no
    /// error.
    pub fn from_table(table: &[(f64, HostValue)]) -> Result<Option<PmlError>, StackError> {
        PmlError::from_table_with(table, &SimpleResolver)
    }

    pub fn from_table_with(
        table: &[(f64, HostValue)],
        resolver: &dyn Resolve,
    ) -> Result<Option<PmlError>, StackError> {
        if table.is_empty() {
            return Ok(None);
        }

        let mut entries: Vec<&(f64, HostValue)> = table
            .iter()
            .collect();

        for (key, _) in &entries {
            if !key.is_finite() {
                return Err(ArgumentError::InvalidKey(*key).into());
            }
        }
        entries.sort_by(|a, b| {
            a.0.total_cmp(&b.0)
        });

        let mut lines = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            match value {
                HostValue::String(s) if s.is_empty() => {
                    return Err(ArgumentError::EmptyValue(*key).into())
                }
                HostValue::String(s) => lines.push(s.as_str()),
                _ => return Err(ArgumentError::NotAString(*key).into()),
            }
        }

        PmlError::from_list_with(&lines, resolver)
    }

    /// Build from a message followed by pairs of (line information, call
    /// site). An empty list means no error.
    pub fn from_list<S: AsRef<str>>(lines: &[S]) -> Result<Option<PmlError>, StackError> {
        PmlError::from_list_with(lines, &SimpleResolver)
    }

    pub fn from_list_with<S: AsRef<str>>(
        lines: &[S],
        resolver: &dyn Resolve,
    ) -> Result<Option<PmlError>, StackError> {
        if lines.is_empty() {
            return Ok(None);
        }

        if lines.len() % 2 == 0 {
            return Err(ArgumentError::UnpairedStackLines(lines.len()).into());
        }

        let message = lines[0].as_ref();

        if is_missing_stack(lines) {
            debug!("Stack information missing");
            let error = PmlError::new(message, StackTrace::empty())?;
            return Ok(Some(error));
        }

        let frames = lines[1..]
            .chunks_exact(2)
            .map(|pair| StackFrame::parse(pair[0].as_ref(), pair[1].as_ref(), resolver))
            .collect::<Result<Vec<StackFrame>, StackError>>()?;

        debug!(frames = frames.len(), "Parsed stack trace");

        let error = PmlError::new(message, StackTrace::new(frames))?;
        Ok(Some(error))
    }
}

/// The host's way of saying it has no frames to report: exactly one pair
/// of lines, both starting with the missing-stack prefix.
fn is_missing_stack<S: AsRef<str>>(lines: &[S]) -> bool {
    lines.len() == 3
        && lines[1..]
            .iter()
            .all(|line| {
                line.as_ref()
                    .starts_with(MISSING_STACK_PREFIX)
            })
}

impl fmt::Display for PmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if !self
            .stack_trace
            .is_empty()
        {
            write!(f, "\n{}", self.stack_trace)?;
        }
        Ok(())
    }
}

impl std::error::Error for PmlError {}

#[cfg(test)]
mod check {
    use super::*;
    use crate::resolving::EntryPointKind;

    const MESSAGE: &str = "(44,33) FNF:File not found";
    const LINE_A: &str = "In line 3 of PML function pmlfiletest.testRead";
    const SITE_A: &str = "!file.^^open('/nowhere')";
    const LINE_B: &str = "Called from line 71 of PML function pmltestrunner.run";
    const SITE_B: &str = "!this.suite.$!<method>(!assert)";

    #[test]
    fn list_with_frames() {
        let error = PmlError::from_list(&[MESSAGE, LINE_A, SITE_A, LINE_B, SITE_B])
            .unwrap()
            .unwrap();

        assert_eq!(error.message(), MESSAGE);

        let trace = error.stack_trace();
        assert_eq!(trace.len(), 2);

        assert_eq!(trace[0].line_information(), LINE_A);
        assert_eq!(trace[0].line_number(), 3);
        assert_eq!(trace[0].column_number(), 6);
        assert_eq!(trace[0].call_site(), "!file.open('/nowhere')");

        assert_eq!(trace[1].line_information(), LINE_B);
        assert_eq!(trace[1].line_number(), 71);
        assert_eq!(trace[1].column_number(), 0);
        assert_eq!(trace[1].call_site(), SITE_B);
        assert_eq!(
            trace[1]
                .entry_point()
                .kind(),
            EntryPointKind::Method
        );
    }

    #[test]
    fn missing_stack_information() {
        let error = PmlError::from_list(&[
            MESSAGE,
            " *** Stack information missing",
            " *** (not available)",
        ])
        .unwrap()
        .unwrap();

        assert_eq!(error.message(), MESSAGE);
        assert!(error
            .stack_trace()
            .is_empty());
    }

    #[test]
    fn partial_sentinel_is_parsed_as_frames() {
        let result = PmlError::from_list(&[MESSAGE, " *** Stack information missing", SITE_A]);
        assert!(matches!(result, Err(StackError::Format(_))));
    }

    #[test]
    fn absence_is_not_an_error() {
        let empty: [&str; 0] = [];
        assert_eq!(PmlError::from_list(&empty), Ok(None));
        assert_eq!(PmlError::from_string(""), Ok(None));
        assert_eq!(PmlError::from_string("  \r\n \n"), Ok(None));
        assert_eq!(PmlError::from_table(&[]), Ok(None));
    }

    #[test]
    fn message_only() {
        let error = PmlError::from_list(&[MESSAGE])
            .unwrap()
            .unwrap();
        assert_eq!(error.message(), MESSAGE);
        assert!(error
            .stack_trace()
            .is_empty());
    }

    #[test]
    fn even_length_rejected() {
        assert_eq!(
            PmlError::from_list(&[MESSAGE, LINE_A]),
            Err(StackError::Argument(ArgumentError::UnpairedStackLines(2)))
        );
        assert_eq!(
            PmlError::from_list(&[MESSAGE, LINE_A, SITE_A, LINE_B]),
            Err(StackError::Argument(ArgumentError::UnpairedStackLines(4)))
        );
    }

    #[test]
    fn empty_message_rejected() {
        assert_eq!(
            PmlError::from_list(&["", " *** a", " *** b"]),
            Err(StackError::Argument(ArgumentError::Empty("message")))
        );
    }

    #[test]
    fn from_text() {
        let text = format!("{}\r\n{}\r\n\r\n{}\r\n", MESSAGE, LINE_A, SITE_A);
        let error = PmlError::from_string(&text)
            .unwrap()
            .unwrap();

        assert_eq!(error.message(), MESSAGE);
        assert_eq!(
            error
                .stack_trace()
                .len(),
            1
        );
        assert_eq!(error.stack_trace()[0].call_site(), "!file.open('/nowhere')");
    }

    #[test]
    fn from_table_sorts_keys() {
        let table = vec![
            (3.0, HostValue::String(SITE_A.to_string())),
            (1.0, HostValue::String(MESSAGE.to_string())),
            (5.0, HostValue::String(SITE_B.to_string())),
            (2.0, HostValue::String(LINE_A.to_string())),
            (4.0, HostValue::String(LINE_B.to_string())),
        ];

        let error = PmlError::from_table(&table)
            .unwrap()
            .unwrap();
        assert_eq!(error.message(), MESSAGE);
        assert_eq!(
            error
                .stack_trace()
                .len(),
            2
        );
        assert_eq!(error.stack_trace()[0].line_number(), 3);
        assert_eq!(error.stack_trace()[1].line_number(), 71);
    }

    #[test]
    fn from_table_rejects_bad_values() {
        let table = vec![
            (1.0, HostValue::String(MESSAGE.to_string())),
            (2.0, HostValue::Real(2.0)),
            (3.0, HostValue::String(SITE_A.to_string())),
        ];
        assert_eq!(
            PmlError::from_table(&table),
            Err(StackError::Argument(ArgumentError::NotAString(2.0)))
        );

        let table = vec![
            (1.0, HostValue::String(MESSAGE.to_string())),
            (2.0, HostValue::String(String::new())),
            (3.0, HostValue::String(SITE_A.to_string())),
        ];
        assert_eq!(
            PmlError::from_table(&table),
            Err(StackError::Argument(ArgumentError::EmptyValue(2.0)))
        );

        let table = vec![(f64::NAN, HostValue::String(MESSAGE.to_string()))];
        assert!(matches!(
            PmlError::from_table(&table),
            Err(StackError::Argument(ArgumentError::InvalidKey(_)))
        ));
    }

    #[test]
    fn display() {
        let error = PmlError::from_list(&[MESSAGE, LINE_A, SITE_A])
            .unwrap()
            .unwrap();
        assert_eq!(
            error.to_string(),
            format!("{}\n{}\n{}", MESSAGE, LINE_A, SITE_A)
        );

        let error = PmlError::from_list(&[MESSAGE])
            .unwrap()
            .unwrap();
        assert_eq!(error.to_string(), MESSAGE);
    }
}
