//! A single frame of a PML stack trace

use std::fmt;
use std::hash::{Hash, Hasher};

use tracing::trace;

use super::{FormatError, StackError};
use crate::language::ArgumentError;
use crate::resolving::{EntryPoint, Resolve};

/// Marks the column of the failing expression within a call site line.
pub const CARET: &str = "^^";

/// One frame of a stack trace: the "In line N of ..." line reported by the
/// host together with the source line it refers to.
#[derive(Debug, Clone)]
pub struct StackFrame {
    line_number: u32,
    column_number: usize,
    entry_point: EntryPoint,
    call_site: String,
    line_information: String,
}

impl StackFrame {
    /// Parse a frame from the pair of lines the host reports for it.
    pub fn parse(
        line_information: &str,
        call_site: &str,
        resolver: &dyn Resolve,
    ) -> Result<StackFrame, StackError> {
        if line_information.is_empty() {
            return Err(ArgumentError::Empty("line information").into());
        }
        if call_site.is_empty() {
            return Err(ArgumentError::Empty("call site").into());
        }

        let re = regex!(r"^(?:In|Called from) line (\d+) of (.+)$");
        let cap = match re.captures(line_information) {
            Some(c) => c,
            None => {
                return Err(FormatError::UnrecognizedLine(line_information.to_string()).into())
            }
        };

        let digits = &cap[1];
        let line_number = digits
            .parse::<u32>()
            .map_err(|_| FormatError::InvalidLineNumber(digits.to_string()))?;

        let entry_point = resolver.resolve(&cap[2])?;

        let (column_number, call_site) = match call_site.find(CARET) {
            Some(i) => {
                let column = call_site[..i]
                    .chars()
                    .count();
                let mut stripped = String::with_capacity(call_site.len());
                stripped.push_str(&call_site[..i]);
                stripped.push_str(&call_site[i + CARET.len()..]);
                (column, stripped)
            }
            None => (0, call_site.to_string()),
        };

        trace!(line_number, column_number, %entry_point, "Parsed frame");

        Ok(StackFrame {
            line_number,
            column_number,
            entry_point,
            call_site,
            line_information: line_information.to_string(),
        })
    }

    pub fn line_number(&self) -> u32 {
        self.line_number
    }

    /// Character offset of the failing expression in the call site, or 0
    /// when the host did not mark one.
    pub fn column_number(&self) -> usize {
        self.column_number
    }

    pub fn entry_point(&self) -> &EntryPoint {
        &self.entry_point
    }

    /// The source line, with the column marker removed.
    pub fn call_site(&self) -> &str {
        &self.call_site
    }

    /// The "In line N of ..." line exactly as the host reported it.
    pub fn line_information(&self) -> &str {
        &self.line_information
    }

    /// The call site with the column marker put back in place.
    pub fn marked_call_site(&self) -> String {
        if self.column_number == 0 {
            return self
                .call_site
                .clone();
        }

        let offset = self
            .call_site
            .char_indices()
            .nth(self.column_number)
            .map(|(i, _)| i)
            .unwrap_or(
                self.call_site
                    .len(),
            );

        let mut result = String::with_capacity(self.call_site.len() + CARET.len());
        result.push_str(&self.call_site[..offset]);
        result.push_str(CARET);
        result.push_str(&self.call_site[offset..]);
        result
    }
}

impl PartialEq for StackFrame {
    fn eq(&self, other: &Self) -> bool {
        self.line_number == other.line_number
            && self.column_number == other.column_number
            && self.call_site == other.call_site
    }
}

impl Eq for StackFrame {}

impl Hash for StackFrame {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.line_number
            .hash(state);
        self.column_number
            .hash(state);
        self.call_site
            .hash(state);
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.line_information, self.marked_call_site())
    }
}
