//! Ordered, read-only collection of stack frames

use std::fmt;
use std::ops::Index;
use std::slice;

use super::StackFrame;

/// The frames of a PML error, outermost call first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackTrace {
    frames: Vec<StackFrame>,
}

impl StackTrace {
    pub fn new(frames: Vec<StackFrame>) -> StackTrace {
        StackTrace { frames }
    }

    pub fn empty() -> StackTrace {
        StackTrace::default()
    }

    pub fn len(&self) -> usize {
        self.frames
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames
            .is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, StackFrame> {
        self.frames
            .iter()
    }

    pub fn frames(&self) -> &[StackFrame] {
        &self.frames
    }

    /// The innermost frame, where the error was actually raised.
    pub fn innermost(&self) -> Option<&StackFrame> {
        self.frames
            .last()
    }
}

impl Index<usize> for StackTrace {
    type Output = StackFrame;

    fn index(&self, index: usize) -> &StackFrame {
        &self.frames[index]
    }
}

impl<'a> IntoIterator for &'a StackTrace {
    type Item = &'a StackFrame;
    type IntoIter = slice::Iter<'a, StackFrame>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<StackFrame> for StackTrace {
    fn from_iter<T: IntoIterator<Item = StackFrame>>(iter: T) -> Self {
        StackTrace {
            frames: iter
                .into_iter()
                .collect(),
        }
    }
}

impl fmt::Display for StackTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, frame) in self
            .frames
            .iter()
            .enumerate()
        {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", frame)?;
        }
        Ok(())
    }
}
