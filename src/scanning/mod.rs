//! Line-at-a-time reading of PML source and error payloads

use std::io::{self, BufRead};

/// Lazily yields the lines of a character stream, without their line
/// terminators. Only the line currently being read is buffered.
#[derive(Debug)]
pub struct LineScanner<R> {
    reader: R,
    buffer: String,
    finished: bool,
}

impl<R: BufRead> LineScanner<R> {
    pub fn new(reader: R) -> LineScanner<R> {
        LineScanner {
            reader,
            buffer: String::new(),
            finished: false,
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> Iterator for LineScanner<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        self.buffer
            .clear();

        match self
            .reader
            .read_line(&mut self.buffer)
        {
            Ok(0) => {
                self.finished = true;
                None
            }
            Ok(_) => {
                let line = strip_terminator(&self.buffer);
                Some(Ok(line.to_string()))
            }
            Err(error) => {
                self.finished = true;
                Some(Err(error))
            }
        }
    }
}

/// Scan an in-memory string. Reading from a string cannot fail, so this
/// yields plain lines.
pub fn scan_str(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(strip_terminator)
}

fn strip_terminator(line: &str) -> &str {
    let line = line
        .strip_suffix('\n')
        .unwrap_or(line);
    line.strip_suffix('\r')
        .unwrap_or(line)
}

/// Trim a line and collapse every run of whitespace inside it to a single
/// space.
pub fn normalize(line: &str) -> String {
    let mut result = String::with_capacity(line.len());

    for word in line.split_whitespace() {
        if !result.is_empty() {
            result.push(' ');
        }
        result.push_str(word);
    }

    result
}
