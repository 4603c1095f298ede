//! Discover the test suite declared by a PML object definition.
//!
//! Source is read a line at a time. Block comments are tracked so that
//! anything commented out is never mistaken for a definition; outside of
//! comments the only lines of interest are `define object` (exactly one is
//! allowed) and `define method` (whose signatures are classified into test
//! methods, setUp and tearDown).

use std::io::BufRead;

use thiserror::Error;
use tracing::{debug, trace};

use crate::language::{TestCase, TestCaseBuilder};
use crate::scanning::{normalize, LineScanner};

const COMMENT_OPEN: &str = "$(";
const COMMENT_CLOSE: &str = "$)";

const OBJECT_KEYWORD: &str = "define object ";
const METHOD_KEYWORD: &str = "define method .";

const ASSERT_TYPE: &str = "PmlAssert";

/// Problems with the structure of an object definition. Line numbers are
/// 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsingError {
    #[error("no object definition found")]
    NoObjectDefinition,

    #[error("second object definition '{1}' on line {0}")]
    MultipleObjectDefinitions(usize, String),

    #[error("method defined before any object on line {0}")]
    MethodBeforeObject(usize),

    #[error("malformed method signature on line {0}")]
    MalformedSignature(usize),

    #[error("parameter '{1}' has no type on line {0}")]
    MalformedParameter(usize, String),

    #[error("invalid name '{1}' on line {0}")]
    InvalidName(usize, String),

    #[error("unable to read line {0}: {1}")]
    Unreadable(usize, String),
}

impl ParsingError {
    /// Line the problem was detected on, if it relates to a specific line.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParsingError::NoObjectDefinition => None,
            ParsingError::MultipleObjectDefinitions(line, _) => Some(*line),
            ParsingError::MethodBeforeObject(line) => Some(*line),
            ParsingError::MalformedSignature(line) => Some(*line),
            ParsingError::MalformedParameter(line, _) => Some(*line),
            ParsingError::InvalidName(line, _) => Some(*line),
            ParsingError::Unreadable(line, _) => Some(*line),
        }
    }

    /// Short description without the line number, for display alongside
    /// the offending source.
    pub fn message(&self) -> String {
        match self {
            ParsingError::NoObjectDefinition => "no object definition found".to_string(),
            ParsingError::MultipleObjectDefinitions(_, name) => {
                format!("more than one object defined, '{}' is extra", name)
            }
            ParsingError::MethodBeforeObject(_) => "method defined outside an object".to_string(),
            ParsingError::MalformedSignature(_) => "malformed method signature".to_string(),
            ParsingError::MalformedParameter(_, parameter) => {
                format!("parameter '{}' has no type", parameter)
            }
            ParsingError::InvalidName(_, name) => format!("invalid name '{}'", name),
            ParsingError::Unreadable(_, details) => format!("unable to read: {}", details),
        }
    }
}

/// Parse object definition source held in memory.
pub fn parse_definition(content: &str) -> Result<TestCase, ParsingError> {
    let mut parser = Parser::new();

    for line in crate::scanning::scan_str(content) {
        parser.read_line(line)?;
    }

    parser.finish()
}

/// Parse object definition source from a stream, a line at a time.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<TestCase, ParsingError> {
    let mut parser = Parser::new();

    for line in LineScanner::new(reader) {
        let line = line.map_err(|error| ParsingError::Unreadable(parser.line + 1, error.to_string()))?;
        parser.read_line(&line)?;
    }

    parser.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    Scanning,
    InComment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Parameter<'i> {
    pub(crate) type_name: &'i str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Signature<'i> {
    pub(crate) name: &'i str,
    pub(crate) parameters: Vec<Parameter<'i>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Classification {
    Test,
    SetUp,
    TearDown,
    Ignored,
}

#[derive(Debug)]
pub(crate) struct Parser {
    pub(crate) state: State,
    pub(crate) line: usize,
    builder: Option<TestCaseBuilder>,
}

impl Parser {
    pub(crate) fn new() -> Parser {
        Parser {
            state: State::Scanning,
            line: 0,
            builder: None,
        }
    }

    pub(crate) fn read_line(&mut self, raw: &str) -> Result<(), ParsingError> {
        self.line += 1;
        let content = normalize(raw);

        match self.state {
            State::InComment => {
                if content.contains(COMMENT_CLOSE) {
                    trace!(line = self.line, "Leaving comment");
                    self.state = State::Scanning;
                }
                Ok(())
            }
            State::Scanning => {
                if is_comment_open(&content) {
                    // a comment closed on the line it was opened on is
                    // already finished
                    if !content[COMMENT_OPEN.len()..].contains(COMMENT_CLOSE) {
                        trace!(line = self.line, "Entering comment");
                        self.state = State::InComment;
                    }
                    Ok(())
                } else if is_object_definition(&content) {
                    self.read_object_definition(&content)
                } else if is_method_definition(&content) {
                    self.read_method_definition(&content)
                } else {
                    Ok(())
                }
            }
        }
    }

    fn read_object_definition(&mut self, content: &str) -> Result<(), ParsingError> {
        let name = content[OBJECT_KEYWORD.len()..]
            .split(' ')
            .next()
            .unwrap_or("");

        if self
            .builder
            .is_some()
        {
            return Err(ParsingError::MultipleObjectDefinitions(
                self.line,
                name.to_string(),
            ));
        }

        let builder = TestCaseBuilder::new(name)
            .map_err(|_| ParsingError::InvalidName(self.line, name.to_string()))?;

        debug!(line = self.line, object = name, "Found object definition");
        self.builder = Some(builder);
        Ok(())
    }

    fn read_method_definition(&mut self, content: &str) -> Result<(), ParsingError> {
        let line = self.line;

        let builder = match self.builder {
            Some(ref mut builder) => builder,
            None => return Err(ParsingError::MethodBeforeObject(line)),
        };

        let signature = parse_signature(line, &content[METHOD_KEYWORD.len()..])?;

        match classify(&signature) {
            Classification::Test => {
                builder
                    .add_test(signature.name)
                    .map_err(|_| ParsingError::InvalidName(line, signature.name.to_string()))?;
                trace!(line, method = signature.name, "Test method");
            }
            Classification::SetUp => {
                builder.set_up(true);
            }
            Classification::TearDown => {
                builder.tear_down(true);
            }
            Classification::Ignored => {
                trace!(line, method = signature.name, "Ignoring method");
            }
        }

        Ok(())
    }

    pub(crate) fn finish(self) -> Result<TestCase, ParsingError> {
        match self.builder {
            Some(builder) => {
                let case = builder.build();
                debug!(
                    "Found {} test{} in {}",
                    case.len(),
                    if case.len() == 1 { "" } else { "s" },
                    case.name()
                );
                Ok(case)
            }
            None => Err(ParsingError::NoObjectDefinition),
        }
    }
}

/// Split a method signature such as `testFoo(!assert is PmlAssert)` (the
/// text after the leading '.') into its name and parameter types.
pub(crate) fn parse_signature<'i>(line: usize, text: &'i str) -> Result<Signature<'i>, ParsingError> {
    let open = match text.find('(') {
        Some(i) => i,
        None => return Err(ParsingError::MalformedSignature(line)),
    };
    let close = match text[open..].find(')') {
        Some(i) => open + i,
        None => return Err(ParsingError::MalformedSignature(line)),
    };

    let name = text[..open].trim();
    let list = text[open + 1..close].trim();

    let mut parameters = Vec::new();

    if !list.is_empty() {
        for parameter in list.split(',') {
            let parameter = parameter.trim();
            let type_name = match find_ignore_case(parameter, " is ") {
                Some(i) => parameter[i + 4..].trim(),
                None => {
                    return Err(ParsingError::MalformedParameter(
                        line,
                        parameter.to_string(),
                    ))
                }
            };
            parameters.push(Parameter { type_name });
        }
    }

    Ok(Signature { name, parameters })
}

/// Decide what role, if any, a method plays in the suite. Only the name,
/// the number of parameters and their types matter.
pub(crate) fn classify(signature: &Signature) -> Classification {
    let name = signature.name;
    let parameters = &signature.parameters;

    if starts_with_ignore_case(name, "test")
        && parameters.len() == 1
        && parameters[0]
            .type_name
            .eq_ignore_ascii_case(ASSERT_TYPE)
    {
        Classification::Test
    } else if name.eq_ignore_ascii_case("setUp") && parameters.is_empty() {
        Classification::SetUp
    } else if name.eq_ignore_ascii_case("tearDown") && parameters.is_empty() {
        Classification::TearDown
    } else {
        Classification::Ignored
    }
}

fn is_comment_open(content: &str) -> bool {
    content.starts_with(COMMENT_OPEN)
}

fn is_object_definition(content: &str) -> bool {
    starts_with_ignore_case(content, OBJECT_KEYWORD)
}

fn is_method_definition(content: &str) -> bool {
    starts_with_ignore_case(content, METHOD_KEYWORD)
}

fn starts_with_ignore_case(content: &str, prefix: &str) -> bool {
    content.len() >= prefix.len()
        && content.is_char_boundary(prefix.len())
        && content[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// Byte offset of the first case-insensitive match of an ASCII needle.
fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .char_indices()
        .map(|(i, _)| i)
        .find(|&i| starts_with_ignore_case(&haystack[i..], needle))
}
