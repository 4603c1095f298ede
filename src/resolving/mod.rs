//! Classify the provenance of a stack frame, and optionally find the file
//! it came from.

use std::fmt;
use std::path::PathBuf;

use crate::language::ArgumentError;

mod index;

pub use index::*;

const MACRO_PREFIX: &str = "macro ";
const FUNCTION_PREFIX: &str = "pml function ";

/// Extensions searched, in order, for the object that defines a method.
const METHOD_EXTENSIONS: [&str; 3] = ["pmlobj", "pmlfrm", "pmlcmd"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EntryPointKind {
    #[default]
    Unknown,
    Macro,
    Function,
    Method,
}

/// Where a stack frame originated: a macro file, a PML function, or a
/// method of some object or form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryPoint {
    kind: EntryPointKind,
    name: String,
    file_name: Option<PathBuf>,
}

impl EntryPoint {
    pub fn new(kind: EntryPointKind, name: &str) -> EntryPoint {
        EntryPoint {
            kind,
            name: name.to_string(),
            file_name: None,
        }
    }

    pub fn with_file(kind: EntryPointKind, name: &str, file_name: Option<PathBuf>) -> EntryPoint {
        EntryPoint {
            kind,
            name: name.to_string(),
            file_name,
        }
    }

    pub fn kind(&self) -> EntryPointKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The file this entry point was found in, if it could be resolved.
    pub fn file_name(&self) -> Option<&std::path::Path> {
        self.file_name
            .as_deref()
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            EntryPointKind::Macro => write!(f, "Macro {}", self.name),
            EntryPointKind::Function | EntryPointKind::Method => {
                write!(f, "PML function {}", self.name)
            }
            EntryPointKind::Unknown => f.write_str(&self.name),
        }
    }
}

/// Turns the raw text following "of" in a stack line into an EntryPoint.
pub trait Resolve {
    fn resolve(&self, raw: &str) -> Result<EntryPoint, ArgumentError>;
}

/// Case-insensitive prefix strip that preserves the casing of the
/// remainder.
fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    if value.len() >= prefix.len()
        && value.is_char_boundary(prefix.len())
        && value[..prefix.len()].eq_ignore_ascii_case(prefix)
    {
        Some(&value[prefix.len()..])
    } else {
        None
    }
}

/// Lexical classification shared by both resolvers.
fn classify(raw: &str) -> Result<(EntryPointKind, &str), ArgumentError> {
    if raw.is_empty() {
        return Err(ArgumentError::Empty("entry point"));
    }

    if let Some(name) = strip_prefix_ignore_case(raw, MACRO_PREFIX) {
        return Ok((EntryPointKind::Macro, name));
    }

    if let Some(name) = strip_prefix_ignore_case(raw, FUNCTION_PREFIX) {
        if name.contains('.') {
            return Ok((EntryPointKind::Method, name));
        } else {
            return Ok((EntryPointKind::Function, name));
        }
    }

    Ok((EntryPointKind::Unknown, raw))
}

/// Classifies entry points from their text alone, never resolving a file.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleResolver;

impl Resolve for SimpleResolver {
    fn resolve(&self, raw: &str) -> Result<EntryPoint, ArgumentError> {
        let (kind, name) = classify(raw)?;
        Ok(EntryPoint::new(kind, name))
    }
}

/// Classifies entry points and looks up the file defining them in a
/// FileIndex. A failed lookup leaves the file name unset.
#[derive(Debug)]
pub struct IndexResolver<I> {
    index: I,
}

impl<I: FileIndex> IndexResolver<I> {
    pub fn new(index: I) -> IndexResolver<I> {
        IndexResolver { index }
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    fn locate(&self, kind: EntryPointKind, name: &str) -> Option<PathBuf> {
        // global functions and forms are invoked as !!name, files are not
        // named that way
        let name = match kind {
            EntryPointKind::Macro => name,
            _ => name.trim_start_matches('!'),
        };

        match kind {
            EntryPointKind::Macro => Some(normalize_path(name)),
            EntryPointKind::Function => self
                .index
                .lookup(&format!("{}.pmlfnc", name))
                .map(|path| path.to_path_buf()),
            EntryPointKind::Method => {
                let (base, _) = name
                    .split_once('.')
                    .unwrap_or((name, ""));

                METHOD_EXTENSIONS
                    .iter()
                    .find_map(|extension| {
                        self.index
                            .lookup(&format!("{}.{}", base, extension))
                    })
                    .map(|path| path.to_path_buf())
            }
            EntryPointKind::Unknown => None,
        }
    }
}

impl<I: FileIndex> Resolve for IndexResolver<I> {
    fn resolve(&self, raw: &str) -> Result<EntryPoint, ArgumentError> {
        let (kind, name) = classify(raw)?;
        let file_name = self.locate(kind, name);
        Ok(EntryPoint::with_file(kind, name, file_name))
    }
}

/// Tidy a macro path without consulting the file system: both kinds of
/// separator become '/', "." segments are dropped and ".." segments fold
/// away their parent.
pub fn normalize_path(path: &str) -> PathBuf {
    let absolute = path.starts_with('/') || path.starts_with('\\');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last.ends_with(':') => {}
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push(segment),
            },
            _ => segments.push(segment),
        }
    }

    let joined = segments.join("/");
    if absolute {
        PathBuf::from(format!("/{}", joined))
    } else {
        PathBuf::from(joined)
    }
}
