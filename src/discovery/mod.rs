//! Find the test suites in one or more PML library directories.
//!
//! Discovery is best effort: a file that cannot be read or parsed is
//! recorded as skipped and the remaining files are still examined.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::language::TestCase;
use crate::parsing;
use crate::problem;
use crate::rendering::Identity;
use crate::resolving::FileMap;

/// Extension of files holding PML object definitions.
pub const OBJECT_EXTENSION: &str = "pmlobj";

/// Environment variable listing the library directories to search.
pub const LIBRARY_VARIABLE: &str = "PMLLIB";

/// A file passed over during discovery, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub filename: PathBuf,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct Discovery {
    pub suites: Vec<TestCase>,
    pub skipped: Vec<Skipped>,
    pub index: FileMap,
}

impl Discovery {
    pub fn test_count(&self) -> usize {
        self.suites
            .iter()
            .map(|suite| suite.len())
            .sum()
    }
}

/// Split the value of PMLLIB into library directories. Entries may be
/// separated by ';' or by whitespace.
pub fn library_paths(value: &str) -> Vec<PathBuf> {
    value
        .split(|c: char| c == ';' || c.is_whitespace())
        .filter(|entry| !entry.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Library directories named by the PMLLIB environment variable, if set.
pub fn library_from_env() -> Vec<PathBuf> {
    match std::env::var(LIBRARY_VARIABLE) {
        Ok(value) => library_paths(&value),
        Err(_) => Vec::new(),
    }
}

/// Index every root, earlier roots taking precedence, then parse each
/// object definition found.
pub fn discover(roots: &[PathBuf]) -> Discovery {
    let mut discovery = Discovery::default();

    for root in roots {
        match FileMap::load(root) {
            Ok(map) => {
                debug!(root = %root.display(), files = map.len(), "Indexed library");
                discovery
                    .index
                    .extend(map);
            }
            Err(error) => {
                warn!(root = %root.display(), %error, "Unable to index library");
                discovery
                    .skipped
                    .push(Skipped {
                        filename: root.clone(),
                        reason: error.to_string(),
                    });
            }
        }
    }

    let files: Vec<PathBuf> = discovery
        .index
        .files_with_extension(OBJECT_EXTENSION)
        .into_iter()
        .map(Path::to_path_buf)
        .collect();

    for filename in files {
        match examine(&filename) {
            Ok(Some(suite)) => discovery
                .suites
                .push(suite),
            Ok(None) => {}
            Err(reason) => {
                debug!(file = %filename.display(), %reason, "Skipping");
                discovery
                    .skipped
                    .push(Skipped { filename, reason });
            }
        }
    }

    discovery
        .suites
        .sort_by(|a, b| {
            a.name()
                .to_ascii_lowercase()
                .cmp(
                    &b.name()
                        .to_ascii_lowercase(),
                )
        });

    info!(
        suites = discovery
            .suites
            .len(),
        tests = discovery.test_count(),
        skipped = discovery
            .skipped
            .len(),
        "Discovery complete"
    );

    discovery
}

/// Parse one file, returning the suite only if it holds at least one test.
fn examine(filename: &Path) -> Result<Option<TestCase>, String> {
    let content = parsing::load(filename).map_err(|error| {
        warn!("{}", problem::concise_loading_error(&error, &Identity));
        error.to_string()
    })?;
    let case = parsing::parse(filename, &content).map_err(|error| {
        warn!("{}", problem::concise_parsing_error(&error, filename, &Identity));
        error.to_string()
    })?;

    if case.is_empty() {
        debug!(file = %filename.display(), "No tests");
        Ok(None)
    } else {
        Ok(Some(case))
    }
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn splitting_library_paths() {
        assert_eq!(
            library_paths("/a/pmllib;/b/pmllib  /c"),
            vec![
                PathBuf::from("/a/pmllib"),
                PathBuf::from("/b/pmllib"),
                PathBuf::from("/c")
            ]
        );
        assert!(library_paths(" ; ").is_empty());
    }

    #[test]
    fn missing_root_is_skipped() {
        let discovery = discover(&[PathBuf::from("/definitely/not/a/pml/library")]);

        assert!(discovery
            .suites
            .is_empty());
        assert_eq!(
            discovery
                .skipped
                .len(),
            1
        );
    }
}
