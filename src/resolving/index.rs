//! Index of the files making up a PML library

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};
use walkdir::WalkDir;

/// Name of the manifest file at the root of a PML library directory.
pub const INDEX_FILENAME: &str = "pml.index";

/// Lookup of a short file name (eg "helper.pmlfnc") to its full path.
pub trait FileIndex {
    fn lookup(&self, file_name: &str) -> Option<&Path>;
}

impl<T: FileIndex + ?Sized> FileIndex for &T {
    fn lookup(&self, file_name: &str) -> Option<&Path> {
        (**self).lookup(file_name)
    }
}

/// A FileIndex held in memory. File names are compared ignoring case, and
/// when two files share a name the one added first wins, matching the
/// search order of the PMLLIB path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMap {
    files: HashMap<String, PathBuf>,
}

impl FileMap {
    pub fn new() -> FileMap {
        FileMap {
            files: HashMap::new(),
        }
    }

    /// Add a file. Returns false if a file of the same name was already
    /// present, in which case the existing entry is kept.
    pub fn insert(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();

        let key = match path
            .file_name()
            .and_then(|name| name.to_str())
        {
            Some(name) => name.to_ascii_lowercase(),
            None => return false,
        };

        if self
            .files
            .contains_key(&key)
        {
            trace!(?path, "Shadowed by earlier entry");
            return false;
        }

        self.files
            .insert(key, path);
        true
    }

    /// Add every file from another index that is not already present.
    pub fn extend(&mut self, other: FileMap) {
        let mut entries: Vec<PathBuf> = other
            .files
            .into_values()
            .collect();
        entries.sort();

        for path in entries {
            self.insert(path);
        }
    }

    pub fn len(&self) -> usize {
        self.files
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.files
            .is_empty()
    }

    /// All indexed files with the given extension, sorted by path.
    pub fn files_with_extension(&self, extension: &str) -> Vec<&Path> {
        let mut result: Vec<&Path> = self
            .files
            .values()
            .filter(|path| {
                path.extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e.eq_ignore_ascii_case(extension))
                    .unwrap_or(false)
            })
            .map(|path| path.as_path())
            .collect();
        result.sort();
        result
    }

    /// Build an index from the content of a `pml.index` manifest. A line
    /// starting with '/' switches to that directory (relative to root); any
    /// other non-blank line names a file in the current directory.
    pub fn read_index(root: &Path, content: &str) -> FileMap {
        let mut map = FileMap::new();
        let mut directory = root.to_path_buf();

        for line in crate::scanning::scan_str(content) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(relative) = line.strip_prefix('/') {
                directory = root.join(relative);
            } else {
                map.insert(directory.join(line));
            }
        }

        debug!(root = %root.display(), files = map.len(), "Read index");
        map
    }

    /// Build an index by walking a directory tree, following symbolic
    /// links. Only failing to read the root itself is an error; entries
    /// below it that cannot be read are logged and passed over.
    pub fn scan_directory(root: &Path) -> io::Result<FileMap> {
        let mut map = FileMap::new();

        let walker = WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) if error.depth() == 0 => return Err(error.into()),
                Err(error) => {
                    warn!(path = ?error.path(), %error, "Unable to read entry");
                    continue;
                }
            };

            if entry
                .file_type()
                .is_file()
            {
                map.insert(entry.into_path());
            }
        }

        debug!(root = %root.display(), files = map.len(), "Scanned directory");
        Ok(map)
    }

    /// Index a library directory, preferring its `pml.index` manifest and
    /// falling back to walking the tree.
    pub fn load(root: &Path) -> io::Result<FileMap> {
        let manifest = root.join(INDEX_FILENAME);

        if manifest.is_file() {
            let content = fs::read_to_string(&manifest)?;
            Ok(FileMap::read_index(root, &content))
        } else {
            FileMap::scan_directory(root)
        }
    }
}

impl FileIndex for FileMap {
    fn lookup(&self, file_name: &str) -> Option<&Path> {
        self.files
            .get(&file_name.to_ascii_lowercase())
            .map(|path| path.as_path())
    }
}
