// 🗄️ Blob Store - the only capability the pipeline needs from storage
//
// list(prefix) -> object names, read(name) -> bytes.
// Object names always use '/' separators: companies/<company>/<year>/<file>.csv

use crate::error::BlobError;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

// ============================================================================
// CORE TRAIT
// ============================================================================

/// BlobStore - minimal object store interface
///
/// Remote stores (GCS, S3) live outside this crate; anything that can list
/// names under a prefix and hand back bytes plugs in here.
pub trait BlobStore: Send + Sync {
    /// List every object name starting with `prefix`, in lexical order
    fn list(&self, prefix: &str) -> Result<Vec<String>, BlobError>;

    /// Read the raw bytes of one object
    fn read(&self, name: &str) -> Result<Vec<u8>, BlobError>;

    /// Read an object and decode it to text (UTF-8, then Windows-1252)
    fn read_text(&self, name: &str) -> Result<String, BlobError> {
        let bytes = self.read(name)?;
        Ok(crate::rows::decode_text(bytes))
    }
}

impl<T: BlobStore + ?Sized> BlobStore for &T {
    fn list(&self, prefix: &str) -> Result<Vec<String>, BlobError> {
        (**self).list(prefix)
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, BlobError> {
        (**self).read(name)
    }
}

impl<T: BlobStore + ?Sized> BlobStore for Box<T> {
    fn list(&self, prefix: &str) -> Result<Vec<String>, BlobError> {
        (**self).list(prefix)
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, BlobError> {
        (**self).read(name)
    }
}

// ============================================================================
// FILESYSTEM STORE
// ============================================================================

/// Local directory mirroring the bucket layout.
///
/// `<root>/companies/acme/2024/acme_manifest.csv` is listed as
/// `companies/acme/2024/acme_manifest.csv`.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsBlobStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> Result<PathBuf, BlobError> {
        let relative = Path::new(name);
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if name.is_empty() || !safe {
            return Err(BlobError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(relative))
    }

    fn walk(&self, dir: &Path, out: &mut Vec<String>) -> Result<(), BlobError> {
        let entries = fs::read_dir(dir).map_err(|e| io_error(dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| io_error(dir, e))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| io_error(&path, e))?;
            if file_type.is_dir() {
                self.walk(&path, out)?;
            } else if file_type.is_file() {
                if let Ok(relative) = path.strip_prefix(&self.root) {
                    let name = relative
                        .components()
                        .map(|c| c.as_os_str().to_string_lossy())
                        .collect::<Vec<_>>()
                        .join("/");
                    out.push(name);
                }
            }
        }
        Ok(())
    }
}

impl BlobStore for FsBlobStore {
    fn list(&self, prefix: &str) -> Result<Vec<String>, BlobError> {
        if !self.root.is_dir() {
            return Err(io_error(
                &self.root,
                io::Error::new(io::ErrorKind::NotFound, "store root is not a directory"),
            ));
        }

        // Only walk the directory part of the prefix
        let start = match prefix.rfind('/') {
            Some(idx) => self.resolve(&prefix[..idx])?,
            None => self.root.clone(),
        };
        if !start.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        self.walk(&start, &mut names)?;
        names.retain(|n| n.starts_with(prefix));
        names.sort();
        Ok(names)
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, BlobError> {
        let path = self.resolve(name)?;
        fs::read(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => BlobError::NotFound(name.to_string()),
            _ => BlobError::Io {
                name: name.to_string(),
                source: e,
            },
        })
    }
}

fn io_error(path: &Path, source: io::Error) -> BlobError {
    BlobError::Io {
        name: path.display().to_string(),
        source,
    }
}

// ============================================================================
// IN-MEMORY STORE
// ============================================================================

/// In-memory store, used by tests and demos.
///
/// Can be told to fail listings or specific reads, to exercise the
/// loader's degradation paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    objects: BTreeMap<String, Vec<u8>>,
    failing_reads: BTreeSet<String>,
    listing_unavailable: bool,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a text object
    pub fn with(mut self, name: impl Into<String>, contents: impl Into<String>) -> Self {
        self.insert(name, contents.into().into_bytes());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.objects.insert(name.into(), bytes);
    }

    /// Make every future read of `name` fail with an I/O error
    pub fn fail_reads_of(&mut self, name: impl Into<String>) {
        self.failing_reads.insert(name.into());
    }

    /// Make every future listing fail, as an unreachable bucket would
    pub fn set_listing_unavailable(&mut self, unavailable: bool) {
        self.listing_unavailable = unavailable;
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl BlobStore for MemoryBlobStore {
    fn list(&self, prefix: &str) -> Result<Vec<String>, BlobError> {
        if self.listing_unavailable {
            return Err(BlobError::Io {
                name: prefix.to_string(),
                source: io::Error::new(io::ErrorKind::NotConnected, "store unavailable"),
            });
        }
        Ok(self
            .objects
            .keys()
            .filter(|name| name.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, BlobError> {
        if self.failing_reads.contains(name) {
            return Err(BlobError::Io {
                name: name.to_string(),
                source: io::Error::new(io::ErrorKind::Other, "simulated read failure"),
            });
        }
        self.objects
            .get(name)
            .cloned()
            .ok_or_else(|| BlobError::NotFound(name.to_string()))
    }
}

// ============================================================================
// TESTS
// ============================================================================
