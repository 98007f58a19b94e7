use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustc_hash::FxHashMap;
use uuid::Uuid;

use crate::errors::Result;
use crate::settings::ViewerSettings;

/// A file handed to the viewer by a drop or the file picker.
#[derive(Clone)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Arc<[u8]>,
    /// Local path, when the platform exposes one.
    pub path: Option<PathBuf>,
}

impl SelectedFile {
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
            path: None,
        }
    }

    /// Reads a local file into memory.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        Ok(Self {
            name: Self::file_name_of(path),
            bytes: bytes.into(),
            path: Some(path.to_path_buf()),
        })
    }

    /// Size of the file in bytes.
    #[inline]
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn file_name_of(path: &Path) -> String {
        path.file_name()
            .map_or_else(|| "Unknown".to_string(), |n| n.to_string_lossy().to_string())
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("size", &self.bytes.len())
            .field("path", &self.path)
            .finish()
    }
}

/// A transient object URL referencing a registered file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlobUrl {
    id: Uuid,
    href: String,
}

impl BlobUrl {
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.href
    }
}

impl fmt::Display for BlobUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href)
    }
}

/// Owner of transient object URLs.
///
/// Every URL returned by [`create_url`](Self::create_url) stays live until it
/// is passed to [`revoke_url`](Self::revoke_url).
pub trait BlobStore {
    fn create_url(&mut self, file: &SelectedFile) -> BlobUrl;

    /// Releases `url`. Returns `false` if it was not live.
    fn revoke_url(&mut self, url: &BlobUrl) -> bool;

    fn resolve(&self, url: &BlobUrl) -> Option<Arc<[u8]>>;

    fn live_count(&self) -> usize;
}

/// In-process [`BlobStore`] keyed by random UUIDs.
pub struct MemoryBlobStore {
    prefix: String,
    blobs: FxHashMap<Uuid, Arc<[u8]>>,
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new(ViewerSettings::default().blob_url_prefix)
    }
}

impl MemoryBlobStore {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            blobs: FxHashMap::default(),
        }
    }
}

impl BlobStore for MemoryBlobStore {
    fn create_url(&mut self, file: &SelectedFile) -> BlobUrl {
        let id = Uuid::new_v4();
        self.blobs.insert(id, Arc::clone(&file.bytes));
        BlobUrl {
            id,
            href: format!("{}{}", self.prefix, id),
        }
    }

    fn revoke_url(&mut self, url: &BlobUrl) -> bool {
        self.blobs.remove(&url.id).is_some()
    }

    fn resolve(&self, url: &BlobUrl) -> Option<Arc<[u8]>> {
        self.blobs.get(&url.id).cloned()
    }

    fn live_count(&self) -> usize {
        self.blobs.len()
    }
}
