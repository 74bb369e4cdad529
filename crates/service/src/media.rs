use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::{debug, instrument};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("I/O failure on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Filesystem-backed store for uploaded images.
///
/// Files are written under `root` with a random 128-bit hex name that keeps the
/// uploaded file's extension. Returned paths are `root/<hex>[.ext]`.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: String,
}

impl MediaStore {
    pub fn new(root: impl Into<String>) -> Self {
        let root: String = root.into();
        Self { root: root.trim_end_matches('/').to_string() }
    }

    pub fn root(&self) -> &str { &self.root }

    /// Write `content` under a fresh unique name; creates the root directory when missing.
    #[instrument(skip(self, content), fields(bytes = content.len()))]
    pub async fn store(&self, content: &[u8], original_filename: &str) -> Result<String, MediaError> {
        fs::create_dir_all(&self.root).await.map_err(|source| MediaError::Io { path: self.root.clone(), source })?;

        let name = Uuid::new_v4().simple().to_string();
        let path = match extension_of(original_filename) {
            Some(ext) => format!("{}/{}.{}", self.root, name, ext),
            None => format!("{}/{}", self.root, name),
        };
        fs::write(&path, content).await.map_err(|source| MediaError::Io { path: path.clone(), source })?;
        debug!(%path, "media stored");
        Ok(path)
    }

    /// Delete a stored file. Returns `Ok(false)` when nothing existed at `path`.
    pub async fn remove(&self, path: &str) -> Result<bool, MediaError> {
        let target = normalize(Path::new(path));
        match fs::remove_file(&target).await {
            Ok(()) => {
                debug!(path, "media removed");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(MediaError::Io { path: path.to_string(), source }),
        }
    }

    /// Remove every path, continuing past failures. Returns the failures for the caller to log.
    pub async fn remove_many<I, S>(&self, paths: I) -> Vec<(String, MediaError)>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut failures = Vec::new();
        for p in paths {
            let p = p.as_ref();
            if let Err(e) = self.remove(p).await {
                failures.push((p.to_string(), e));
            }
        }
        failures
    }
}

/// Extension of the uploaded name, kept only when it is plain ASCII alphanumeric.
fn extension_of(filename: &str) -> Option<String> {
    let ext = Path::new(filename).extension()?.to_str()?;
    if ext.is_empty() || ext.len() > 16 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Lexical normalization: drops `.` and folds `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
