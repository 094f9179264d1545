//! Real file system storage implementation
//!
//! Stores each entity as `<root>/<entity>.json`, overwriting the whole file
//! on every write.

use async_trait::async_trait;
use shared::{Component, component_debug, component_warn};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::{TallyError, TallyResult};
use crate::traits::{Document, Storage};

/// JSON documents under a root directory
#[derive(Debug, Clone)]
pub struct FileRepository {
    root: PathBuf,
}

impl FileRepository {
    /// Open the repository, creating the root directory when it is missing
    pub async fn initialize(root: impl Into<PathBuf>) -> TallyResult<Self> {
        let root = root.into();

        match fs::metadata(&root).await {
            Ok(metadata) if metadata.is_dir() => {}
            Ok(_) => return Err(TallyError::StorageRootNotDirectory { path: root }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fs::create_dir_all(&root)
                    .await
                    .map_err(|source| TallyError::StorageRoot {
                        path: root.clone(),
                        source,
                    })?;
                component_debug!(Component::Repository, "📁 Created storage root: {}", root.display());
            }
            Err(source) => return Err(TallyError::StorageRoot { path: root, source }),
        }

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing an entity
    pub fn file_path(&self, entity: &str) -> PathBuf {
        self.root.join(format!("{entity}.json"))
    }
}

#[async_trait]
impl Storage for FileRepository {
    async fn read(&self, entity: &str) -> TallyResult<Option<Vec<u8>>> {
        let path = self.file_path(entity);

        match fs::read(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(TallyError::FileSystemError {
                operation: "read".to_string(),
                path,
                source,
            }),
        }
    }

    async fn write(&self, entity: &str, contents: Vec<u8>) -> TallyResult<()> {
        let path = self.file_path(entity);

        fs::write(&path, contents)
            .await
            .map_err(|source| TallyError::FileSystemError {
                operation: "write".to_string(),
                path: path.clone(),
                source,
            })?;

        component_debug!(Component::Repository, "💾 Wrote {}", path.display());
        Ok(())
    }
}

/// Load a typed document, `None` when it was never stored
///
/// A stored document that is empty, only whitespace or a JSON `null` also
/// counts as absent. Malformed JSON is an error.
pub async fn load<D: Document>(storage: &dyn Storage) -> TallyResult<Option<D>> {
    let Some(contents) = storage.read(D::ENTITY).await? else {
        return Ok(None);
    };

    if contents.iter().all(u8::is_ascii_whitespace) {
        component_warn!(
            Component::Repository,
            "⚠️ Stored {} document is empty, treating it as absent",
            D::ENTITY
        );
        return Ok(None);
    }

    let document: Option<D> = serde_json::from_slice(&contents).map_err(|source| TallyError::Decode {
        entity: D::ENTITY.to_string(),
        source,
    })?;

    if document.is_none() {
        component_warn!(
            Component::Repository,
            "⚠️ Stored {} document is null, treating it as absent",
            D::ENTITY
        );
    }
    Ok(document)
}

/// Serialize a typed document and overwrite its stored copy
pub async fn save<D: Document>(storage: &dyn Storage, document: &D) -> TallyResult<()> {
    let contents = serde_json::to_vec(document).map_err(|source| TallyError::Encode {
        entity: D::ENTITY.to_string(),
        source,
    })?;
    storage.write(D::ENTITY, contents).await
}
