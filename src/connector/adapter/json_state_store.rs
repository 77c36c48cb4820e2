use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::application::interfaces::StateStore;
use crate::domain::{CollectionRef, DomainError, ProjectStateFile};

/// File-backed state store keeping one JSON record per collection next to
/// the vector store.
///
/// Reads prefer the canonical sanitized filename and fall back to the
/// legacy unsanitized one older writers used. Writes always target the
/// canonical name and go through a temp file plus rename, so a crashed
/// process can never leave a half-written record behind.
pub struct JsonStateStore {
    backups: bool,
}

impl JsonStateStore {
    pub fn new() -> Self {
        Self { backups: false }
    }

    /// Keep a timestamped copy of the previous record on every overwrite.
    pub fn with_backups(mut self, backups: bool) -> Self {
        self.backups = backups;
        self
    }

    async fn remove_backups(&self, collection: &CollectionRef) -> Result<bool, DomainError> {
        let mut prefixes = vec![format!("{}.bak.", collection.state_file_name())];
        if let Some(legacy) = collection.legacy_state_file_name() {
            prefixes.push(format!("{}.bak.", legacy));
        }

        let mut entries = match fs::read_dir(collection.store_path()).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => {
                return Err(DomainError::state_file(format!(
                    "failed to scan {}: {}",
                    collection.store_path().display(),
                    e
                )))
            }
        };

        let mut removed = false;
        loop {
            let entry = entries.next_entry().await.map_err(|e| {
                DomainError::state_file(format!(
                    "failed to scan {}: {}",
                    collection.store_path().display(),
                    e
                ))
            })?;
            let Some(entry) = entry else { break };

            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if !prefixes.iter().any(|prefix| name.starts_with(prefix)) {
                continue;
            }

            fs::remove_file(entry.path()).await.map_err(|e| {
                DomainError::state_file(format!(
                    "failed to remove backup {}: {}",
                    entry.path().display(),
                    e
                ))
            })?;
            removed = true;
        }

        Ok(removed)
    }
}

impl Default for JsonStateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StateStore for JsonStateStore {
    async fn load(
        &self,
        collection: &CollectionRef,
    ) -> Result<Option<ProjectStateFile>, DomainError> {
        let candidates =
            std::iter::once(collection.state_file_path()).chain(collection.legacy_state_file_path());

        for path in candidates {
            let bytes = match fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(DomainError::state_file(format!(
                        "failed to read {}: {}",
                        path.display(),
                        e
                    )))
                }
            };

            let state: ProjectStateFile = serde_json::from_slice(&bytes).map_err(|e| {
                DomainError::state_file(format!("failed to parse {}: {}", path.display(), e))
            })?;
            debug!(
                "Loaded state file {} ({} shape, {} entries)",
                path.display(),
                state.shape_name(),
                state.len()
            );
            return Ok(Some(state));
        }

        Ok(None)
    }

    async fn save(
        &self,
        collection: &CollectionRef,
        state: &ProjectStateFile,
    ) -> Result<(), DomainError> {
        let path = collection.state_file_path();
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| DomainError::state_file(format!("failed to encode state: {}", e)))?;

        if self.backups {
            let backup = backup_path(&path);
            match fs::copy(&path, &backup).await {
                Ok(_) => debug!("Backed up state file to {}", backup.display()),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => warn!("State file backup failed, overwriting anyway: {}", e),
            }
        }

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).await.map_err(|e| {
            DomainError::state_file(format!("failed to write {}: {}", tmp.display(), e))
        })?;
        fs::rename(&tmp, &path).await.map_err(|e| {
            DomainError::state_file(format!("failed to replace {}: {}", path.display(), e))
        })?;

        debug!("Wrote state file {}", path.display());
        Ok(())
    }

    async fn delete(&self, collection: &CollectionRef) -> Result<bool, DomainError> {
        let mut paths = vec![collection.state_file_path()];
        if let Some(legacy) = collection.legacy_state_file_path() {
            paths.push(legacy);
        }

        let mut removed = false;
        for path in paths {
            match fs::remove_file(&path).await {
                Ok(()) => {
                    info!("Removed state file {}", path.display());
                    removed = true;
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(DomainError::state_file(format!(
                        "failed to remove {}: {}",
                        path.display(),
                        e
                    )))
                }
            }
        }

        if self.remove_backups(collection).await? {
            removed = true;
        }

        Ok(removed)
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let mut name = path.as_os_str().to_os_string();
    name.push(format!(".bak.{}", seconds));
    PathBuf::from(name)
}
