//! Persistence of groups.
//!
//! A store holds each group's members and expenses. Balances are never persisted; they are derived
//! again whenever a group is loaded.

use crate::model::{Group, GroupId};
use crate::{utils, Result};
use anyhow::{bail, Context};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

/// Loads and saves groups.
#[async_trait::async_trait]
pub trait GroupStore: Send + Sync {
    /// Loads group `id`. Errors if it does not exist.
    async fn load(&self, id: &GroupId) -> Result<Group>;

    /// Saves `group`, replacing any previous version.
    async fn save(&self, group: &Group) -> Result<()>;

    /// Returns true if group `id` exists.
    async fn exists(&self, id: &GroupId) -> Result<bool>;

    /// The ids of every stored group, sorted.
    async fn list(&self) -> Result<Vec<GroupId>>;
}

/// Stores each group as `<dir>/<group id>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, id: &GroupId) -> Result<PathBuf> {
        let name = id.as_str();
        if name.is_empty()
            || name.starts_with('.')
            || name.contains(|c: char| c == '/' || c == '\\' || c.is_control())
        {
            bail!("'{name}' cannot be used as a group id");
        }
        Ok(self.dir.join(format!("{name}.json")))
    }
}

#[async_trait::async_trait]
impl GroupStore for FileStore {
    async fn load(&self, id: &GroupId) -> Result<Group> {
        let path = self.path(id)?;
        if !path.is_file() {
            bail!("Group '{id}' does not exist");
        }
        let group: Group = utils::deserialize(&path).await?;
        if group.id() != id {
            bail!(
                "The file {} holds group '{}', expected '{id}'",
                path.display(),
                group.id()
            );
        }
        debug!("Loaded group {id} from {}", path.display());
        Ok(group)
    }

    async fn save(&self, group: &Group) -> Result<()> {
        let path = self.path(group.id())?;
        utils::serialize(&path, group)
            .await
            .with_context(|| format!("Unable to save group '{}'", group.id()))?;
        debug!("Saved group {} to {}", group.id(), path.display());
        Ok(())
    }

    async fn exists(&self, id: &GroupId) -> Result<bool> {
        Ok(self.path(id)?.is_file())
    }

    async fn list(&self) -> Result<Vec<GroupId>> {
        Ok(utils::list_files(&self.dir, "json")
            .await?
            .into_iter()
            .map(GroupId::new)
            .collect())
    }
}

/// Keeps groups in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    groups: Mutex<BTreeMap<GroupId, Group>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl GroupStore for MemoryStore {
    async fn load(&self, id: &GroupId) -> Result<Group> {
        self.groups
            .lock()
            .await
            .get(id)
            .cloned()
            .with_context(|| format!("Group '{id}' does not exist"))
    }

    async fn save(&self, group: &Group) -> Result<()> {
        self.groups
            .lock()
            .await
            .insert(group.id().clone(), group.clone());
        Ok(())
    }

    async fn exists(&self, id: &GroupId) -> Result<bool> {
        Ok(self.groups.lock().await.contains_key(id))
    }

    async fn list(&self) -> Result<Vec<GroupId>> {
        Ok(self.groups.lock().await.keys().cloned().collect())
    }
}
