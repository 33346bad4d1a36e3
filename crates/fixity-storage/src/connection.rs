//! Storage connection payloads.
//!
//! The inventory hands out a location's connection settings as an opaque JSON
//! document. It names a base `folder` and one or more VFS entries, each bound
//! to a backend kind with backend-specific settings:
//!
//! ```json
//! { "folder": "archive/2024",
//!   "vfs": { "local": { "name": "local", "type": "os", "os": { "basedir": "/srv/archive" } } } }
//! ```

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::{Result, StorageError};

const VFS_SCHEME: &str = "vfs://";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Connection {
    #[serde(default, alias = "Folder")]
    pub folder: String,
    #[serde(default, alias = "VFS", alias = "Vfs")]
    pub vfs:    BTreeMap<String, VfsConfig>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct VfsConfig {
    #[serde(default, alias = "Name")]
    pub name:     String,
    #[serde(rename = "type", alias = "Type")]
    pub kind:     String,
    #[serde(default, alias = "ReadOnly")]
    pub readonly: bool,
    #[serde(default, alias = "OS")]
    pub os:       Option<OsConfig>,
    /// Settings of backends this crate does not model.
    #[serde(flatten)]
    pub extra:    serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OsConfig {
    #[serde(alias = "BaseDir", alias = "basedir", rename = "base_dir")]
    pub base_dir: PathBuf,
}

/// A VFS entry together with the path to open inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct Target<'a> {
    pub vfs:  &'a VfsConfig,
    pub path: PathBuf,
}

impl Connection {
    pub fn from_json(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Resolve an instance path against this connection.
    ///
    /// `vfs://<name>/<rest>` selects the named entry and uses `<rest>` as is.
    /// Any other path is placed under `folder` in the only configured entry.
    pub fn resolve(&self, path: &str) -> Result<Target<'_>> {
        if let Some(rest) = path.strip_prefix(VFS_SCHEME) {
            let (name, relative) = rest.split_once('/').unwrap_or((rest, ""));
            let vfs = self.vfs_named(name)?;
            return Ok(Target {
                vfs,
                path: sanitize(path, Path::new(relative))?,
            });
        }

        let vfs = match self.vfs.len() {
            0 => return Err(StorageError::NoVfs),
            1 => self.vfs.values().next().ok_or(StorageError::NoVfs)?,
            count => return Err(StorageError::AmbiguousVfs { count }),
        };
        let joined = Path::new(&self.folder).join(path);
        Ok(Target {
            vfs,
            path: sanitize(path, &joined)?,
        })
    }

    fn vfs_named(&self, name: &str) -> Result<&VfsConfig> {
        self.vfs
            .get(name)
            .or_else(|| self.vfs.values().find(|vfs| vfs.name == name))
            .ok_or_else(|| StorageError::UnknownVfs {
                name: name.to_string(),
            })
    }
}

fn sanitize(original: &str, path: &Path) -> Result<PathBuf> {
    let invalid = |reason| StorageError::InvalidPath {
        path: original.to_string(),
        reason,
    };

    let mut clean = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir => return Err(invalid("parent directory components are not allowed")),
            Component::RootDir | Component::Prefix(_) => {
                return Err(invalid("absolute paths are not allowed"));
            }
        }
    }

    if clean.as_os_str().is_empty() {
        return Err(invalid("path is empty"));
    }
    Ok(clean)
}
