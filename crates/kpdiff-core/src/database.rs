//! KeePass database snapshot loading.

use crate::error::LoadError;
use crate::models::{Entry, Group};
use keepass::error::DatabaseOpenError;
use keepass::{Database, DatabaseKey};
use std::path::{Path, PathBuf};

/// A decoded, unlocked database held read-only for diffing.
pub struct KeepassDatabase {
    path: PathBuf,
    root: Group,
}

impl KeepassDatabase {
    /// Open and unlock a KeePass database.
    pub fn unlock(path: impl AsRef<Path>, password: &str) -> Result<Self, LoadError> {
        let path = path.as_ref();
        tracing::info!("Opening database: {}", path.display());

        if !path.exists() {
            return Err(LoadError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let mut file = std::fs::File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let key = DatabaseKey::new().with_password(password);
        let db = Database::open(&mut file, key).map_err(|err| {
            let path = path.to_path_buf();
            match err {
                DatabaseOpenError::Io(source) => LoadError::Io { path, source },
                err @ DatabaseOpenError::Key(_) => LoadError::Unlock { path, source: err },
                err => LoadError::Decode { path, source: err },
            }
        })?;

        Ok(Self::from_database(path, &db))
    }

    /// Convert an already opened `keepass::Database`.
    pub fn from_database(path: impl Into<PathBuf>, db: &Database) -> Self {
        let root = convert_group(&db.root);
        let path = path.into();
        tracing::debug!(
            "Converted {}: {} top-level groups, {} entries in root",
            path.display(),
            root.children.len(),
            root.entries.len()
        );
        Self { path, root }
    }

    /// Path the snapshot was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the root group of the database.
    pub fn root_group(&self) -> &Group {
        &self.root
    }

    /// The group forest handed to the differ.
    ///
    /// The KDBX root is itself a named group holding entries, so the forest
    /// is the root alone rather than its children.
    pub fn groups(&self) -> &[Group] {
        std::slice::from_ref(&self.root)
    }
}

/// Convert a keepass::Group to our Group model.
fn convert_group(kg: &keepass::db::Group) -> Group {
    let mut children = Vec::new();
    let mut entries = Vec::new();

    for node in &kg.children {
        match node {
            keepass::db::Node::Group(g) => children.push(convert_group(g)),
            keepass::db::Node::Entry(e) => entries.push(convert_entry(e)),
        }
    }

    Group {
        uuid: kg.uuid.to_string(),
        name: kg.name.clone(),
        children,
        entries,
    }
}

/// Convert a keepass::Entry to our Entry model.
fn convert_entry(ke: &keepass::db::Entry) -> Entry {
    Entry {
        uuid: ke.uuid.to_string(),
        title: ke.get_title().unwrap_or_default().to_string(),
        username: ke.get_username().unwrap_or_default().to_string(),
        password: ke.get_password().unwrap_or_default().to_string(),
    }
}
