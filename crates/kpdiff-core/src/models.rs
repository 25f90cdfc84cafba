//! Shared data types for snapshot trees.

/// Represents a group (folder) in the database tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub uuid: String,
    pub name: String,
    pub children: Vec<Group>,
    pub entries: Vec<Entry>,
}

/// Represents a password entry.
///
/// Only the fields that take part in a diff are carried over from the
/// database. `password` is always the decrypted plaintext.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub uuid: String,
    pub title: String,
    pub username: String,
    pub password: String,
}

impl Group {
    /// Create an empty group with the given identifier and name.
    pub fn new(uuid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
            children: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// Append an entry, builder style.
    pub fn with_entry(mut self, entry: Entry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Append a subgroup, builder style.
    pub fn with_child(mut self, child: Group) -> Self {
        self.children.push(child);
        self
    }
}

impl Entry {
    pub fn new(
        uuid: impl Into<String>,
        title: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            uuid: uuid.into(),
            title: title.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Whether the compared fields (title, username, password) are identical.
    ///
    /// Comparison is exact: no trimming or case folding.
    pub fn same_content(&self, other: &Entry) -> bool {
        self.title == other.title
            && self.username == other.username
            && self.password == other.password
    }
}
