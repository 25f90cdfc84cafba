//! Structural diff of two snapshot trees.
//!
//! Groups are matched by name (or, opt-in, by uuid) and entries by uuid.
//! Each level is walked in a fixed order: every group or entry of the right
//! snapshot in its stored order first, then whatever exists only on the left,
//! in the left's stored order. Unchanged entries produce no record.
//!
//! When a key repeats among siblings the first occurrence wins the lookup.
//! A left-side duplicate that shares a key with a right-side group is never
//! reported on its own.

use crate::models::{Entry, Group};
use serde::Deserialize;
use std::collections::hash_map::Entry as MapEntry;
use std::collections::{HashMap, HashSet};

/// One difference between the left and right snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffRecord<'a> {
    /// Entry exists only in the right snapshot.
    Added { group: &'a str, entry: &'a Entry },
    /// Entry exists only in the left snapshot.
    Removed { group: &'a str, entry: &'a Entry },
    /// Same uuid on both sides with a different title, username or password.
    Changed {
        group: &'a str,
        old: &'a Entry,
        new: &'a Entry,
    },
}

impl<'a> DiffRecord<'a> {
    /// Name of the group the record was produced in.
    pub fn group(&self) -> &'a str {
        match *self {
            DiffRecord::Added { group, .. }
            | DiffRecord::Removed { group, .. }
            | DiffRecord::Changed { group, .. } => group,
        }
    }
}

/// Which group attribute identifies "the same" group across snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKey {
    #[default]
    Name,
    Uuid,
}

/// Tree differ configured with a group matching key.
#[derive(Debug, Clone, Copy, Default)]
pub struct Differ {
    group_key: GroupKey,
}

impl Differ {
    pub fn new(group_key: GroupKey) -> Self {
        Self { group_key }
    }

    /// Diff two group forests and collect the records in output order.
    pub fn diff_groups<'a>(&self, left: &'a [Group], right: &'a [Group]) -> Vec<DiffRecord<'a>> {
        let mut records = Vec::new();
        self.diff_groups_with(left, right, &mut |record| records.push(record));
        records
    }

    /// Diff two group forests, handing each record to `emit` as it is found.
    pub fn diff_groups_with<'a, F>(&self, left: &'a [Group], right: &'a [Group], emit: &mut F)
    where
        F: FnMut(DiffRecord<'a>),
    {
        if left.is_empty() && right.is_empty() {
            return;
        }

        let mut left_by_key: HashMap<&str, &Group> = HashMap::with_capacity(left.len());
        for group in left {
            match left_by_key.entry(self.key(group)) {
                MapEntry::Vacant(slot) => {
                    slot.insert(group);
                }
                MapEntry::Occupied(_) => {
                    tracing::debug!(
                        "Duplicate sibling group {:?} shadowed by an earlier one",
                        self.key(group)
                    );
                }
            }
        }

        let mut right_keys: HashSet<&str> = HashSet::with_capacity(right.len());
        for group in right {
            let key = self.key(group);
            right_keys.insert(key);

            match left_by_key.get(key).copied() {
                Some(matched) => {
                    tracing::trace!("Comparing group {:?}", group.name);
                    diff_entries_with(&group.name, &matched.entries, &group.entries, emit);
                    self.diff_groups_with(&matched.children, &group.children, emit);
                }
                None => {
                    tracing::trace!("Group {:?} only in right snapshot", group.name);
                    diff_entries_with(&group.name, &[], &group.entries, emit);
                    self.diff_groups_with(&[], &group.children, emit);
                }
            }
        }

        for group in left {
            if !right_keys.contains(self.key(group)) {
                tracing::trace!("Group {:?} only in left snapshot", group.name);
                diff_entries_with(&group.name, &group.entries, &[], emit);
                self.diff_groups_with(&group.children, &[], emit);
            }
        }
    }

    fn key<'g>(&self, group: &'g Group) -> &'g str {
        match self.group_key {
            GroupKey::Name => &group.name,
            GroupKey::Uuid => &group.uuid,
        }
    }
}

/// Diff two group forests with name matching.
pub fn diff_groups<'a>(left: &'a [Group], right: &'a [Group]) -> Vec<DiffRecord<'a>> {
    Differ::default().diff_groups(left, right)
}

/// Diff the entries of one pair of matched groups (either side may be empty).
pub fn diff_entries<'a>(group: &'a str, left: &'a [Entry], right: &'a [Entry]) -> Vec<DiffRecord<'a>> {
    let mut records = Vec::new();
    diff_entries_with(group, left, right, &mut |record| records.push(record));
    records
}

/// Streaming form of [`diff_entries`].
pub fn diff_entries_with<'a, F>(group: &'a str, left: &'a [Entry], right: &'a [Entry], emit: &mut F)
where
    F: FnMut(DiffRecord<'a>),
{
    if left.is_empty() && right.is_empty() {
        return;
    }

    let mut left_by_uuid: HashMap<&str, &Entry> = HashMap::with_capacity(left.len());
    for entry in left {
        left_by_uuid.entry(entry.uuid.as_str()).or_insert(entry);
    }

    let mut right_uuids: HashSet<&str> = HashSet::with_capacity(right.len());
    for entry in right {
        right_uuids.insert(entry.uuid.as_str());
        let old = left_by_uuid.get(entry.uuid.as_str()).copied();
        if let Some(record) = compare_entries(group, old, Some(entry)) {
            emit(record);
        }
    }

    for entry in left {
        if !right_uuids.contains(entry.uuid.as_str()) {
            if let Some(record) = compare_entries(group, Some(entry), None) {
                emit(record);
            }
        }
    }
}

/// Classify one (possibly one-sided) pair of entries.
///
/// Returns `None` when the pair is unchanged or both sides are absent.
pub fn compare_entries<'a>(
    group: &'a str,
    old: Option<&'a Entry>,
    new: Option<&'a Entry>,
) -> Option<DiffRecord<'a>> {
    match (old, new) {
        (None, Some(entry)) => Some(DiffRecord::Added { group, entry }),
        (Some(entry), None) => Some(DiffRecord::Removed { group, entry }),
        (Some(old), Some(new)) if !old.same_content(new) => {
            Some(DiffRecord::Changed { group, old, new })
        }
        _ => None,
    }
}
