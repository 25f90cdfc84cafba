//! Snapshot loading and tree diffing for KeePass databases.
//!
//! [`KeepassDatabase`] opens and unlocks a KDBX file and exposes its group
//! tree; [`diff_groups`] walks two such trees and reports entries added,
//! removed or changed, grouped by the group they live in.

pub mod database;
pub mod diff;
pub mod error;
pub mod models;
pub mod render;

pub use database::KeepassDatabase;
pub use diff::{compare_entries, diff_entries, diff_groups, DiffRecord, Differ, GroupKey};
pub use error::LoadError;
pub use models::{Entry, Group};
pub use render::{OutputFormat, Renderer};
