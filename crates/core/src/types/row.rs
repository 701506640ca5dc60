//! Dynamic row and projection types returned by the store.

use serde::{Deserialize, Serialize};

use super::UserId;

/// A result row as an ordered mapping from column name to value.
///
/// Products and orders are returned verbatim from their tables, so their
/// shape is whatever columns exist. Column order is preserved.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// The public projection of a user returned after a successful login.
///
/// `name` mirrors the column as stored; a `NULL` name is returned as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub name: Option<String>,
}
