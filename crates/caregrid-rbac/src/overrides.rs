//! Per-user permission overrides
//!
//! Overrides are allow/deny exceptions written by the staff-management
//! workflow and consumed read-only here. They take precedence over whatever
//! a role template or grant produced for the same code.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::catalog::{Permission, PermissionSet};

/// One allow/deny exception for a (user, permission) pair.
///
/// The `code` is carried as a raw string because override rows come from
/// storage written by an external workflow; it is validated against the
/// catalog only when the override is applied, and an unknown code is
/// ignored there.
///
/// At most one effective override should exist per (user, code) pair; the
/// writer is responsible for upsert semantics (see [`OverrideSet`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionOverride {
    /// User the override applies to
    pub user_id: Uuid,

    /// Raw catalog code being allowed or denied
    pub code: String,

    /// `true` grants the permission, `false` removes it
    pub allowed: bool,

    /// When the override was last written
    pub updated_at: DateTime<Utc>,

    /// Staff member who wrote the override (if recorded)
    pub updated_by: Option<Uuid>,
}

impl PermissionOverride {
    /// Create a new override stamped with the current time.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user the override applies to
    /// * `code` - The permission code
    /// * `allowed` - Whether the permission is granted or denied
    pub fn new(user_id: Uuid, code: impl Into<String>, allowed: bool) -> Self {
        Self {
            user_id,
            code: code.into(),
            allowed,
            updated_at: Utc::now(),
            updated_by: None,
        }
    }

    /// Set who wrote this override.
    pub fn with_author(mut self, author_id: Uuid) -> Self {
        self.updated_by = Some(author_id);
        self
    }

    /// The catalog permission this override refers to, if the code is
    /// valid.
    pub fn permission(&self) -> Option<Permission> {
        Permission::parse(&self.code)
    }
}

/// Apply overrides to an accumulated permission set, in order.
///
/// Each override is an idempotent toggle: `allowed=true` inserts the code,
/// `allowed=false` removes it, regardless of prior membership. Overrides
/// naming a code outside the catalog are ignored. If duplicates exist for
/// one code, the entry applied last wins; the writer should prevent
/// duplicates in the first place via [`OverrideSet`].
///
/// # Examples
///
/// ```
/// use caregrid_rbac::{apply_overrides, Permission, PermissionOverride, PermissionSet};
/// use uuid::Uuid;
///
/// let user = Uuid::now_v7();
/// let base: PermissionSet = [Permission::SupportMessagesRead, Permission::SupportMessagesReply]
///     .into_iter()
///     .collect();
/// let overrides = vec![PermissionOverride::new(user, "support.messages.reply", false)];
///
/// let result = apply_overrides(base, &overrides);
/// assert!(result.contains(Permission::SupportMessagesRead));
/// assert!(!result.contains(Permission::SupportMessagesReply));
/// ```
pub fn apply_overrides(mut set: PermissionSet, overrides: &[PermissionOverride]) -> PermissionSet {
    for ov in overrides {
        let Some(permission) = ov.permission() else {
            continue;
        };
        if ov.allowed {
            set.insert(permission);
        } else {
            set.remove(permission);
        }
    }
    set
}

/// Writer-side collection of overrides for one user, keyed by code.
///
/// The admin workflow should build overrides through this type so the
/// stored list never contains two entries for the same code and the
/// reader's iteration order carries no precedence decisions.
#[derive(Debug, Clone, Default)]
pub struct OverrideSet {
    by_code: HashMap<String, PermissionOverride>,
}

impl OverrideSet {
    /// Create an empty override set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from existing rows, keeping the last entry per code.
    pub fn from_rows(rows: impl IntoIterator<Item = PermissionOverride>) -> Self {
        let mut set = Self::new();
        for row in rows {
            set.upsert(row);
        }
        set
    }

    /// Insert or replace the override for its code.
    pub fn upsert(&mut self, ov: PermissionOverride) {
        self.by_code.insert(ov.code.clone(), ov);
    }

    /// Remove the override for a code.
    ///
    /// # Returns
    ///
    /// The removed override, if one existed
    pub fn clear(&mut self, code: &str) -> Option<PermissionOverride> {
        self.by_code.remove(code)
    }

    /// Get the override for a code, if any.
    pub fn get(&self, code: &str) -> Option<&PermissionOverride> {
        self.by_code.get(code)
    }

    /// Number of overrides in the set.
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// Convert into the row list stored on the access profile, most
    /// recently updated last.
    pub fn into_rows(self) -> Vec<PermissionOverride> {
        let mut rows: Vec<PermissionOverride> = self.by_code.into_values().collect();
        rows.sort_by_key(|ov| ov.updated_at);
        rows
    }
}
