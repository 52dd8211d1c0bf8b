//! # Permission Catalog
//!
//! The closed universe of capability codes a staff member can hold.
//! Every grantable action in the product maps to exactly one code here;
//! anything outside this catalog is not a permission and can never be
//! granted (unknown codes fail closed at the parse boundary).

use serde::{Deserialize, Serialize};
use std::collections::hash_set;
use std::collections::HashSet;

/// One atomic capability in the CareGrid platform.
///
/// Codes are stable, versioned identifiers in dotted form (`area.action`).
/// The catalog is fixed at compile time; grant lists, overrides, and remote
/// responses arrive as raw strings and are admitted only through
/// [`Permission::parse`].
///
/// # Example
///
/// ```
/// use caregrid_rbac::Permission;
///
/// assert_eq!(Permission::UsersWrite.as_str(), "users.write");
/// assert_eq!(Permission::parse("support.messages.read"), Some(Permission::SupportMessagesRead));
/// assert_eq!(Permission::parse("not.a.permission"), None);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Permission {
    /// View the staff dashboard overview.
    #[serde(rename = "dashboard.view")]
    DashboardView,

    /// View user accounts.
    #[serde(rename = "users.read")]
    UsersRead,

    /// Create and edit user accounts.
    #[serde(rename = "users.write")]
    UsersWrite,

    /// Deactivate or delete user accounts.
    #[serde(rename = "users.delete")]
    UsersDelete,

    /// View provider profiles in the directory.
    #[serde(rename = "providers.read")]
    ProvidersRead,

    /// Edit provider profiles.
    #[serde(rename = "providers.write")]
    ProvidersWrite,

    /// Approve or reject provider directory listings.
    #[serde(rename = "providers.approve")]
    ProvidersApprove,

    /// View client records.
    #[serde(rename = "clients.read")]
    ClientsRead,

    /// Edit client records.
    #[serde(rename = "clients.write")]
    ClientsWrite,

    /// View bookings and schedules.
    #[serde(rename = "bookings.read")]
    BookingsRead,

    /// Create, move, or cancel bookings.
    #[serde(rename = "bookings.write")]
    BookingsWrite,

    /// View billing records and invoices.
    #[serde(rename = "billing.read")]
    BillingRead,

    /// Edit billing records.
    #[serde(rename = "billing.write")]
    BillingWrite,

    /// Issue refunds.
    #[serde(rename = "billing.refund")]
    BillingRefund,

    /// Read published and draft content.
    #[serde(rename = "content.read")]
    ContentRead,

    /// Author and edit content drafts.
    #[serde(rename = "content.write")]
    ContentWrite,

    /// Submit content for editorial review.
    #[serde(rename = "content.submit")]
    ContentSubmit,

    /// Publish reviewed content.
    #[serde(rename = "content.publish")]
    ContentPublish,

    /// Read the support message inbox.
    #[serde(rename = "support.messages.read")]
    SupportMessagesRead,

    /// Reply to support messages.
    #[serde(rename = "support.messages.reply")]
    SupportMessagesReply,

    /// View platform configuration.
    #[serde(rename = "platform.settings.read")]
    PlatformSettingsRead,

    /// Change platform configuration.
    #[serde(rename = "platform.settings.write")]
    PlatformSettingsWrite,

    /// View reports.
    #[serde(rename = "reports.read")]
    ReportsRead,

    /// Export report data.
    #[serde(rename = "reports.export")]
    ReportsExport,

    /// Read the audit log.
    #[serde(rename = "audit.read")]
    AuditRead,

    /// Manage staff accounts, roles, and overrides.
    #[serde(rename = "staff.manage")]
    StaffManage,
}

impl Permission {
    /// Get the stable dotted code for this permission.
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::DashboardView => "dashboard.view",
            Permission::UsersRead => "users.read",
            Permission::UsersWrite => "users.write",
            Permission::UsersDelete => "users.delete",
            Permission::ProvidersRead => "providers.read",
            Permission::ProvidersWrite => "providers.write",
            Permission::ProvidersApprove => "providers.approve",
            Permission::ClientsRead => "clients.read",
            Permission::ClientsWrite => "clients.write",
            Permission::BookingsRead => "bookings.read",
            Permission::BookingsWrite => "bookings.write",
            Permission::BillingRead => "billing.read",
            Permission::BillingWrite => "billing.write",
            Permission::BillingRefund => "billing.refund",
            Permission::ContentRead => "content.read",
            Permission::ContentWrite => "content.write",
            Permission::ContentSubmit => "content.submit",
            Permission::ContentPublish => "content.publish",
            Permission::SupportMessagesRead => "support.messages.read",
            Permission::SupportMessagesReply => "support.messages.reply",
            Permission::PlatformSettingsRead => "platform.settings.read",
            Permission::PlatformSettingsWrite => "platform.settings.write",
            Permission::ReportsRead => "reports.read",
            Permission::ReportsExport => "reports.export",
            Permission::AuditRead => "audit.read",
            Permission::StaffManage => "staff.manage",
        }
    }

    /// Parse a raw code into a catalog permission.
    ///
    /// Returns `None` for any string outside the catalog. Callers handling
    /// external data (grant lists, overrides, remote responses) must drop
    /// the `None` case rather than substitute a default: an unknown code
    /// can never widen access.
    ///
    /// # Example
    ///
    /// ```
    /// use caregrid_rbac::Permission;
    ///
    /// assert_eq!(Permission::parse("billing.refund"), Some(Permission::BillingRefund));
    /// assert_eq!(Permission::parse(""), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "dashboard.view" => Some(Permission::DashboardView),
            "users.read" => Some(Permission::UsersRead),
            "users.write" => Some(Permission::UsersWrite),
            "users.delete" => Some(Permission::UsersDelete),
            "providers.read" => Some(Permission::ProvidersRead),
            "providers.write" => Some(Permission::ProvidersWrite),
            "providers.approve" => Some(Permission::ProvidersApprove),
            "clients.read" => Some(Permission::ClientsRead),
            "clients.write" => Some(Permission::ClientsWrite),
            "bookings.read" => Some(Permission::BookingsRead),
            "bookings.write" => Some(Permission::BookingsWrite),
            "billing.read" => Some(Permission::BillingRead),
            "billing.write" => Some(Permission::BillingWrite),
            "billing.refund" => Some(Permission::BillingRefund),
            "content.read" => Some(Permission::ContentRead),
            "content.write" => Some(Permission::ContentWrite),
            "content.submit" => Some(Permission::ContentSubmit),
            "content.publish" => Some(Permission::ContentPublish),
            "support.messages.read" => Some(Permission::SupportMessagesRead),
            "support.messages.reply" => Some(Permission::SupportMessagesReply),
            "platform.settings.read" => Some(Permission::PlatformSettingsRead),
            "platform.settings.write" => Some(Permission::PlatformSettingsWrite),
            "reports.read" => Some(Permission::ReportsRead),
            "reports.export" => Some(Permission::ReportsExport),
            "audit.read" => Some(Permission::AuditRead),
            "staff.manage" => Some(Permission::StaffManage),
            _ => None,
        }
    }

    /// Get every permission in the catalog.
    pub fn all() -> Vec<Self> {
        vec![
            Permission::DashboardView,
            Permission::UsersRead,
            Permission::UsersWrite,
            Permission::UsersDelete,
            Permission::ProvidersRead,
            Permission::ProvidersWrite,
            Permission::ProvidersApprove,
            Permission::ClientsRead,
            Permission::ClientsWrite,
            Permission::BookingsRead,
            Permission::BookingsWrite,
            Permission::BillingRead,
            Permission::BillingWrite,
            Permission::BillingRefund,
            Permission::ContentRead,
            Permission::ContentWrite,
            Permission::ContentSubmit,
            Permission::ContentPublish,
            Permission::SupportMessagesRead,
            Permission::SupportMessagesReply,
            Permission::PlatformSettingsRead,
            Permission::PlatformSettingsWrite,
            Permission::ReportsRead,
            Permission::ReportsExport,
            Permission::AuditRead,
            Permission::StaffManage,
        ]
    }
}

/// A set of permissions held by a role template or derived for a user.
///
/// This is the working currency of the resolution engine. A derived set is
/// ephemeral: it is recomputed from identity data on demand and never
/// persisted as a source of truth.
///
/// # Example
///
/// ```
/// use caregrid_rbac::{Permission, PermissionSet};
///
/// let mut set = PermissionSet::new();
/// set.insert(Permission::ClientsRead);
/// set.insert(Permission::ClientsWrite);
///
/// assert!(set.contains(Permission::ClientsRead));
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PermissionSet {
    permissions: HashSet<Permission>,
}

impl PermissionSet {
    /// Create a new empty permission set.
    pub fn new() -> Self {
        Self {
            permissions: HashSet::new(),
        }
    }

    /// Create a set containing the entire catalog.
    pub fn full_catalog() -> Self {
        Permission::all().into_iter().collect()
    }

    /// Create a set from raw code strings, dropping anything outside the
    /// catalog.
    ///
    /// # Example
    ///
    /// ```
    /// use caregrid_rbac::PermissionSet;
    ///
    /// let set = PermissionSet::from_codes(&["users.read".into(), "bogus".into()]);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn from_codes(codes: &[String]) -> Self {
        codes.iter().filter_map(|c| Permission::parse(c)).collect()
    }

    /// Add a permission to the set.
    pub fn insert(&mut self, permission: Permission) {
        self.permissions.insert(permission);
    }

    /// Remove a permission from the set.
    ///
    /// # Returns
    ///
    /// `true` if the permission was present, `false` otherwise
    pub fn remove(&mut self, permission: Permission) -> bool {
        self.permissions.remove(&permission)
    }

    /// Check if the set contains a permission.
    pub fn contains(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    /// Merge another permission set into this one.
    pub fn merge(&mut self, other: &PermissionSet) {
        self.permissions.extend(other.permissions.iter().copied());
    }

    /// Iterate over the permissions in the set.
    pub fn iter(&self) -> hash_set::Iter<'_, Permission> {
        self.permissions.iter()
    }

    /// Get the count of permissions.
    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }

    /// Check if this set contains every permission of another set.
    pub fn contains_all(&self, other: &PermissionSet) -> bool {
        other.iter().all(|p| self.contains(*p))
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = Permission>>(iter: T) -> Self {
        Self {
            permissions: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PermissionSet {
    type Item = &'a Permission;
    type IntoIter = hash_set::Iter<'a, Permission>;

    fn into_iter(self) -> Self::IntoIter {
        self.permissions.iter()
    }
}
