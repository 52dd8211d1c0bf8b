//! Account and staff roles
//!
//! This module defines the coarse account role every identity carries, the
//! finite set of staff roles assignable to administrator accounts, and the
//! baseline permissions intrinsic to each coarse role.

use serde::{Deserialize, Serialize};

use crate::catalog::{Permission, PermissionSet};

/// Coarse role of an account.
///
/// Every identity has exactly one account role. Only `Admin` accounts can
/// carry a staff access profile; the staff-role machinery never applies to
/// the other roles.
///
/// # Examples
///
/// ```
/// use caregrid_rbac::AccountRole;
///
/// assert_eq!(AccountRole::parse("provider"), Some(AccountRole::Provider));
/// assert_eq!(AccountRole::Admin.as_str(), "admin");
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    /// Platform staff account (may carry a staff access profile)
    Admin,

    /// Care provider listed in the directory
    Provider,

    /// Client booking and browsing providers
    Client,
}

impl AccountRole {
    /// Parse role from string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive)
    ///
    /// # Returns
    ///
    /// `Some(AccountRole)` if valid, `None` otherwise
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "provider" => Some(Self::Provider),
            "client" => Some(Self::Client),
            _ => None,
        }
    }

    /// Get string representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Provider => "provider",
            Self::Client => "client",
        }
    }
}

/// Staff role assignable to an administrator account.
///
/// A staff role names a bundle of catalog permissions defined by the
/// [`TemplateRegistry`](crate::TemplateRegistry). The wire codes are the
/// stored identifiers used by the directory service, not display text.
///
/// # Examples
///
/// ```
/// use caregrid_rbac::StaffRole;
///
/// assert_eq!(StaffRole::parse("SUPPORT_LEAD"), Some(StaffRole::SupportLead));
/// assert!(StaffRole::SuperAdmin.is_super_admin());
/// assert_eq!(StaffRole::Operations.display_name(), "Operations");
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum StaffRole {
    /// Top-tier staff role with unconditional full access
    #[serde(rename = "SUPER_ADMIN")]
    SuperAdmin,

    /// Day-to-day platform operations (users, providers, bookings)
    #[serde(rename = "OPERATIONS")]
    Operations,

    /// Support inbox triage and response
    #[serde(rename = "SUPPORT_LEAD")]
    SupportLead,

    /// Content pipeline management
    #[serde(rename = "CONTENT_MANAGER")]
    ContentManager,

    /// Billing and refund administration
    #[serde(rename = "BILLING_ADMIN")]
    BillingAdmin,
}

impl StaffRole {
    /// Parse a staff role from its stored wire code.
    ///
    /// # Returns
    ///
    /// `Some(StaffRole)` if valid, `None` otherwise
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SUPER_ADMIN" => Some(Self::SuperAdmin),
            "OPERATIONS" => Some(Self::Operations),
            "SUPPORT_LEAD" => Some(Self::SupportLead),
            "CONTENT_MANAGER" => Some(Self::ContentManager),
            "BILLING_ADMIN" => Some(Self::BillingAdmin),
            _ => None,
        }
    }

    /// Get the stored wire code for the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "SUPER_ADMIN",
            Self::Operations => "OPERATIONS",
            Self::SupportLead => "SUPPORT_LEAD",
            Self::ContentManager => "CONTENT_MANAGER",
            Self::BillingAdmin => "BILLING_ADMIN",
        }
    }

    /// Get a human-readable display name for the role.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "Super Admin",
            Self::Operations => "Operations",
            Self::SupportLead => "Support Lead",
            Self::ContentManager => "Content Manager",
            Self::BillingAdmin => "Billing Admin",
        }
    }

    /// Check if this is the top-tier staff role.
    ///
    /// Super admins receive the full catalog unconditionally; overrides are
    /// never applied to them.
    pub fn is_super_admin(&self) -> bool {
        matches!(self, Self::SuperAdmin)
    }

    /// Get all staff roles.
    pub fn all() -> Vec<Self> {
        vec![
            Self::SuperAdmin,
            Self::Operations,
            Self::SupportLead,
            Self::ContentManager,
            Self::BillingAdmin,
        ]
    }
}

/// Permissions intrinsic to a coarse account role, before any staff role,
/// grant, or override is considered.
///
/// Pure and total: an account role always maps to the same set.
///
/// - `Admin` holds only the dashboard overview; all further capability
///   comes from an explicit staff role or grant.
/// - `Provider` holds the intrinsic content-authoring bundle for their own
///   listing.
/// - `Client` holds nothing.
///
/// # Examples
///
/// ```
/// use caregrid_rbac::{baseline, AccountRole, Permission};
///
/// assert!(baseline(AccountRole::Admin).contains(Permission::DashboardView));
/// assert_eq!(baseline(AccountRole::Provider).len(), 4);
/// assert!(baseline(AccountRole::Client).is_empty());
/// ```
pub fn baseline(role: AccountRole) -> PermissionSet {
    match role {
        AccountRole::Admin => [Permission::DashboardView].into_iter().collect(),
        AccountRole::Provider => [
            Permission::DashboardView,
            Permission::ContentRead,
            Permission::ContentWrite,
            Permission::ContentSubmit,
        ]
        .into_iter()
        .collect(),
        AccountRole::Client => PermissionSet::new(),
    }
}
