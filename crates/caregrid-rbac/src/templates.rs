//! Role templates and the template registry
//!
//! A role template is the static bundle of catalog permissions behind a
//! staff role. Templates are fixed configuration: the registry is built
//! once at process start and exposes lookup only, never mutation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::catalog::{Permission, PermissionSet};
use crate::roles::StaffRole;

/// Static definition mapping a staff role to its permission bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleTemplate {
    /// The staff role this template defines
    pub role: StaffRole,

    /// Human-readable description of what the role is for
    pub description: String,

    /// Catalog permissions granted by the role
    pub permissions: PermissionSet,
}

impl RoleTemplate {
    /// Create a new role template.
    pub fn new(
        role: StaffRole,
        description: impl Into<String>,
        permissions: impl IntoIterator<Item = Permission>,
    ) -> Self {
        Self {
            role,
            description: description.into(),
            permissions: permissions.into_iter().collect(),
        }
    }
}

/// Immutable registry of role templates.
///
/// Built once at startup from the builtin table (or injected templates in
/// tests) and consulted read-only by the resolution engine. There is no way
/// to add or change templates through this type after construction.
///
/// # Examples
///
/// ```
/// use caregrid_rbac::{Permission, StaffRole, TemplateRegistry};
///
/// let registry = TemplateRegistry::builtin();
/// let template = registry.lookup(StaffRole::SupportLead).unwrap();
/// assert!(template.permissions.contains(Permission::SupportMessagesRead));
/// ```
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: HashMap<StaffRole, RoleTemplate>,
}

impl TemplateRegistry {
    /// Build a registry from an explicit template list.
    ///
    /// Later entries for the same role replace earlier ones.
    pub fn from_templates(templates: impl IntoIterator<Item = RoleTemplate>) -> Self {
        Self {
            templates: templates.into_iter().map(|t| (t.role, t)).collect(),
        }
    }

    /// Build the builtin registry defining every staff role.
    pub fn builtin() -> Self {
        Self::from_templates([
            RoleTemplate::new(
                StaffRole::SuperAdmin,
                "Unrestricted access to every capability",
                Permission::all(),
            ),
            RoleTemplate::new(
                StaffRole::Operations,
                "Day-to-day operations across users, providers, and bookings",
                [
                    Permission::DashboardView,
                    Permission::UsersRead,
                    Permission::UsersWrite,
                    Permission::ProvidersRead,
                    Permission::ProvidersWrite,
                    Permission::ProvidersApprove,
                    Permission::ClientsRead,
                    Permission::ClientsWrite,
                    Permission::BookingsRead,
                    Permission::BookingsWrite,
                    Permission::ReportsRead,
                    Permission::ReportsExport,
                    Permission::AuditRead,
                ],
            ),
            RoleTemplate::new(
                StaffRole::SupportLead,
                "Support inbox triage with read access to the records behind it",
                [
                    Permission::DashboardView,
                    Permission::SupportMessagesRead,
                    Permission::SupportMessagesReply,
                    Permission::ClientsRead,
                    Permission::ProvidersRead,
                    Permission::BookingsRead,
                ],
            ),
            RoleTemplate::new(
                StaffRole::ContentManager,
                "Full content pipeline from draft to publish",
                [
                    Permission::DashboardView,
                    Permission::ContentRead,
                    Permission::ContentWrite,
                    Permission::ContentSubmit,
                    Permission::ContentPublish,
                ],
            ),
            RoleTemplate::new(
                StaffRole::BillingAdmin,
                "Billing records, refunds, and financial reporting",
                [
                    Permission::DashboardView,
                    Permission::BillingRead,
                    Permission::BillingWrite,
                    Permission::BillingRefund,
                    Permission::ReportsRead,
                    Permission::ReportsExport,
                ],
            ),
        ])
    }

    /// Look up the template for a staff role.
    ///
    /// # Returns
    ///
    /// `Some(&RoleTemplate)` if the role is defined, `None` otherwise. A
    /// missing template contributes nothing to a derived set (fails closed).
    pub fn lookup(&self, role: StaffRole) -> Option<&RoleTemplate> {
        self.templates.get(&role)
    }

    /// Number of templates in the registry.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
