//! Permission resolution engine
//!
//! Derives the effective permission set for one identity from its coarse
//! role, optional staff access profile, and the template registry. The
//! derivation is a pure function of its inputs evaluated at one instant:
//! no interior state, no I/O, and the result is never a source of truth.
//!
//! The engine computes a decision set only. It performs no enforcement:
//! every privileged server action must re-run this derivation against the
//! server's own record of the identity before permitting anything.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::PermissionSet;
use crate::overrides::{apply_overrides, PermissionOverride};
use crate::roles::{baseline, AccountRole, StaffRole};
use crate::templates::TemplateRegistry;

/// Staff access data attached to an administrator account.
///
/// All three fields come from the directory service. Grants are raw
/// catalog codes added outside any template; overrides are per-code
/// allow/deny exceptions applied last.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaffAccessProfile {
    /// Assigned staff role, if any
    pub staff_role: Option<StaffRole>,

    /// Ad hoc permission grants (raw catalog codes), bypassing templates
    #[serde(default)]
    pub grants: Vec<String>,

    /// Allow/deny exceptions, applied after roles and grants
    #[serde(default)]
    pub overrides: Vec<PermissionOverride>,
}

impl StaffAccessProfile {
    /// Check whether the profile carries no staff role, no grants, and no
    /// overrides.
    pub fn is_blank(&self) -> bool {
        self.staff_role.is_none() && self.grants.is_empty() && self.overrides.is_empty()
    }
}

/// Identity aggregate as seen by the resolution engine.
///
/// Owned and maintained by the directory service; the engine only reads
/// it. The staff access profile is meaningful only for `Admin` accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Stable user ID
    pub id: Uuid,

    /// Coarse account role
    pub role: AccountRole,

    /// Staff access profile, present only on privileged accounts
    pub staff_access: Option<StaffAccessProfile>,
}

impl User {
    /// Create a user with no staff access profile.
    pub fn new(id: Uuid, role: AccountRole) -> Self {
        Self {
            id,
            role,
            staff_access: None,
        }
    }

    /// Attach a staff access profile.
    pub fn with_staff_access(mut self, profile: StaffAccessProfile) -> Self {
        self.staff_access = Some(profile);
        self
    }

    /// Check if this user is a super admin: an admin account assigned the
    /// top-tier staff role.
    pub fn is_super_admin(&self) -> bool {
        self.role == AccountRole::Admin
            && self
                .staff_access
                .as_ref()
                .and_then(|p| p.staff_role)
                .is_some_and(|r| r.is_super_admin())
    }
}

/// Heuristic for admin accounts that predate the staff-tier model.
///
/// An admin with no staff role, no grants, and no overrides is treated as
/// a pre-migration account and keeps full access. The instant any of the
/// three is attached, this predicate is false for good; there is no path
/// back.
///
/// Known ambiguity: an admin account deliberately stripped of everything
/// is indistinguishable from a never-migrated one and also matches. The
/// check is kept behind this one predicate so an explicit migration flag
/// can replace it without touching the rest of the engine.
pub fn is_legacy_admin(user: &User) -> bool {
    user.role == AccountRole::Admin
        && user
            .staff_access
            .as_ref()
            .map_or(true, StaffAccessProfile::is_blank)
}

/// Derive the effective permission set for an identity.
///
/// The derivation, in order:
///
/// 1. No identity at all yields the empty set.
/// 2. A super admin receives the full catalog unconditionally; overrides
///    are never applied, so a deny can never reduce their access.
/// 3. A legacy admin (see [`is_legacy_admin`]) receives the full catalog.
/// 4. Otherwise: baseline of the coarse role, union of the staff role's
///    template if one is set and defined in the registry (an unresolvable
///    role contributes nothing), union of any valid explicit grants, then
///    overrides applied last.
///
/// Unknown staff roles, grant codes, and override codes are silently
/// excluded; nothing outside the catalog or registry can widen access.
///
/// # Examples
///
/// ```
/// use caregrid_rbac::{
///     resolve, AccountRole, Permission, StaffAccessProfile, StaffRole, TemplateRegistry, User,
/// };
/// use uuid::Uuid;
///
/// let registry = TemplateRegistry::builtin();
/// let user = User::new(Uuid::now_v7(), AccountRole::Admin).with_staff_access(
///     StaffAccessProfile {
///         staff_role: Some(StaffRole::SupportLead),
///         ..Default::default()
///     },
/// );
///
/// let set = resolve(Some(&user), &registry);
/// assert!(set.contains(Permission::SupportMessagesReply));
/// assert!(!set.contains(Permission::PlatformSettingsWrite));
/// ```
pub fn resolve(user: Option<&User>, registry: &TemplateRegistry) -> PermissionSet {
    let Some(user) = user else {
        return PermissionSet::new();
    };

    if user.is_super_admin() {
        return PermissionSet::full_catalog();
    }

    if is_legacy_admin(user) {
        return PermissionSet::full_catalog();
    }

    let mut set = baseline(user.role);

    let Some(profile) = user.staff_access.as_ref() else {
        // Admins without a profile were handled by the legacy branch above
        return set;
    };

    if user.role == AccountRole::Admin {
        if let Some(template) = profile.staff_role.and_then(|r| registry.lookup(r)) {
            set.merge(&template.permissions);
        }
    }

    set.merge(&PermissionSet::from_codes(&profile.grants));

    apply_overrides(set, &profile.overrides)
}
