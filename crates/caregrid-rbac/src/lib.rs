//! # CareGrid RBAC (Role-Based Access Control)
//!
//! This crate provides staff access control for the CareGrid platform:
//! the permission catalog, staff role templates, per-user overrides, and
//! the resolution engine that combines them into one effective set per
//! identity.
//!
//! ## Overview
//!
//! The caregrid-rbac crate handles:
//! - **Catalog**: the closed universe of capability codes
//! - **Roles**: coarse account roles and assignable staff roles
//! - **Templates**: static permission bundles behind each staff role
//! - **Overrides**: per-user allow/deny exceptions
//! - **Resolution**: deriving the effective permission set for a user
//!
//! ## Architecture
//!
//! ```text
//! User (coarse role)
//!   └─ StaffAccessProfile (admins only)
//!         ├─ staff_role ──→ TemplateRegistry ──→ RoleTemplate
//!         ├─ grants (raw codes)
//!         └─ overrides (allow/deny)
//!
//! resolve(user, registry) ──→ PermissionSet   (ephemeral, recomputed)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use caregrid_rbac::{
//!     resolve, AccountRole, Permission, StaffAccessProfile, StaffRole, TemplateRegistry, User,
//! };
//! use uuid::Uuid;
//!
//! let registry = TemplateRegistry::builtin();
//!
//! let support_lead = User::new(Uuid::now_v7(), AccountRole::Admin).with_staff_access(
//!     StaffAccessProfile {
//!         staff_role: Some(StaffRole::SupportLead),
//!         ..Default::default()
//!     },
//! );
//!
//! let set = resolve(Some(&support_lead), &registry);
//! assert!(set.contains(Permission::SupportMessagesRead));
//! ```
//!
//! ## Resolution rules
//!
//! - No identity → empty set.
//! - Super admin (admin + `SUPER_ADMIN` staff role) → full catalog,
//!   override-proof.
//! - Legacy admin (admin with no staff role, grants, or overrides) → full
//!   catalog, until any of the three is attached.
//! - Everyone else: baseline of the coarse role ∪ staff role template ∪
//!   valid grants, then overrides applied last.
//!
//! Unknown roles and codes always fail closed.
//!
//! ## Scope
//!
//! This crate computes a decision set for UI affordance (show/hide,
//! enable/disable) and server-side re-derivation. It does not authenticate
//! identities and does not enforce anything at a trust boundary; the
//! server must re-run the derivation before every privileged action.

pub mod catalog;
pub mod engine;
pub mod overrides;
pub mod roles;
pub mod templates;

// Re-export main types for convenience
pub use catalog::{Permission, PermissionSet};
pub use engine::{is_legacy_admin, resolve, StaffAccessProfile, User};
pub use overrides::{apply_overrides, OverrideSet, PermissionOverride};
pub use roles::{baseline, AccountRole, StaffRole};
pub use templates::{RoleTemplate, TemplateRegistry};
