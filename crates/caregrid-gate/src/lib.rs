//! # CareGrid Gate
//!
//! Client-side permission and entitlement gating for the CareGrid
//! platform. This crate sits between identity data and the UI: it answers
//! "may this session do X" and "does this provider's subscription include
//! Y" from an authoritative remote result when one is available, falling
//! back to local derivation otherwise.
//!
//! ## Overview
//!
//! - **AccessGate**: per-session permission checks backed by
//!   `caregrid-rbac` locally and the server's derivation remotely
//! - **FeatureGate**: per-provider subscription feature checks
//! - **Sources**: async-trait contracts the HTTP layer implements
//!
//! ## Architecture
//!
//! ```text
//! AccessGate ── can(permission)
//!   ├─ remote: PermissionSource::fetch_permissions (authoritative)
//!   └─ local:  caregrid_rbac::resolve              (instant fallback)
//!
//! FeatureGate ── is_enabled(feature)
//!   └─ EntitlementSource::fetch_entitlements
//! ```
//!
//! ## Failure semantics
//!
//! Gates never error toward the caller and never fail open. A failed
//! remote fetch degrades to the local result with a
//! [`Freshness::LocalOnly`] marker; switching identities or providers
//! discards any in-flight fetch for the previous one. Override changes
//! made during a session take effect at the next refresh (no live push).
//!
//! ## Limits
//!
//! A local-only answer must never gate an irreversible or destructive
//! action, and no gate result is enforcement: the server re-derives
//! permissions for every privileged action regardless of what the UI
//! showed.

pub mod adapter;
pub mod entitlements;
pub mod error;
pub mod source;

// Re-export main types for convenience
pub use adapter::{AccessGate, Freshness};
pub use entitlements::FeatureGate;
pub use error::{GateError, GateResult};
pub use source::{EntitlementSource, FeatureEntitlement, PermissionSource};
