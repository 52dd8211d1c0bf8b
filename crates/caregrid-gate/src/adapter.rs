//! Access gate
//!
//! Session-scoped adapter between identity data and UI gating. Answers
//! `can(permission)` from the authoritative remote result when one is
//! cached, falling back to local derivation otherwise. A local-only answer
//! is suitable for non-destructive affordance (show/hide, enable/disable)
//! only; irreversible actions must wait for an authoritative result and be
//! re-checked server side regardless.

use std::sync::Arc;
use tokio::sync::RwLock;

use caregrid_rbac::{resolve, Permission, PermissionSet, TemplateRegistry, User};

use crate::source::PermissionSource;

/// How current the gate's answers are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Backed by a server-confirmed result for the current identity
    Authoritative,

    /// Derived from locally loaded data only; possibly stale
    LocalOnly,
}

struct GateState {
    user: Option<User>,
    remote: Option<PermissionSet>,
    freshness: Freshness,
    /// Bumped on every identity change; a fetch resolves only if the epoch
    /// it started under is still current.
    epoch: u64,
}

/// Permission gate for one session.
///
/// Holds the current identity, the template registry, and an optional
/// cached remote permission set. Override changes written while a session
/// is active are picked up at the next [`refresh`](AccessGate::refresh);
/// there is no live push.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use caregrid_gate::{AccessGate, GateResult, PermissionSource};
/// use caregrid_rbac::{AccountRole, Permission, TemplateRegistry, User};
/// use async_trait::async_trait;
/// use uuid::Uuid;
///
/// struct Api;
///
/// #[async_trait]
/// impl PermissionSource for Api {
///     async fn fetch_permissions(&self, _user_id: Uuid) -> GateResult<Vec<String>> {
///         Ok(vec!["dashboard.view".to_string()])
///     }
/// }
///
/// # async fn example() {
/// let gate = AccessGate::new(Arc::new(TemplateRegistry::builtin()), Arc::new(Api));
/// gate.set_user(Some(User::new(Uuid::now_v7(), AccountRole::Admin))).await;
/// gate.refresh().await;
/// assert!(gate.can(Permission::DashboardView).await);
/// # }
/// ```
pub struct AccessGate {
    registry: Arc<TemplateRegistry>,
    source: Arc<dyn PermissionSource>,
    state: RwLock<GateState>,
}

impl AccessGate {
    /// Create a gate with no identity loaded.
    pub fn new(registry: Arc<TemplateRegistry>, source: Arc<dyn PermissionSource>) -> Self {
        Self {
            registry,
            source,
            state: RwLock::new(GateState {
                user: None,
                remote: None,
                freshness: Freshness::LocalOnly,
                epoch: 0,
            }),
        }
    }

    /// Replace the current identity.
    ///
    /// Drops any cached remote result and invalidates in-flight fetches:
    /// a fetch started for the previous identity will not resolve onto the
    /// new one.
    pub async fn set_user(&self, user: Option<User>) {
        let mut state = self.state.write().await;
        state.user = user;
        state.remote = None;
        state.freshness = Freshness::LocalOnly;
        state.epoch += 1;
    }

    /// Check whether the current identity holds a permission.
    ///
    /// Answers from the cached authoritative result when present, else
    /// from local derivation. Never errors; no identity means no
    /// permissions.
    pub async fn can(&self, permission: Permission) -> bool {
        self.effective().await.contains(permission)
    }

    /// Get the effective permission set the gate is currently answering
    /// from.
    pub async fn effective(&self) -> PermissionSet {
        let state = self.state.read().await;
        match &state.remote {
            Some(remote) => remote.clone(),
            None => resolve(state.user.as_ref(), &self.registry),
        }
    }

    /// Fetch the server-confirmed permission list for the current
    /// identity.
    ///
    /// On success the result becomes the gate's answer source. On failure
    /// the gate keeps answering from local derivation and reports
    /// [`Freshness::LocalOnly`]; the caller gets a signal, never an error,
    /// and access never widens on failure.
    pub async fn refresh(&self) -> Freshness {
        let (user_id, epoch) = {
            let state = self.state.read().await;
            match &state.user {
                Some(user) => (user.id, state.epoch),
                None => return Freshness::LocalOnly,
            }
        };

        match self.source.fetch_permissions(user_id).await {
            Ok(codes) => {
                let mut state = self.state.write().await;
                if state.epoch != epoch {
                    // Identity changed while the fetch was in flight
                    tracing::debug!(%user_id, "discarding stale permission fetch");
                    return state.freshness;
                }
                state.remote = Some(PermissionSet::from_codes(&codes));
                state.freshness = Freshness::Authoritative;
                tracing::debug!(%user_id, count = codes.len(), "permissions refreshed");
                Freshness::Authoritative
            }
            Err(e) => {
                tracing::warn!(%user_id, error = %e, "permission fetch failed, using local derivation");
                let mut state = self.state.write().await;
                if state.epoch == epoch {
                    state.freshness = Freshness::LocalOnly;
                }
                Freshness::LocalOnly
            }
        }
    }

    /// How current the gate's answers are for the current identity.
    pub async fn freshness(&self) -> Freshness {
        self.state.read().await.freshness
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GateError, GateResult};
    use async_trait::async_trait;
    use caregrid_rbac::{AccountRole, StaffAccessProfile, StaffRole};
    use tokio::sync::Notify;
    use uuid::Uuid;

    struct FixedSource(Vec<String>);

    #[async_trait]
    impl PermissionSource for FixedSource {
        async fn fetch_permissions(&self, _user_id: Uuid) -> GateResult<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl PermissionSource for FailingSource {
        async fn fetch_permissions(&self, _user_id: Uuid) -> GateResult<Vec<String>> {
            Err(GateError::SourceUnavailable("connection refused".into()))
        }
    }

    /// Signals when a fetch starts and blocks it until released.
    struct BlockingSource {
        started: Notify,
        release: Notify,
        codes: Vec<String>,
    }

    #[async_trait]
    impl PermissionSource for BlockingSource {
        async fn fetch_permissions(&self, _user_id: Uuid) -> GateResult<Vec<String>> {
            self.started.notify_one();
            self.release.notified().await;
            Ok(self.codes.clone())
        }
    }

    fn support_lead() -> User {
        User::new(Uuid::now_v7(), AccountRole::Admin).with_staff_access(StaffAccessProfile {
            staff_role: Some(StaffRole::SupportLead),
            ..Default::default()
        })
    }

    fn gate(source: Arc<dyn PermissionSource>) -> AccessGate {
        AccessGate::new(Arc::new(TemplateRegistry::builtin()), source)
    }

    #[tokio::test]
    async fn test_local_answers_before_refresh() {
        let gate = gate(Arc::new(FixedSource(vec![])));
        gate.set_user(Some(support_lead())).await;

        assert!(gate.can(Permission::SupportMessagesReply).await);
        assert!(!gate.can(Permission::BillingRefund).await);
        assert_eq!(gate.freshness().await, Freshness::LocalOnly);
    }

    #[tokio::test]
    async fn test_remote_result_wins_over_local() {
        // Server reflects a deny override the local profile has not seen yet
        let gate = gate(Arc::new(FixedSource(vec![
            "dashboard.view".to_string(),
            "support.messages.read".to_string(),
        ])));
        gate.set_user(Some(support_lead())).await;

        assert!(gate.can(Permission::SupportMessagesReply).await);
        assert_eq!(gate.refresh().await, Freshness::Authoritative);
        assert!(!gate.can(Permission::SupportMessagesReply).await);
        assert!(gate.can(Permission::SupportMessagesRead).await);
        assert_eq!(gate.freshness().await, Freshness::Authoritative);
    }

    #[tokio::test]
    async fn test_unknown_remote_codes_dropped() {
        let gate = gate(Arc::new(FixedSource(vec![
            "dashboard.view".to_string(),
            "superpowers.all".to_string(),
        ])));
        gate.set_user(Some(support_lead())).await;
        gate.refresh().await;

        let effective = gate.effective().await;
        assert_eq!(effective.len(), 1);
        assert!(effective.contains(Permission::DashboardView));
    }

    #[tokio::test]
    async fn test_fetch_failure_degrades_to_local() {
        let gate = gate(Arc::new(FailingSource));
        gate.set_user(Some(support_lead())).await;

        assert_eq!(gate.refresh().await, Freshness::LocalOnly);
        // Local derivation still answers; failure never fails open
        assert!(gate.can(Permission::SupportMessagesReply).await);
        assert!(!gate.can(Permission::PlatformSettingsWrite).await);
        assert_eq!(gate.freshness().await, Freshness::LocalOnly);
    }

    #[tokio::test]
    async fn test_no_user_refresh_is_noop() {
        let gate = gate(Arc::new(FixedSource(vec!["dashboard.view".to_string()])));
        assert_eq!(gate.refresh().await, Freshness::LocalOnly);
        assert!(!gate.can(Permission::DashboardView).await);
    }

    #[tokio::test]
    async fn test_set_user_drops_cached_remote() {
        let gate = gate(Arc::new(FixedSource(vec!["audit.read".to_string()])));
        gate.set_user(Some(support_lead())).await;
        gate.refresh().await;
        assert!(gate.can(Permission::AuditRead).await);

        gate.set_user(Some(User::new(Uuid::now_v7(), AccountRole::Client)))
            .await;
        assert!(!gate.can(Permission::AuditRead).await);
        assert_eq!(gate.freshness().await, Freshness::LocalOnly);
    }

    #[tokio::test]
    async fn test_identity_switch_discards_in_flight_fetch() {
        let source = Arc::new(BlockingSource {
            started: Notify::new(),
            release: Notify::new(),
            codes: vec!["platform.settings.write".to_string()],
        });
        let gate = Arc::new(AccessGate::new(
            Arc::new(TemplateRegistry::builtin()),
            source.clone(),
        ));
        gate.set_user(Some(support_lead())).await;

        let task = {
            let gate = gate.clone();
            tokio::spawn(async move { gate.refresh().await })
        };
        source.started.notified().await;

        // Switch identities while the first fetch is still in flight
        gate.set_user(Some(User::new(Uuid::now_v7(), AccountRole::Client)))
            .await;
        source.release.notify_one();

        assert_eq!(task.await.unwrap(), Freshness::LocalOnly);
        assert!(!gate.can(Permission::PlatformSettingsWrite).await);
        assert_eq!(gate.freshness().await, Freshness::LocalOnly);
    }
}
