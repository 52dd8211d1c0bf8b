//! Feature entitlement gate
//!
//! Subscription-tier feature gating for providers. Same async/cache shape
//! as the access gate, but a separate catalog (free-form feature codes)
//! and no RBAC algorithm: the server's entitlement list is the only input,
//! and anything not explicitly enabled is disabled.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::adapter::Freshness;
use crate::source::EntitlementSource;

struct FeatureState {
    provider_id: Option<Uuid>,
    enabled: HashMap<String, bool>,
    freshness: Freshness,
    epoch: u64,
}

/// Entitlement gate for one provider session.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use caregrid_gate::{EntitlementSource, FeatureEntitlement, FeatureGate, GateResult};
/// use async_trait::async_trait;
/// use uuid::Uuid;
///
/// struct Api;
///
/// #[async_trait]
/// impl EntitlementSource for Api {
///     async fn fetch_entitlements(&self, _provider_id: Uuid) -> GateResult<Vec<FeatureEntitlement>> {
///         Ok(vec![FeatureEntitlement { feature: "featured_listing".into(), enabled: true }])
///     }
/// }
///
/// # async fn example() {
/// let gate = FeatureGate::new(Arc::new(Api));
/// gate.load(Uuid::now_v7()).await;
/// assert!(gate.is_enabled("featured_listing").await);
/// assert!(!gate.is_enabled("video_consults").await);
/// # }
/// ```
pub struct FeatureGate {
    source: Arc<dyn EntitlementSource>,
    state: RwLock<FeatureState>,
}

impl FeatureGate {
    /// Create a gate with no provider loaded.
    pub fn new(source: Arc<dyn EntitlementSource>) -> Self {
        Self {
            source,
            state: RwLock::new(FeatureState {
                provider_id: None,
                enabled: HashMap::new(),
                freshness: Freshness::LocalOnly,
                epoch: 0,
            }),
        }
    }

    /// Load entitlements for a provider, replacing any previous provider's
    /// cache.
    ///
    /// On fetch failure the gate keeps an empty cache for the new provider
    /// and reports [`Freshness::LocalOnly`]; features stay disabled rather
    /// than erroring or defaulting open. A provider switch while a fetch
    /// is in flight discards the stale response.
    pub async fn load(&self, provider_id: Uuid) -> Freshness {
        let epoch = {
            let mut state = self.state.write().await;
            state.provider_id = Some(provider_id);
            state.enabled.clear();
            state.freshness = Freshness::LocalOnly;
            state.epoch += 1;
            state.epoch
        };

        match self.source.fetch_entitlements(provider_id).await {
            Ok(entitlements) => {
                let mut state = self.state.write().await;
                if state.epoch != epoch {
                    tracing::debug!(%provider_id, "discarding stale entitlement fetch");
                    return state.freshness;
                }
                state.enabled = entitlements
                    .into_iter()
                    .map(|e| (e.feature, e.enabled))
                    .collect();
                state.freshness = Freshness::Authoritative;
                Freshness::Authoritative
            }
            Err(e) => {
                tracing::warn!(%provider_id, error = %e, "entitlement fetch failed, features stay disabled");
                Freshness::LocalOnly
            }
        }
    }

    /// Check whether a feature is enabled for the loaded provider.
    ///
    /// Unloaded gates and unknown features answer `false`.
    pub async fn is_enabled(&self, feature: &str) -> bool {
        self.state
            .read()
            .await
            .enabled
            .get(feature)
            .copied()
            .unwrap_or(false)
    }

    /// The provider currently loaded, if any.
    pub async fn provider_id(&self) -> Option<Uuid> {
        self.state.read().await.provider_id
    }

    /// How current the cached entitlements are.
    pub async fn freshness(&self) -> Freshness {
        self.state.read().await.freshness
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GateError, GateResult};
    use crate::source::FeatureEntitlement;
    use async_trait::async_trait;
    use tokio::sync::Notify;

    struct FixedSource(Vec<FeatureEntitlement>);

    #[async_trait]
    impl EntitlementSource for FixedSource {
        async fn fetch_entitlements(
            &self,
            _provider_id: Uuid,
        ) -> GateResult<Vec<FeatureEntitlement>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl EntitlementSource for FailingSource {
        async fn fetch_entitlements(
            &self,
            _provider_id: Uuid,
        ) -> GateResult<Vec<FeatureEntitlement>> {
            Err(GateError::FetchFailed("timeout".into()))
        }
    }

    /// Blocks the fetch for one provider until released; answers instantly
    /// for every other provider.
    struct SwitchSource {
        started: Notify,
        release: Notify,
        slow_provider: Uuid,
    }

    #[async_trait]
    impl EntitlementSource for SwitchSource {
        async fn fetch_entitlements(
            &self,
            provider_id: Uuid,
        ) -> GateResult<Vec<FeatureEntitlement>> {
            if provider_id == self.slow_provider {
                self.started.notify_one();
                self.release.notified().await;
                Ok(vec![entitlement("featured_listing", true)])
            } else {
                Ok(vec![entitlement("video_consults", true)])
            }
        }
    }

    fn entitlement(feature: &str, enabled: bool) -> FeatureEntitlement {
        FeatureEntitlement {
            feature: feature.to_string(),
            enabled,
        }
    }

    #[tokio::test]
    async fn test_unloaded_gate_disables_everything() {
        let gate = FeatureGate::new(Arc::new(FixedSource(vec![])));
        assert!(!gate.is_enabled("featured_listing").await);
        assert_eq!(gate.freshness().await, Freshness::LocalOnly);
        assert!(gate.provider_id().await.is_none());
    }

    #[tokio::test]
    async fn test_load_and_check() {
        let gate = FeatureGate::new(Arc::new(FixedSource(vec![
            entitlement("featured_listing", true),
            entitlement("video_consults", false),
        ])));
        let provider = Uuid::now_v7();

        assert_eq!(gate.load(provider).await, Freshness::Authoritative);
        assert!(gate.is_enabled("featured_listing").await);
        assert!(!gate.is_enabled("video_consults").await);
        assert!(!gate.is_enabled("unknown_feature").await);
        assert_eq!(gate.provider_id().await, Some(provider));
    }

    #[tokio::test]
    async fn test_fetch_failure_stays_disabled() {
        let gate = FeatureGate::new(Arc::new(FailingSource));
        assert_eq!(gate.load(Uuid::now_v7()).await, Freshness::LocalOnly);
        assert!(!gate.is_enabled("featured_listing").await);
        assert_eq!(gate.freshness().await, Freshness::LocalOnly);
    }

    #[tokio::test]
    async fn test_provider_switch_discards_in_flight_fetch() {
        let first = Uuid::now_v7();
        let second = Uuid::now_v7();
        let source = Arc::new(SwitchSource {
            started: Notify::new(),
            release: Notify::new(),
            slow_provider: first,
        });
        let gate = Arc::new(FeatureGate::new(source.clone()));

        let task = {
            let gate = gate.clone();
            tokio::spawn(async move { gate.load(first).await })
        };
        source.started.notified().await;

        // Switch providers while the first fetch is still in flight
        assert_eq!(gate.load(second).await, Freshness::Authoritative);
        source.release.notify_one();
        assert_eq!(task.await.unwrap(), Freshness::Authoritative);

        // The second provider's entitlements win; the stale response for
        // the first provider is discarded
        assert_eq!(gate.provider_id().await, Some(second));
        assert!(gate.is_enabled("video_consults").await);
        assert!(!gate.is_enabled("featured_listing").await);
    }

    #[tokio::test]
    async fn test_switching_provider_clears_cache() {
        let gate = FeatureGate::new(Arc::new(FixedSource(vec![entitlement(
            "featured_listing",
            true,
        )])));
        gate.load(Uuid::now_v7()).await;
        assert!(gate.is_enabled("featured_listing").await);

        // Second provider gets its own fetch result, not the first's cache
        let second = Uuid::now_v7();
        gate.load(second).await;
        assert_eq!(gate.provider_id().await, Some(second));
        assert!(gate.is_enabled("featured_listing").await);
    }
}
