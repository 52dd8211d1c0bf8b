//! Remote source contracts
//!
//! The gates consume these traits; the HTTP implementations live with the
//! service clients. Both return raw data that is validated fail-closed on
//! receipt.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::GateResult;

/// Authoritative source of effective permissions for an identity.
///
/// The server runs the same derivation against its own record of the
/// identity, so the response may be more current than locally loaded data
/// (for example, it reflects an override written moments ago).
#[async_trait]
pub trait PermissionSource: Send + Sync {
    /// Fetch the server-confirmed permission codes for a user.
    ///
    /// Codes outside the catalog are dropped by the caller; they can never
    /// widen access.
    async fn fetch_permissions(&self, user_id: Uuid) -> GateResult<Vec<String>>;
}

/// One subscription feature's enabled/disabled state for a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureEntitlement {
    /// Feature code from the entitlement catalog
    pub feature: String,

    /// Whether the provider's subscription enables the feature
    pub enabled: bool,
}

/// Source of subscription entitlements for a provider.
#[async_trait]
pub trait EntitlementSource: Send + Sync {
    /// Fetch the entitlement list for a provider.
    async fn fetch_entitlements(&self, provider_id: Uuid) -> GateResult<Vec<FeatureEntitlement>>;
}
