//! Startup wiring: attach lifecycles, then declare admin permissions.
//!
//! Failures here are logged and suppressed so that a broken registrar does
//! not keep the host from starting.

use async_trait::async_trait;
use urlpath_core::permissions::{PERMISSION_ACTIONS, PermissionAction};

use crate::registry::SubscriberRegistry;

/// The host's permission registry.
#[async_trait]
pub trait ActionRegistrar: Send + Sync {
    async fn register_many(&self, actions: &[PermissionAction]) -> anyhow::Result<()>;
}

/// What bootstrap managed to do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    /// Content types whose lifecycles were attached.
    pub attached: Vec<String>,
    /// Whether the permission actions were accepted by the registrar.
    pub actions_registered: bool,
}

/// Attach lifecycles to every eligible content type and register the
/// permission actions.
pub async fn bootstrap(
    registry: &mut SubscriberRegistry,
    registrar: &dyn ActionRegistrar,
) -> BootstrapReport {
    let attached = registry.attach_all();

    let actions_registered = match registrar.register_many(PERMISSION_ACTIONS).await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(error = %e, "bootstrap failed");
            false
        }
    };

    BootstrapReport {
        attached,
        actions_registered,
    }
}
