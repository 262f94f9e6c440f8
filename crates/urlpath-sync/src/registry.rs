//! Registration layer: binds sync engines to eligible content types.
//!
//! Attaching is a startup-only step. Once the registry is handed to the
//! mutation pipeline it is read-only, so lookups need no locking.

use std::collections::HashMap;
use std::sync::Arc;

use urlpath_core::content_type::ContentTypeRegistry;

use crate::engine::PathSyncEngine;
use crate::error::SyncError;
use crate::subscriber::Subscriber;

pub struct SubscriberRegistry {
    content_types: ContentTypeRegistry,
    respect_visibility: bool,
    subscribers: HashMap<String, Arc<dyn Subscriber>>,
}

impl SubscriberRegistry {
    pub fn new(content_types: ContentTypeRegistry) -> Self {
        Self {
            content_types,
            respect_visibility: true,
            subscribers: HashMap::new(),
        }
    }

    /// When `false`, `attach_all` also binds content types hidden from the
    /// editorial surface.
    #[must_use]
    pub fn respect_visibility(mut self, respect: bool) -> Self {
        self.respect_visibility = respect;
        self
    }

    #[must_use]
    pub const fn content_types(&self) -> &ContentTypeRegistry {
        &self.content_types
    }

    /// Bind a sync engine to one content type.
    ///
    /// Visibility is not checked here: an explicit request attaches any known
    /// type.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::ContentTypeNotFound` if the type is unknown.
    pub fn attach(&mut self, uid: &str) -> Result<(), SyncError> {
        let engine = PathSyncEngine::new(uid);
        self.attach_with(uid, Arc::new(engine))
    }

    /// Bind an arbitrary subscriber to one content type, replacing any
    /// previous one.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::ContentTypeNotFound` if the type is unknown.
    pub fn attach_with(
        &mut self,
        uid: &str,
        subscriber: Arc<dyn Subscriber>,
    ) -> Result<(), SyncError> {
        if !self.content_types.contains(uid) {
            tracing::error!(content_type = uid, "could not attach lifecycles: unknown content type");
            return Err(SyncError::ContentTypeNotFound(uid.to_string()));
        }
        self.subscribers.insert(uid.to_string(), subscriber);
        tracing::debug!(content_type = uid, "lifecycles attached");
        Ok(())
    }

    /// Bind a sync engine to every eligible content type.
    ///
    /// A type that fails to attach is skipped (`attach_with` has already
    /// logged it); the others proceed. Returns the uids that were attached, in
    /// uid order.
    pub fn attach_all(&mut self) -> Vec<String> {
        let uids: Vec<String> = if self.respect_visibility {
            self.content_types.eligible().map(|ct| ct.uid.clone()).collect()
        } else {
            self.content_types.iter().map(|ct| ct.uid.clone()).collect()
        };

        let mut attached = Vec::with_capacity(uids.len());
        for uid in uids {
            if self.attach(&uid).is_ok() {
                attached.push(uid);
            }
        }
        tracing::info!(count = attached.len(), "path lifecycles attached");
        attached
    }

    #[must_use]
    pub fn subscriber_for(&self, uid: &str) -> Option<&Arc<dyn Subscriber>> {
        self.subscribers.get(uid)
    }

    #[must_use]
    pub fn is_attached(&self, uid: &str) -> bool {
        self.subscribers.contains_key(uid)
    }

    /// Attached content-type uids, sorted.
    #[must_use]
    pub fn attached(&self) -> Vec<&str> {
        let mut uids: Vec<&str> = self.subscribers.keys().map(String::as_str).collect();
        uids.sort_unstable();
        uids
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use urlpath_core::content_type::ContentTypeConfig;
    use urlpath_core::enums::PathAction;

    use super::*;
    use crate::test_support::helpers::{Fixture, LogCapture, data};

    const ARTICLE: &str = "api::article.article";
    const PAGE: &str = "api::page.page";
    const ROLE: &str = "plugin::users-permissions.role";

    fn content_types() -> ContentTypeRegistry {
        [
            ContentTypeConfig::new(ARTICLE),
            ContentTypeConfig::new(PAGE),
            ContentTypeConfig::new(ROLE).hidden(),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn attach_all_skips_hidden_types() {
        let mut registry = SubscriberRegistry::new(content_types());

        let attached = registry.attach_all();

        assert_eq!(attached, vec![ARTICLE.to_string(), PAGE.to_string()]);
        assert!(!registry.is_attached(ROLE));
        assert_eq!(registry.attached(), vec![ARTICLE, PAGE]);
    }

    #[test]
    fn attach_all_can_ignore_visibility() {
        let mut registry = SubscriberRegistry::new(content_types()).respect_visibility(false);

        assert_eq!(registry.attach_all().len(), 3);
        assert!(registry.is_attached(ROLE));
    }

    #[test]
    fn attach_unknown_type_fails() {
        let mut registry = SubscriberRegistry::new(content_types());

        let err = registry.attach("api::missing.missing").unwrap_err();
        assert!(matches!(err, SyncError::ContentTypeNotFound(ref uid) if uid == "api::missing.missing"));
        assert!(registry.attached().is_empty());
    }

    #[test]
    fn attach_failure_is_logged_once() {
        let logs = LogCapture::default();
        let mut registry = SubscriberRegistry::new(content_types());

        let attached = logs.capture(|| {
            assert!(registry.attach("api::missing.missing").is_err());
            registry.attach_all()
        });

        assert_eq!(attached.len(), 2);
        assert_eq!(logs.count("ERROR"), 1);
    }

    #[test]
    fn explicit_attach_ignores_visibility() {
        let mut registry = SubscriberRegistry::new(content_types());
        registry.attach(ROLE).unwrap();
        assert!(registry.is_attached(ROLE));
    }

    #[tokio::test]
    async fn attached_engine_is_bound_to_its_type() {
        let fx = Fixture::new(PAGE);
        let mut registry = SubscriberRegistry::new(content_types());
        registry.attach(PAGE).unwrap();

        let subscriber = registry.subscriber_for(PAGE).unwrap();
        let decision = subscriber
            .before_create(&fx.deps(), &data(json!({"title": "About Us"})))
            .await
            .unwrap();

        assert_eq!(decision.action, PathAction::CreatePath);
        let record = fx.paths.get(decision.path_id.as_deref().unwrap()).unwrap();
        assert_eq!(record.contenttype, PAGE);
        assert_eq!(record.url_path, "/page/about-us");
        assert!(registry.subscriber_for(ARTICLE).is_none());
    }
}
