//! The set of constructed source adapters, in registration order.

use crate::{
    adapter::{AdapterInfo, SourceAdapter},
    definition::SourceDefinition,
    error::{Result, SourceError},
    factory::{AdapterContext, AdapterFactory},
    loader::SourceLoader,
};
use leadscout_core::{AppConfig, SourceId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One registered adapter and its identity.
#[derive(Clone)]
pub struct RegisteredSource {
    id: SourceId,
    name: String,
    adapter: Arc<dyn SourceAdapter>,
}

impl RegisteredSource {
    /// Registry identifier.
    #[must_use]
    pub fn id(&self) -> &SourceId {
        &self.id
    }

    /// Human-readable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The adapter instance.
    #[must_use]
    pub fn adapter(&self) -> &Arc<dyn SourceAdapter> {
        &self.adapter
    }

    /// Availability as reported by the adapter.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.adapter.is_available()
    }

    /// Summary for listings.
    #[must_use]
    pub fn summary(&self) -> SourceSummary {
        SourceSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            available: self.is_available(),
            info: self.adapter.info(),
        }
    }
}

impl fmt::Debug for RegisteredSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredSource")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("adapter_type", &self.adapter.adapter_type())
            .field("available", &self.is_available())
            .finish()
    }
}

/// Listing entry for a registered source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSummary {
    /// Registry identifier
    pub id: SourceId,
    /// Human-readable name
    pub name: String,
    /// Whether searches will use it
    pub available: bool,
    /// Adapter details
    pub info: AdapterInfo,
}

/// Owns the adapters built from a source list.
///
/// Iteration always follows registration order, which is the order results
/// are concatenated in before deduplication.
#[derive(Default)]
pub struct AdapterRegistry {
    sources: Vec<RegisteredSource>,
    index: HashMap<SourceId, usize>,
}

impl AdapterRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from definitions.
    ///
    /// Disabled definitions are skipped. A definition whose adapter fails to
    /// construct, or that repeats an earlier ID, is logged and skipped; the
    /// rest still load.
    #[must_use]
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = SourceDefinition>,
        factory: &AdapterFactory,
        ctx: &AdapterContext,
    ) -> Self {
        let mut registry = Self::new();
        let mut skipped = 0usize;

        for definition in definitions {
            if !definition.enabled {
                debug!(source_id = %definition.id, "source disabled, not constructing");
                continue;
            }

            let outcome = factory
                .build(&definition, ctx)
                .and_then(|adapter| registry.register(definition.id.clone(), &definition.name, adapter));

            if let Err(e) = outcome {
                warn!(
                    source_id = %definition.id,
                    adapter = %definition.adapter,
                    error = %e,
                    "skipping source that failed to load"
                );
                skipped += 1;
            }
        }

        info!(
            count = registry.count(),
            available = registry.available().count(),
            skipped,
            "loaded source adapters"
        );

        registry
    }

    /// Load definitions through a loader and build the registry.
    ///
    /// # Errors
    /// Returns error only if the loader itself fails.
    pub fn load_from(
        loader: &SourceLoader,
        factory: &AdapterFactory,
        ctx: &AdapterContext,
    ) -> Result<Self> {
        let definitions = loader.load_all()?;
        Ok(Self::from_definitions(definitions, factory, ctx))
    }

    /// Build the registry an application configuration describes.
    ///
    /// Definitions come from `[sources] definitions_path`; adapters capture
    /// raw payloads according to `[capture]`.
    ///
    /// # Errors
    /// Returns error if the definitions path is missing or unreadable.
    pub fn from_config(config: &AppConfig, factory: &AdapterFactory) -> Result<Self> {
        let loader = SourceLoader::new(&config.sources.definitions_path)?;
        let ctx = AdapterContext::from_config(&config.capture);
        Self::load_from(&loader, factory, &ctx)
    }

    /// Register an adapter under `id`.
    ///
    /// # Errors
    /// Returns [`SourceError::DuplicateSource`] if `id` is already taken.
    pub fn register(
        &mut self,
        id: SourceId,
        name: impl Into<String>,
        adapter: Arc<dyn SourceAdapter>,
    ) -> Result<()> {
        if self.index.contains_key(&id) {
            return Err(SourceError::DuplicateSource {
                source_id: id.to_string(),
            });
        }

        let name = name.into();
        debug!(
            source_id = %id,
            name = %name,
            available = adapter.is_available(),
            "registered source adapter"
        );

        self.index.insert(id.clone(), self.sources.len());
        self.sources.push(RegisteredSource { id, name, adapter });
        Ok(())
    }

    /// Get a registered source by ID.
    #[must_use]
    pub fn get(&self, id: &SourceId) -> Option<&RegisteredSource> {
        self.index.get(id).map(|&i| &self.sources[i])
    }

    /// Get a registered source by raw ID string. Malformed IDs find nothing.
    #[must_use]
    pub fn get_by_str(&self, id: &str) -> Option<&RegisteredSource> {
        SourceId::new(id).ok().and_then(|id| self.get(&id))
    }

    /// All registered sources in registration order.
    #[must_use]
    pub fn sources(&self) -> &[RegisteredSource] {
        &self.sources
    }

    /// Available sources in registration order.
    pub fn available(&self) -> impl Iterator<Item = &RegisteredSource> {
        self.sources.iter().filter(|s| s.is_available())
    }

    /// Every registered source with its availability flag.
    #[must_use]
    pub fn list_available(&self) -> Vec<SourceSummary> {
        self.sources.iter().map(RegisteredSource::summary).collect()
    }

    /// Number of registered sources.
    #[must_use]
    pub fn count(&self) -> usize {
        self.sources.len()
    }

    /// True when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Check if a source is registered.
    #[must_use]
    pub fn contains(&self, id: &SourceId) -> bool {
        self.index.contains_key(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use leadscout_core::{IcpQuery, Lead};

    struct StaticAdapter {
        available: bool,
    }

    #[async_trait]
    impl SourceAdapter for StaticAdapter {
        async fn search(&self, _query: &IcpQuery, _limit: usize) -> Result<Vec<Lead>> {
            Ok(vec![Lead::new("Static Co")])
        }

        fn is_available(&self) -> bool {
            self.available
        }

        fn name(&self) -> &str {
            "Static"
        }

        fn adapter_type(&self) -> &str {
            "static"
        }
    }

    fn id(raw: &str) -> SourceId {
        SourceId::new(raw).expect("valid source ID")
    }

    fn static_factory() -> AdapterFactory {
        let mut factory = AdapterFactory::with_builtin_adapters();
        factory.register("static", |definition, _ctx| {
            Ok(Arc::new(StaticAdapter {
                available: definition.setting_str("available").as_deref() != Some("no"),
            }) as Arc<dyn SourceAdapter>)
        });
        factory
    }

    #[test]
    fn test_registry_new() {
        let registry = AdapterRegistry::new();
        assert_eq!(registry.count(), 0);
        assert!(registry.is_empty());
        assert!(registry.list_available().is_empty());
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = AdapterRegistry::new();
        registry
            .register(id("alpha"), "Alpha", Arc::new(StaticAdapter { available: true }))
            .expect("register alpha");

        let source = registry.get(&id("alpha")).expect("alpha registered");
        assert_eq!(source.name(), "Alpha");
        assert!(source.is_available());
        assert!(registry.get_by_str("alpha").is_some());
        assert!(registry.get_by_str("missing").is_none());
        assert!(registry.get_by_str("Not An Id").is_none());
    }

    #[test]
    fn test_register_duplicate_rejected() {
        let mut registry = AdapterRegistry::new();
        registry
            .register(id("alpha"), "Alpha", Arc::new(StaticAdapter { available: true }))
            .expect("register alpha");
        let result = registry.register(id("alpha"), "Again", Arc::new(StaticAdapter { available: true }));
        assert!(matches!(result, Err(SourceError::DuplicateSource { .. })));
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_from_definitions_skips_disabled_and_broken() {
        let definitions = vec![
            SourceDefinition::new(id("alpha"), "Alpha", "static"),
            SourceDefinition::new(id("beta"), "Beta", "static").with_enabled(false),
            SourceDefinition::new(id("gamma"), "Gamma", "does-not-exist"),
            SourceDefinition::new(id("internal_db"), "InternalDB", "internal-db"),
            SourceDefinition::new(id("delta"), "Delta", "static").with_setting("available", "no"),
            SourceDefinition::new(id("alpha"), "Alpha again", "static"),
        ];

        let registry =
            AdapterRegistry::from_definitions(definitions, &static_factory(), &AdapterContext::default());

        let ids: Vec<_> = registry.sources().iter().map(|s| s.id().as_str()).collect();
        assert_eq!(ids, vec!["alpha", "delta"]);
        assert_eq!(registry.get(&id("alpha")).map(RegisteredSource::name), Some("Alpha"));

        let available: Vec<_> = registry.available().map(|s| s.id().as_str()).collect();
        assert_eq!(available, vec!["alpha"]);

        let listing = registry.list_available();
        assert_eq!(listing.len(), 2);
        assert!(listing[0].available);
        assert!(!listing[1].available);
        assert_eq!(listing[1].info.adapter_type, "static");
    }

    #[test]
    fn test_load_from_file() {
        let tmp = tempfile::TempDir::new().expect("create temp dir");
        let path = tmp.path().join("sources.toml");
        std::fs::write(
            &path,
            r#"
[[sources]]
id = "clay"
name = "Clay"
enabled = true
adapter = "clay"

[sources.settings]
api_key = "${LEADSCOUT_REGISTRY_TEST_UNSET}"

[[sources]]
id = "internal_db"
name = "InternalDB"
enabled = true
adapter = "internal-db"

[sources.settings]
base_url = "http://127.0.0.1:9/api/contacts"
"#,
        )
        .expect("write source list");

        let loader = SourceLoader::new(&path).expect("create loader");
        let registry = AdapterRegistry::load_from(
            &loader,
            &AdapterFactory::with_builtin_adapters(),
            &AdapterContext::default(),
        )
        .expect("load registry");

        assert_eq!(registry.count(), 2);
        assert_registered(&registry);

        let mut config = AppConfig::default();
        config.sources.definitions_path = path;
        config.capture.enabled = false;
        let from_config =
            AdapterRegistry::from_config(&config, &AdapterFactory::with_builtin_adapters())
                .expect("registry from config");
        assert_registered(&from_config);
    }

    fn assert_registered(registry: &AdapterRegistry) {
        let clay = registry.get(&id("clay")).expect("clay registered");
        assert!(!clay.is_available());
        let internal = registry.get(&id("internal_db")).expect("internal db registered");
        assert!(internal.is_available());
    }
}
