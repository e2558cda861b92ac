//! Adapter construction by type selector.
//!
//! Definitions name their adapter with a string (`clay`, `internal-db`).
//! The factory maps each selector to a constructor registered up front, so
//! new adapter types are added by registration rather than discovered at
//! runtime.

use crate::adapter::SourceAdapter;
use crate::adapters::{clay, internal_db, ClayAdapter, InternalDbAdapter};
use crate::capture::{FileRawCapture, NoopRawCapture, RawCapture};
use crate::definition::SourceDefinition;
use crate::error::{Result, SourceError};
use leadscout_core::CaptureConfig;
use std::collections::HashMap;
use std::sync::Arc;

/// Shared resources handed to every adapter constructor.
#[derive(Clone)]
pub struct AdapterContext {
    /// Raw payload sink
    pub capture: Arc<dyn RawCapture>,
}

impl AdapterContext {
    /// Create a context with the given capture sink.
    #[must_use]
    pub fn new(capture: Arc<dyn RawCapture>) -> Self {
        Self { capture }
    }

    /// Create a context from the `[capture]` configuration section.
    #[must_use]
    pub fn from_config(config: &CaptureConfig) -> Self {
        if config.enabled {
            Self::new(Arc::new(FileRawCapture::new(&config.dir)))
        } else {
            Self::default()
        }
    }
}

impl Default for AdapterContext {
    fn default() -> Self {
        Self::new(Arc::new(NoopRawCapture))
    }
}

/// Constructor for one adapter type.
pub type AdapterConstructor = Box<
    dyn Fn(&SourceDefinition, &AdapterContext) -> Result<Arc<dyn SourceAdapter>> + Send + Sync,
>;

/// Registry of adapter constructors keyed by type selector.
pub struct AdapterFactory {
    constructors: HashMap<String, AdapterConstructor>,
}

impl AdapterFactory {
    /// Create a factory with no adapter types.
    #[must_use]
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Create a factory knowing the reference adapter types.
    #[must_use]
    pub fn with_builtin_adapters() -> Self {
        let mut factory = Self::new();
        factory.register(clay::ADAPTER_TYPE, |definition, ctx| {
            let adapter = ClayAdapter::from_definition(definition, ctx.capture.clone())?;
            Ok(Arc::new(adapter) as Arc<dyn SourceAdapter>)
        });
        factory.register(internal_db::ADAPTER_TYPE, |definition, ctx| {
            let adapter = InternalDbAdapter::from_definition(definition, ctx.capture.clone())?;
            Ok(Arc::new(adapter) as Arc<dyn SourceAdapter>)
        });
        factory
    }

    /// Register (or replace) the constructor for an adapter type.
    pub fn register<F>(&mut self, adapter_type: impl Into<String>, constructor: F)
    where
        F: Fn(&SourceDefinition, &AdapterContext) -> Result<Arc<dyn SourceAdapter>>
            + Send
            + Sync
            + 'static,
    {
        self.constructors
            .insert(adapter_type.into(), Box::new(constructor));
    }

    /// Whether a constructor exists for the type.
    #[must_use]
    pub fn supports(&self, adapter_type: &str) -> bool {
        self.constructors.contains_key(adapter_type)
    }

    /// Registered adapter types, sorted.
    #[must_use]
    pub fn adapter_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// Construct the adapter a definition asks for.
    ///
    /// # Errors
    /// Returns [`SourceError::UnknownAdapterType`] for an unregistered
    /// selector, or whatever the constructor reports.
    pub fn build(
        &self,
        definition: &SourceDefinition,
        ctx: &AdapterContext,
    ) -> Result<Arc<dyn SourceAdapter>> {
        let constructor = self.constructors.get(definition.adapter.as_str()).ok_or_else(|| {
            SourceError::UnknownAdapterType {
                source_id: definition.id.to_string(),
                adapter_type: definition.adapter.clone(),
            }
        })?;

        constructor(definition, ctx)
    }
}

impl Default for AdapterFactory {
    fn default() -> Self {
        Self::with_builtin_adapters()
    }
}
