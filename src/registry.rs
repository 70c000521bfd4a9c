// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Capability registry.
//!
//! Declares which callable identifiers this component intercepts, and holds
//! the providers the host installs at plugin initialization.

use core::fmt;
use std::sync::Arc;

use dashmap::DashMap;

use crate::provider::{ReturnTypeProvider, RexReturnProvider};

/// Class-like identifiers whose method calls are routed to this component.
pub const CLASS_LIKE_NAMES: &[&str] = &[
    "rex_type",
    "rex_request",
    "Redaxo\\Core\\Util\\Type",
    "Redaxo\\Core\\Http\\Request",
];

/// Free-function identifiers whose calls are routed to this component.
pub const FUNCTION_IDS: &[&str] = &[
    "rex_get",
    "rex_post",
    "rex_request",
    "rex_server",
    "rex_session",
    "rex_cookie",
    "rex_files",
    "rex_env",
];

/// Errors that can occur when interacting with a Registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("{registry} registration failed: An item with the name '{name}' is already registered.")]
    AlreadyExists { name: String, registry: String },
    #[error("{registry} registration failed: The name '{name}' is invalid (empty or whitespace-only names are not allowed).")]
    InvalidName { name: String, registry: String },
}

/// Validates that a name is not empty or whitespace-only.
fn validate_name(name: &str, registry_name: &str) -> Result<(), RegistryError> {
    if name.trim().is_empty() {
        Err(RegistryError::InvalidName {
            name: String::from(name),
            registry: String::from(registry_name),
        })
    } else {
        Ok(())
    }
}

/// Generic thread-safe registry for items of type T.
pub struct Registry<T: ?Sized> {
    inner: DashMap<String, Arc<T>>,
    name: String,
}

impl<T: ?Sized> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("name", &self.name)
            .field("len", &self.inner.len())
            .finish()
    }
}

impl<T: ?Sized> Registry<T> {
    /// Create a new, empty registry with a given name.
    pub fn new(registry_name: impl Into<String>) -> Self {
        Self {
            inner: DashMap::new(),
            name: registry_name.into(),
        }
    }

    /// Get the name of this registry.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register an item with a given name. Returns Err if name already exists.
    pub fn register(&self, name: impl Into<String>, item: Arc<T>) -> Result<(), RegistryError> {
        let name = name.into();

        validate_name(&name, &self.name)?;

        use dashmap::mapref::entry::Entry;
        match self.inner.entry(name) {
            Entry::Occupied(e) => Err(RegistryError::AlreadyExists {
                name: e.key().clone(),
                registry: self.name.clone(),
            }),
            Entry::Vacant(e) => {
                e.insert(item);
                Ok(())
            }
        }
    }

    /// Retrieve an item by name, if it exists.
    pub fn get(&self, name: &str) -> Option<Arc<T>> {
        self.inner.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Remove an item by name. Returns the removed item if it existed.
    pub fn remove(&self, name: &str) -> Option<Arc<T>> {
        self.inner.remove(name).map(|(_, v)| v)
    }

    /// List all registered item names.
    pub fn list_names(&self) -> Vec<String> {
        self.inner.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Check if an item with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    /// Get the number of registered items.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Clear all items from the registry.
    pub fn clear(&self) {
        self.inner.clear();
    }
}

lazy_static::lazy_static! {
    /// Global singleton instance of the return-type provider registry.
    static ref PROVIDER_REGISTRY: Registry<dyn ReturnTypeProvider> =
        Registry::new("PROVIDER_REGISTRY");
}

/// Helper functions for provider registry operations.
pub mod providers {
    use super::*;

    /// Register a provider with a given name.
    pub fn register(
        name: impl Into<String>,
        provider: Arc<dyn ReturnTypeProvider>,
    ) -> Result<(), RegistryError> {
        PROVIDER_REGISTRY.register(name, provider)
    }

    /// Retrieve a provider by name.
    pub fn get(name: &str) -> Option<Arc<dyn ReturnTypeProvider>> {
        PROVIDER_REGISTRY.get(name)
    }

    /// Remove a provider by name.
    pub fn remove(name: &str) -> Option<Arc<dyn ReturnTypeProvider>> {
        PROVIDER_REGISTRY.remove(name)
    }

    /// List all registered provider names.
    pub fn list_names() -> Vec<String> {
        PROVIDER_REGISTRY.list_names()
    }

    /// Check if a provider with the given name exists.
    pub fn contains(name: &str) -> bool {
        PROVIDER_REGISTRY.contains(name)
    }

    /// Get the number of registered providers.
    pub fn len() -> usize {
        PROVIDER_REGISTRY.len()
    }

    /// Check if the provider registry is empty.
    pub fn is_empty() -> bool {
        PROVIDER_REGISTRY.is_empty()
    }

    /// Clear all providers from the registry.
    pub fn clear() {
        PROVIDER_REGISTRY.clear();
    }
}

/// Plugin entry point: install the built-in REDAXO provider.
pub fn register_builtin_providers() -> Result<(), RegistryError> {
    providers::register("rex", Arc::new(RexReturnProvider))
}
