// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Session-scoped descriptor cache.

use crate::descriptor::TypeDescriptor;
use std::collections::HashMap;
use std::sync::Arc;

/// Cache mapping canonical type keys to resolved descriptors.
///
/// Scoped to one generation session: it grows monotonically (no eviction)
/// and is dropped with the session. Repeated lookups of the same key
/// return the same `Arc` instance.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    entries: HashMap<String, Arc<TypeDescriptor>>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a descriptor by canonical key.
    pub fn lookup(&self, key: &str) -> Option<Arc<TypeDescriptor>> {
        self.entries.get(key).cloned()
    }

    /// Insert a fully-resolved descriptor under the given key.
    pub fn insert(&mut self, key: impl Into<String>, descriptor: Arc<TypeDescriptor>) {
        self.entries.insert(key.into(), descriptor);
    }

    /// Number of cached descriptors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached entry (session teardown).
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
