//! Session-scoped material registry.
//!
//! Maps material id to the single shared [`ConvertedMaterial`] created for it.
//! Records are built outside the map's locks and published with an atomic
//! insert-if-absent, so concurrent resolutions of an id always agree on one
//! registered record.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::material::{ConvertedMaterial, DEFAULT_MATERIAL_ID};

/// Registry of converted materials for one conversion session.
///
/// Created empty at the start of a session, filled lazily on first
/// resolution of each id, and consumed with [`into_materials`](Self::into_materials)
/// once the session is done.
#[derive(Debug, Default)]
pub struct MaterialRegistry {
    materials: DashMap<String, Arc<ConvertedMaterial>>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shared record for `id`, if one was registered.
    pub fn get(&self, id: &str) -> Option<Arc<ConvertedMaterial>> {
        self.materials.get(id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.materials.contains_key(id)
    }

    /// Returns the record for `id`, building and registering it with `build`
    /// if absent. `build` must produce a record with that id.
    ///
    /// `build` runs without any registry lock held, so it may read the
    /// registry. Threads racing on the same absent id may each build a record;
    /// only the first one inserted is registered and returned to all of them.
    pub fn get_or_insert_with(
        &self,
        id: &str,
        build: impl FnOnce() -> ConvertedMaterial,
    ) -> Arc<ConvertedMaterial> {
        if let Some(existing) = self.get(id) {
            return existing;
        }

        let material = Arc::new(build());
        debug_assert_eq!(material.id, id, "registered under a foreign id");

        match self.materials.entry(id.to_string()) {
            Entry::Occupied(entry) => {
                log::trace!("Material {id} registered concurrently, dropping duplicate build");
                Arc::clone(entry.get())
            }
            Entry::Vacant(entry) => {
                log::debug!("Registered material {id}");
                Arc::clone(entry.insert(material).value())
            }
        }
    }

    /// The default material, created on first use.
    pub fn default_material(&self) -> Arc<ConvertedMaterial> {
        self.get_or_insert_with(DEFAULT_MATERIAL_ID, ConvertedMaterial::default_material)
    }

    /// Number of registered materials, including the default material if created.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Registered ids in sorted order.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .materials
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        ids.sort_unstable();
        ids
    }

    /// End the session, returning a read-only snapshot of every record.
    pub fn into_materials(self) -> HashMap<String, Arc<ConvertedMaterial>> {
        self.materials.into_iter().collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
