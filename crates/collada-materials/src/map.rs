//! Symbol → material maps for geometry bindings.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use thiserror::Error;

use crate::diagnostics::Severity;
use crate::instance::MaterialInstanceRef;
use crate::material::ConvertedMaterial;
use crate::resolver::MaterialResolver;

/// Errors returned by [`SymbolMap`] insertion.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SymbolMapError {
    /// The symbol is already bound; the existing binding is kept.
    #[error("Material symbol {0} used multiple times")]
    DuplicateSymbol(String),
}

/// Materials of one geometry binding, addressed by symbol.
///
/// Symbols are unique. The first binding of a symbol wins; later bindings are
/// rejected rather than overwriting it.
#[derive(Clone, Debug, Default)]
pub struct SymbolMap {
    symbols: HashMap<String, Arc<ConvertedMaterial>>,
}

impl SymbolMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `symbol` to the material produced by `resolve`.
    ///
    /// `resolve` only runs when the symbol is free.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolMapError::DuplicateSymbol`] if `symbol` is already bound.
    pub fn try_insert_with(
        &mut self,
        symbol: &str,
        resolve: impl FnOnce() -> Arc<ConvertedMaterial>,
    ) -> Result<&Arc<ConvertedMaterial>, SymbolMapError> {
        match self.symbols.entry(symbol.to_string()) {
            Entry::Occupied(_) => Err(SymbolMapError::DuplicateSymbol(symbol.to_string())),
            Entry::Vacant(entry) => Ok(&*entry.insert(resolve())),
        }
    }

    pub fn get(&self, symbol: &str) -> Option<&Arc<ConvertedMaterial>> {
        self.symbols.get(symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Bindings in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<ConvertedMaterial>)> {
        self.symbols
            .iter()
            .map(|(symbol, material)| (symbol.as_str(), material))
    }

    /// Bound symbols in sorted order.
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.symbols.keys().map(String::as_str).collect();
        symbols.sort_unstable();
        symbols
    }
}

impl MaterialResolver<'_> {
    /// Build the symbol map for one geometry binding.
    ///
    /// Instances without a symbol are skipped with a warning; a symbol seen
    /// twice keeps its first binding and reports an error. Never fails as a
    /// whole.
    pub fn build_map(&self, instances: &[MaterialInstanceRef]) -> SymbolMap {
        let mut map = SymbolMap::new();

        for instance in instances {
            let Some(symbol) = instance.symbol.as_deref() else {
                self.diagnostics().emit(
                    Severity::Warning,
                    "Material instance has no symbol, material skipped.",
                );
                continue;
            };

            if let Err(err) = map.try_insert_with(symbol, || self.resolve(instance)) {
                self.diagnostics().emit(Severity::Error, &err.to_string());
            }
        }

        log::debug!(
            "Built material map with {} of {} instances",
            map.len(),
            instances.len()
        );
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticLog;
    use crate::registry::MaterialRegistry;
    use crate::texture::SamplerTextureCreator;
    use collada_document::Document;

    fn document() -> Document {
        Document::from_ron_str(
            r##"(
                materials: [
                    (id: "X", effect: Some("#E")),
                    (id: "Y", effect: Some("#E")),
                ],
                effects: [(id: "E", technique: Some(()))],
            )"##,
        )
        .unwrap()
    }

    #[test]
    fn test_try_insert_first_wins() {
        let mut map = SymbolMap::new();
        let first = Arc::new(ConvertedMaterial::untextured("first"));
        map.try_insert_with("A", || Arc::clone(&first)).unwrap();

        let result = map.try_insert_with("A", || panic!("resolved a duplicate symbol"));
        assert_eq!(result, Err(SymbolMapError::DuplicateSymbol("A".to_string())));
        assert!(Arc::ptr_eq(map.get("A").unwrap(), &first));
    }

    #[test]
    fn test_build_map_binds_every_symbol() {
        let document = document();
        let log = DiagnosticLog::new();
        let registry = MaterialRegistry::new();
        let resolver = MaterialResolver::new(&document, &SamplerTextureCreator, &log, &registry);

        let map = resolver.build_map(&[
            MaterialInstanceRef::new("a", "X"),
            MaterialInstanceRef::new("b", "Y"),
            MaterialInstanceRef::new("c", "X"),
        ]);

        assert_eq!(map.symbols(), vec!["a", "b", "c"]);
        assert!(Arc::ptr_eq(map.get("a").unwrap(), map.get("c").unwrap()));
        assert_eq!(map.get("b").unwrap().id, "Y");
        assert!(log.is_empty());
    }

    #[test]
    fn test_empty_input_gives_empty_map() {
        let document = document();
        let log = DiagnosticLog::new();
        let registry = MaterialRegistry::new();
        let resolver = MaterialResolver::new(&document, &SamplerTextureCreator, &log, &registry);

        assert!(resolver.build_map(&[]).is_empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unknown_material_still_bound_to_default() {
        let document = document();
        let log = DiagnosticLog::new();
        let registry = MaterialRegistry::new();
        let resolver = MaterialResolver::new(&document, &SamplerTextureCreator, &log, &registry);

        let map = resolver.build_map(&[MaterialInstanceRef::new("a", "missing")]);
        assert!(map.get("a").unwrap().is_default());
        assert_eq!(log.warnings(), 1);
        assert_eq!(log.errors(), 0);
    }
}
