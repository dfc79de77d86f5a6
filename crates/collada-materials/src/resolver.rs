//! Material resolution: instance → material → effect → technique → textures.

use std::sync::Arc;

use collada_config::{MaterialConfig, RegistryKeying};
use collada_document::{ColorOrTexture, EffectTechnique, LinkResolver, MaterialDefinition};

use crate::diagnostics::{DiagnosticSink, Severity};
use crate::instance::MaterialInstanceRef;
use crate::material::{ConvertedMaterial, DEFAULT_MATERIAL_ID};
use crate::registry::MaterialRegistry;
use crate::texture::TextureCreator;

/// Resolves material instance references into shared converted materials.
///
/// Every resolution yields a usable material: any missing hop falls back to
/// the default material and is reported as a [`Severity::Warning`]. The
/// resolver only borrows its collaborators, so one registry can serve many
/// resolvers and threads within a session.
pub struct MaterialResolver<'a> {
    document: &'a dyn LinkResolver,
    textures: &'a dyn TextureCreator,
    diagnostics: &'a dyn DiagnosticSink,
    registry: &'a MaterialRegistry,
    keying: RegistryKeying,
}

impl<'a> MaterialResolver<'a> {
    /// Resolver with [`RegistryKeying::PerMaterial`] keying.
    pub fn new(
        document: &'a dyn LinkResolver,
        textures: &'a dyn TextureCreator,
        diagnostics: &'a dyn DiagnosticSink,
        registry: &'a MaterialRegistry,
    ) -> Self {
        Self {
            document,
            textures,
            diagnostics,
            registry,
            keying: RegistryKeying::default(),
        }
    }

    pub fn with_keying(mut self, keying: RegistryKeying) -> Self {
        self.keying = keying;
        self
    }

    /// Apply the `materials` section of the converter config.
    pub fn with_config(self, config: &MaterialConfig) -> Self {
        self.with_keying(config.registry_keying)
    }

    pub fn keying(&self) -> RegistryKeying {
        self.keying
    }

    pub fn registry(&self) -> &'a MaterialRegistry {
        self.registry
    }

    pub(crate) fn diagnostics(&self) -> &'a dyn DiagnosticSink {
        self.diagnostics
    }

    /// The session's default material; created once, shared afterwards.
    pub fn default_material(&self) -> Arc<ConvertedMaterial> {
        self.registry.default_material()
    }

    /// Resolve one instance reference.
    pub fn resolve(&self, instance: &MaterialInstanceRef) -> Arc<ConvertedMaterial> {
        let Some(material) = self.document.material(instance.material.as_ref()) else {
            let target = instance.material.as_ref().map_or("<none>", |link| link.url());
            self.warn(&format!("Material {target} not found, using default material."));
            return self.default_material();
        };

        let Some(technique) = self
            .document
            .effect(material.effect.as_ref())
            .and_then(|effect| effect.technique.as_ref())
        else {
            self.warn(&format!(
                "Material {} effect not found, using default material.",
                material.id
            ));
            return self.default_material();
        };

        if technique.has_constant_colors() {
            self.warn(&format!(
                "Material {} contains constant colors, colors ignored.",
                material.id
            ));
        }

        if self.keying == RegistryKeying::LegacyDefaultShortCircuit
            && let Some(default) = self.registry.get(DEFAULT_MATERIAL_ID)
        {
            log::trace!("Material {} shadowed by the default material", material.id);
            return default;
        }

        self.registry
            .get_or_insert_with(&material.id, || self.convert(material, technique))
    }

    fn convert(
        &self,
        material: &MaterialDefinition,
        technique: &EffectTechnique,
    ) -> ConvertedMaterial {
        let create =
            |slot: Option<&ColorOrTexture>| self.textures.create_texture(slot, self.diagnostics);
        ConvertedMaterial {
            id: material.id.clone(),
            diffuse: create(technique.diffuse.as_ref()),
            specular: create(technique.specular.as_ref()),
            normal: create(technique.bump.as_ref()),
        }
    }

    fn warn(&self, message: &str) {
        self.diagnostics.emit(Severity::Warning, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticLog;
    use crate::material::ConvertedTexture;
    use crate::texture::SamplerTextureCreator;
    use collada_document::{Document, Link};

    fn document() -> Document {
        Document::from_ron_str(
            r##"(
                materials: [
                    (id: "M1", effect: Some("#E1")),
                    (id: "M2", effect: Some("#E2")),
                    (id: "NoEffect", effect: Some("#E-missing")),
                    (id: "NoTechnique", effect: Some("#E-empty")),
                ],
                effects: [
                    (id: "E1", technique: Some((
                        diffuse: Some(Texture((sampler: "diffuse-sampler"))),
                        bump: Some(Texture((sampler: "bump-sampler"))),
                    ))),
                    (id: "E2", technique: Some(())),
                    (id: "E-empty"),
                ],
            )"##,
        )
        .unwrap()
    }

    /// Fails every texture it is asked for.
    struct RejectingTextures;

    impl TextureCreator for RejectingTextures {
        fn create_texture(
            &self,
            _slot: Option<&ColorOrTexture>,
            _diagnostics: &dyn DiagnosticSink,
        ) -> Option<ConvertedTexture> {
            None
        }
    }

    #[test]
    fn test_resolves_textured_material() {
        let document = document();
        let log = DiagnosticLog::new();
        let registry = MaterialRegistry::new();
        let resolver = MaterialResolver::new(&document, &SamplerTextureCreator, &log, &registry);

        let material = resolver.resolve(&MaterialInstanceRef::new("s", "M1"));
        assert_eq!(material.id, "M1");
        assert_eq!(material.diffuse.as_ref().unwrap().name, "diffuse-sampler");
        assert!(material.specular.is_none());
        assert_eq!(material.normal.as_ref().unwrap().name, "bump-sampler");
        assert!(log.is_empty());
    }

    #[test]
    fn test_failed_textures_keep_material() {
        let document = document();
        let log = DiagnosticLog::new();
        let registry = MaterialRegistry::new();
        let resolver = MaterialResolver::new(&document, &RejectingTextures, &log, &registry);

        let material = resolver.resolve(&MaterialInstanceRef::new("s", "M1"));
        assert_eq!(*material, ConvertedMaterial::untextured("M1"));
        assert!(log.is_empty());
    }

    #[test]
    fn test_absent_link_falls_back() {
        let document = document();
        let log = DiagnosticLog::new();
        let registry = MaterialRegistry::new();
        let resolver = MaterialResolver::new(&document, &SamplerTextureCreator, &log, &registry);

        let instance = MaterialInstanceRef {
            symbol: Some("s".to_string()),
            material: None,
        };
        assert!(resolver.resolve(&instance).is_default());
        assert_eq!(log.warnings(), 1);
    }

    #[test]
    fn test_effect_link_to_material_falls_back() {
        let document = document();
        let log = DiagnosticLog::new();
        let registry = MaterialRegistry::new();
        let resolver = MaterialResolver::new(&document, &SamplerTextureCreator, &log, &registry);

        let instance = MaterialInstanceRef {
            symbol: Some("s".to_string()),
            material: Some(Link::local("E1")),
        };
        assert!(resolver.resolve(&instance).is_default());
        assert!(log.entries()[0].message.contains("not found"));
    }

    #[test]
    fn test_distinct_ids_get_distinct_records() {
        let document = document();
        let log = DiagnosticLog::new();
        let registry = MaterialRegistry::new();
        let resolver = MaterialResolver::new(&document, &SamplerTextureCreator, &log, &registry);

        let m1 = resolver.resolve(&MaterialInstanceRef::new("a", "M1"));
        let m2 = resolver.resolve(&MaterialInstanceRef::new("b", "M2"));
        assert!(!Arc::ptr_eq(&m1, &m2));
        assert_eq!(registry.ids(), vec!["M1".to_string(), "M2".to_string()]);
    }

    #[test]
    fn test_config_selects_keying() {
        let document = document();
        let log = DiagnosticLog::new();
        let registry = MaterialRegistry::new();
        let config = MaterialConfig {
            registry_keying: RegistryKeying::LegacyDefaultShortCircuit,
        };
        let resolver = MaterialResolver::new(&document, &SamplerTextureCreator, &log, &registry)
            .with_config(&config);
        assert_eq!(resolver.keying(), RegistryKeying::LegacyDefaultShortCircuit);
    }

    #[test]
    fn test_missing_technique_and_missing_effect_warn_once_each() {
        let document = document();
        let log = DiagnosticLog::new();
        let registry = MaterialRegistry::new();
        let resolver = MaterialResolver::new(&document, &SamplerTextureCreator, &log, &registry);

        let no_effect = resolver.resolve(&MaterialInstanceRef::new("a", "NoEffect"));
        assert_eq!(log.warnings(), 1);
        let no_technique = resolver.resolve(&MaterialInstanceRef::new("b", "NoTechnique"));
        assert_eq!(log.warnings(), 2);

        assert!(Arc::ptr_eq(&no_effect, &no_technique));
        assert!(no_effect.is_default());
        assert_eq!(registry.len(), 1);
    }
}
