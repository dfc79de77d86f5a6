//! Scene description consumed by the converter binary.

use std::collections::BTreeMap;
use std::path::Path;

use collada_document::{Document, DocumentDesc, DocumentError};
use collada_materials::{ConvertedMaterial, DiagnosticLog, MaterialInstanceRef, MaterialResolver};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned while loading a scene description.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ron parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("invalid document: {0}")]
    Document(#[from] DocumentError),
}

/// A geometry instance and its material bindings.
#[derive(Clone, Debug, Deserialize)]
pub struct GeometryBinding {
    pub name: String,
    #[serde(default)]
    pub materials: Vec<MaterialInstanceRef>,
}

#[derive(Clone, Debug, Deserialize)]
struct SceneDesc {
    #[serde(default)]
    document: DocumentDesc,
    #[serde(default)]
    geometries: Vec<GeometryBinding>,
}

/// Parsed document plus the geometry bindings that reference it.
pub struct Scene {
    pub document: Document,
    pub geometries: Vec<GeometryBinding>,
}

impl Scene {
    pub fn from_ron(path: &Path) -> Result<Self, SceneError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    pub fn from_ron_str(ron_str: &str) -> Result<Self, SceneError> {
        let desc: SceneDesc = ron::from_str(ron_str)?;
        Ok(Self {
            document: Document::from_desc(desc.document)?,
            geometries: desc.geometries,
        })
    }
}

/// Result of converting every geometry's materials.
#[derive(Debug, Serialize)]
pub struct ConversionReport {
    /// geometry → symbol → material id.
    pub geometries: BTreeMap<String, BTreeMap<String, String>>,
    /// Every distinct converted material, sorted by id.
    pub materials: Vec<ConvertedMaterial>,
    pub warnings: usize,
    pub errors: usize,
}

/// Build the material map of every geometry and summarize the session.
pub fn convert(
    scene: &Scene,
    resolver: &MaterialResolver<'_>,
    diagnostics: &DiagnosticLog,
) -> ConversionReport {
    let mut geometries = BTreeMap::new();
    for geometry in &scene.geometries {
        let map = resolver.build_map(&geometry.materials);
        let bindings = map
            .iter()
            .map(|(symbol, material)| (symbol.to_string(), material.id.clone()))
            .collect();
        if geometries.insert(geometry.name.clone(), bindings).is_some() {
            log::warn!("Geometry {} listed twice, keeping the last binding", geometry.name);
        }
    }

    let registry = resolver.registry();
    let materials = registry
        .ids()
        .iter()
        .filter_map(|id| registry.get(id))
        .map(|material| (*material).clone())
        .collect();

    ConversionReport {
        geometries,
        materials,
        warnings: diagnostics.warnings(),
        errors: diagnostics.errors(),
    }
}
