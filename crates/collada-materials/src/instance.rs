//! Material bindings produced by geometry instances.

use collada_document::Link;
use serde::{Deserialize, Serialize};

/// One `<instance_material>` of a geometry binding.
///
/// `symbol` matches the material slot names used by the mesh; `material`
/// names the material definition elsewhere in the document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialInstanceRef {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub material: Option<Link>,
}

impl MaterialInstanceRef {
    /// Binding of `symbol` to the local material `material_id`.
    pub fn new(symbol: &str, material_id: &str) -> Self {
        Self {
            symbol: Some(symbol.to_string()),
            material: Some(Link::local(material_id)),
        }
    }
}
