use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::{Arc, RwLock};

use log::debug;
use quick_xml::se::Serializer;
use serde::Serialize;

use crate::material::types::{Material, MaterialPtr};
use crate::scene::types::Scene;
use crate::xml::types::{MappingDocument, MappingRecord};
use crate::MaterialIoError;

/// Name to name rebinding table. Duplicate `from` entries are last-wins.
#[derive(Debug, Default)]
pub struct MaterialMap {
    entries: HashMap<String, String>,
}

impl MaterialMap {
    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.entries.insert(from.into(), to.into());
    }

    pub fn get(&self, from: &str) -> Option<&str> {
        self.entries.get(from).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn load_material_mapping(path: impl AsRef<Path>) -> Result<MaterialMap, MaterialIoError> {
    let xml = fs::read_to_string(path)?;
    let document: MappingDocument = quick_xml::de::from_str(&xml)?;

    let mut map = MaterialMap::default();
    for record in document.mappings {
        map.insert(record.from, record.to);
    }
    Ok(map)
}

/// Rebinds every shape whose current material name is mapped to a name
/// present in `materials`. Unmapped names and mappings into the void leave
/// the shape untouched; partial mapping coverage is the normal case, not an
/// error.
pub fn replace_scene_materials(scene: &mut Scene, materials: &[MaterialPtr], mapping: &MaterialMap) {
    let mut by_name: HashMap<String, MaterialPtr> = HashMap::new();
    for material in materials {
        let name = material.read().expect("material lock poisoned").name().to_owned();
        by_name.insert(name, material.clone());
    }

    for shape in scene.shapes_mut() {
        let Some(current) = shape.material() else {
            continue;
        };
        let name = current.read().expect("material lock poisoned").name().to_owned();
        let Some(target) = mapping.get(&name) else {
            continue;
        };
        match by_name.get(target) {
            Some(replacement) => shape.set_material(Some(replacement.clone())),
            None => debug!(
                "mapping target '{}' for '{}' is not in the loaded set, shape keeps its material",
                target, name
            ),
        }
    }
}

/// Writes a template mapping every directly shape-referenced material onto
/// its own name, for users to hand-edit into a real mapping.
pub fn save_identity_mapping(path: impl AsRef<Path>, scene: &Scene) -> Result<(), MaterialIoError> {
    let mut document = MappingDocument::default();
    let mut seen: HashSet<*const RwLock<Material>> = HashSet::new();

    for shape in scene.shapes() {
        let Some(material) = shape.material() else {
            continue;
        };
        if seen.insert(Arc::as_ptr(&material)) {
            let name = material.read().expect("material lock poisoned").name().to_owned();
            document.mappings.push(MappingRecord {
                from: name.clone(),
                to: name,
            });
        }
    }

    let mut xml = String::new();
    let mut serializer = Serializer::with_root(&mut xml, Some("Mappings"))?;
    serializer.indent(' ', 2);
    document.serialize(serializer)?;
    fs::write(path, xml)?;
    Ok(())
}
